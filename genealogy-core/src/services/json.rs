//! JSON parsing without serde_json's nesting cap.
//!
//! Every generation costs two levels (object + `children` array), so the
//! default limit of 128 stops at 64 generations. The stack grows on demand
//! instead.

use serde::de::DeserializeOwned;

pub fn from_str<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();

    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;

    Ok(value)
}
