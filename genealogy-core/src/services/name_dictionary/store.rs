use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::model::{NameDictionary, NameEntry};
use crate::error::{Error, Result};
use crate::services::{self, encoding};

const BUNDLED: &str = include_str!("../../../data/name_dictionary.json");

/// Loads the dictionary at `path`, or the bundled early-genealogy table.
pub fn load(path: Option<&Path>) -> Result<NameDictionary> {
    let dict = match path {
        Some(p) => {
            let decoded = encoding::read_text(p)?;
            let value: Value =
                services::json::from_str(&decoded.text).map_err(|e| Error::json(p, e))?;
            from_value(&value, &p.display().to_string())?
        }
        None => bundled()?,
    };

    info!(
        "[dictionary] {} names, fingerprint {}",
        dict.len(),
        &dict.fingerprint()[..12]
    );

    Ok(dict)
}

pub fn bundled() -> Result<NameDictionary> {
    let value: Value = serde_json::from_str(BUNDLED)
        .map_err(|e| Error::Dictionary(format!("bundled dictionary: {e}")))?;
    from_value(&value, "bundled")
}

/// Accepts `{ "English": "Telugu", ... }`, keeping file order.
pub fn from_value(value: &Value, origin: &str) -> Result<NameDictionary> {
    let obj = value.as_object().ok_or_else(|| {
        Error::Dictionary(format!("{origin}: expected an object of English → Telugu names"))
    })?;

    let mut entries: Vec<NameEntry> = Vec::with_capacity(obj.len());

    for (english, telugu) in obj {
        let telugu = telugu.as_str().ok_or_else(|| {
            Error::Dictionary(format!("{origin}: value for '{english}' must be a string"))
        })?;

        let english = english.trim();
        let telugu = telugu.trim();

        if english.is_empty() || telugu.is_empty() {
            return Err(Error::Dictionary(format!(
                "{origin}: empty name in entry '{english}' → '{telugu}'"
            )));
        }

        entries.push(NameEntry::new(english, telugu));
    }

    let (dict, shadowed) = NameDictionary::from_entries(entries);

    for te in shadowed {
        warn!(
            "[dictionary] {origin}: '{te}' is mapped from several English names; reverse lookup uses '{}'",
            dict.english_for(&te).unwrap_or_default()
        );
    }

    Ok(dict)
}
