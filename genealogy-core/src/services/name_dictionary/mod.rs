pub mod hash;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod store;

pub use matcher::names_match;
pub use model::{NameDictionary, NameEntry};
