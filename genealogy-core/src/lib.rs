//! Bilingual (English/Telugu) genealogy merge core.
//!
//! Aligns an English and a Telugu person tree into one tree whose nodes carry
//! both name variants, using a configurable English → Telugu name dictionary.

pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod services;

pub use config::MergeConfig;
pub use error::{Error, Result};
pub use model::person::{BilingualPersonRecord, PersonRecord};
pub use services::merge::GenealogyMerger;
pub use services::name_dictionary::{names_match, NameDictionary};
