use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{hash, normalize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub english: String,
    pub telugu: String,

    /// `alpha_only(english)`, cached for the fuzzy pass.
    #[serde(skip)]
    pub folded: String,
}

impl NameEntry {
    pub fn new(english: impl Into<String>, telugu: impl Into<String>) -> Self {
        let english = english.into();
        let folded = normalize::alpha_only(&english);
        Self {
            english,
            telugu: telugu.into(),
            folded,
        }
    }
}

/// Canonical English → Telugu name table with its derived inverse.
#[derive(Debug, Clone, Default)]
pub struct NameDictionary {
    entries: Vec<NameEntry>,
    forward: HashMap<String, String>,
    inverse: HashMap<String, String>,
    fingerprint: String,
}

impl NameDictionary {
    /// Builds both lookup directions. When two English names share a Telugu
    /// form the later one owns the inverse slot; those Telugu names are returned.
    pub fn from_entries(entries: Vec<NameEntry>) -> (Self, Vec<String>) {
        let mut forward = HashMap::with_capacity(entries.len());
        let mut inverse: HashMap<String, String> = HashMap::with_capacity(entries.len());
        let mut shadowed = Vec::new();

        for e in &entries {
            forward.insert(e.english.clone(), e.telugu.clone());
            if inverse.insert(e.telugu.clone(), e.english.clone()).is_some() {
                shadowed.push(e.telugu.clone());
            }
        }

        let fingerprint = hash::fingerprint(&entries);

        (
            Self {
                entries,
                forward,
                inverse,
                fingerprint,
            },
            shadowed,
        )
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn telugu_for(&self, english: &str) -> Option<&str> {
        self.forward.get(english).map(String::as_str)
    }

    pub fn english_for(&self, telugu: &str) -> Option<&str> {
        self.inverse.get(telugu).map(String::as_str)
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
