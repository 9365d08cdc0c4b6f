use sha2::{Digest, Sha256};

use super::model::NameEntry;

pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Order-sensitive digest of a dictionary's entries.
pub fn fingerprint(entries: &[NameEntry]) -> String {
    let mut hasher = Sha256::new();

    for e in entries {
        hasher.update(e.english.as_bytes());
        hasher.update([0x1f]);
        hasher.update(e.telugu.as_bytes());
        hasher.update([0x1e]);
    }

    hex::encode(hasher.finalize())
}
