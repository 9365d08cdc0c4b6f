use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Pretty JSON (2-space indent) with a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    json.push('\n');
    Ok(json)
}

/// Writes next to `path` first and renames over it, so a failed run never
/// leaves a half-written asset behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| Error::io(&tmp, e))?;

    // rename replaces an existing target in one step
    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "genealogy.json".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
