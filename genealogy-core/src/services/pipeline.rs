use std::path::Path;

use tracing::{info, warn};

use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::model::person::{BilingualPersonRecord, PersonRecord};
use crate::services::merge::GenealogyMerger;
use crate::services::name_dictionary::{hash, store};
use crate::services::report::{self, MergeReport};
use crate::services::{encoding, json, output, qa};

pub fn read_person(path: &Path) -> Result<PersonRecord> {
    let decoded = encoding::read_text(path)?;
    json::from_str(&decoded.text).map_err(|e| Error::json(path, e))
}

/// Full batch run: load, merge, check, write. Nothing is written unless every
/// earlier step succeeded.
pub fn run(cfg: &MergeConfig) -> Result<(BilingualPersonRecord, MergeReport)> {
    cfg.validate()?;

    let dictionary = store::load(cfg.dictionary_path.as_deref())?;

    info!("[merge] english: {}", cfg.english_path.display());
    let english = read_person(&cfg.english_path)?;

    info!("[merge] telugu: {}", cfg.telugu_path.display());
    let telugu = read_person(&cfg.telugu_path)?;

    let merger = GenealogyMerger::new(&dictionary);
    let merged = merger.merge_persons(&english, &telugu);

    let value = serde_json::to_value(&merged).map_err(|e| Error::json(&cfg.output_path, e))?;
    let issues = qa::run(&value);
    for issue in &issues {
        warn!("[qa] {} {}: {}", issue.path, issue.code, issue.message);
    }

    let json = output::to_pretty_json(&merged, &cfg.output_path)?;
    output::write_atomic(&cfg.output_path, json.as_bytes())?;

    let stats = report::collect(&merged);
    info!(
        "[merge] {} nodes ({} matched, {} English-only, {} Telugu-only)",
        stats.total_nodes, stats.matched, stats.english_only, stats.telugu_only
    );

    let report = MergeReport {
        output_path: cfg.output_path.display().to_string(),
        size_bytes: json.len(),
        sha256: hash::hash_bytes(json.as_bytes()),
        dictionary_fingerprint: dictionary.fingerprint().to_string(),
        stats,
        root: report::sample(&merged),
        issues: issues.len(),
    };

    Ok((merged, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = MergeConfig {
            english_path: dir.path().join("en.json"),
            telugu_path: dir.path().join("te.json"),
            output_path: dir.path().join("out.json"),
            dictionary_path: None,
        };

        fs::write(&cfg.english_path, r#"{"name":"Adam"}"#).unwrap();

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn invalid_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{ name: Adam").unwrap();

        assert!(matches!(read_person(&path), Err(Error::Json { .. })));
    }
}
