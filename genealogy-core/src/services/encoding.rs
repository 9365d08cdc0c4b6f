use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
    pub had_bom: bool,
}

pub fn read_text(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode(path, &bytes)
}

/// UTF-8 (with or without BOM) passes through; anything else is sniffed.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<DecodedText> {
    // BOM UTF-8 (EF BB BF)
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return utf8(path, rest, true);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return utf8(path, bytes, false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding: &'static Encoding = detector.guess(None, true);
    let name = encoding.name().to_lowercase();

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::Decode {
            path: path.to_path_buf(),
            encoding: name,
        });
    }

    warn!("[input] {} is not UTF-8, decoded as {name}", path.display());

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: name,
        had_bom: false,
    })
}

fn utf8(path: &Path, bytes: &[u8], had_bom: bool) -> Result<DecodedText> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::Decode {
        path: path.to_path_buf(),
        encoding: "utf-8".into(),
    })?;

    Ok(DecodedText {
        text: text.to_string(),
        encoding: "utf-8".into(),
        had_bom,
    })
}
