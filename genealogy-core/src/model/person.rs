use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One person node as authored in a single-language genealogy file.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PersonRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<Value>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PersonRecord>>,

    /// Collapsed descendants, same shape as `children`.
    #[serde(default, rename = "_children", skip_serializing_if = "Option::is_none")]
    pub hidden_children: Option<Vec<PersonRecord>>,
}

impl PersonRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Stand-in for a sibling that has no counterpart in the other language.
    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            spouse: Some(String::new()),
            detail: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn spouse_text(&self) -> &str {
        self.spouse.as_deref().unwrap_or("")
    }

    pub fn detail_text(&self) -> &str {
        self.detail.as_deref().unwrap_or("")
    }
}

/// Merged node carrying both language variants.
///
/// Key order here is the key order of the generated asset.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BilingualPersonRecord {
    /// Display name, always the English one.
    pub name: String,
    pub name_en: String,
    pub name_te: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<Value>,

    #[serde(flatten)]
    pub spouse: Option<SpouseGroup>,

    #[serde(flatten)]
    pub detail: Option<DetailGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BilingualPersonRecord>>,

    #[serde(default, rename = "_children", skip_serializing_if = "Option::is_none")]
    pub hidden_children: Option<Vec<BilingualPersonRecord>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SpouseGroup {
    #[serde(rename = "spouseEn")]
    pub en: String,

    #[serde(rename = "spouseTe")]
    pub te: String,

    #[serde(rename = "spouse")]
    pub primary: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DetailGroup {
    #[serde(rename = "detailEn")]
    pub en: String,

    #[serde(rename = "detailTe")]
    pub te: String,

    #[serde(rename = "detail")]
    pub primary: String,
}

impl SpouseGroup {
    pub fn from_pair(en: &str, te: &str) -> Option<Self> {
        group_values(en, te).map(|(en, te, primary)| Self { en, te, primary })
    }
}

impl DetailGroup {
    pub fn from_pair(en: &str, te: &str) -> Option<Self> {
        group_values(en, te).map(|(en, te, primary)| Self { en, te, primary })
    }
}

/// English wins when present, Telugu otherwise. `None` when both are empty.
fn group_values(en: &str, te: &str) -> Option<(String, String, String)> {
    if en.is_empty() && te.is_empty() {
        return None;
    }

    let primary = if !en.is_empty() { en } else { te };
    Some((en.to_string(), te.to_string(), primary.to_string()))
}

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // hand-authored data: arrays/objects in a text slot are treated as missing
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(value))
}
