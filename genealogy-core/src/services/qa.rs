//! Checks a bilingual genealogy document against what the UI expects of it.
//!
//! Works on untyped JSON so hand-edited assets can be checked too.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QaIssue {
    /// Location of the node, e.g. `/children/0/_children/2`.
    pub path: String,
    pub code: String,
    pub message: String,
}

pub fn run(tree: &Value) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();
    check_node(tree, "", &mut issues);
    issues
}

fn push(issues: &mut Vec<QaIssue>, path: &str, code: &str, message: impl Into<String>) {
    issues.push(QaIssue {
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        code: code.to_string(),
        message: message.into(),
    });
}

fn check_node(node: &Value, path: &str, issues: &mut Vec<QaIssue>) {
    let obj = match node.as_object() {
        Some(o) => o,
        None => {
            push(issues, path, "NOT_AN_OBJECT", "Node is not a JSON object");
            return;
        }
    };

    check_names(obj, path, issues);
    check_group(obj, path, "spouse", issues);
    check_group(obj, path, "detail", issues);

    for key in ["children", "_children"] {
        match obj.get(key) {
            None => {}
            Some(Value::Array(children)) => {
                for (i, child) in children.iter().enumerate() {
                    check_node(child, &format!("{path}/{key}/{i}"), issues);
                }
            }
            Some(_) => push(
                issues,
                path,
                "INVALID_CHILDREN",
                format!("'{key}' must be an array"),
            ),
        }
    }
}

fn check_names(obj: &Map<String, Value>, path: &str, issues: &mut Vec<QaIssue>) {
    let name_en = obj.get("nameEn").and_then(Value::as_str);
    let name_te = obj.get("nameTe").and_then(Value::as_str);

    if name_en.is_none() {
        push(issues, path, "MISSING_NAME_EN", "'nameEn' is missing or not a string");
    }
    if name_te.is_none() {
        push(issues, path, "MISSING_NAME_TE", "'nameTe' is missing or not a string");
    }

    if let Some(en) = name_en {
        if obj.get("name").and_then(Value::as_str) != Some(en) {
            push(
                issues,
                path,
                "PRIMARY_NAME_MISMATCH",
                format!("'name' should equal nameEn '{en}'"),
            );
        }
    }

    if name_en == Some("") && name_te == Some("") {
        push(issues, path, "NAMELESS_NODE", "Both nameEn and nameTe are empty");
    }
}

/// `spouseEn`/`spouseTe`/`spouse` (likewise `detail*`) come as a set of three.
fn check_group(obj: &Map<String, Value>, path: &str, field: &str, issues: &mut Vec<QaIssue>) {
    let en_key = format!("{field}En");
    let te_key = format!("{field}Te");

    let present = [en_key.as_str(), te_key.as_str(), field]
        .iter()
        .filter(|k| obj.contains_key(**k))
        .count();

    if present == 0 {
        return;
    }

    let upper = field.to_uppercase();

    if present < 3 {
        push(
            issues,
            path,
            &format!("PARTIAL_{upper}_GROUP"),
            format!("Only {present} of {en_key}/{te_key}/{field} present"),
        );
        return;
    }

    let en = obj.get(&en_key).and_then(Value::as_str).unwrap_or("");
    let te = obj.get(&te_key).and_then(Value::as_str).unwrap_or("");
    let primary = obj.get(field).and_then(Value::as_str).unwrap_or("");

    let expected = if !en.is_empty() { en } else { te };
    if primary != expected {
        push(
            issues,
            path,
            &format!("PRIMARY_{upper}_MISMATCH"),
            format!("'{field}' should fall back to '{expected}'"),
        );
    }
}
