//! Line-delimited JSON protocol for driving the core from a host process.
//!
//! Request: `{"id": .., "cmd": "..", "payload": {..}}`, one per line.
//! Response: `{"id": .., "status": "ok", "payload": {..}}` or
//! `{"id": .., "status": "error", "message": ".."}`.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::Error;
use crate::model::person::PersonRecord;
use crate::services::merge::GenealogyMerger;
use crate::services::name_dictionary::{names_match, NameDictionary};
use crate::services::{self, qa, report};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn person_from_payload(payload: &Value, key: &str) -> Result<PersonRecord, Error> {
    let v = payload
        .get(key)
        .cloned()
        .ok_or_else(|| Error::Protocol(format!("payload.{key} is required")))?;

    serde_json::from_value(v).map_err(|e| Error::Protocol(format!("invalid payload.{key}: {e}")))
}

pub fn handle(input: &str, dictionary: &NameDictionary) -> String {
    let req: Value = match services::json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    debug!("[protocol] {cmd_str}");

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "genealogy-core alive" })),

        Command::Merge => {
            let english = match person_from_payload(payload, "english") {
                Ok(p) => p,
                Err(e) => return err(id, e.to_string()),
            };
            let telugu = match person_from_payload(payload, "telugu") {
                Ok(p) => p,
                Err(e) => return err(id, e.to_string()),
            };

            let merged = GenealogyMerger::new(dictionary).merge_persons(&english, &telugu);
            let stats = report::collect(&merged);
            ok(id, json!({ "tree": merged, "stats": stats }))
        }

        Command::NamesMatch => {
            let english = payload.get("english").and_then(|v| v.as_str()).unwrap_or("");
            let telugu = payload.get("telugu").and_then(|v| v.as_str()).unwrap_or("");

            if english.is_empty() { return err(id, "payload.english is required"); }
            if telugu.is_empty() { return err(id, "payload.telugu is required"); }

            ok(id, json!({ "matched": names_match(dictionary, english, telugu) }))
        }

        Command::Check => {
            let tree = match payload.get("tree") {
                Some(t) => t,
                None => return err(id, "payload.tree is required"),
            };
            ok(id, json!({ "issues": qa::run(tree) }))
        }

        Command::DictionaryList => ok(
            id,
            json!({
                "entries": dictionary.entries(),
                "fingerprint": dictionary.fingerprint()
            }),
        ),

        Command::Unknown => err(id, "unknown command"),
    }
}

fn invalid_utf8() -> String {
    json!({
        "status": "error",
        "message": "invalid utf-8"
    })
    .to_string()
}

/// Reads requests until EOF, answering each on its own line.
pub fn serve<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    dictionary: &NameDictionary,
) -> io::Result<()> {
    for raw in reader.split(b'\n') {
        let raw = raw?;

        // a request that is not text still gets an answer, or the host waits forever
        let line = match String::from_utf8(raw) {
            Ok(l) => l,
            Err(_) => {
                writeln!(writer, "{}", invalid_utf8())?;
                writer.flush()?;
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(|| handle(&line, dictionary));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                error!("[protocol] handler panicked");
                json!({
                    "status": "error",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        writeln!(writer, "{response}")?;
        writer.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::name_dictionary::store;

    fn call(line: &str) -> Value {
        let dict = store::bundled().unwrap();
        services::json::from_str(&handle(line, &dict)).unwrap()
    }

    #[test]
    fn ping_echoes_id() {
        let resp = call(r#"{"id": 7, "cmd": "ping"}"#);
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["message"], "genealogy-core alive");
    }

    #[test]
    fn merge_returns_tree_and_stats() {
        let resp = call(
            r#"{"id":"m","cmd":"merge","payload":{
                "english":{"name":"Adam","children":[{"name":"Seth"},{"name":"Cain"}]},
                "telugu":{"name":"ఆదాము","children":[{"name":"కేయిను"}]}}}"#,
        );

        assert_eq!(resp["status"], "ok");
        let children = resp["payload"]["tree"]["children"].as_array().unwrap();
        assert_eq!(children[0]["nameEn"], "Seth");
        assert_eq!(children[0]["nameTe"], "");
        assert_eq!(children[1]["nameTe"], "కేయిను");
        assert_eq!(resp["payload"]["stats"]["total_nodes"], 3);
    }

    #[test]
    fn merge_requires_both_trees() {
        let resp = call(r#"{"id":1,"cmd":"merge","payload":{"english":{"name":"Adam"}}}"#);
        assert_eq!(resp["status"], "error");
        assert!(resp["message"].as_str().unwrap().contains("payload.telugu"));
    }

    #[test]
    fn names_match_command() {
        let resp = call(r#"{"cmd":"names.match","payload":{"english":"Abraham","telugu":"అబ్రాము"}}"#);
        assert_eq!(resp["payload"]["matched"], true);

        let resp = call(r#"{"cmd":"names.match","payload":{"english":"Solomon","telugu":"ఆదాము"}}"#);
        assert_eq!(resp["payload"]["matched"], false);
    }

    #[test]
    fn check_command_reports_issues() {
        let resp = call(r#"{"cmd":"check","payload":{"tree":{"name":"Adam","nameEn":"Adam"}}}"#);
        assert_eq!(resp["payload"]["issues"][0]["code"], "MISSING_NAME_TE");
    }

    #[test]
    fn dictionary_list_has_fingerprint() {
        let resp = call(r#"{"cmd":"dictionary.list"}"#);
        assert_eq!(resp["payload"]["entries"][0]["english"], "Adam");
        assert_eq!(resp["payload"]["fingerprint"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn bad_input_is_an_error_response() {
        assert_eq!(call("not json")["message"], "invalid json");
        assert_eq!(call(r#"{"id":1,"cmd":"nope"}"#)["message"], "unknown command");
    }

    #[test]
    fn serve_answers_each_line_and_skips_blanks() {
        let dict = store::bundled().unwrap();
        let input = "{\"id\":1,\"cmd\":\"ping\"}\n\n{\"id\":2,\"cmd\":\"ping\"}\n";
        let mut out: Vec<u8> = Vec::new();

        serve(input.as_bytes(), &mut out, &dict).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"id\":2"));
    }

    #[test]
    fn non_utf8_line_gets_an_error_response() {
        let dict = store::bundled().unwrap();
        let mut input: Vec<u8> = b"{\"id\":1,\"cmd\":\"ping\"}\n".to_vec();
        input.extend_from_slice(&[0xFF, 0xFE, b'{', b'\n']);
        input.extend_from_slice(b"{\"id\":3,\"cmd\":\"ping\"}\r\n");
        let mut out: Vec<u8> = Vec::new();

        serve(&input[..], &mut out, &dict).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["message"], "invalid utf-8");
        assert_eq!(lines[2]["id"], 3);
    }

    #[test]
    fn merge_accepts_a_hundred_generations() {
        let mut en = json!({ "name": "Generation 100" });
        let mut te = json!({ "name": "తరం 100" });
        for g in (1..100).rev() {
            en = json!({ "name": format!("Generation {g}"), "children": [en] });
            te = json!({ "name": format!("తరం {g}"), "children": [te] });
        }
        let line = json!({ "id": "deep", "cmd": "merge", "payload": { "english": en, "telugu": te } })
            .to_string();

        let resp = call(&line);
        assert_eq!(resp["status"], "ok");
        // only the roots pair up; below them each chain runs in its own language
        let stats = &resp["payload"]["stats"];
        assert_eq!(stats["total_nodes"], 199);
        assert_eq!(stats["english_only"], 99);
        assert_eq!(stats["telugu_only"], 99);
        assert_eq!(stats["max_depth"], 100);
    }
}
