//! Wire format of the storage slot.
//!
//! A JSON array of objects: `id` first, then the record's camelCase fields.
//! Reading is forgiving about shape (missing keys, legacy `status` key,
//! records without an id); it only fails when the text is not a JSON array.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{RecordId, TaskRecord};

use super::store::StoredTask;

#[derive(Serialize)]
struct StoredTaskRef<'a> {
    id: RecordId,
    #[serde(flatten)]
    record: &'a TaskRecord,
}

pub fn encode(tasks: &[StoredTask]) -> Result<String, serde_json::Error> {
    let wire: Vec<StoredTaskRef<'_>> = tasks
        .iter()
        .map(|task| StoredTaskRef {
            id: task.id(),
            record: task.record(),
        })
        .collect();
    serde_json::to_string(&wire)
}

/// Entries come back in stored order. `None` ids are assigned by the caller.
pub fn decode(json: &str) -> Result<Vec<(Option<RecordId>, TaskRecord)>, serde_json::Error> {
    let items: Vec<Value> = serde_json::from_str(json)?;

    let mut decoded = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let Value::Object(mut object) = item else {
            warn!(position, "skipping stored entry that is not an object");
            continue;
        };
        let id = take_id(&mut object);
        migrate_legacy_status(&mut object);
        let record: TaskRecord = serde_json::from_value(Value::Object(object))?;
        decoded.push((id, record));
    }
    Ok(decoded)
}

fn take_id(object: &mut Map<String, Value>) -> Option<RecordId> {
    match object.remove("id") {
        Some(Value::String(raw)) => raw.parse().ok(),
        _ => None,
    }
}

/// The old form wrote the chosen status under `status`, next to the default
/// `issueStatus`. The explicit choice wins.
fn migrate_legacy_status(object: &mut Map<String, Value>) {
    if let Some(status) = object.remove("status")
        && !status.is_null()
    {
        object.insert("issueStatus".to_string(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueStatus, IssueType, SiteType};
    use ulid::Ulid;

    #[test]
    fn encode_puts_id_first() {
        let id = RecordId::from(Ulid::new());
        let tasks = vec![StoredTask::new(id, TaskRecord::form_defaults())];

        let json = encode(&tasks).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let first = value[0].as_object().unwrap();

        assert_eq!(first.keys().next().map(String::as_str), Some("id"));
        assert_eq!(first["id"], id.as_ulid().to_string());
        assert_eq!(first["issueType"], "Hardware");
    }

    #[test]
    fn decode_reads_legacy_entries_without_ids() {
        let json = r#"[
            {
                "date": "2024-01-05",
                "workstation": "WS1",
                "issueType": "software",
                "issueStatus": "Pending",
                "status": "Resolve",
                "siteType": "remote"
            }
        ]"#;
        let decoded = decode(json).unwrap();

        assert_eq!(decoded.len(), 1);
        let (id, record) = &decoded[0];
        assert!(id.is_none());
        assert_eq!(record.issue_type, Some(IssueType::Software));
        assert_eq!(record.issue_status, Some(IssueStatus::Resolve));
        assert_eq!(record.site_type, Some(SiteType::Remote));
        assert_eq!(record.in_time, "");
    }

    #[test]
    fn decode_skips_non_objects() {
        let decoded = decode(r#"[1, {"date": "2024-01-01"}, "x"]"#).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].1.date, "2024-01-01");
    }

    #[test]
    fn decode_rejects_non_arrays() {
        assert!(decode(r#"{"date": "2024-01-01"}"#).is_err());
        assert!(decode("not json").is_err());
    }

    #[test]
    fn decode_ignores_bad_ids() {
        let decoded = decode(r#"[{"id": "nope"}, {"id": 7}]"#).unwrap();
        assert!(decoded.iter().all(|(id, _)| id.is_none()));
    }
}
