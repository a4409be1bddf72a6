//! Spreadsheet-shaped view of a batch of records.
//!
//! Columns are the record's own JSON keys in object-key order (the union over
//! all rows, first seen first). Blank choices become empty cells.

use serde::Serialize;
use serde_json::Value;

use super::record::TaskRecord;

pub const SHEET_NAME: &str = "Tasks";
pub const EXPORT_FILE_NAME: &str = "tasks.xlsx";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TaskRecord>) -> Self {
        let objects: Vec<serde_json::Map<String, Value>> = records
            .into_iter()
            .filter_map(|record| match serde_json::to_value(record) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            })
            .collect();

        let mut columns: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|column| cell_text(object.get(column)))
                    .collect()
            })
            .collect();

        Self {
            name: SHEET_NAME.to_string(),
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Field;

    #[test]
    fn columns_follow_record_field_order() {
        let record = TaskRecord::form_defaults();
        let sheet = ExportSheet::from_records([&record]);

        let expected: Vec<String> = Field::ALL.iter().map(|f| f.key().to_string()).collect();
        assert_eq!(sheet.name, "Tasks");
        assert_eq!(sheet.columns, expected);
    }

    #[test]
    fn rows_hold_display_values_and_blank_choices() {
        let mut record = TaskRecord::form_defaults();
        record.workstation = "WS 7".to_string();
        record.site_type = None;

        let sheet = ExportSheet::from_records([&record]);
        let row = &sheet.rows[0];
        let col = |name: &str| sheet.columns.iter().position(|c| c == name).unwrap();

        assert_eq!(row[col("workstation")], "WS 7");
        assert_eq!(row[col("issueType")], "Hardware");
        assert_eq!(row[col("siteType")], "");
    }

    #[test]
    fn no_records_gives_empty_sheet() {
        let sheet = ExportSheet::from_records(std::iter::empty());
        assert!(sheet.is_empty());
        assert!(sheet.columns.is_empty());
    }
}
