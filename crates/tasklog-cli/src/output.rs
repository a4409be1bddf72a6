//! Rendering of store contents and field errors.

use serde::Serialize;
use tasklog_core::domain::{Field, FieldErrors, RecordId, TaskRecord};

#[derive(Serialize)]
struct Row<'a> {
    index: usize,
    id: String,
    #[serde(flatten)]
    record: &'a TaskRecord,
}

const LIST_COLUMNS: [Field; 7] = [
    Field::Date,
    Field::Workstation,
    Field::IssueType,
    Field::IssueStatus,
    Field::SiteType,
    Field::TotalHours,
    Field::ResolutionRemark,
];

pub fn print_list<'a>(
    records: impl Iterator<Item = (RecordId, &'a TaskRecord)>,
    json: bool,
) -> anyhow::Result<()> {
    let rows: Vec<Row<'_>> = records
        .enumerate()
        .map(|(index, (id, record))| Row {
            index,
            id: id.to_string(),
            record,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No tasks available");
        return Ok(());
    }

    let header: Vec<&str> = LIST_COLUMNS.iter().map(Field::label).collect();
    println!("{:>3}  {:<30}  {}", "#", "ID", header.join(" | "));
    for row in &rows {
        let cells: Vec<String> = LIST_COLUMNS.iter().map(|f| row.record.get(*f)).collect();
        println!("{:>3}  {:<30}  {}", row.index, row.id, cells.join(" | "));
    }
    Ok(())
}

pub fn print_errors(errors: &FieldErrors, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }
    for (field, message) in errors.iter() {
        eprintln!("  {:<20} {message}", field.label());
    }
    Ok(())
}
