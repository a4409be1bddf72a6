//! Domain model (record, ids, validation, duration, export sheet).
//!
//! ここに置くものはすべて純粋（I/O なし）。状態を持つ Store は `app` 側。

pub mod clock_time;
pub mod export;
pub mod ids;
pub mod record;
pub mod validation;

pub use clock_time::{ClockTime, ClockTimeError, ElapsedTime, compute_duration};
pub use export::{EXPORT_FILE_NAME, ExportSheet, SHEET_NAME};
pub use ids::{RecordId, RecordIdParseError};
pub use record::{
    Field, IssueStatus, IssueType, LocationType, SetFieldError, SiteType, TaskRecord,
    UnknownChoice, UnknownField,
};
pub use validation::{FieldErrors, validate};
