//! Validator - 入力チェック
//!
//! # 設計原則
//! - 純粋関数: 同じ入力には同じ結果、副作用なし
//! - 例外を投げない: エラーはフィールドごとのメッセージ（データ）として返す
//! - 評価順は固定: 同じフィールドに複数のルールが当たった場合、後のルールのメッセージが残る
//!
//! # 評価順
//! 1. date 必須
//! 2. taskCompletedDate >= date（両方が日付として読めるときだけ）
//! 3. workstation 必須 + 英数字と空白のみ
//! 4. issueDescription 必須（自由記述）
//! 5. resolutionRemark 必須
//! 6. taskCompletedDate 必須
//! 7. taskDuration 必須 + HH:mm
//! 8. locationType 必須
//! 9. siteType 必須
//! 10. receivedFrom 必須
//! 11. confirmedTo 必須
//! 12. inTime 必須 + 時刻形式
//! 13. outTime 必須 + 時刻形式 + inTime より後

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::clock_time::{ClockTime, ClockTimeError, between};
use super::record::{Field, TaskRecord};

static WORKSTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").expect("workstation pattern compiles"));

/// 時は 1 桁も許容（"2:30" は OK、"24:00" は NG）
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("duration pattern compiles")
});

/// FieldErrors はフィールドごとのエラーメッセージ
///
/// 空 = valid。JSON にすると `{"date": "Date is required.", ...}` の形になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同じフィールドに既にメッセージがあれば上書き（last write wins）
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// フィールド宣言順に並ぶ
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// 候補レコードを検証する
pub fn validate(candidate: &TaskRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&candidate.date) {
        errors.insert(Field::Date, "Date is required.");
    }

    if let (Some(start), Some(completed)) = (
        parse_date(&candidate.date),
        parse_date(&candidate.task_completed_date),
    ) && completed < start
    {
        errors.insert(
            Field::TaskCompletedDate,
            "Completed date cannot be before start date.",
        );
    }

    if is_blank(&candidate.workstation) || !WORKSTATION.is_match(&candidate.workstation) {
        errors.insert(
            Field::Workstation,
            "Workstation must contain only alphanumeric characters.",
        );
    }

    if is_blank(&candidate.issue_description) {
        errors.insert(Field::IssueDescription, "Issue Description is required.");
    }

    if is_blank(&candidate.resolution_remark) {
        errors.insert(Field::ResolutionRemark, "Resolution Remark is required.");
    }

    if is_blank(&candidate.task_completed_date) {
        errors.insert(Field::TaskCompletedDate, "Task Completed Date is required.");
    }

    if is_blank(&candidate.task_duration) {
        errors.insert(Field::TaskDuration, "Task Duration is required.");
    } else if !DURATION.is_match(&candidate.task_duration) {
        errors.insert(
            Field::TaskDuration,
            "Duration must be in HH:mm format (e.g., 02:30)",
        );
    }

    if candidate.location_type.is_none() {
        errors.insert(Field::LocationType, "Location Type is required.");
    }

    if candidate.site_type.is_none() {
        errors.insert(Field::SiteType, "Site Type is required.");
    }

    if is_blank(&candidate.received_from) {
        errors.insert(Field::ReceivedFrom, "Received From is required.");
    }

    if is_blank(&candidate.confirmed_to) {
        errors.insert(Field::ConfirmedTo, "Confirmed To is required.");
    }

    let in_time = check_time(&mut errors, Field::InTime, &candidate.in_time);
    let out_time = check_time(&mut errors, Field::OutTime, &candidate.out_time);

    if let Some(end) = out_time {
        let after_in = in_time.is_some_and(|start| between(start, end).is_some());
        if !after_in {
            errors.insert(Field::OutTime, "Out Time must be after In Time.");
        }
    }

    errors
}

fn check_time(errors: &mut FieldErrors, field: Field, value: &str) -> Option<ClockTime> {
    match ClockTime::parse(value) {
        Ok(time) => Some(time),
        Err(ClockTimeError::Empty) => {
            errors.insert(field, format!("{} is required.", field.label()));
            None
        }
        Err(ClockTimeError::Malformed(_)) => {
            errors.insert(field, format!("{} must be in HH:mm format.", field.label()));
            None
        }
    }
}
