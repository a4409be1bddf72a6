//! TaskRecord - サポートチケット 1 件分のデータ
//!
//! # スキーマ
//! 拡張版（receivedFrom / confirmedTo / inTime / outTime / totalHours を持つ形）を
//! 正式なスキーマとして採用しています。
//!
//! # 学習ポイント
//! - `macro_rules!` で選択肢（enum）の定型実装をまとめる
//! - `#[serde(default)]` + `deserialize_with` で「欠けている・壊れている値は空欄」を表現
//! - フィールド名（camelCase）を型 `Field` で扱い、文字列キーの打ち間違いを防ぐ

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clock_time::compute_duration;

/// 選択肢の値が既知のどれにも当てはまらない
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// 選択肢 enum の定型実装
///
/// - `as_str()` は保存・表示に使う正式な表記
/// - `FromStr` は大文字小文字を無視し、別名（旧フォームの小文字値など）も受け付ける
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($text) $(|| wanted.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownChoice {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice_enum! {
    /// Category of the reported problem.
    IssueType, "issue type" {
        Hardware => "Hardware",
        Software => "Software",
        Network => "Network",
    }
}

choice_enum! {
    /// Where the ticket currently stands.
    IssueStatus, "issue status" {
        Pending => "Pending",
        Reject => "Reject",
        Resolve => "Resolve",
    }
}

choice_enum! {
    /// Office the ticket belongs to.
    LocationType, "location type" {
        Skyline => "Skyline",
        Abs => "Ab's" | "Abs",
    }
}

choice_enum! {
    /// Whether the work was done remotely or on site.
    SiteType, "site type" {
        Remote => "Remote",
        Visit => "Visit",
    }
}

/// TaskRecord のフィールド名
///
/// 宣言順 = 保存時のキー順 = エクスポート時の列順。
/// `Ord` も宣言順なので、エラー一覧もこの順に並ぶ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Date,
    Workstation,
    IssueType,
    IssueDescription,
    ResolutionRemark,
    IssueStatus,
    TaskCompletedDate,
    TaskDuration,
    LocationType,
    SiteType,
    ReceivedFrom,
    ConfirmedTo,
    InTime,
    OutTime,
    TotalHours,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Date,
        Field::Workstation,
        Field::IssueType,
        Field::IssueDescription,
        Field::ResolutionRemark,
        Field::IssueStatus,
        Field::TaskCompletedDate,
        Field::TaskDuration,
        Field::LocationType,
        Field::SiteType,
        Field::ReceivedFrom,
        Field::ConfirmedTo,
        Field::InTime,
        Field::OutTime,
        Field::TotalHours,
    ];

    /// JSON キー（camelCase）
    pub fn key(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Workstation => "workstation",
            Field::IssueType => "issueType",
            Field::IssueDescription => "issueDescription",
            Field::ResolutionRemark => "resolutionRemark",
            Field::IssueStatus => "issueStatus",
            Field::TaskCompletedDate => "taskCompletedDate",
            Field::TaskDuration => "taskDuration",
            Field::LocationType => "locationType",
            Field::SiteType => "siteType",
            Field::ReceivedFrom => "receivedFrom",
            Field::ConfirmedTo => "confirmedTo",
            Field::InTime => "inTime",
            Field::OutTime => "outTime",
            Field::TotalHours => "totalHours",
        }
    }

    /// 画面表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Workstation => "Workstation",
            Field::IssueType => "Issue Type",
            Field::IssueDescription => "Issue Description",
            Field::ResolutionRemark => "Resolution Remark",
            Field::IssueStatus => "Status",
            Field::TaskCompletedDate => "Task Completed Date",
            Field::TaskDuration => "Task Duration",
            Field::LocationType => "Location Type",
            Field::SiteType => "Site Type",
            Field::ReceivedFrom => "Received From",
            Field::ConfirmedTo => "Confirmed To",
            Field::InTime => "In Time",
            Field::OutTime => "Out Time",
            Field::TotalHours => "Total Hours",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// SetFieldError は `TaskRecord::set` の失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetFieldError {
    #[error("{0} is derived and cannot be edited")]
    ReadOnly(Field),

    #[error(transparent)]
    InvalidChoice(#[from] UnknownChoice),
}

/// One support ticket.
///
/// Field values are kept as entered (dates as `YYYY-MM-DD`, times as `HH:MM`);
/// the validator decides whether they are acceptable. Choice fields are `None`
/// when blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub workstation: String,
    #[serde(deserialize_with = "lenient::choice")]
    pub issue_type: Option<IssueType>,
    #[serde(deserialize_with = "lenient::text")]
    pub issue_description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub resolution_remark: String,
    #[serde(deserialize_with = "lenient::choice")]
    pub issue_status: Option<IssueStatus>,
    #[serde(deserialize_with = "lenient::text")]
    pub task_completed_date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub task_duration: String,
    #[serde(deserialize_with = "lenient::choice")]
    pub location_type: Option<LocationType>,
    #[serde(deserialize_with = "lenient::choice")]
    pub site_type: Option<SiteType>,
    #[serde(deserialize_with = "lenient::text")]
    pub received_from: String,
    #[serde(deserialize_with = "lenient::text")]
    pub confirmed_to: String,
    #[serde(deserialize_with = "lenient::text")]
    pub in_time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub out_time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub total_hours: String,
}

impl TaskRecord {
    /// 新規作成フォームを開いたときの初期値
    pub fn form_defaults() -> Self {
        Self {
            issue_type: Some(IssueType::Hardware),
            issue_status: Some(IssueStatus::Pending),
            location_type: Some(LocationType::Skyline),
            site_type: Some(SiteType::Visit),
            ..Self::default()
        }
    }

    /// `totalHours` を inTime / outTime から再計算する
    pub fn refresh_total_hours(&mut self) {
        self.total_hours = compute_duration(&self.in_time, &self.out_time)
            .map(|elapsed| elapsed.to_string())
            .unwrap_or_default();
    }

    /// フィールドの値を文字列で取得（空欄は ""）
    pub fn get(&self, field: Field) -> String {
        fn choice<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        match field {
            Field::Date => self.date.clone(),
            Field::Workstation => self.workstation.clone(),
            Field::IssueType => choice(&self.issue_type),
            Field::IssueDescription => self.issue_description.clone(),
            Field::ResolutionRemark => self.resolution_remark.clone(),
            Field::IssueStatus => choice(&self.issue_status),
            Field::TaskCompletedDate => self.task_completed_date.clone(),
            Field::TaskDuration => self.task_duration.clone(),
            Field::LocationType => choice(&self.location_type),
            Field::SiteType => choice(&self.site_type),
            Field::ReceivedFrom => self.received_from.clone(),
            Field::ConfirmedTo => self.confirmed_to.clone(),
            Field::InTime => self.in_time.clone(),
            Field::OutTime => self.out_time.clone(),
            Field::TotalHours => self.total_hours.clone(),
        }
    }

    /// フィールドに値を設定する（フォームの change イベント）
    ///
    /// - 選択肢フィールドは空文字で未選択に戻る
    /// - inTime / outTime の変更で totalHours を再計算
    /// - totalHours は読み取り専用
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), SetFieldError> {
        fn choice<T: FromStr<Err = UnknownChoice>>(value: &str) -> Result<Option<T>, UnknownChoice> {
            if value.trim().is_empty() {
                Ok(None)
            } else {
                value.parse().map(Some)
            }
        }

        let value_owned = value.to_string();
        match field {
            Field::Date => self.date = value_owned,
            Field::Workstation => self.workstation = value_owned,
            Field::IssueType => self.issue_type = choice(value)?,
            Field::IssueDescription => self.issue_description = value_owned,
            Field::ResolutionRemark => self.resolution_remark = value_owned,
            Field::IssueStatus => self.issue_status = choice(value)?,
            Field::TaskCompletedDate => self.task_completed_date = value_owned,
            Field::TaskDuration => self.task_duration = value_owned,
            Field::LocationType => self.location_type = choice(value)?,
            Field::SiteType => self.site_type = choice(value)?,
            Field::ReceivedFrom => self.received_from = value_owned,
            Field::ConfirmedTo => self.confirmed_to = value_owned,
            Field::InTime => {
                self.in_time = value_owned;
                self.refresh_total_hours();
            }
            Field::OutTime => {
                self.out_time = value_owned;
                self.refresh_total_hours();
            }
            Field::TotalHours => return Err(SetFieldError::ReadOnly(field)),
        }
        Ok(())
    }
}

/// 壊れた値・型違いの値を空欄として読むための deserializer
mod lenient {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// 文字列はそのまま、数値・真偽値は文字列化、それ以外は空欄
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }

    /// 既知の選択肢だけを受け付け、それ以外は未選択
    pub fn choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
    }
}
