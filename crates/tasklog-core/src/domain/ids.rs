//! Record identifiers.
//!
//! # ULID ベースの ID
//! 一覧の位置（index）ではなく、生成された ID でレコードを識別します。
//! 削除で index がずれても、選択状態（selection）は壊れません。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: 生成順に並ぶ
//! - **調整不要**: どこで生成しても衝突しない
//! - **文字列表現**: 保存時は 26 文字の Crockford base32

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Display / FromStr で使うプレフィックス
const PREFIX: &str = "rec-";

/// RecordId は TaskRecord の安定した識別子
///
/// JSON には ULID 文字列そのものとして保存します（プレフィックスなし）。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Ulid);

impl RecordId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for RecordId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

/// RecordIdParseError は文字列からの変換エラー
#[derive(Debug, thiserror::Error)]
#[error("invalid record id '{input}': {source}")]
pub struct RecordIdParseError {
    input: String,
    #[source]
    source: ulid::DecodeError,
}

impl FromStr for RecordId {
    type Err = RecordIdParseError;

    /// `rec-<ulid>` と `<ulid>` の両方を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(PREFIX).unwrap_or(s);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|source| RecordIdParseError {
                input: s.to_string(),
                source,
            })
    }
}
