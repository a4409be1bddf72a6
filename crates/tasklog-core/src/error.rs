use thiserror::Error;

use crate::domain::{FieldErrors, RecordId, SetFieldError};
use crate::ports::StorageError;

/// Task Store の操作エラー
///
/// `Invalid` 以外はユーザー操作では起きない想定（画面が正しい index / id しか渡さないため）。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record is invalid: {0}")]
    Invalid(FieldErrors),

    #[error("no record with id {0}")]
    UnknownRecord(RecordId),

    #[error("index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// 変更はメモリ上には反映済み。保存だけが失敗した。
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// フォーム操作のエラー
#[derive(Debug, Error)]
pub enum FormError {
    #[error("no form is open")]
    NotOpen,

    #[error(transparent)]
    Field(#[from] SetFieldError),

    #[error("record is invalid: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for FormError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(errors) => FormError::Invalid(errors),
            other => FormError::Store(other),
        }
    }
}
