//! StorageSlot port - 保存先（名前付きスロット 1 つ）
//!
//! スロットには一覧全体の JSON 配列が入ります。
//! 起動時に 1 回読み、変更が成功するたびに丸ごと上書きします。
//!
//! # 実装
//! - **JsonFileSlot**: ファイル 1 つ（本番用）
//! - **MemorySlot**: メモリ上（テスト・組み込み用）

use std::path::PathBuf;

/// StorageError はスロットの読み書きエラー
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode task list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// StorageSlot は一覧を保存するスロット
///
/// # 設計原則
/// - 書き込みは常に全体置換（部分更新・マージなし）
/// - 読み込みで「まだ何もない」は `Ok(None)`（エラーではない）
pub trait StorageSlot {
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, contents: &str) -> Result<(), StorageError>;
}
