//! MemorySlot - メモリ上のスロット（テスト・組み込み用）

use crate::ports::{StorageError, StorageSlot};

#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Option<String>,
    writes: usize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既に何か保存されている状態から始める
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// `write` が呼ばれた回数
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
