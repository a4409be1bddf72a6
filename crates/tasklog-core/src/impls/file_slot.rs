//! JsonFileSlot - ファイル 1 つをスロットとして使う

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::{StorageError, StorageSlot};

/// JsonFileSlot はファイルに一覧を保存
///
/// # 実装詳細
/// - ファイルが存在しない = まだ何も保存されていない（`Ok(None)`）
/// - 書き込み時に親ディレクトリを作成
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for JsonFileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, contents).map_err(write_err)?;
        debug!(path = %self.path.display(), bytes = contents.len(), "task list written");
        Ok(())
    }
}
