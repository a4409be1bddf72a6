//! Exporter port - 表計算ファイルへの書き出し
//!
//! # 実装
//! - **XlsxExporter**: `tasks.xlsx` を書く

use std::path::PathBuf;

use crate::domain::ExportSheet;

/// ExportError はエクスポートの失敗
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// 書き出す行がない（ファイルは作らない）
    #[error("there are no tasks to export")]
    NothingToExport,

    #[error("failed to write spreadsheet {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Exporter はシートを書き出す
pub trait Exporter {
    /// 書き出したファイルのパスを返す
    fn export(&mut self, sheet: &ExportSheet) -> Result<PathBuf, ExportError>;
}
