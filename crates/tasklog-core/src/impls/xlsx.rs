//! XlsxExporter - `rust_xlsxwriter` で tasks.xlsx を書く

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::domain::{EXPORT_FILE_NAME, ExportSheet};
use crate::ports::{ExportError, Exporter};

/// XlsxExporter は出力ディレクトリに固定名 `tasks.xlsx` で保存
pub struct XlsxExporter {
    dir: PathBuf,
}

impl XlsxExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.join(EXPORT_FILE_NAME)
    }

    fn write_workbook(sheet: &ExportSheet, path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, name) in sheet.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &header)?;
        }
        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                worksheet.write_string(row as u32 + 1, col as u16, text)?;
            }
        }

        workbook.save(path)
    }
}

impl Exporter for XlsxExporter {
    fn export(&mut self, sheet: &ExportSheet) -> Result<PathBuf, ExportError> {
        if sheet.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let path = self.target_path();
        Self::write_workbook(sheet, &path).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), rows = sheet.row_count(), "spreadsheet exported");
        Ok(path)
    }
}
