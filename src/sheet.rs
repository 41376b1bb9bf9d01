//! Spreadsheet persistence for completed records
//!
//! One xlsx workbook, one worksheet, a fixed header row and one data row per
//! saved record, append-only. Every append is a whole-document
//! read-modify-write finished by an atomic rename, so a failed write leaves
//! the previous file untouched.

use crate::state_machine::CompletedRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use umya_spreadsheet::Spreadsheet;

/// Default workbook file, resolved against the process working directory.
pub const SHEET_FILE_NAME: &str = "cadastros_whatsapp.xlsx";
/// The single worksheet holding all records.
pub const WORKSHEET_NAME: &str = "Cadastros";
/// First row of the worksheet, written exactly once before any data row.
pub const HEADER: [&str; 3] = ["Número", "Nome", "Email"];

#[derive(Debug, Error)]
pub enum SheetError {
    /// The file exists but cannot be parsed as a workbook. The append is
    /// abandoned and the caller keeps its in-memory state for a retry.
    #[error("workbook at {path} could not be parsed: {detail}")]
    CorruptDocument { path: PathBuf, detail: String },

    /// Writing the updated workbook failed. The on-disk file is still the
    /// previous version.
    #[error("failed to persist workbook at {path}: {detail}")]
    PersistenceFailure { path: PathBuf, detail: String },
}

pub type SheetResult<T> = Result<T, SheetError>;

/// Append-only store over a single workbook file.
pub struct SheetStore {
    path: PathBuf,
}

impl SheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record strictly after the last existing row.
    ///
    /// Creates the workbook, the worksheet and the header as needed; never
    /// mutates or reorders rows already present.
    pub fn append_record(&self, record: &CompletedRecord) -> SheetResult<()> {
        let mut book = self.load_or_create()?;

        if book.get_sheet_by_name(WORKSHEET_NAME).is_none() {
            let _ = book
                .new_sheet(WORKSHEET_NAME)
                .map_err(|detail| self.persistence_failure(detail.to_string()))?;
        }
        let sheet = book
            .get_sheet_by_name_mut(WORKSHEET_NAME)
            .ok_or_else(|| self.persistence_failure("worksheet missing after creation".into()))?;

        if sheet.get_highest_row() == 0 {
            for (col, title) in (1_u32..).zip(HEADER) {
                sheet.get_cell_mut((col, 1)).set_value(title);
            }
        }

        let row = sheet.get_highest_row() + 1;
        sheet.get_cell_mut((1, row)).set_value(record.numero.as_str());
        sheet.get_cell_mut((2, row)).set_value(record.nome.as_str());
        sheet.get_cell_mut((3, row)).set_value(record.email.as_str());

        self.save(&book)
    }

    fn load_or_create(&self) -> SheetResult<Spreadsheet> {
        if self.path.exists() {
            umya_spreadsheet::reader::xlsx::read(&self.path).map_err(|err| {
                SheetError::CorruptDocument {
                    path: self.path.clone(),
                    detail: format!("{err:?}"),
                }
            })
        } else {
            Ok(umya_spreadsheet::new_file_empty_worksheet())
        }
    }

    /// Serialize the whole workbook to a temp file next to the target and
    /// rename it into place. All-or-nothing at the file level.
    fn save(&self, book: &Spreadsheet) -> SheetResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let tmp = tempfile::Builder::new()
            .prefix(".cadastros")
            .suffix(".xlsx")
            .tempfile_in(dir)
            .map_err(|err| self.persistence_failure(err.to_string()))?;

        umya_spreadsheet::writer::xlsx::write(book, tmp.path())
            .map_err(|err| self.persistence_failure(format!("{err:?}")))?;

        tmp.persist(&self.path)
            .map_err(|err| self.persistence_failure(err.to_string()))?;
        Ok(())
    }

    fn persistence_failure(&self, detail: String) -> SheetError {
        SheetError::PersistenceFailure {
            path: self.path.clone(),
            detail,
        }
    }
}
