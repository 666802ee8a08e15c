//! Decoding uploaded files into text

use crate::chunking::SheetGrid;
use crate::error::{DocumentError, Result};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tracing::debug;

/// Read every worksheet of a `.xlsx`, `.xls` or `.ods` workbook
pub fn read_workbook(path: &Path) -> Result<Vec<SheetGrid>> {
    let decode_err = |message: String| DocumentError::Decode {
        file_name: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| decode_err(e.to_string()))?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| decode_err(e.to_string()))?;
        let (first_row, first_col) = range.start().unwrap_or((0, 0));

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        debug!("Sheet '{}': {} rows", name, rows.len());

        sheets.push(SheetGrid {
            name,
            first_row,
            first_col,
            rows,
        });
    }

    Ok(sheets)
}

/// Extract the text of a PDF
pub fn read_pdf_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| DocumentError::Decode {
        file_name: path.display().to_string(),
        message: e.to_string(),
    })
}
