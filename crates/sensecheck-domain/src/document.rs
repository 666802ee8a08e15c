//! Uploaded documents and their chunks

use crate::DocumentId;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `.xlsx`, `.xls` or `.ods` workbook
    Excel,
    /// `.pdf` file
    Pdf,
}

impl DocumentKind {
    /// Detect the kind from a file name's extension
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_extension("Q3 Model.XLSX"), Some(DocumentKind::Excel));
    /// assert_eq!(DocumentKind::from_extension("deck.pdf"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_extension("notes.txt"), None);
    /// ```
    pub fn from_extension(file_name: &str) -> Option<Self> {
        let ext = file_name.rsplit_once('.')?.1.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xls" | "xlsm" | "ods" => Some(DocumentKind::Excel),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Excel => "excel",
            DocumentKind::Pdf => "pdf",
        }
    }
}

/// Where a chunk came from inside its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkLocation {
    /// Rows of a worksheet
    Sheet {
        /// Worksheet name
        sheet_name: String,
        /// A1 addresses of every non-empty cell in the chunk
        cell_range: Vec<String>,
    },
    /// Text of a PDF page
    Page {
        /// 1-based page index
        page_number: usize,
        /// 1-based position within the page, only when the page was split
        chunk_in_page: Option<usize>,
    },
}

impl ChunkLocation {
    /// Human-readable location, listing at most `max_cells` cell addresses
    pub fn describe(&self, max_cells: usize) -> String {
        match self {
            ChunkLocation::Sheet {
                sheet_name,
                cell_range,
            } => {
                let cells: Vec<&str> = cell_range
                    .iter()
                    .take(max_cells)
                    .map(String::as_str)
                    .collect();
                format!("Sheet: {}, Cells: {}", sheet_name, cells.join(", "))
            }
            ChunkLocation::Page { page_number, .. } => format!("Page: {}", page_number),
        }
    }

    /// Every contributing cell address, `", "`-joined; `None` for pages
    pub fn cell_range_text(&self) -> Option<String> {
        match self {
            ChunkLocation::Sheet { cell_range, .. } => Some(cell_range.join(", ")),
            ChunkLocation::Page { .. } => None,
        }
    }
}

/// Metadata attached to every chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Name of the uploaded file
    pub file_name: String,
    /// Format of the uploaded file
    pub kind: DocumentKind,
    /// Position within the file
    pub location: ChunkLocation,
}

/// A bounded fragment of document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Text content
    pub content: String,
    /// Origin
    pub metadata: ChunkMetadata,
}

/// An uploaded document with its chunk set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier
    pub id: DocumentId,
    /// Original file name
    pub file_name: String,
    /// Format
    pub kind: DocumentKind,
    /// Upload time, seconds since the Unix epoch
    pub upload_time: u64,
    /// Chunks produced at upload
    pub chunks: Vec<DocumentChunk>,
}

impl Document {
    /// Create a document stamped with the current time
    pub fn new(file_name: impl Into<String>, kind: DocumentKind, chunks: Vec<DocumentChunk>) -> Self {
        Self {
            id: DocumentId::new(),
            file_name: file_name.into(),
            kind,
            upload_time: crate::unix_timestamp(),
            chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_location_lists_first_cells() {
        let location = ChunkLocation::Sheet {
            sheet_name: "P&L".to_string(),
            cell_range: ["A1", "B1", "C1", "A2", "B2", "C2", "A3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        assert_eq!(location.describe(5), "Sheet: P&L, Cells: A1, B1, C1, A2, B2");
        assert_eq!(
            location.cell_range_text().unwrap(),
            "A1, B1, C1, A2, B2, C2, A3"
        );
    }

    #[test]
    fn test_page_location() {
        let location = ChunkLocation::Page {
            page_number: 3,
            chunk_in_page: Some(2),
        };
        assert_eq!(location.describe(5), "Page: 3");
        assert_eq!(location.cell_range_text(), None);
    }

    #[test]
    fn test_kind_without_extension() {
        assert_eq!(DocumentKind::from_extension("README"), None);
    }
}
