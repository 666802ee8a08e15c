//! Splitting decoded documents into bounded, location-tagged chunks

use regex::Regex;
use sensecheck_domain::{ChunkLocation, ChunkMetadata, DocumentChunk, DocumentKind};
use std::sync::LazyLock;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern"));

/// One worksheet's cell text, as decoded
///
/// `rows[r][c]` sits at row `first_row + r`, column `first_col + c`
/// (both 0-based).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    /// Worksheet name
    pub name: String,
    /// 0-based row of `rows[0]`
    pub first_row: u32,
    /// 0-based column of each row's first cell
    pub first_col: u32,
    /// Cell text; empty strings for blank cells
    pub rows: Vec<Vec<String>>,
}

/// A1-style address for a 0-based row and column
///
/// # Examples
///
/// ```
/// use sensecheck_documents::cell_address;
///
/// assert_eq!(cell_address(0, 0), "A1");
/// assert_eq!(cell_address(14, 1), "B15");
/// assert_eq!(cell_address(0, 27), "AB1");
/// ```
pub fn cell_address(row: u32, col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", letters.into_iter().collect::<String>(), row + 1)
}

/// Chunks decoded documents
pub struct DocumentChunker {
    max_chunk_chars: usize,
}

impl DocumentChunker {
    /// Create a chunker with the given upper bound on chunk length
    pub fn new(max_chunk_chars: usize) -> Self {
        Self { max_chunk_chars }
    }

    /// Chunk a workbook row by row
    ///
    /// Rows never split: a row that would push a non-empty chunk past the
    /// limit starts the next chunk instead. Each sheet starts a new chunk.
    pub fn chunk_workbook(&self, file_name: &str, sheets: &[SheetGrid]) -> Vec<DocumentChunk> {
        let mut chunks = Vec::new();

        for sheet in sheets {
            let mut content = String::new();
            let mut cells: Vec<String> = Vec::new();

            for (r, row) in sheet.rows.iter().enumerate() {
                let mut values = Vec::new();
                let mut addresses = Vec::new();
                for (c, value) in row.iter().enumerate() {
                    if value.trim().is_empty() {
                        continue;
                    }
                    values.push(value.as_str());
                    addresses.push(cell_address(
                        sheet.first_row + r as u32,
                        sheet.first_col + c as u32,
                    ));
                }
                if values.is_empty() {
                    continue;
                }

                let row_text = format!("{}\n", values.join(" | "));
                let would_be = content.chars().count() + row_text.chars().count();
                if would_be > self.max_chunk_chars && !content.is_empty() {
                    chunks.push(sheet_chunk(file_name, &sheet.name, &content, &cells));
                    content.clear();
                    cells.clear();
                }
                content.push_str(&row_text);
                cells.extend(addresses);
            }

            if !content.trim().is_empty() {
                chunks.push(sheet_chunk(file_name, &sheet.name, &content, &cells));
            }
        }

        chunks
    }

    /// Chunk extracted PDF text, treating blank lines as page boundaries
    pub fn chunk_pdf_text(&self, file_name: &str, text: &str) -> Vec<DocumentChunk> {
        let mut chunks = Vec::new();

        for (idx, page) in text.split("\n\n").enumerate() {
            if page.trim().is_empty() {
                continue;
            }

            let pieces = self.split_page(page);
            let split = pieces.len() > 1;
            for (n, piece) in pieces.into_iter().enumerate() {
                chunks.push(DocumentChunk {
                    content: piece,
                    metadata: ChunkMetadata {
                        file_name: file_name.to_string(),
                        kind: DocumentKind::Pdf,
                        location: ChunkLocation::Page {
                            page_number: idx + 1,
                            chunk_in_page: split.then_some(n + 1),
                        },
                    },
                });
            }
        }

        chunks
    }

    /// Split one page into pieces of at most the limit
    ///
    /// Whole sentences are accumulated; an over-long sentence stays whole.
    /// A page without any sentence terminator is hard-split.
    pub fn split_page(&self, page: &str) -> Vec<String> {
        let page = page.trim();
        if page.chars().count() <= self.max_chunk_chars {
            return vec![page.to_string()];
        }

        let mut sentences: Vec<&str> = SENTENCE.find_iter(page).map(|m| m.as_str()).collect();
        if sentences.is_empty() {
            return self.split_at_char_limit(page);
        }
        let consumed = SENTENCE.find_iter(page).last().map_or(0, |m| m.end());
        let tail = &page[consumed..];
        if !tail.trim().is_empty() {
            sentences.push(tail);
        }

        let mut pieces = Vec::new();
        let mut current = String::new();
        for sentence in sentences {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            let would_be = current.chars().count() + 1 + sentence.chars().count();
            if would_be > self.max_chunk_chars && !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
        }
        if !current.is_empty() {
            pieces.push(current);
        }

        pieces
    }

    fn split_at_char_limit(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.max_chunk_chars)
            .map(|piece| piece.iter().collect())
            .collect()
    }
}

fn sheet_chunk(file_name: &str, sheet_name: &str, content: &str, cells: &[String]) -> DocumentChunk {
    DocumentChunk {
        content: content.to_string(),
        metadata: ChunkMetadata {
            file_name: file_name.to_string(),
            kind: DocumentKind::Excel,
            location: ChunkLocation::Sheet {
                sheet_name: sheet_name.to_string(),
                cell_range: cells.to_vec(),
            },
        },
    }
}
