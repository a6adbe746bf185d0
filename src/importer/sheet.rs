//! Tabular sheet reader
//!
//! Sheets are comma-separated exports with a header row. Fields may be
//! quoted with `"`; a doubled quote inside a quoted field is a literal quote.
//! Fields cannot span lines.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::errors::{ImportError, ImportResult};

/// Data rows of one sheet, header removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Read a sheet from disk
    pub fn read(path: &Path) -> ImportResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parse sheet text. The first non-blank line is the header.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let rows = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .skip(1)
            .map(parse_line)
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

/// Trimmed text of cell `idx`; missing or blank cells are `None`
pub fn cell_text(row: &[String], idx: usize) -> Option<String> {
    row.get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric value of cell `idx`
///
/// Thousands separators are ignored. Blank or malformed cells are `None`.
pub fn cell_decimal(row: &[String], idx: usize) -> Option<Decimal> {
    let raw = cell_text(row, idx)?.replace(',', "");
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}
