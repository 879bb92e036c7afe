//! Errors raised while loading or parsing a translation catalog.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from catalog loading.
///
/// Lookup misses are never errors; only loading can fail, and a failed load
/// never yields a partially built catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not well-formed XML.
    #[error("malformed XML at {line}:{column}: {message}")]
    Xml {
        line: usize,
        column: usize,
        message: String,
    },

    /// A required child element is absent.
    #[error("<{parent}> at line {line} is missing required <{element}>")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        line: usize,
    },

    /// The document element is something other than `<TS>`.
    #[error("expected <TS> document element, found <{found}>")]
    UnexpectedRoot { found: String },

    /// An attribute carries a value outside its domain.
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// Reading a catalog file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// 1-based line and column of a byte offset within `input`.
pub(crate) fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let before = &input[..end];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
