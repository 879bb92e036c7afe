//! Qt Linguist `.ts` documents.
//!
//! A document is a `<TS>` element holding `<context>` groups, each with a
//! `<name>` and a sequence of `<message>` elements. [`TsDocument::parse`]
//! reads one; [`TsDocument::to_ts_string`] writes it back in the layout
//! Qt's lupdate produces, so an untouched document round-trips byte for
//! byte.

mod reader;
mod writer;

use std::path::Path;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::message::{TranslationEntry, TsMessage};

/// Format version written when a document does not carry one.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// A parsed `.ts` document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TsDocument {
    pub version: String,
    /// Target language (`language` attribute), e.g. `it_IT`.
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<TsContext>,
}

/// One `<context>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TsContext {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<TsMessage>,
}

impl TsContext {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
        }
    }
}

impl Default for TsDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl TsDocument {
    /// Parse a document from its text.
    pub fn parse(input: &str) -> Result<Self> {
        reader::parse(input)
    }

    /// Read and parse a `.ts` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let _span = tracing::debug_span!("ts.parse", path = %path.display()).entered();
        Self::parse(&input)
    }

    /// Serialize in lupdate layout.
    #[must_use]
    pub fn to_ts_string(&self) -> String {
        let mut out = String::new();
        writer::write_document(self, &mut out);
        out
    }

    /// Serialize into `sink`.
    pub fn write_to(&self, mut sink: impl std::io::Write) -> std::io::Result<()> {
        sink.write_all(self.to_ts_string().as_bytes())
    }

    /// Total number of messages across all contexts.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Flattened entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = TranslationEntry> + '_ {
        self.contexts.iter().flat_map(|ctx| {
            ctx.messages
                .iter()
                .map(move |msg| TranslationEntry::from_message(&ctx.name, msg))
        })
    }
}
