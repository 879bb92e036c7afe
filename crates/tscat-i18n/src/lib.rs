#![forbid(unsafe_code)]

//! Qt Linguist translation catalogs.
//!
//! Reads `.ts` files into a [`TranslationCatalog`] that resolves
//! `(context, source, comment)` keys to translated text, falling back to
//! the source string whenever no finished translation exists.
//!
//! # How it fits together
//! - [`ts`] parses and writes the XML document model, preserving lupdate's
//!   layout so untouched files round-trip unchanged.
//! - [`catalog`] flattens documents into a lookup table.
//! - [`chain`] layers several catalogs, most recently installed first.
//! - [`plural`] and [`placeholder`] implement Qt's numerus selection and
//!   `%n`/`%1` substitution.
//! - [`check`] lints documents for translator mistakes.

pub mod catalog;
pub mod chain;
pub mod check;
pub mod error;
pub mod message;
pub mod placeholder;
pub mod plural;
pub mod ts;

pub use catalog::{
    CatalogOptions, CatalogStats, ContextCoverage, CoverageReport, DuplicatePolicy,
    TranslationCatalog,
};
pub use chain::{TranslatorChain, locate_catalog};
pub use check::{Issue, IssueCode, Severity, check_document, check_document_with};
pub use error::{CatalogError, Result};
pub use message::{
    Location, MessageKey, Translation, TranslationEntry, TranslationState, TsMessage,
};
pub use plural::NumerusRule;
pub use ts::{TsContext, TsDocument};
