//! Translation catalog with source-text fallback.
//!
//! # Invariants
//!
//! 1. **Lookups never fail**: a miss, an unfinished entry, or an empty
//!    translation yields the source string unchanged.
//!
//! 2. **One entry per key**: `(context, source, comment)` maps to at most
//!    one entry. Collisions are resolved by [`DuplicatePolicy`], both within
//!    a file and across [`TranslationCatalog::merge`].
//!
//! 3. **Verbatim text**: translations are returned exactly as loaded.
//!    Placeholders, accelerators, and markup are not interpreted; only
//!    [`TranslationCatalog::translate_plural`] substitutes `%n`/`%Ln`.
//!
//! 4. **Thread safety**: `TranslationCatalog` is `Send + Sync` and has no
//!    interior mutability.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Not in catalog | Source string returned |
//! | Unfinished entry | `type="unfinished"` | Source string returned |
//! | Comment miss | No entry for the comment | Retried without comment |
//! | Too few numerus forms | Translation shorter than the rule | Last form used |
//! | Malformed file | XML or structure error | `Err` from `load*`; `load_or_empty` logs and returns an empty catalog |

use std::collections::HashMap;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::TranslationEntry;
use crate::placeholder;
use crate::plural::NumerusRule;
use crate::ts::TsDocument;

/// Which entry survives when two share a `(context, source, comment)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// The entry loaded later replaces the earlier one.
    #[default]
    LastWins,
    /// The entry loaded first is kept.
    FirstWins,
}

/// Catalog construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct CatalogOptions {
    pub duplicate_policy: DuplicatePolicy,
    /// Overrides the rule detected from the document language.
    pub numerus_rule: Option<NumerusRule>,
}

/// Immutable lookup table for one target language.
///
/// # Example
///
/// ```
/// use tscat_i18n::TranslationCatalog;
///
/// let catalog = TranslationCatalog::load_str(
///     r#"<TS version="2.1" language="it_IT">
///     <context>
///         <name>QAbstractSpinBox</name>
///         <message>
///             <source>&amp;Step up</source>
///             <translation>&amp;Aumenta</translation>
///         </message>
///     </context>
///     </TS>"#,
/// )
/// .unwrap();
///
/// assert_eq!(catalog.translate("QAbstractSpinBox", "&Step up", None), "&Aumenta");
/// assert_eq!(catalog.translate("QAbstractSpinBox", "Step &down", None), "Step &down");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    language: Option<String>,
    rule: NumerusRule,
    group_separator: Option<char>,
    options: CatalogOptions,
    /// context -> source -> entries distinguished by comment.
    contexts: HashMap<String, HashMap<String, Vec<TranslationEntry>>>,
    len: usize,
}

impl TranslationCatalog {
    /// Create an empty catalog. Every lookup returns its source string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog for `language`, with the matching numerus
    /// rule.
    #[must_use]
    pub fn with_language(language: impl Into<String>, options: CatalogOptions) -> Self {
        let language = language.into();
        Self {
            rule: options
                .numerus_rule
                .unwrap_or_else(|| NumerusRule::for_locale(&language)),
            group_separator: placeholder::group_separator_for(&language),
            language: Some(language),
            options,
            contexts: HashMap::new(),
            len: 0,
        }
    }

    /// Build a catalog from a parsed document.
    #[must_use]
    pub fn from_document(document: &TsDocument, options: &CatalogOptions) -> Self {
        let mut catalog = match &document.language {
            Some(language) => Self::with_language(language.clone(), *options),
            None => Self {
                rule: options.numerus_rule.unwrap_or_default(),
                options: *options,
                ..Self::default()
            },
        };
        let mut duplicates = 0usize;
        for entry in document.entries() {
            if catalog.insert(entry) {
                duplicates += 1;
            }
        }
        tracing::debug!(
            target: "tscat.catalog",
            language = catalog.language.as_deref().unwrap_or(""),
            rule = ?catalog.rule,
            entries = catalog.len,
            duplicates,
            "catalog built"
        );
        catalog
    }

    /// Parse catalog text with default options.
    pub fn load_str(input: &str) -> Result<Self> {
        Self::load_str_with(input, &CatalogOptions::default())
    }

    pub fn load_str_with(input: &str, options: &CatalogOptions) -> Result<Self> {
        let document = TsDocument::parse(input)?;
        Ok(Self::from_document(&document, options))
    }

    /// Load a `.ts` file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &CatalogOptions::default())
    }

    pub fn load_with(path: impl AsRef<Path>, options: &CatalogOptions) -> Result<Self> {
        let document = TsDocument::from_path(path)?;
        Ok(Self::from_document(&document, options))
    }

    /// Load a `.ts` file, or log the failure and return an empty catalog so
    /// the application keeps running untranslated.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(
                    target: "tscat.catalog",
                    path = %path.display(),
                    %error,
                    "catalog failed to load; falling back to source strings"
                );
                Self::new()
            }
        }
    }

    /// Insert an entry. Returns `true` when it collided with an existing
    /// key (whichever entry survives per the duplicate policy).
    pub fn insert(&mut self, entry: TranslationEntry) -> bool {
        let by_source = self.contexts.entry(entry.context.clone()).or_default();
        let variants = by_source.entry(entry.source.clone()).or_default();
        match variants.iter_mut().find(|e| e.comment == entry.comment) {
            Some(existing) => {
                tracing::warn!(
                    target: "tscat.catalog",
                    context = %entry.context,
                    source = %entry.source,
                    comment = entry.comment.as_deref().unwrap_or(""),
                    policy = ?self.options.duplicate_policy,
                    "duplicate message key"
                );
                if self.options.duplicate_policy == DuplicatePolicy::LastWins {
                    *existing = entry;
                }
                true
            }
            None => {
                variants.push(entry);
                self.len += 1;
                false
            }
        }
    }

    /// Fold `other` into this catalog; keys present in both are resolved by
    /// this catalog's duplicate policy, `other` counting as loaded later.
    pub fn merge(&mut self, other: TranslationCatalog) {
        if self.language.is_none() {
            if let Some(language) = &other.language {
                let fresh = Self::with_language(language.clone(), self.options);
                self.language = fresh.language;
                self.rule = fresh.rule;
                self.group_separator = fresh.group_separator;
            }
        }
        let mut duplicates = 0usize;
        for entry in other.into_entries() {
            if self.insert(entry) {
                duplicates += 1;
            }
        }
        tracing::debug!(
            target: "tscat.catalog",
            entries = self.len,
            duplicates,
            "catalog merged"
        );
    }

    /// The entry stored under the exact key, finished or not.
    #[must_use]
    pub fn find(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&TranslationEntry> {
        let comment = comment.filter(|c| !c.is_empty());
        self.contexts
            .get(context)
            .and_then(|by_source| by_source.get(source))
            .and_then(|variants| variants.iter().find(|e| e.comment.as_deref() == comment))
    }

    /// The entry a lookup would serve: exact key first, then the
    /// comment-less key. Unfinished and empty entries are skipped.
    fn resolve(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&TranslationEntry> {
        let comment = comment.filter(|c| !c.is_empty());
        let variants = self.contexts.get(context)?.get(source)?;
        let usable = |wanted: Option<&str>| {
            variants
                .iter()
                .find(|e| e.comment.as_deref() == wanted && e.is_usable())
        };
        usable(comment).or_else(|| comment.and_then(|_| usable(None)))
    }

    /// Whether a lookup for this key would be translated.
    #[must_use]
    pub fn contains(&self, context: &str, source: &str, comment: Option<&str>) -> bool {
        self.resolve(context, source, comment).is_some()
    }

    /// Translated text for the key, or `source` unchanged.
    #[must_use]
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        self.resolve(context, source, comment)
            .map_or(source, |entry| entry.translation.as_str())
    }

    /// Plural-aware lookup: picks the numerus form for `count` and
    /// substitutes `%n`/`%Ln`. Falls back to `source` (also substituted).
    #[must_use]
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: i64,
    ) -> String {
        let template = self
            .plural_template(context, source, comment, count)
            .unwrap_or(source);
        placeholder::substitute_count(template, count, self.group_separator)
    }

    /// Whether a plural lookup for this key and `count` would be
    /// translated. Unlike [`contains`](Self::contains), an empty form for
    /// `count` counts as a miss.
    #[must_use]
    pub fn contains_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: i64,
    ) -> bool {
        self.plural_template(context, source, comment, count).is_some()
    }

    fn plural_template(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: i64,
    ) -> Option<&str> {
        self.resolve(context, source, comment)
            .and_then(|entry| match &entry.plural_forms {
                Some(forms) => self.rule.select(forms, count).filter(|f| !f.is_empty()),
                None => Some(entry.translation.as_str()),
            })
    }

    /// Target language tag, if the document declared one.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn numerus_rule(&self) -> NumerusRule {
        self.rule
    }

    #[must_use]
    pub fn options(&self) -> CatalogOptions {
        self.options
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Context names, sorted.
    #[must_use]
    pub fn contexts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.contexts
            .values()
            .flat_map(HashMap::values)
            .flatten()
    }

    fn into_entries(self) -> impl Iterator<Item = TranslationEntry> {
        self.contexts
            .into_values()
            .flat_map(HashMap::into_values)
            .flatten()
    }

    // -----------------------------------------------------------------
    // Statistics & Coverage
    // -----------------------------------------------------------------

    /// Counts over every entry.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            contexts: self.contexts.len(),
            ..CatalogStats::default()
        };
        for entry in self.entries() {
            stats.messages += 1;
            if entry.finished {
                stats.finished += 1;
            } else {
                stats.unfinished += 1;
            }
            if entry.plural_forms.is_some() {
                stats.numerus += 1;
            }
            if entry.is_usable() {
                stats.translated += 1;
            }
        }
        stats
    }

    /// Per-context coverage, sorted by context name. Untranslated sources
    /// are listed sorted.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let mut contexts: Vec<ContextCoverage> = self
            .contexts
            .iter()
            .map(|(name, by_source)| {
                let mut total = 0usize;
                let mut untranslated = Vec::new();
                for entry in by_source.values().flatten() {
                    total += 1;
                    if !entry.is_usable() {
                        untranslated.push(entry.source.clone());
                    }
                }
                untranslated.sort_unstable();
                let translated = total - untranslated.len();
                ContextCoverage {
                    context: name.clone(),
                    total,
                    translated,
                    untranslated,
                    coverage_percent: percent(translated, total),
                }
            })
            .collect();
        contexts.sort_unstable_by(|a, b| a.context.cmp(&b.context));

        let total_messages = contexts.iter().map(|c| c.total).sum();
        let translated = contexts.iter().map(|c| c.translated).sum();
        CoverageReport {
            language: self.language.clone(),
            total_messages,
            translated,
            coverage_percent: percent(translated, total_messages),
            contexts,
        }
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        100.0
    } else {
        (part as f32 / total as f32) * 100.0
    }
}

/// Entry counts for a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CatalogStats {
    pub contexts: usize,
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub numerus: usize,
    /// Entries a lookup would actually serve (finished and non-empty).
    pub translated: usize,
}

/// Coverage of a catalog, by context.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CoverageReport {
    pub language: Option<String>,
    pub total_messages: usize,
    pub translated: usize,
    /// 0.0–100.0; an empty catalog counts as fully covered.
    pub coverage_percent: f32,
    pub contexts: Vec<ContextCoverage>,
}

/// Coverage of one context.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ContextCoverage {
    pub context: String,
    pub total: usize,
    pub translated: usize,
    /// Source strings that fall back to themselves.
    pub untranslated: Vec<String>,
    pub coverage_percent: f32,
}
