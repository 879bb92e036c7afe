//! Layered catalogs and on-disk catalog discovery.

use std::path::{Path, PathBuf};

use crate::catalog::TranslationCatalog;
use crate::placeholder;

/// Stack of catalogs consulted most-recently-installed first.
///
/// A key is served by the first catalog that holds a finished translation
/// for it; when none does, the source string is returned. Plural lookups
/// also skip catalogs whose form for the requested count is empty.
#[derive(Debug, Clone, Default)]
pub struct TranslatorChain {
    /// Front is the most recently installed catalog.
    catalogs: Vec<TranslationCatalog>,
}

impl TranslatorChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `catalog` ahead of every catalog already installed.
    pub fn install(&mut self, catalog: TranslationCatalog) {
        tracing::debug!(
            target: "tscat.catalog",
            language = catalog.language().unwrap_or(""),
            entries = catalog.len(),
            depth = self.catalogs.len() + 1,
            "translator installed"
        );
        self.catalogs.insert(0, catalog);
    }

    /// Remove the most recently installed catalog for `language`.
    pub fn remove(&mut self, language: &str) -> Option<TranslationCatalog> {
        let index = self
            .catalogs
            .iter()
            .position(|c| c.language() == Some(language))?;
        Some(self.catalogs.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Installed catalogs, most recent first.
    pub fn catalogs(&self) -> impl Iterator<Item = &TranslationCatalog> {
        self.catalogs.iter()
    }

    fn serving(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&TranslationCatalog> {
        self.catalogs
            .iter()
            .find(|c| c.contains(context, source, comment))
    }

    #[must_use]
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        self.serving(context, source, comment)
            .map_or(source, |c| c.translate(context, source, comment))
    }

    /// Plural lookup. On a miss, `%Ln` in the source is grouped per the
    /// most recently installed catalog's language.
    #[must_use]
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: i64,
    ) -> String {
        match self
            .catalogs
            .iter()
            .find(|c| c.contains_plural(context, source, comment, count))
            .or_else(|| self.catalogs.first())
        {
            Some(catalog) => catalog.translate_plural(context, source, comment, count),
            None => placeholder::substitute_count(source, count, None),
        }
    }
}

/// Find the `.ts` file for `locale` in `dir`.
///
/// Tries `{prefix}_{ll}_{CC}.ts`, then `{prefix}_{ll}.ts`, then
/// `{prefix}.ts`. Encoding and modifier suffixes (`.UTF-8`, `@euro`) are
/// ignored and `-` is accepted in place of `_`.
#[must_use]
pub fn locate_catalog(dir: impl AsRef<Path>, prefix: &str, locale: &str) -> Option<PathBuf> {
    let dir = dir.as_ref();
    let locale = locale
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .replace('-', "_");

    let mut candidates = Vec::with_capacity(3);
    let mut stem = locale.as_str();
    while !stem.is_empty() {
        candidates.push(format!("{prefix}_{stem}.ts"));
        stem = match stem.rfind('_') {
            Some(cut) => &stem[..cut],
            None => "",
        };
    }
    candidates.push(format!("{prefix}.ts"));

    let found = candidates
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file());
    tracing::debug!(
        target: "tscat.catalog",
        dir = %dir.display(),
        locale = %locale,
        found = ?found,
        "catalog search"
    );
    found
}
