//! Quality checks for translated documents.
//!
//! Only finished messages are checked: unfinished ones are never served,
//! so their content cannot reach users.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::message::{Translation, TsMessage};
use crate::placeholder;
use crate::plural::NumerusRule;
use crate::ts::TsDocument;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IssueCode {
    /// Numbered placeholders differ between source and translation.
    PlaceholderMismatch,
    /// Marked finished but the translation is empty.
    EmptyTranslation,
    /// Numerus form count differs from the language's rule.
    NumerusFormCount,
    /// Source has a keyboard accelerator, translation has none.
    MissingAccelerator,
}

impl IssueCode {
    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaceholderMismatch => "placeholder-mismatch",
            Self::EmptyTranslation => "empty-translation",
            Self::NumerusFormCount => "numerus-form-count",
            Self::MissingAccelerator => "missing-accelerator",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingAccelerator => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One finding, tied to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub context: String,
    pub source: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {:?}: {}",
            self.severity, self.code, self.context, self.source, self.message
        )
    }
}

/// Check every finished message, using the numerus rule for the
/// document's language (form counts are not checked when it has none).
#[must_use]
pub fn check_document(document: &TsDocument) -> Vec<Issue> {
    let rule = document.language.as_deref().map(NumerusRule::for_locale);
    check_document_with(document, rule)
}

/// [`check_document`] with an explicit numerus rule.
#[must_use]
pub fn check_document_with(document: &TsDocument, rule: Option<NumerusRule>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for context in &document.contexts {
        for message in &context.messages {
            if message.state.is_finished() {
                check_message(&context.name, message, rule, &mut issues);
            }
        }
    }
    tracing::debug!(
        target: "tscat.catalog",
        language = document.language.as_deref().unwrap_or(""),
        issues = issues.len(),
        "document checked"
    );
    issues
}

fn check_message(
    context: &str,
    message: &TsMessage,
    rule: Option<NumerusRule>,
    issues: &mut Vec<Issue>,
) {
    let mut report = |code: IssueCode, text: String| {
        issues.push(Issue {
            code,
            severity: code.severity(),
            context: context.to_string(),
            source: message.source.clone(),
            message: text,
        });
    };

    if message.translation.is_empty() {
        report(
            IssueCode::EmptyTranslation,
            "finished translation is empty".to_string(),
        );
        return;
    }

    let expected = placeholder::arg_indices(&message.source);
    match &message.translation {
        Translation::Single(text) => {
            let found = placeholder::arg_indices(text);
            if found != expected {
                report(IssueCode::PlaceholderMismatch, mismatch(&expected, &found));
            }
            if has_accelerator(&message.source) && !has_accelerator(text) {
                report(
                    IssueCode::MissingAccelerator,
                    "source has an accelerator, translation has none".to_string(),
                );
            }
        }
        Translation::Plural(forms) => {
            if let Some(rule) = rule {
                if forms.len() != rule.form_count() {
                    report(
                        IssueCode::NumerusFormCount,
                        format!(
                            "{} numerus forms, {rule:?} rule expects {}",
                            forms.len(),
                            rule.form_count()
                        ),
                    );
                }
            }
            for (index, form) in forms.iter().enumerate() {
                let found = placeholder::arg_indices(form);
                if !form.is_empty() && found != expected {
                    report(
                        IssueCode::PlaceholderMismatch,
                        format!("form {index}: {}", mismatch(&expected, &found)),
                    );
                }
            }
        }
    }
}

fn mismatch(expected: &[u8], found: &[u8]) -> String {
    format!("placeholders {} in source, {} in translation", list(expected), list(found))
}

fn list(indices: &[u8]) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    indices
        .iter()
        .map(|i| format!("%{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `text` marks a mnemonic: `&` followed by a non-space character
/// other than a second `&`.
fn has_accelerator(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            continue;
        }
        match chars.next() {
            Some('&') | None => {}
            Some(next) if !next.is_whitespace() => return true,
            Some(_) => {}
        }
    }
    false
}
