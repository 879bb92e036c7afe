//! Message records shared by the reader, writer, and catalog.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Composite lookup key: context, source text, and optional disambiguation
/// comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl MessageKey {
    /// Build a key. An empty comment is the same as no comment.
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        source: impl Into<String>,
        comment: Option<&str>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }
}

/// Translation state as written in the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TranslationState {
    /// No `type` attribute: the translator approved the text.
    #[default]
    Finished,
    Unfinished,
    /// Source string no longer found by the extractor.
    Vanished,
    Obsolete,
}

impl TranslationState {
    /// Parse a `type` attribute value.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// Attribute value, or `None` for [`TranslationState::Finished`].
    #[must_use]
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

/// A `<location filename=".." line=".."/>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Location {
    pub filename: String,
    /// Kept verbatim: lupdate may write relative lines such as `+3`.
    pub line: Option<String>,
}

/// Body of a `<translation>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Translation {
    Single(String),
    /// Ordered `<numerusform>` variants.
    Plural(Vec<String>),
}

impl Translation {
    /// First (or only) form.
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            Self::Single(text) => text,
            Self::Plural(forms) => forms.first().map_or("", String::as_str),
        }
    }

    /// Whether every form is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// One `<message>` element inside a context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TsMessage {
    /// Optional `id` attribute (id-based translations).
    pub id: Option<String>,
    pub source: String,
    pub comment: Option<String>,
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub locations: Vec<Location>,
    /// `numerus="yes"`.
    pub numerus: bool,
    pub translation: Translation,
    pub state: TranslationState,
}

impl TsMessage {
    /// A finished, non-numerus message with no comments.
    #[must_use]
    pub fn simple(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            numerus: false,
            translation: Translation::Single(translation.into()),
            state: TranslationState::Finished,
        }
    }
}

/// Flattened catalog record for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TranslationEntry {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
    /// Translated text; the first form for numerus messages.
    pub translation: String,
    /// All numerus forms, in order, when the message is plural.
    pub plural_forms: Option<Vec<String>>,
    pub finished: bool,
}

impl TranslationEntry {
    /// Flatten a message belonging to `context`.
    #[must_use]
    pub fn from_message(context: &str, message: &TsMessage) -> Self {
        let plural_forms = match &message.translation {
            Translation::Plural(forms) => Some(forms.clone()),
            Translation::Single(_) => None,
        };
        Self {
            context: context.to_string(),
            source: message.source.clone(),
            comment: message.comment.clone().filter(|c| !c.is_empty()),
            translation: message.translation.first().to_string(),
            plural_forms,
            finished: message.state.is_finished(),
        }
    }

    #[must_use]
    pub fn key(&self) -> MessageKey {
        MessageKey {
            context: self.context.clone(),
            source: self.source.clone(),
            comment: self.comment.clone(),
        }
    }

    /// Whether lookups may serve this entry instead of the source text.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        if !self.finished {
            return false;
        }
        match &self.plural_forms {
            Some(forms) => forms.iter().any(|f| !f.is_empty()),
            None => !self.translation.is_empty(),
        }
    }
}
