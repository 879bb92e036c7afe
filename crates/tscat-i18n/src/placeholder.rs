//! Qt-style `%` placeholders.
//!
//! Recognised tokens are `%1`..`%99`, their localized form `%L1`..`%L99`,
//! the numerus count `%n`, and its localized form `%Ln`. Every other `%`
//! sequence is literal text.
//!
//! Substitution is single-pass: replacement values are copied verbatim and
//! never scanned for further placeholders.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A placeholder occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Placeholder {
    /// `%k`, or `%Lk` when `localized`.
    Arg { index: u8, localized: bool },
    /// `%n`, or `%Ln` when `localized`.
    Count { localized: bool },
}

impl Placeholder {
    /// Argument index with the locale modifier ignored.
    #[must_use]
    pub fn arg_index(self) -> Option<u8> {
        match self {
            Self::Arg { index, .. } => Some(index),
            Self::Count { .. } => None,
        }
    }
}

/// A token found at byte range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    start: usize,
    end: usize,
    placeholder: Placeholder,
}

fn scan(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let start = i;
        let mut j = i + 1;
        let localized = bytes.get(j) == Some(&b'L');
        if localized {
            j += 1;
        }
        match bytes.get(j) {
            Some(b'n') => {
                tokens.push(Token {
                    start,
                    end: j + 1,
                    placeholder: Placeholder::Count { localized },
                });
                i = j + 1;
            }
            Some(d) if d.is_ascii_digit() && *d != b'0' => {
                let mut index = u32::from(d - b'0');
                let mut end = j + 1;
                if let Some(d2) = bytes.get(end).filter(|b| b.is_ascii_digit()) {
                    index = index * 10 + u32::from(d2 - b'0');
                    end += 1;
                }
                tokens.push(Token {
                    start,
                    end,
                    // At most two digits, so the index fits.
                    placeholder: Placeholder::Arg {
                        index: index as u8,
                        localized,
                    },
                });
                i = end;
            }
            Some(b'%') if !localized => {
                // "%%" is a literal percent sign.
                i = j + 1;
            }
            _ => i = start + 1,
        }
    }
    tokens
}

/// Placeholders in order of appearance.
#[must_use]
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    scan(text).into_iter().map(|t| t.placeholder).collect()
}

/// Numbered argument indices (`%1`, `%L1` alike), sorted, with
/// multiplicity.
#[must_use]
pub fn arg_indices(text: &str) -> Vec<u8> {
    let mut indices: Vec<u8> = scan(text)
        .into_iter()
        .filter_map(|t| t.placeholder.arg_index())
        .collect();
    indices.sort_unstable();
    indices
}

/// Replace `%n` with `count` and `%Ln` with `count` grouped by
/// `group_separator`.
#[must_use]
pub fn substitute_count(text: &str, count: i64, group_separator: Option<char>) -> String {
    let plain = count.to_string();
    let grouped = group_digits(count, group_separator);
    replace_tokens(text, |p| match p {
        Placeholder::Count { localized: false } => Some(plain.as_str()),
        Placeholder::Count { localized: true } => Some(grouped.as_str()),
        Placeholder::Arg { .. } => None,
    })
}

/// Replace `%k` and `%Lk` with `args[k - 1]`.
///
/// Tokens without a matching argument are left as-is.
#[must_use]
pub fn arg(text: &str, args: &[&str]) -> String {
    replace_tokens(text, |p| match p {
        Placeholder::Arg { index, .. } => args.get(usize::from(index) - 1).copied(),
        Placeholder::Count { .. } => None,
    })
}

fn replace_tokens<'a, F>(text: &str, mut value_for: F) -> String
where
    F: FnMut(Placeholder) -> Option<&'a str>,
{
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for token in scan(text) {
        if let Some(value) = value_for(token.placeholder) {
            result.push_str(&text[last..token.start]);
            result.push_str(value);
            last = token.end;
        }
    }
    result.push_str(&text[last..]);
    result
}

/// Thousands separator used by `%Ln` for a locale tag.
///
/// `None` means digits are not grouped.
#[must_use]
pub fn group_separator_for(locale: &str) -> Option<char> {
    let lang = locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match lang.as_str() {
        "it" | "de" | "es" | "pt" | "nl" | "da" | "id" | "tr" | "el" | "sl" | "hr" | "ca"
        | "ro" | "sr" | "ka" => Some('.'),
        "fr" | "ru" | "uk" | "pl" | "cs" | "sk" | "bg" | "hu" | "lt" | "lv" | "fi" | "sv"
        | "nb" | "no" | "et" => Some('\u{a0}'),
        "ar" | "fa" => Some('\u{66c}'),
        "" => None,
        _ => Some(','),
    }
}

fn group_digits(count: i64, separator: Option<char>) -> String {
    let digits = count.unsigned_abs().to_string();
    let Some(sep) = separator else {
        return count.to_string();
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if count < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
