//! Numerus (plural form) rules.
//!
//! Qt stores plural translations as an ordered list of `<numerusform>`
//! variants whose meaning is fixed per language family. A [`NumerusRule`]
//! maps a count to the index of the form to display.
//!
//! # Invariants
//!
//! 1. `form_index(n) < form_count()` for every `n`.
//! 2. Negative counts select the same form as their absolute value.
//! 3. `for_locale` accepts any string and never panics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plural selection rule for a language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NumerusRule {
    /// Single form (Japanese, Chinese, Korean, Turkish, Hungarian, ...).
    Japanese,
    /// `n == 1` is singular.
    #[default]
    English,
    /// `n <= 1` is singular.
    French,
    Latvian,
    Irish,
    /// Czech and Slovak: 1, 2..=4, other.
    Czech,
    Macedonian,
    Lithuanian,
    /// Russian, Ukrainian, Belarusian, Croatian, Serbian, Bosnian.
    Russian,
    Polish,
    Romanian,
    Slovenian,
    Maltese,
    Welsh,
    Arabic,
}

impl NumerusRule {
    /// All built-in rules.
    pub const ALL: [NumerusRule; 15] = [
        Self::Japanese,
        Self::English,
        Self::French,
        Self::Latvian,
        Self::Irish,
        Self::Czech,
        Self::Macedonian,
        Self::Lithuanian,
        Self::Russian,
        Self::Polish,
        Self::Romanian,
        Self::Slovenian,
        Self::Maltese,
        Self::Welsh,
        Self::Arabic,
    ];

    /// Detect the rule from a locale tag such as `"it"`, `"it_IT"`,
    /// `"pt-BR"`, or `"sl_SI.UTF-8"`.
    ///
    /// Unknown languages use [`NumerusRule::English`].
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let tag = locale.split(['.', '@']).next().unwrap_or("");
        let mut parts = tag.split(['_', '-']);
        let lang = parts.next().unwrap_or("").to_ascii_lowercase();
        let country = parts.next().unwrap_or("").to_ascii_uppercase();

        if lang == "pt" && country == "BR" {
            return Self::French;
        }

        match lang.as_str() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "jv" | "su" | "tr" | "hu" | "fa"
            | "my" | "bo" | "dz" | "yo" | "za" | "tt" | "fj" | "bi" | "na" | "gn" | "om" => {
                Self::Japanese
            }
            "fr" | "hy" | "fil" | "tl" | "oc" | "br" | "ln" | "ak" | "ti" => Self::French,
            "lv" => Self::Latvian,
            "ga" => Self::Irish,
            "cs" | "sk" => Self::Czech,
            "mk" => Self::Macedonian,
            "lt" => Self::Lithuanian,
            "ru" | "uk" | "be" | "hr" | "sr" | "bs" => Self::Russian,
            "pl" => Self::Polish,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "mt" => Self::Maltese,
            "cy" => Self::Welsh,
            "ar" => Self::Arabic,
            _ => Self::English,
        }
    }

    /// Number of `<numerusform>` variants a translation in this family
    /// carries.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Japanese => 1,
            Self::English | Self::French => 2,
            Self::Latvian
            | Self::Irish
            | Self::Czech
            | Self::Macedonian
            | Self::Lithuanian
            | Self::Russian
            | Self::Polish
            | Self::Romanian => 3,
            Self::Slovenian | Self::Maltese | Self::Welsh => 4,
            Self::Arabic => 6,
        }
    }

    /// Index of the form to use for `count`.
    #[must_use]
    pub fn form_index(self, count: i64) -> usize {
        let n = count.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Self::Japanese => 0,
            Self::English => usize::from(n != 1),
            Self::French => usize::from(n > 1),
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Russian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=10).contains(&n100) {
                    1
                } else if (11..20).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            Self::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            Self::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if (3..=10).contains(&n100) {
                    3
                } else if n100 >= 11 {
                    4
                } else {
                    5
                }
            }
        }
    }

    /// Select the form for `count` from `forms`, clamping to the last form
    /// when the translation carries fewer variants than the rule expects.
    #[must_use]
    pub fn select<'a>(self, forms: &'a [String], count: i64) -> Option<&'a str> {
        let last = forms.len().checked_sub(1)?;
        Some(forms[self.form_index(count).min(last)].as_str())
    }
}
