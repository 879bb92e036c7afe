//! Property-based invariant tests for catalogs, numerus rules, and
//! placeholders.
//!
//! 1.  `form_index` is always below `form_count` for every rule
//! 2.  Negative counts select the same form as their absolute value
//! 3.  `for_locale` never panics on arbitrary strings
//! 4.  Lookups of absent keys return the source unchanged
//! 5.  Unfinished entries always fall back to the source
//! 6.  Finished translations are returned verbatim
//! 7.  `arg` is single-pass: replacement values are never re-expanded
//! 8.  Text without `%` is unchanged by substitution
//! 9.  English plurals: n = 1 selects the singular, other n the plural
//! 10. Parsed-then-written documents parse back to the same model
//! 11. Coverage percentage stays within [0, 100]

use proptest::prelude::*;
use tscat_i18n::placeholder;
use tscat_i18n::{NumerusRule, TranslationCatalog, TsContext, TsDocument, TsMessage};

// ── Helpers ──────────────────────────────────────────────────────────

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn single(source: &str, translation: &str, attrs: &str) -> TranslationCatalog {
    let text = format!(
        "<TS version=\"2.1\" language=\"it\"><context><name>Ctx</name>\
         <message><source>{}</source><translation{attrs}>{}</translation></message>\
         </context></TS>",
        escape(source),
        escape(translation)
    );
    TranslationCatalog::load_str(&text).unwrap()
}

/// Printable text that survives XML 1.0 and is not whitespace-only.
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,;:!?&<>%'\"àèéìòù€]{1,40}".prop_filter("not blank", |s| !s.trim().is_empty())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. form_index is in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn form_index_in_range(count in any::<i64>()) {
        for rule in NumerusRule::ALL {
            let index = rule.form_index(count);
            prop_assert!(
                index < rule.form_count(),
                "rule {:?} gave index {} for count {}", rule, index, count
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Negative counts mirror positive counts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negative_counts_use_absolute_value(count in 0i64..=i64::MAX) {
        for rule in NumerusRule::ALL {
            prop_assert_eq!(rule.form_index(-count), rule.form_index(count));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. for_locale never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn for_locale_total(locale in ".{0,24}") {
        let rule = NumerusRule::for_locale(&locale);
        prop_assert!(rule.form_count() >= 1);
        let _ = placeholder::group_separator_for(&locale);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Absent keys fall back to source
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn absent_key_returns_source(
        context in "[A-Za-z]{1,12}",
        source in ".{0,40}",
    ) {
        let catalog = single("Close", "Chiudi", "");
        let expected = if context == "Ctx" && source == "Close" { "Chiudi" } else { source.as_str() };
        prop_assert_eq!(catalog.translate(&context, &source, None), expected);
        let empty = TranslationCatalog::new();
        prop_assert_eq!(empty.translate(&context, &source, None), source.as_str());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Unfinished entries never leak
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unfinished_falls_back(source in text_strategy(), translation in text_strategy()) {
        let catalog = single(&source, &translation, " type=\"unfinished\"");
        prop_assert_eq!(catalog.translate("Ctx", &source, None), source.as_str());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Finished translations are verbatim
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn finished_translation_verbatim(source in text_strategy(), translation in text_strategy()) {
        let catalog = single(&source, &translation, "");
        prop_assert_eq!(catalog.translate("Ctx", &source, None), translation.as_str());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. arg is single-pass
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arg_does_not_reexpand(value in "%[12]{1,3}") {
        let out = placeholder::arg("<%1|%2>", &[&value, "x"]);
        prop_assert_eq!(out, format!("<{value}|x>"));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Text without % is untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn percent_free_text_unchanged(text in "[^%]{0,60}", count in any::<i64>()) {
        prop_assert_eq!(placeholder::substitute_count(&text, count, Some('.')), text.clone());
        prop_assert_eq!(placeholder::arg(&text, &["a", "b"]), text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. English plural selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn english_plural_forms(count in -1000i64..1000) {
        let text = "<TS version=\"2.1\" language=\"en\"><context><name>C</name>\
            <message numerus=\"yes\"><source>%n file(s)</source><translation>\
            <numerusform>%n file</numerusform><numerusform>%n files</numerusform>\
            </translation></message></context></TS>";
        let catalog = TranslationCatalog::load_str(text).unwrap();
        let expected = if count.unsigned_abs() == 1 {
            format!("{count} file")
        } else {
            format!("{count} files")
        };
        prop_assert_eq!(catalog.translate_plural("C", "%n file(s)", None, count), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Write then parse preserves the model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn written_document_parses_back(
        name in "[A-Za-z_]{1,16}",
        pairs in proptest::collection::vec(
            (text_strategy(), "[a-zA-Z0-9 .,&<>%'\"\u{a0}\t\n]{0,30}"),
            1..8,
        ),
    ) {
        let mut context = TsContext::new(name);
        context.messages = pairs
            .iter()
            .map(|(source, translation)| TsMessage::simple(source.clone(), translation.clone()))
            .collect();
        let document = TsDocument {
            language: Some("it_IT".to_string()),
            contexts: vec![context],
            ..TsDocument::default()
        };
        let written = document.to_ts_string();
        let reparsed = TsDocument::parse(&written).unwrap();
        prop_assert_eq!(reparsed, document);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 11. Coverage percentage bounded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_in_bounds(states in proptest::collection::vec(any::<(bool, bool)>(), 0..30)) {
        let mut text = String::from("<TS version=\"2.1\" language=\"it\"><context><name>C</name>");
        for (i, (finished, empty)) in states.iter().enumerate() {
            let kind = if *finished { "" } else { " type=\"unfinished\"" };
            let body = if *empty { "" } else { "tradotto" };
            text.push_str(&format!(
                "<message><source>s{i}</source><translation{kind}>{body}</translation></message>"
            ));
        }
        text.push_str("</context></TS>");
        let report = TranslationCatalog::load_str(&text).unwrap().coverage_report();
        prop_assert!((0.0..=100.0).contains(&report.coverage_percent));
        let usable = states.iter().filter(|(f, e)| *f && !*e).count();
        prop_assert_eq!(report.translated, usable);
    }
}
