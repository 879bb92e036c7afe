#![no_main]

use libfuzzer_sys::fuzz_target;
use tscat_i18n::{TranslationCatalog, TsDocument};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // The reader must reject malformed input with an error, never panic.
    let Ok(document) = TsDocument::parse(text) else {
        return;
    };

    // Anything that parses must survive a write/parse cycle unchanged.
    let written = document.to_ts_string();
    let reparsed = TsDocument::parse(&written).expect("written document parses");
    assert_eq!(reparsed, document);

    let catalog = TranslationCatalog::from_document(&document, &Default::default());
    for entry in document.entries() {
        let _ = catalog.translate(&entry.context, &entry.source, entry.comment.as_deref());
        let _ = catalog.translate_plural(&entry.context, &entry.source, None, 21);
    }
});
