#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tscat_i18n::{NumerusRule, placeholder};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    count: i64,
    args: Vec<&'a str>,
    locale: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let separator = placeholder::group_separator_for(input.locale);
    let _ = placeholder::substitute_count(input.text, input.count, separator);
    let _ = placeholder::arg(input.text, &input.args);
    let _ = placeholder::arg_indices(input.text);

    let rule = NumerusRule::for_locale(input.locale);
    assert!(rule.form_index(input.count) < rule.form_count());
});
