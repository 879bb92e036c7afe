//! Serializer producing lupdate's `.ts` layout.

use std::fmt::Write as _;

use super::TsDocument;
use super::reader::LENGTH_VARIANT_SEPARATOR;
use crate::message::{Translation, TsMessage};

const INDENT_MESSAGE: &str = "    ";
const INDENT_CHILD: &str = "        ";
const INDENT_FORM: &str = "            ";

/// Escape text the way lupdate does.
pub(crate) fn protect(text: &str, out: &mut String) {
    for ch in text.chars() {
        escape(ch, out);
    }
}

/// Element content. U+0000 has no character reference in XML 1.0, so it is
/// written as the legacy `<byte value="x0"/>` element.
fn protect_content(text: &str, out: &mut String) {
    for ch in text.chars() {
        if ch == '\0' {
            out.push_str("<byte value=\"x0\"/>");
        } else {
            escape(ch, out);
        }
    }
}

fn escape(ch: char, out: &mut String) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&apos;"),
        '\t' | '\n' | '\r' => out.push(ch),
        c if u32::from(c) < 0x20 || c == '\u{a0}' => {
            let _ = write!(out, "&#x{:x};", u32::from(c));
        }
        c => out.push(c),
    }
}

fn element(out: &mut String, indent: &str, tag: &str, text: &str) {
    out.push_str(indent);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    protect_content(text, out);
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    protect(value, out);
    out.push('"');
}

pub(super) fn write_document(document: &TsDocument, out: &mut String) {
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS");
    attribute(out, "version", &document.version);
    if let Some(language) = &document.language {
        attribute(out, "language", language);
    }
    if let Some(source_language) = &document.source_language {
        attribute(out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &document.contexts {
        out.push_str("<context>\n");
        element(out, INDENT_MESSAGE, "name", &context.name);
        if let Some(comment) = &context.comment {
            element(out, INDENT_MESSAGE, "comment", comment);
        }
        for message in &context.messages {
            write_message(message, out);
        }
        out.push_str("</context>\n");
    }
    out.push_str("</TS>\n");
}

fn write_message(message: &TsMessage, out: &mut String) {
    out.push_str(INDENT_MESSAGE);
    out.push_str("<message");
    if let Some(id) = &message.id {
        attribute(out, "id", id);
    }
    if message.numerus {
        attribute(out, "numerus", "yes");
    }
    out.push_str(">\n");

    for location in &message.locations {
        out.push_str(INDENT_CHILD);
        out.push_str("<location");
        attribute(out, "filename", &location.filename);
        if let Some(line) = &location.line {
            attribute(out, "line", line);
        }
        out.push_str("/>\n");
    }
    element(out, INDENT_CHILD, "source", &message.source);
    let optional = [
        ("comment", &message.comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (tag, text) in optional {
        if let Some(text) = text {
            element(out, INDENT_CHILD, tag, text);
        }
    }

    out.push_str(INDENT_CHILD);
    out.push_str("<translation");
    if let Some(kind) = message.state.as_attr() {
        attribute(out, "type", kind);
    }
    match &message.translation {
        Translation::Plural(forms) => {
            out.push_str(">\n");
            for form in forms {
                out.push_str(INDENT_FORM);
                write_variants(out, "numerusform", form);
                out.push('\n');
            }
            out.push_str(INDENT_CHILD);
            out.push_str("</translation>\n");
        }
        Translation::Single(text) if text.contains(LENGTH_VARIANT_SEPARATOR) => {
            attribute(out, "variants", "yes");
            out.push_str(">\n");
            for variant in text.split(LENGTH_VARIANT_SEPARATOR) {
                element(out, INDENT_FORM, "lengthvariant", variant);
            }
            out.push_str(INDENT_CHILD);
            out.push_str("</translation>\n");
        }
        Translation::Single(text) => {
            out.push('>');
            protect_content(text, out);
            out.push_str("</translation>\n");
        }
    }
    out.push_str(INDENT_MESSAGE);
    out.push_str("</message>\n");
}

/// `<tag>text</tag>`, or inline `<lengthvariant>` children when `text`
/// carries several variants.
fn write_variants(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    if text.contains(LENGTH_VARIANT_SEPARATOR) {
        attribute(out, "variants", "yes");
        out.push('>');
        for variant in text.split(LENGTH_VARIANT_SEPARATOR) {
            out.push_str("<lengthvariant>");
            protect_content(variant, out);
            out.push_str("</lengthvariant>");
        }
    } else {
        out.push('>');
        protect_content(text, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
