//! Pull parser for `.ts` documents.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{DEFAULT_TS_VERSION, TsContext, TsDocument};
use crate::error::{CatalogError, Result, line_col};
use crate::message::{Location, Translation, TranslationState, TsMessage};

/// Separator Qt uses between `<lengthvariant>` texts.
pub(crate) const LENGTH_VARIANT_SEPARATOR: &str = "\u{9c}";

pub(super) fn parse(input: &str) -> Result<TsDocument> {
    let mut reader = TsReader::new(input);
    let document = reader.document()?;
    tracing::debug!(
        target: "tscat.ts",
        language = document.language.as_deref().unwrap_or(""),
        contexts = document.contexts.len(),
        messages = document.message_count(),
        "parsed ts document"
    );
    Ok(document)
}

struct TsReader<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

impl<'a> TsReader<'a> {
    fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        // Translations may start or end with whitespace.
        reader.trim_text(false);
        Self { input, reader }
    }

    fn line(&self) -> usize {
        line_col(self.input, self.reader.buffer_position()).0
    }

    fn xml_error(&self, message: impl Into<String>) -> CatalogError {
        let (line, column) = line_col(self.input, self.reader.buffer_position());
        CatalogError::Xml {
            line,
            column,
            message: message.into(),
        }
    }

    fn unexpected_eof(&self, inside: &str) -> CatalogError {
        self.xml_error(format!("unexpected end of document inside <{inside}>"))
    }

    fn next_event(&mut self) -> Result<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(err) => Err(self.xml_error(err.to_string())),
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
        for attr in start.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err.to_string()))?;
            if attr.key.as_ref() == key {
                let value = attr
                    .unescape_value()
                    .map_err(|err| self.xml_error(err.to_string()))?;
                // Attributes cannot carry `<byte>`, so NUL has no written form.
                if value.contains('\0') {
                    return Err(self.xml_error("NUL character in attribute value"));
                }
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn document(&mut self) -> Result<TsDocument> {
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    let mut document = self.header(&start)?;
                    self.body(&mut document)?;
                    self.trailer()?;
                    return Ok(document);
                }
                Event::Empty(start) => {
                    let document = self.header(&start)?;
                    self.trailer()?;
                    return Ok(document);
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.xml_error("text before the document element"));
                }
                Event::Eof => return Err(self.xml_error("document has no <TS> element")),
                _ => {}
            }
        }
    }

    fn header(&self, start: &BytesStart<'_>) -> Result<TsDocument> {
        if start.name().as_ref() != b"TS" {
            return Err(CatalogError::UnexpectedRoot {
                found: tag_name(start),
            });
        }
        Ok(TsDocument {
            version: self
                .attribute(start, b"version")?
                .unwrap_or_else(|| DEFAULT_TS_VERSION.to_string()),
            language: self.attribute(start, b"language")?.filter(|l| !l.is_empty()),
            source_language: self
                .attribute(start, b"sourcelanguage")?
                .filter(|l| !l.is_empty()),
            contexts: Vec::new(),
        })
    }

    fn body(&mut self, document: &mut TsDocument) -> Result<()> {
        loop {
            match self.next_event()? {
                Event::Start(start) if start.name().as_ref() == b"context" => {
                    let line = self.line();
                    let context = self.context(line)?;
                    document.contexts.push(context);
                }
                Event::Empty(start) if start.name().as_ref() == b"context" => {
                    return Err(CatalogError::MissingElement {
                        element: "name",
                        parent: "context",
                        line: self.line(),
                    });
                }
                Event::Start(start) => self.skip(&start)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }
    }

    fn trailer(&mut self) -> Result<()> {
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(()),
                Event::Start(_) | Event::Empty(_) => {
                    return Err(self.xml_error("content after the document element"));
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.xml_error("content after the document element"));
                }
                _ => {}
            }
        }
    }

    fn context(&mut self, line: usize) -> Result<TsContext> {
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"name" => name = Some(self.text()?),
                    b"comment" => comment = Some(self.text()?),
                    b"message" => {
                        let line = self.line();
                        messages.push(self.message(&child, line)?);
                    }
                    _ => self.skip(&child)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"message" => {
                        return Err(CatalogError::MissingElement {
                            element: "source",
                            parent: "message",
                            line: self.line(),
                        });
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }
        let name = name.ok_or(CatalogError::MissingElement {
            element: "name",
            parent: "context",
            line,
        })?;
        Ok(TsContext {
            name,
            comment,
            messages,
        })
    }

    fn message(&mut self, start: &BytesStart<'_>, line: usize) -> Result<TsMessage> {
        let id = self.attribute(start, b"id")?;
        let numerus = match self.attribute(start, b"numerus")?.as_deref() {
            None | Some("no") => false,
            Some("yes") => true,
            Some(other) => {
                return Err(CatalogError::InvalidAttribute {
                    element: "message",
                    attribute: "numerus",
                    value: other.to_string(),
                });
            }
        };

        let mut source = None;
        let mut comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();
        let mut translation = None;
        loop {
            match self.next_event()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"source" => source = Some(self.text()?),
                    b"comment" => comment = Some(self.text()?),
                    b"extracomment" => extra_comment = Some(self.text()?),
                    b"translatorcomment" => translator_comment = Some(self.text()?),
                    b"translation" => {
                        let line = self.line();
                        translation = Some(self.translation(&child, numerus, false, line)?);
                    }
                    b"location" => {
                        locations.push(self.location(&child)?);
                        self.skip(&child)?;
                    }
                    _ => self.skip(&child)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"source" => source = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"extracomment" => extra_comment = Some(String::new()),
                    b"translatorcomment" => translator_comment = Some(String::new()),
                    b"translation" => {
                        let line = self.line();
                        translation = Some(self.translation(&child, numerus, true, line)?);
                    }
                    b"location" => locations.push(self.location(&child)?),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }

        let source = source.ok_or(CatalogError::MissingElement {
            element: "source",
            parent: "message",
            line,
        })?;
        let (translation, state) = translation.ok_or(CatalogError::MissingElement {
            element: "translation",
            parent: "message",
            line,
        })?;
        Ok(TsMessage {
            id,
            source,
            comment,
            extra_comment,
            translator_comment,
            locations,
            numerus,
            translation,
            state,
        })
    }

    fn location(&self, start: &BytesStart<'_>) -> Result<Location> {
        Ok(Location {
            filename: self.attribute(start, b"filename")?.unwrap_or_default(),
            line: self.attribute(start, b"line")?,
        })
    }

    fn translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
        empty: bool,
        line: usize,
    ) -> Result<(Translation, TranslationState)> {
        let state = match self.attribute(start, b"type")? {
            None => TranslationState::Finished,
            Some(value) => match TranslationState::from_attr(&value) {
                Some(state) => state,
                None => {
                    return Err(CatalogError::InvalidAttribute {
                        element: "translation",
                        attribute: "type",
                        value,
                    });
                }
            },
        };

        if !numerus {
            let text = if empty { String::new() } else { self.text()? };
            return Ok((Translation::Single(text), state));
        }

        let mut forms = Vec::new();
        if !empty {
            loop {
                match self.next_event()? {
                    Event::Start(child) if child.name().as_ref() == b"numerusform" => {
                        forms.push(self.text()?);
                    }
                    Event::Empty(child) if child.name().as_ref() == b"numerusform" => {
                        forms.push(String::new());
                    }
                    Event::Start(child) => self.skip(&child)?,
                    Event::End(_) => break,
                    Event::Eof => return Err(self.unexpected_eof("translation")),
                    _ => {}
                }
            }
        }
        if forms.is_empty() {
            return Err(CatalogError::MissingElement {
                element: "numerusform",
                parent: "translation",
                line,
            });
        }
        Ok((Translation::Plural(forms), state))
    }

    /// Character data up to the end of the current element, with entities
    /// decoded. `<lengthvariant>` children are joined with
    /// [`LENGTH_VARIANT_SEPARATOR`].
    fn text(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut variants: Vec<String> = Vec::new();
        loop {
            match self.next_event()? {
                Event::Text(chunk) => {
                    let decoded = chunk
                        .unescape()
                        .map_err(|err| self.xml_error(err.to_string()))?;
                    text.push_str(&decoded);
                }
                Event::CData(chunk) => {
                    let raw = chunk.into_inner();
                    let decoded = std::str::from_utf8(&raw)
                        .map_err(|err| self.xml_error(err.to_string()))?;
                    text.push_str(decoded);
                }
                Event::Start(child) if child.name().as_ref() == b"lengthvariant" => {
                    variants.push(self.text()?);
                }
                Event::Empty(child) if child.name().as_ref() == b"lengthvariant" => {
                    variants.push(String::new());
                }
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    text.push(self.byte(&child)?);
                }
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("text")),
                _ => {}
            }
        }
        if variants.is_empty() {
            Ok(text)
        } else {
            Ok(variants.join(LENGTH_VARIANT_SEPARATOR))
        }
    }

    /// Legacy `<byte value="x1b"/>` escape for control characters.
    fn byte(&self, start: &BytesStart<'_>) -> Result<char> {
        let value = self.attribute(start, b"value")?.unwrap_or_default();
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or(CatalogError::InvalidAttribute {
                element: "byte",
                attribute: "value",
                value,
            })
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(self.unexpected_eof(&tag_name(start))),
                _ => {}
            }
        }
    }
}
