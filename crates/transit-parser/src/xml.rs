//! XML text to and from [`Element`] trees.

use std::io::Write;

use log::trace;
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use transit_core::document::Element;

use crate::error::{Diagnostic, ErrorCode, ParseError, Result as DiagnosticResult};

/// Parses XML text into an element tree.
///
/// Whitespace-only text is dropped; text and CDATA content is unescaped
/// and attached to the enclosing element. Comments, processing
/// instructions and the XML declaration are ignored.
///
/// # Errors
///
/// Returns [`ErrorCode::E003`] if the text is not well-formed or contains
/// no root element.
pub fn parse_document(source: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|err| malformed(err, position))?;

        match event {
            Event::Start(start) => stack.push(open_element(&start, position)?),
            Event::Empty(start) => {
                let element = open_element(&start, position)?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag", position))?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::Text(text) => {
                let content = text.unescape().map_err(|err| malformed(err, position))?;
                match stack.last_mut() {
                    Some(current) => current.push_text(&content),
                    None => return Err(malformed("text outside the root element", position).into()),
                }
            }
            Event::CData(data) => {
                let content = data.into_inner();
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&content));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element `{}`", open.name()), source.len()).into());
    }

    let root = root.ok_or_else(|| malformed("document has no root element", 0))?;
    trace!(root = root.name(), children = root.children().len(); "Document parsed");
    Ok(root)
}

/// Serializes an element tree as indented XML text with a UTF-8
/// declaration.
pub fn unparse_document(root: &Element) -> Result<String, ParseError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|err| serialization(err).into())
}

fn open_element(start: &BytesStart<'_>, position: impl ToString) -> DiagnosticResult<Element> {
    let position = position.to_string();
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| malformed(err, &position))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| malformed(err, &position))?;
        element.set_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: impl ToString,
) -> DiagnosticResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(malformed(
            format!("second root element `{}`", element.name()),
            position,
        ));
    }
    *root = Some(element);
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> DiagnosticResult<()> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    if let Some(text) = element.text() {
        emit(writer, Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name())))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> DiagnosticResult<()> {
    writer.write_event(event).map_err(serialization)
}

fn malformed(err: impl ToString, position: impl ToString) -> Diagnostic {
    Diagnostic::error(format!("malformed XML: {}", err.to_string()))
        .with_code(ErrorCode::E003)
        .with_location(format!("byte {}", position.to_string()))
}

fn serialization(err: impl ToString) -> Diagnostic {
    Diagnostic::error(format!("failed to write document: {}", err.to_string()))
        .with_code(ErrorCode::E004)
}
