//! A small element tree over `quick-xml` events.
//!
//! Both the template grammar and the logical-form decoder walk whole
//! documents with sibling checks (e.g. "all children are roles"), which is
//! much simpler over a tree than over a raw event stream. Every element keeps
//! the line and column of its start tag for error reporting.

use std::fmt;

use lfmatch_foundation::{Error, ErrorContext, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Line/column of an element's start tag (both 1-indexed).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Line number.
    pub line: usize,
    /// Column number, in characters.
    pub column: usize,
}

impl Position {
    /// Computes the position of a byte offset in `source`.
    #[must_use]
    pub fn of_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }

    /// Converts into an error context.
    #[must_use]
    pub fn context(self) -> ErrorContext {
        ErrorContext::new().with_position(self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed markup element.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Qualified name as written (`rdf:Description`, `component`).
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Concatenated direct text content, trimmed.
    pub text: String,
    /// Position of the start tag.
    pub position: Position,
}

impl Element {
    /// Looks up an attribute by qualified name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The name without any namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.rsplit_once(':').map_or(self.name.as_str(), |(_, l)| l)
    }

    /// The namespace prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(p, _)| p)
    }

    /// Attaches this element's position to an error.
    #[must_use]
    pub fn locate(&self, err: Error) -> Error {
        if err.context.as_ref().is_some_and(|c| c.line.is_some()) {
            return err;
        }
        let mut context = err.context.clone().unwrap_or_default();
        context.line = Some(self.position.line);
        context.column = Some(self.position.column);
        err.with_context(context)
    }
}

/// Parses a whole document and returns its root element.
///
/// # Errors
///
/// Returns a markup error for malformed input, mismatched tags, more than one
/// root element, text outside the root, or an empty document.
pub fn parse_document(source: &str) -> Result<Element> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let offset = usize::try_from(reader.buffer_position()).unwrap_or(source.len());
        let event = reader.read_event().map_err(|e| {
            let at = usize::try_from(reader.error_position()).unwrap_or(offset);
            Error::markup(e.to_string()).with_context(Position::of_offset(source, at).context())
        })?;

        match event {
            Event::Start(start) => {
                stack.push(open_element(&start, tag_position(source, offset))?);
            }
            Event::Empty(start) => {
                let element = open_element(&start, tag_position(source, offset))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::markup("closing tag without opening tag")
                        .with_context(Position::of_offset(source, offset).context())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| {
                    Error::markup(e.to_string())
                        .with_context(Position::of_offset(source, offset).context())
                })?;
                push_text(&mut stack, &text, source, offset)?;
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut stack, &text, source, offset)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::markup(format!("unclosed <{}>", open.name))
            .with_context(open.position.context()));
    }
    root.ok_or_else(|| Error::markup("document has no root element"))
}

/// Position of the first `<` at or after `offset`: trimmed whitespace sits
/// between the previous event and the tag.
fn tag_position(source: &str, offset: usize) -> Position {
    let start = source
        .get(offset..)
        .and_then(|rest| rest.find('<'))
        .map_or(offset, |i| offset + i);
    Position::of_offset(source, start)
}

fn open_element(start: &BytesStart<'_>, position: Position) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::markup(e.to_string()).with_context(position.context()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::markup(e.to_string()).with_context(position.context()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
        position,
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::markup(format!("second root element <{}>", element.name))
            .with_context(element.position.context()));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, source: &str, offset: usize) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            if !parent.text.is_empty() {
                parent.text.push(' ');
            }
            parent.text.push_str(text);
            Ok(())
        }
        None => Err(Error::markup(format!("text outside root element: {text:?}"))
            .with_context(Position::of_offset(source, offset).context())),
    }
}
