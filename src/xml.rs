//! XML markup to [`ParsedNode`] tree conversion.
//!
//! The tree follows the usual "merged attributes" shape: attributes and child
//! elements share one mapping, repeated child tags become sequences, and an
//! element with neither attributes nor children collapses to its text.
//! Attribute keys carry [`ATTRIBUTE_PREFIX`](crate::model::ATTRIBUTE_PREFIX).

use crate::error::{Error, Result};
use crate::model::{Element, ParsedNode, TEXT_KEY};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use unicode_normalization::UnicodeNormalization;

/// An element under construction.
struct Frame {
    name: String,
    element: Element,
    has_children: bool,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = Element::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?;
            element.push_attribute(&key, normalize(&value));
        }
        Ok(Self {
            name,
            element,
            has_children: false,
            text: String::new(),
        })
    }

    fn close(self) -> (String, ParsedNode) {
        let Frame {
            name,
            mut element,
            has_children,
            text,
        } = self;

        if element.is_empty() && !has_children {
            return (name, ParsedNode::text(normalize(&text)));
        }
        if !text.trim().is_empty() {
            element.push(TEXT_KEY, ParsedNode::text(normalize(&text)));
        }
        (name, ParsedNode::Element(element))
    }
}

fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/// Parse XML markup into a tree.
///
/// The returned node is an element with a single entry: the root tag.
///
/// # Example
///
/// ```
/// use docxtext::xml;
///
/// let tree = xml::parse("<w:p><w:r><w:t>Hi</w:t></w:r></w:p>")?;
/// let paragraph = tree.get("w:p").and_then(|v| v.first()).unwrap();
/// assert!(paragraph.get("w:r").is_some());
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn parse(xml: &str) -> Result<ParsedNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, ParsedNode)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if root.is_some() {
                    return Err(Error::XmlParse("multiple root elements".to_string()));
                }
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                stack.push(Frame::open(e)?);
            }
            Event::Empty(ref e) => {
                if root.is_some() {
                    return Err(Error::XmlParse("multiple root elements".to_string()));
                }
                let (name, node) = Frame::open(e)?.close();
                attach(&mut stack, &mut root, name, node);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::XmlParse("unexpected closing tag".to_string()))?;
                let (name, node) = frame.close();
                attach(&mut stack, &mut root, name, node);
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(Error::XmlParse(
                            "text outside of the root element".to_string(),
                        ))
                    }
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlParse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.map(|(name, node)| ParsedNode::wrap(name, node))
        .ok_or_else(|| Error::XmlParse("document has no root element".to_string()))
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, ParsedNode)>,
    name: String,
    node: ParsedNode,
) {
    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            parent.element.push(name, node);
        }
        None => *root = Some((name, node)),
    }
}
