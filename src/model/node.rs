//! Generic parsed XML tree.
//!
//! Every XML part is turned into a [`ParsedNode`]: either a text leaf or an
//! element mapping tag names to a single child or an ordered sequence of
//! children. Attributes share the mapping with child elements under keys
//! carrying [`ATTRIBUTE_PREFIX`], so they never collide with child tags.

/// Prefix marking attribute entries (`@w:rsidR`, `@xml:space`).
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key under which an element stores its own text when it also carries
/// attributes or child elements.
pub const TEXT_KEY: &str = "_";

/// A node of the parsed XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    /// Character data (or an attribute value).
    Text(String),
    /// An element with its attributes and children.
    Element(Element),
}

/// The value stored under one tag name of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// The tag occurred once.
    One(ParsedNode),
    /// The tag repeated; children kept in document order.
    Many(Vec<ParsedNode>),
}

/// Mapping from tag (or attribute) name to child node(s).
///
/// Entries are kept in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    entries: Vec<(String, NodeValue)>,
}

impl ParsedNode {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        ParsedNode::Text(text.into())
    }

    /// Wrap a single named child into a new element.
    pub fn wrap(tag: impl Into<String>, child: ParsedNode) -> Self {
        let mut element = Element::new();
        element.push(tag, child);
        ParsedNode::Element(element)
    }

    /// Borrow the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ParsedNode::Element(element) => Some(element),
            ParsedNode::Text(_) => None,
        }
    }

    /// Borrow the text, if this node is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedNode::Text(text) => Some(text),
            ParsedNode::Element(_) => None,
        }
    }

    /// Text content of the node: the leaf itself, or the element's text key.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            ParsedNode::Text(text) => Some(text),
            ParsedNode::Element(element) => element.text(),
        }
    }

    /// Look up a child of an element node.
    pub fn get(&self, tag: &str) -> Option<&NodeValue> {
        self.as_element().and_then(|e| e.get(tag))
    }
}

impl From<Element> for ParsedNode {
    fn from(element: Element) -> Self {
        ParsedNode::Element(element)
    }
}

impl NodeValue {
    /// Iterate the contained nodes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedNode> {
        match self {
            NodeValue::One(node) => std::slice::from_ref(node).iter(),
            NodeValue::Many(nodes) => nodes.iter(),
        }
    }

    /// The first contained node.
    pub fn first(&self) -> Option<&ParsedNode> {
        self.iter().next()
    }

    /// Number of contained nodes.
    pub fn len(&self) -> usize {
        match self {
            NodeValue::One(_) => 1,
            NodeValue::Many(nodes) => nodes.len(),
        }
    }

    /// Whether the value holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&mut self, node: ParsedNode) {
        match self {
            NodeValue::Many(nodes) => nodes.push(node),
            NodeValue::One(_) => {
                let previous = std::mem::replace(self, NodeValue::Many(Vec::new()));
                if let NodeValue::One(first) = previous {
                    *self = NodeValue::Many(vec![first, node]);
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a NodeValue {
    type Item = &'a ParsedNode;
    type IntoIter = std::slice::Iter<'a, ParsedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Element {
    /// Create an empty element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child under `tag`. A repeated tag turns into a sequence.
    pub fn push(&mut self, tag: impl Into<String>, node: ParsedNode) {
        let tag = tag.into();
        match self.entries.iter_mut().find(|(name, _)| *name == tag) {
            Some((_, value)) => value.append(node),
            None => self.entries.push((tag, NodeValue::One(node))),
        }
    }

    /// Builder-style variant of [`Element::push`].
    pub fn with(mut self, tag: impl Into<String>, node: ParsedNode) -> Self {
        self.push(tag, node);
        self
    }

    /// Look up the child stored under `tag`.
    pub fn get(&self, tag: &str) -> Option<&NodeValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, value)| value)
    }

    /// Whether `tag` is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Add an attribute value under its prefixed key.
    pub fn push_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.push(attribute_key(name), ParsedNode::text(value));
    }

    /// Value of the attribute `name` (given without the prefix).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.get(&attribute_key(name))
            .and_then(NodeValue::first)
            .and_then(ParsedNode::as_text)
    }

    /// Look up a child element by local name, ignoring any namespace prefix.
    ///
    /// Attribute entries are never matched.
    pub fn get_local(&self, local: &str) -> Option<&NodeValue> {
        self.entries
            .iter()
            .find(|(name, _)| !is_attribute_key(name) && local_name(name) == local)
            .map(|(_, value)| value)
    }

    /// The element's own text, stored under [`TEXT_KEY`].
    pub fn text(&self) -> Option<&str> {
        self.get(TEXT_KEY)
            .and_then(NodeValue::first)
            .and_then(ParsedNode::as_text)
    }

    /// Iterate `(tag, value)` entries in first-appearance order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &NodeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the element has no attributes, children or text.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entry key for the attribute `name`.
pub fn attribute_key(name: &str) -> String {
    format!("{}{}", ATTRIBUTE_PREFIX, name)
}

/// Whether an entry key names an attribute rather than a child.
pub fn is_attribute_key(key: &str) -> bool {
    key.starts_with(ATTRIBUTE_PREFIX)
}

/// Strip the namespace prefix from a qualified name.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
