use std::fmt;

/// The kind of construct a node represents.
/// Every kind except `PlainText` and `Escaped` maps to an HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    PlainText,
    Bold,
    Italic,
    Code,
    Image,
    Link,
    /// Transient marker for a backslash escape; never appears in a finished tree.
    Escaped,
    UnorderedList,
    OrderedList,
    ListElement,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Paragraph,
    Quote,
    Div,
}

impl NodeKind {
    pub fn tag(self) -> Option<&'static str> {
        match self {
            NodeKind::PlainText | NodeKind::Escaped => None,
            NodeKind::Bold => Some("b"),
            NodeKind::Italic => Some("i"),
            NodeKind::Code => Some("code"),
            NodeKind::Image => Some("img"),
            NodeKind::Link => Some("a"),
            NodeKind::UnorderedList => Some("ul"),
            NodeKind::OrderedList => Some("ol"),
            NodeKind::ListElement => Some("li"),
            NodeKind::Heading1 => Some("h1"),
            NodeKind::Heading2 => Some("h2"),
            NodeKind::Heading3 => Some("h3"),
            NodeKind::Heading4 => Some("h4"),
            NodeKind::Heading5 => Some("h5"),
            NodeKind::Heading6 => Some("h6"),
            NodeKind::Paragraph => Some("p"),
            NodeKind::Quote => Some("blockquote"),
            NodeKind::Div => Some("div"),
        }
    }

    /// Heading kind for a `#` run of the given length, clamped to 1..=6.
    pub fn heading(level: usize) -> NodeKind {
        match level {
            0 | 1 => NodeKind::Heading1,
            2 => NodeKind::Heading2,
            3 => NodeKind::Heading3,
            4 => NodeKind::Heading4,
            5 => NodeKind::Heading5,
            _ => NodeKind::Heading6,
        }
    }

    pub fn heading_level(self) -> Option<usize> {
        match self {
            NodeKind::Heading1 => Some(1),
            NodeKind::Heading2 => Some(2),
            NodeKind::Heading3 => Some(3),
            NodeKind::Heading4 => Some(4),
            NodeKind::Heading5 => Some(5),
            NodeKind::Heading6 => Some(6),
            _ => None,
        }
    }

    /// Block-terminated kinds accept end of input as their closing delimiter.
    pub fn terminates_at_eof(self) -> bool {
        matches!(self, NodeKind::Quote | NodeKind::ListElement) || self.heading_level().is_some()
    }

    /// Human-readable construct name, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            NodeKind::PlainText => "text",
            NodeKind::Bold => "bold",
            NodeKind::Italic => "italic",
            NodeKind::Code => "code span",
            NodeKind::Image => "image",
            NodeKind::Link => "link",
            NodeKind::Escaped => "escape",
            NodeKind::UnorderedList => "unordered list",
            NodeKind::OrderedList => "ordered list",
            NodeKind::ListElement => "list item",
            NodeKind::Heading1
            | NodeKind::Heading2
            | NodeKind::Heading3
            | NodeKind::Heading4
            | NodeKind::Heading5
            | NodeKind::Heading6 => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Quote => "quote",
            NodeKind::Div => "div",
        }
    }
}

/// A single `name=value` attribute on a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A terminal node carrying a literal value.
/// Used for raw text, links and images.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub value: String,
    pub kind: NodeKind,
    /// Serialized in insertion order.
    pub attributes: Vec<Attribute>,
}

impl Leaf {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// A container node. A `PlainText` parent is transparent: it groups its
/// children without emitting a wrapping tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Parent {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Parent(Parent),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(Leaf {
            value: value.into(),
            kind: NodeKind::PlainText,
            attributes: Vec::new(),
        })
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Node::Leaf(Leaf {
            value: value.into(),
            kind,
            attributes,
        })
    }

    pub fn parent(kind: NodeKind, children: Vec<Node>) -> Self {
        Node::Parent(Parent { kind, children })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(leaf) => leaf.kind,
            Node::Parent(parent) => parent.kind,
        }
    }

    /// Children of a parent; empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => &parent.children,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Parent(_) => None,
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}={}", self.name, self.value)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match (self.kind, self.kind.tag()) {
            (NodeKind::Code | NodeKind::Link | NodeKind::Image, Some(tag)) => tag,
            _ => return write!(f, "{}", self.value),
        };

        write!(f, "<{}", tag)?;
        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }
        if self.kind == NodeKind::Image {
            return write!(f, "/>");
        }
        write!(f, ">{}</{}>", self.value, tag)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.kind.tag();
        if let Some(tag) = tag {
            write!(f, "<{}>", tag)?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        if let Some(tag) = tag {
            write!(f, "</{}>", tag)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => leaf.fmt(f),
            Node::Parent(parent) => parent.fmt(f),
        }
    }
}
