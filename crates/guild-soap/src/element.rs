use guild_xml::{XmlError, parser::Node};

/// Deepest nesting accepted when decoding a response body.
pub const MAX_DEPTH: usize = 128;

/// A node of a decoded response.
///
/// A leaf has no children and may carry text. A branch has children and never
/// carries text: whitespace between child elements is dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn leaf(tag: impl Into<String>, text: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
            text,
        }
    }

    pub fn branch(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            tag: tag.into(),
            children,
            text: None,
        }
    }

    /// Local name of the tag, without any namespace prefix.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Every element below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Leaf texts in document order, joined by a single space.
    /// Whitespace-only leaves are skipped.
    pub fn text_content(&self) -> String {
        let texts: Vec<&str> = std::iter::once(self)
            .chain(self.descendants())
            .filter_map(Element::text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();
        texts.join(" ")
    }

    pub(crate) fn from_node(node: Node<'_, '_>) -> Result<Self, XmlError> {
        Self::from_node_at(node, 0)
    }

    fn from_node_at(node: Node<'_, '_>, depth: usize) -> Result<Self, XmlError> {
        if depth > MAX_DEPTH {
            return Err(XmlError::TooDeep { limit: MAX_DEPTH });
        }

        let tag = node.tag_name().name();
        let children = node
            .children()
            .filter(Node::is_element)
            .map(|child| Self::from_node_at(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        if !children.is_empty() {
            return Ok(Self::branch(tag, children));
        }

        let text: String = node
            .children()
            .filter(Node::is_text)
            .filter_map(|child| child.text())
            .collect();

        Ok(Self::leaf(tag, (!text.is_empty()).then_some(text)))
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
