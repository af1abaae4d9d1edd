use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// One XML element: tag, attributes, child elements, and optional text.
///
/// Attributes are kept sorted so two logically equal elements serialize
/// identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Optional text content.
    pub text: Option<String>,
}

impl Element {
    /// Create an element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder that appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set (or replace) the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Mutable first child with the given tag.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// First child with the given tag, created on demand.
    pub fn ensure_child(&mut self, tag: &str) -> &mut Element {
        let idx = match self.children.iter().position(|c| c.tag == tag) {
            Some(idx) => idx,
            None => {
                self.children.push(Element::new(tag));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Walk a slash-separated path of tag names, taking the first match at
    /// each step.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// All elements reachable by a slash-separated path, exploring every
    /// matching child at each step.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut frontier = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let mut next = Vec::new();
            for node in frontier {
                next.extend(node.children.iter().filter(|c| c.tag == segment));
            }
            frontier = next;
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }

    /// Text content of the element at `path`, if both exist.
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path)?.text.as_deref()
    }
}

fn escape_into(f: &mut Formatter<'_>, raw: &str, quote: bool) -> fmt::Result {
    for ch in raw.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if quote => f.write_str("&quot;")?,
            _ => write!(f, "{ch}")?,
        }
    }
    Ok(())
}

/// Compact single-line XML rendering with escaped text and attributes.
impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"")?;
            escape_into(f, value, true)?;
            write!(f, "\"")?;
        }

        if self.children.is_empty() && self.text.is_none() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        if let Some(text) = &self.text {
            escape_into(f, text, false)?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    fn sample() -> Element {
        Element::new("entry").with_attr("name", "rule1").with_child(
            Element::new("from")
                .with_child(Element::new("member").with_text("trust"))
                .with_child(Element::new("member").with_text("dmz")),
        )
    }

    #[test]
    fn find_walks_first_match() {
        let root = sample();
        assert_eq!(root.find("from/member").map(|e| e.text()), Some(Some("trust")));
        assert!(root.find("to/member").is_none());
    }

    #[test]
    fn find_all_explores_every_branch() {
        let root = sample();
        let members: Vec<_> = root
            .find_all("from/member")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(members, ["trust", "dmz"]);
    }

    #[test]
    fn ensure_child_reuses_existing() {
        let mut root = Element::new("entry");
        root.ensure_child("from").push_child(Element::new("member"));
        root.ensure_child("from").push_child(Element::new("member"));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 2);
    }

    #[test]
    fn display_escapes_markup() {
        let elm = Element::new("comment").with_text("a < b & c");
        assert_eq!(elm.to_string(), "<comment>a &lt; b &amp; c</comment>");

        let elm = Element::new("entry").with_attr("name", "say \"hi\"");
        assert_eq!(elm.to_string(), "<entry name=\"say &quot;hi&quot;\"/>");
    }
}
