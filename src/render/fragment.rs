//! Structured output fragments
//!
//! Rendering builds a tree of fragments, one node per field, and flattens it
//! to markup text exactly once at the top of the render call. The final
//! contract is string equivalence of the flattened markup; the tree exists so
//! intermediate output can be composed and inspected without string churn.

use serde_json::Value;

/// An ordered attribute list
///
/// Insertion order is emission order; setting an attribute that already
/// exists overwrites its value in place. An empty value renders as a bare
/// boolean attribute (`required`, `selected`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    entries: Vec<(String, String)>,
}

impl AttrList {
    /// Create an empty attribute list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, overwriting in place if the name is already present
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove an attribute by name, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Get an attribute value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether no attributes are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Overlay every entry of `other` onto this list
    ///
    /// Later values win, mirroring the call-site-over-type-default rule for
    /// merged render options.
    pub fn merge_over(&mut self, other: &AttrList) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Overlay the scalar entries of a JSON object onto this list
    ///
    /// Non-scalar entries are skipped; numbers and booleans are coerced to
    /// their text form.
    pub fn extend_from_json(&mut self, object: &Value) {
        if let Value::Object(map) = object {
            for (key, value) in map {
                match value {
                    Value::String(s) => self.set(key, s.clone()),
                    Value::Number(n) => self.set(key, n.to_string()),
                    Value::Bool(b) => self.set(key, b.to_string()),
                    _ => {}
                }
            }
        }
    }
}

/// A single markup element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Ordered attributes
    pub attrs: AttrList,
    /// Child fragments, empty for void elements
    pub children: Vec<Fragment>,
    /// Whether the element is self-closing
    pub void: bool,
}

impl Element {
    /// Create an element with no attributes or children
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: AttrList::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Set a single attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Overlay a whole attribute list
    #[must_use]
    pub fn with_attrs(mut self, attrs: &AttrList) -> Self {
        self.attrs.merge_over(attrs);
        self
    }

    /// Append a child fragment
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Fragment>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append an escaped text child
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Fragment::Text(text.into()))
    }

    /// Mark the element self-closing
    #[must_use]
    pub fn void(mut self) -> Self {
        self.void = true;
        self
    }
}

/// A node in the rendered output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text content, escaped on flatten
    Text(String),
    /// Pre-formed markup, emitted verbatim
    Raw(String),
    /// A markup element
    Element(Box<Element>),
    /// An ordered sequence of fragments
    Group(Vec<Fragment>),
}

impl Fragment {
    /// An empty fragment
    #[must_use]
    pub fn empty() -> Self {
        Self::Group(Vec::new())
    }

    /// Place content inside this fragment
    ///
    /// Elements gain a child, groups gain a member; text and raw fragments
    /// are grouped alongside the content instead.
    #[must_use]
    pub fn with_content(self, content: Fragment) -> Self {
        match self {
            Self::Element(mut element) => {
                element.children.push(content);
                Self::Element(element)
            }
            Self::Group(mut items) => {
                items.push(content);
                Self::Group(items)
            }
            other => Self::Group(vec![other, content]),
        }
    }

    /// Flatten the tree to its final markup text
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_text(text)),
            Self::Raw(markup) => out.push_str(markup),
            Self::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in element.attrs.iter() {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                if element.void {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in &element.children {
                        child.write_markup(out);
                    }
                    out.push_str("</");
                    out.push_str(&element.tag);
                    out.push('>');
                }
            }
            Self::Group(children) => {
                for child in children {
                    child.write_markup(out);
                }
            }
        }
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self::Element(Box::new(element))
    }
}

/// Escape text content for markup
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for markup
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
