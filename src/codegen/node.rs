//! An owned, minimal copy of the parts of the documentation DOM the
//! generator reads.
//!
//! Converting once up front keeps every later stage a plain pattern match
//! over [`Node`] and lets tests build trees without parsing HTML.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::DriftError;

/// A text run or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data.
    Text(String),
    /// A tag with its attributes and children.
    Element(Element),
}

/// An HTML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name.
    pub name: String,
    /// Attributes by name.
    pub attrs: BTreeMap<String, String>,
    /// Children in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text(),
        }
    }
}

impl Element {
    /// Creates an element without attributes.
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Element {
        Element {
            name: name.into(),
            attrs: BTreeMap::new(),
            children,
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Element {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Value of the attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The `href`, when present and not empty.
    pub fn href(&self) -> Option<&str> {
        self.attr("href").filter(|href| !href.is_empty())
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.push_text(out),
            }
        }
    }

    /// Direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// First descendant named `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.child_elements()
            .find_map(|child| (child.name == name).then_some(child).or_else(|| child.find(name)))
    }

    /// Every descendant named `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|element| element.name == name)
            .collect()
    }

    /// Pairs every descendant `heading` element with the first `table` that
    /// follows it in document order.
    pub fn headings_with_tables(&self, heading: &str) -> Vec<(&Element, Option<&Element>)> {
        let all = self.descendants();
        all.iter()
            .enumerate()
            .filter(|(_, element)| element.name == heading)
            .map(|(i, element)| {
                let table = all[i + 1..]
                    .iter()
                    .find(|candidate| candidate.name == "table")
                    .copied();
                (*element, table)
            })
            .collect()
    }

    /// Text of every `th` cell, trimmed.
    pub fn header_row(&self) -> Vec<String> {
        self.find_all("th")
            .into_iter()
            .map(|cell| cell.text().trim().to_string())
            .collect()
    }

    /// The `td` cells of every row after the first.
    pub fn body_rows(&self) -> Vec<Vec<&Element>> {
        self.find_all("tr")
            .into_iter()
            .skip(1)
            .map(|row| row.find_all("td"))
            .collect()
    }
}

impl From<ElementRef<'_>> for Element {
    fn from(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let attrs = value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let children = element
            .children()
            .filter_map(|child| {
                if let Some(text) = child.value().as_text() {
                    let text: &str = text;
                    Some(Node::Text(text.to_string()))
                } else {
                    ElementRef::wrap(child).map(|child| Node::Element(child.into()))
                }
            })
            .collect();

        Element {
            name: value.name().to_string(),
            attrs,
            children,
        }
    }
}

/// Parses a CSS selector, mapping failure to [`DriftError::Selector`].
pub(crate) fn selector(source: &str) -> Result<Selector, DriftError> {
    Selector::parse(source).map_err(|e| DriftError::Selector {
        selector: source.to_string(),
        reason: e.to_string(),
    })
}

/// Parses `html` and returns the first element matching `root`.
///
/// # Errors
///
/// Fails if the selector is invalid or matches nothing.
pub fn parse_root(html: &str, root: &str) -> Result<Element, DriftError> {
    let document = Html::parse_document(html);
    let selector = selector(root)?;
    document
        .select(&selector)
        .next()
        .map(Element::from)
        .ok_or_else(|| DriftError::MissingSection(root.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><div class="walloftext">
        <h2 id="a">First</h2><p>x</p>
        <h2 id="b">Second</h2>
        <table><thead><tr><th>Name</th><th> Description </th></tr></thead>
        <tbody><tr><td><code>q</code></td><td>The <em>query</em></td></tr></tbody></table>
        </div></body></html>"#;

    #[test]
    fn parse_root_finds_selector() {
        let root = parse_root(PAGE, ".walloftext").unwrap();
        assert_eq!(root.name, "div");
        assert_eq!(root.attr("class"), Some("walloftext"));
        assert_eq!(root.find_all("h2").len(), 2);
    }

    #[test]
    fn missing_root_is_drift() {
        let err = parse_root(PAGE, ".nope").unwrap_err();
        assert_eq!(err, DriftError::MissingSection(".nope".to_string()));
    }

    #[test]
    fn invalid_selector_is_drift() {
        assert!(matches!(parse_root(PAGE, "[[["), Err(DriftError::Selector { .. })));
    }

    #[test]
    fn both_headings_see_the_same_table() {
        let root = parse_root(PAGE, ".walloftext").unwrap();
        let pairs = root.headings_with_tables("h2");
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(_, table)| table.is_some()));
        assert_eq!(pairs[0].1, pairs[1].1);
    }

    #[test]
    fn table_rows_and_headers() {
        let root = parse_root(PAGE, ".walloftext").unwrap();
        let table = root.find("table").unwrap();
        assert_eq!(table.header_row(), vec!["Name", "Description"]);

        let rows = table.body_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].find("code").unwrap().text(), "q");
        assert_eq!(rows[0][1].text(), "The query");
    }

    #[test]
    fn href_ignores_empty() {
        let link = Element::new("a", vec![]).with_attr("href", "");
        assert_eq!(link.href(), None);
        let link = link.with_attr("href", "#image-response");
        assert_eq!(link.href(), Some("#image-response"));
    }
}
