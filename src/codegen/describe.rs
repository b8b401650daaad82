use std::fmt::Write as _;

use crate::{
    codegen::{
        index::ClassIndex,
        node::{Element, Node},
    },
    error::DriftError,
};

/// Turns table cell markup into the markdown used in generated doc comments.
///
/// | markup                | output            |
/// |-----------------------|-------------------|
/// | `<em>`, `<strong>`    | `**text**`        |
/// | `<code>`              | `` `text` ``      |
/// | `<a href="#…">`       | `` `TypeName` ``  |
/// | `<a href="/…">`       | `[text](origin/…)`|
/// | `<br>`                | newline           |
///
/// Any other element contributes its text.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    index: &'a ClassIndex,
    origin: &'a str,
}

impl<'a> Normalizer<'a> {
    /// A normalizer resolving internal links through `index` and prefixing
    /// relative links with `origin`.
    pub fn new(index: &'a ClassIndex, origin: &'a str) -> Self {
        Self { index, origin }
    }

    /// Normalizes the children of a cell.
    ///
    /// # Errors
    ///
    /// Fails with [`DriftError::UnresolvedAnchor`] for an internal link to an
    /// undocumented type.
    pub fn describe(&self, nodes: &[Node]) -> Result<String, DriftError> {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => self.push_element(element, &mut out)?,
            }
        }
        Ok(out.replace("\r\n", "\n"))
    }

    fn push_element(&self, element: &Element, out: &mut String) -> Result<(), DriftError> {
        match (element.name.as_str(), element.href()) {
            ("a", Some(href)) if href.starts_with('#') => {
                let name = self.index.resolve(href)?;
                out.push('`');
                out.push_str(name);
                out.push('`');
            }
            // Writing into a String cannot fail.
            ("a", Some(href)) => {
                let _ = write!(out, "[{}]({})", element.text(), self.absolute(href));
            }
            ("em" | "strong", _) => {
                let _ = write!(out, "**{}**", element.text());
            }
            ("code", _) => {
                let _ = write!(out, "`{}`", element.text());
            }
            ("br", _) => out.push('\n'),
            _ => out.push_str(&element.text()),
        }
        Ok(())
    }

    fn absolute(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{href}", self.origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn el(name: &str, children: Vec<Node>) -> Node {
        Node::Element(Element::new(name, children))
    }

    fn link(href: &str, label: &str) -> Node {
        Node::Element(Element::new("a", vec![text(label)]).with_attr("href", href))
    }

    fn index() -> ClassIndex {
        let root = Element::new(
            "div",
            vec![Node::Element(
                Element::new("h2", vec![text("Image Responses")]).with_attr("id", "image-response"),
            )],
        );
        ClassIndex::build(&root, &BTreeMap::new())
    }

    #[test]
    fn markup_substitutions() {
        let index = index();
        let normalizer = Normalizer::new(&index, "https://derpibooru.org");
        let nodes = vec![
            text("The "),
            el("em", vec![text("image")]),
            text(" for "),
            el("code", vec![text("image_id")]),
            text(","),
            el("br", vec![]),
            text("see "),
            link("/pages/api", "the docs"),
            text(" or "),
            link("#image-response", "image-response"),
            text(". "),
            el("strong", vec![text("Optional")]),
            el("span", vec![text("!")]),
        ];

        assert_eq!(
            normalizer.describe(&nodes).unwrap(),
            "The **image** for `image_id`,\nsee [the docs](https://derpibooru.org/pages/api) \
             or `Image`. **Optional**!"
        );
    }

    #[test]
    fn absolute_links_are_kept() {
        let index = index();
        let normalizer = Normalizer::new(&index, "https://derpibooru.org");
        let nodes = vec![link("https://github.com/derpibooru/cli_intensities", "intensities")];
        assert_eq!(
            normalizer.describe(&nodes).unwrap(),
            "[intensities](https://github.com/derpibooru/cli_intensities)"
        );
    }

    #[test]
    fn crlf_becomes_lf() {
        let index = index();
        let normalizer = Normalizer::new(&index, "");
        assert_eq!(normalizer.describe(&[text("a\r\nb")]).unwrap(), "a\nb");
    }

    #[test]
    fn unknown_anchor_fails() {
        let index = index();
        let normalizer = Normalizer::new(&index, "");
        assert_eq!(
            normalizer.describe(&[link("#tag-response", "tag")]),
            Err(DriftError::UnresolvedAnchor("#tag-response".to_string()))
        );
    }

    #[test]
    fn link_without_href_is_text() {
        let index = index();
        let normalizer = Normalizer::new(&index, "");
        assert_eq!(normalizer.describe(&[el("a", vec![text("plain")])]).unwrap(), "plain");
    }
}
