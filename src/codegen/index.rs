use std::collections::BTreeMap;

use serde::Serialize;

use crate::{codegen::node::Element, error::DriftError};

const RESPONSE_ID_SUFFIX: &str = "-response";
const RESPONSE_TEXT_SUFFIX: &str = " Responses";

/// Maps link targets (`#image-response`) to the type names they document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassIndex {
    names: BTreeMap<String, String>,
}

impl ClassIndex {
    /// Builds the index from every `h2` under `root` that documents a type,
    /// on top of the `seeded` entries.
    ///
    /// Headings without a matching `id` or text are skipped.
    pub fn build(root: &Element, seeded: &BTreeMap<String, String>) -> ClassIndex {
        let mut names = seeded.clone();
        for heading in root.find_all("h2") {
            if let Some((anchor, name)) = response_heading(heading) {
                log::debug!("class {name} documented at {anchor}");
                names.insert(anchor, name);
            }
        }
        ClassIndex { names }
    }

    /// The type name behind `href`.
    ///
    /// # Errors
    ///
    /// Fails with [`DriftError::UnresolvedAnchor`] for unknown targets.
    pub fn resolve(&self, href: &str) -> Result<&str, DriftError> {
        self.names
            .get(href)
            .map(String::as_str)
            .ok_or_else(|| DriftError::UnresolvedAnchor(href.to_string()))
    }

    /// Number of known targets.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no target is known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `("#id", name)` when `heading` is an `<h2 id="…-response">Name Responses</h2>`.
pub(crate) fn response_heading(heading: &Element) -> Option<(String, String)> {
    let id = heading.attr("id").filter(|id| id.ends_with(RESPONSE_ID_SUFFIX))?;
    let text = heading.text();
    let name = text.strip_suffix(RESPONSE_TEXT_SUFFIX)?;
    Some((format!("#{id}"), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::node::Node;

    fn h2(id: Option<&str>, text: &str) -> Node {
        let element = Element::new("h2", vec![Node::Text(text.to_string())]);
        Node::Element(match id {
            Some(id) => element.with_attr("id", id),
            None => element,
        })
    }

    fn root() -> Element {
        Element::new(
            "div",
            vec![
                h2(Some("image-response"), "Image Responses"),
                h2(Some("routes"), "Routes"),
                h2(None, "Tag Responses"),
                h2(Some("tag-response"), "Tags"),
                h2(Some("user-response"), "User Responses"),
            ],
        )
    }

    #[test]
    fn collects_response_headings_and_seeds() {
        let seeded = BTreeMap::from([(
            "https://github.com/derpibooru/cli_intensities".to_string(),
            "Intensities".to_string(),
        )]);
        let index = ClassIndex::build(&root(), &seeded);

        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("#image-response"), Ok("Image"));
        assert_eq!(index.resolve("#user-response"), Ok("User"));
        assert_eq!(
            index.resolve("https://github.com/derpibooru/cli_intensities"),
            Ok("Intensities")
        );
    }

    #[test]
    fn non_matching_headings_are_skipped() {
        let index = ClassIndex::build(&root(), &BTreeMap::new());
        assert_eq!(
            index.resolve("#tag-response"),
            Err(DriftError::UnresolvedAnchor("#tag-response".to_string()))
        );
        assert!(index.resolve("#routes").is_err());
    }
}
