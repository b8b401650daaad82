//! Hand-maintained knowledge the documentation page does not state itself.

use std::collections::{BTreeMap, BTreeSet};

use crate::codegen::{
    params::{Correction, ParameterDraft},
    schema::{FieldSpec, TypeSpec},
};

/// Where the Derpibooru documentation lives.
pub const DOCUMENTATION_URL: &str = "https://derpibooru.org/pages/api";

/// A field whose type is fixed regardless of the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedField {
    /// Type holding the field.
    pub class: String,
    /// Field name.
    pub field: String,
    /// Type to use instead of the declared one.
    pub ty: String,
}

/// Every table the generator consults.
///
/// [`Tables::derpibooru`] describes the real page; tests build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    /// Prefixed to relative links in descriptions.
    pub origin: String,
    /// Selector of the element holding the documentation.
    pub root_selector: String,
    /// `id` of the heading above the query parameter table.
    pub parameters_section: String,
    /// `id` of the heading above the route table.
    pub routes_section: String,
    /// Route names by documented path.
    pub route_names: BTreeMap<String, String>,
    /// Path parameters ending in `_id` that are nevertheless strings.
    pub string_ids: BTreeSet<String>,
    /// Link targets known before the page is read.
    pub seeded_classes: BTreeMap<String, String>,
    /// Types the page does not document as tables. Emitted first.
    pub synthetic_types: Vec<TypeSpec>,
    /// Fields typed regardless of the page.
    pub forced_fields: Vec<ForcedField>,
    /// Applied to the parameter registry in order.
    pub corrections: Vec<(String, Correction)>,
    /// Parameters missing from the parameter table.
    pub extra_parameters: Vec<ParameterDraft>,
    /// Wire name of the API key parameter, filled from the client when omitted.
    pub key_parameter: Option<String>,
}

impl Tables {
    /// Page structure shared by Philomena-based boorus, without any overrides.
    pub fn new(origin: impl Into<String>) -> Tables {
        Tables {
            origin: origin.into(),
            root_selector: ".walloftext".to_string(),
            parameters_section: "parameters".to_string(),
            routes_section: "routes".to_string(),
            route_names: BTreeMap::new(),
            string_ids: BTreeSet::new(),
            seeded_classes: BTreeMap::new(),
            synthetic_types: Vec::new(),
            forced_fields: Vec::new(),
            corrections: Vec::new(),
            extra_parameters: Vec::new(),
            key_parameter: None,
        }
    }

    /// The tables for `https://derpibooru.org/pages/api`.
    pub fn derpibooru() -> Tables {
        Tables {
            route_names: derpibooru_route_names(),
            string_ids: BTreeSet::from(["tag_id".to_string()]),
            seeded_classes: BTreeMap::from([(
                "https://github.com/derpibooru/cli_intensities".to_string(),
                "Intensities".to_string(),
            )]),
            synthetic_types: derpibooru_synthetic_types(),
            forced_fields: vec![ForcedField {
                class: "Image".to_string(),
                field: "representations".to_string(),
                ty: "Representations".to_string(),
            }],
            corrections: derpibooru_corrections(),
            extra_parameters: derpibooru_extra_parameters(),
            key_parameter: Some("key".to_string()),
            ..Tables::new("https://derpibooru.org")
        }
    }

    /// The forced type of `class.field`, if any.
    pub fn forced_type(&self, class: &str, field: &str) -> Option<&str> {
        self.forced_fields
            .iter()
            .find(|forced| forced.class == class && forced.field == field)
            .map(|forced| forced.ty.as_str())
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::derpibooru()
    }
}

fn derpibooru_route_names() -> BTreeMap<String, String> {
    [
        ("/api/v1/json/comments/:comment_id", "comment"),
        ("/api/v1/json/images/:image_id", "image"),
        ("/api/v1/json/images", "image_upload"),
        ("/api/v1/json/images/featured", "featured_image"),
        ("/api/v1/json/tags/:tag_id", "tag"),
        ("/api/v1/json/posts/:post_id", "post"),
        ("/api/v1/json/profiles/:user_id", "user"),
        ("/api/v1/json/filters/:filter_id", "filter"),
        ("/api/v1/json/filters/system", "system_filters"),
        ("/api/v1/json/filters/user", "user_filters"),
        ("/api/v1/json/oembed", "oembed"),
        ("/api/v1/json/search/comments", "search_comments"),
        ("/api/v1/json/search/galleries", "search_galleries"),
        ("/api/v1/json/search/posts", "search_posts"),
        ("/api/v1/json/search/images", "search_images"),
        ("/api/v1/json/search/tags", "search_tags"),
        ("/api/v1/json/search/reverse", "search_reverse"),
        ("/api/v1/json/forums", "forums"),
        ("/api/v1/json/forums/:short_name", "forum"),
        ("/api/v1/json/forums/:short_name/topics", "forum_topics"),
        ("/api/v1/json/forums/:short_name/topics/:topic_slug", "forum_topic"),
        ("/api/v1/json/forums/:short_name/topics/:topic_slug/posts", "forum_posts"),
        (
            "/api/v1/json/forums/:short_name/topics/:topic_slug/posts/:post_id",
            "forum_post",
        ),
    ]
    .into_iter()
    .map(|(path, name)| (path.to_string(), name.to_string()))
    .collect()
}

fn derpibooru_synthetic_types() -> Vec<TypeSpec> {
    let intensities = TypeSpec {
        name: "Intensities".to_string(),
        fields: [
            ("ne", "Northeast"),
            ("nw", "Northwest"),
            ("se", "Southeast"),
            ("sw", "Southwest"),
        ]
        .into_iter()
        .map(|(name, corner)| FieldSpec::new(name, "Float", format!("{corner} intensity.")))
        .collect(),
    };

    let representations = TypeSpec {
        name: "Representations".to_string(),
        fields: [
            "full",
            "large",
            "medium",
            "small",
            "tall",
            "thumb",
            "thumb_small",
            "thumb_tiny",
        ]
        .into_iter()
        .map(|name| FieldSpec::new(name, "String", format!("URL of the `{name}` representation.")))
        .collect(),
    };

    vec![intensities, representations]
}

fn derpibooru_corrections() -> Vec<(String, Correction)> {
    [
        ("filter_id", Correction::typed("Integer", true)),
        ("key", Correction::typed("String", true)),
        ("page", Correction::typed("Integer", true)),
        ("per_page", Correction::typed("Integer", true)),
        ("q", Correction::typed("String", false).renamed("query")),
        ("sd", Correction::typed("String", true).renamed("sort_direction")),
        ("sf", Correction::typed("String", true).renamed("sort_field")),
    ]
    .into_iter()
    .map(|(name, correction)| (name.to_string(), correction))
    .collect()
}

fn derpibooru_extra_parameters() -> Vec<ParameterDraft> {
    vec![
        ParameterDraft {
            api_name: "url".to_string(),
            name: "url".to_string(),
            ty: Some("String".to_string()),
            description: "Link a deviantART page, a Tumblr post, or the image directly."
                .to_string(),
            optional: false,
        },
        ParameterDraft {
            api_name: "distance".to_string(),
            name: "distance".to_string(),
            ty: Some("Float".to_string()),
            description: "Match distance (suggested values: between 0.2 and 0.5).".to_string(),
            optional: true,
        },
    ]
}

/// What to do with a `total` key next to a route's payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalKey {
    /// Drop it from the shape and set [`ResponseShape::has_total`].
    ///
    /// [`ResponseShape::has_total`]: crate::codegen::schema::ResponseShape::has_total
    #[default]
    Record,
    /// Treat it like any other key, so it makes the format ambiguous.
    Reject,
}

/// Behavioral switches of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Handling of a `total` key next to the payload.
    pub total: TotalKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derpibooru_tables() {
        let tables = Tables::derpibooru();
        assert_eq!(tables.route_names.len(), 23);
        assert_eq!(tables.route_names["/api/v1/json/images"], "image_upload");
        assert_eq!(tables.forced_type("Image", "representations"), Some("Representations"));
        assert_eq!(tables.forced_type("Tag", "representations"), None);
        assert!(tables.string_ids.contains("tag_id"));

        let names: Vec<_> = tables.synthetic_types.iter().map(|ty| ty.name.as_str()).collect();
        assert_eq!(names, vec!["Intensities", "Representations"]);
        assert_eq!(tables.synthetic_types[1].fields.len(), 8);

        assert_eq!(tables.corrections.len(), 7);
        let extra: Vec<_> = tables.extra_parameters.iter().map(|p| p.api_name.as_str()).collect();
        assert_eq!(extra, vec!["url", "distance"]);
        assert_eq!(tables.key_parameter.as_deref(), Some("key"));
    }

    #[test]
    fn new_tables_are_bare() {
        let tables = Tables::new("https://example.org");
        assert_eq!(tables.root_selector, ".walloftext");
        assert!(tables.route_names.is_empty());
        assert!(tables.corrections.is_empty());
    }
}
