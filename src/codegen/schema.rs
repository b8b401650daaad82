//! The structured form of the documentation page.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

static PATH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(?P<param>\w+)").expect("path parameter pattern is valid"));

/// One documented field of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name as sent by the API.
    pub name: String,
    /// Declared type: a primitive name such as `Integer` or a type name.
    pub ty: String,
    /// Normalized description.
    pub description: String,
    /// Whether the description mentions the field being optional.
    pub optional: bool,
}

impl FieldSpec {
    /// A field whose optionality is read from its description.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        FieldSpec {
            name: name.into(),
            ty: ty.into(),
            optional: description.to_lowercase().contains("optional"),
            description,
        }
    }
}

/// A record type and its fields in documentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpec {
    /// Heading text without ` Responses`, e.g. `Image`.
    pub name: String,
    /// Fields in table order.
    pub fields: Vec<FieldSpec>,
}

/// A query parameter accepted by routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameter {
    /// Name on the wire, e.g. `q`.
    pub api_name: String,
    /// Name exposed to callers, e.g. `query`.
    pub name: String,
    /// `Integer`, `String`, `Float` or `Boolean` after corrections.
    pub ty: String,
    /// Normalized description.
    pub description: String,
    /// Whether callers may leave it out.
    pub optional: bool,
}

/// A `:name` segment of a route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParameter {
    /// Name without the leading `:`.
    pub name: String,
    /// `Integer` or `String`.
    pub ty: String,
    /// Generated argument description.
    pub description: String,
}

/// A route path with its placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTemplate {
    /// As documented, e.g. `/api/v1/json/tags/:tag_id`.
    pub original: String,
    /// With `{name}` placeholders, e.g. `/api/v1/json/tags/{tag_id}`.
    pub template: String,
    /// Placeholders in path order.
    pub params: Vec<PathParameter>,
}

impl PathTemplate {
    /// Parses a documented path. Parameters ending in `_id` are integers
    /// unless listed in `string_ids`; every other parameter is a string.
    pub fn parse(original: &str, string_ids: &std::collections::BTreeSet<String>) -> PathTemplate {
        let template = PATH_PARAM.replace_all(original, "{${param}}").into_owned();
        let params = PATH_PARAM
            .captures_iter(original)
            .map(|caps| {
                let name = caps["param"].to_string();
                let ty = if name.ends_with("_id") && !string_ids.contains(&name) {
                    "Integer"
                } else {
                    "String"
                };
                PathParameter {
                    description: format!("the variable {name} part of the url."),
                    ty: ty.to_string(),
                    name,
                }
            })
            .collect();

        PathTemplate {
            original: original.to_string(),
            template,
            params,
        }
    }

    /// Substitutes `values`, in order, for the placeholders.
    ///
    /// Returns `None` unless exactly one value per placeholder is given.
    pub fn fill(&self, values: &[&str]) -> Option<String> {
        if values.len() != self.params.len() {
            return None;
        }
        let mut values = values.iter();
        let filled = PATH_PARAM.replace_all(&self.original, |_: &Captures<'_>| {
            values.next().copied().unwrap_or_default()
        });
        Some(filled.into_owned())
    }
}

/// How a route's JSON payload nests its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseShape {
    /// The documented format with the type name filled in, e.g. `{"images":[Image]}`.
    pub schema: String,
    /// The single top-level key wrapping the payload, if any.
    pub key: Option<String>,
    /// Whether the payload is a list of `class_name`.
    pub is_list: bool,
    /// The linked type.
    pub class_name: String,
    /// Whether a sibling `total` count accompanies the payload.
    pub has_total: bool,
}

impl ResponseShape {
    /// Whether the payload sits under a top-level key.
    pub fn is_wrapped(&self) -> bool {
        self.key.is_some()
    }
}

/// One endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    /// Function name, from the route name table.
    pub name: String,
    /// HTTP method as documented.
    pub method: String,
    /// The documented path.
    pub path: PathTemplate,
    /// In the order the route lists them.
    pub allowed_query_parameters: Vec<QueryParameter>,
    /// Normalized description.
    pub description: String,
    /// How the payload nests.
    pub response: ResponseShape,
    /// As linked, usually relative to the origin.
    pub example_url: String,
}

/// Everything parsed from one documentation snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiSchema {
    /// Synthetic types first, then page order.
    pub types: Vec<TypeSpec>,
    /// In page order.
    pub routes: Vec<RouteSpec>,
}

impl ApiSchema {
    /// The type named `name`.
    pub fn type_named(&self, name: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// The route named `name`.
    pub fn route_named(&self, name: &str) -> Option<&RouteSpec> {
        self.routes.iter().find(|route| route.name == name)
    }
}
