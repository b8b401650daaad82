//! Emits Rust sources for an [`ApiSchema`] through `minijinja` templates.
//!
//! The templates only loop and substitute. Every decision (Rust types,
//! identifiers, doc comment lines, fetch helper) is made here, in the view
//! structs handed to them.

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use crate::{
    codegen::{
        schema::{ApiSchema, FieldSpec, QueryParameter, RouteSpec, TypeSpec},
        tables::Tables,
    },
    error::DriftError,
    result::Result,
};

const MODELS_TEMPLATE: &str = include_str!("../../templates/models.rs.j2");
const API_TEMPLATE: &str = include_str!("../../templates/api.rs.j2");

const DATETIME: &str = "RFC3339 datetime";

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
];

/// Keywords that cannot be raw identifiers either.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// The generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    /// One struct per type, with its `Model` impl.
    pub models: String,
    /// One async function per route.
    pub api: String,
}

#[derive(Debug, Serialize)]
struct TypeView {
    name: String,
    fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
struct FieldView {
    name: String,
    ident: String,
    rename: Option<String>,
    rust_type: String,
    deserialize_with: Option<&'static str>,
    doc: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RouteView {
    name: String,
    doc: Vec<String>,
    method: String,
    path: String,
    formatted: bool,
    args: Vec<ArgView>,
    query: Vec<QueryView>,
    return_type: String,
    fetch: &'static str,
    key: String,
}

#[derive(Debug, Serialize)]
struct ArgView {
    ident: String,
    rust_type: String,
}

#[derive(Debug, Serialize)]
struct QueryView {
    api_name: String,
    value: String,
}

/// Renders `schema` into Rust sources.
///
/// # Errors
///
/// Fails with [`DriftError::UnknownType`] when a field, parameter or response
/// names a type that is neither a primitive nor in `schema`, with
/// [`DriftError::UnsupportedMethod`] for an unknown HTTP method, and with a
/// template error if rendering itself fails.
pub fn render(schema: &ApiSchema, tables: &Tables) -> Result<GeneratedSources> {
    let types = schema
        .types
        .iter()
        .map(|ty| type_view(ty, schema))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let routes = schema
        .routes
        .iter()
        .map(|route| route_view(route, schema, tables))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let uses_datetime = types
        .iter()
        .flat_map(|ty| &ty.fields)
        .any(|field| field.deserialize_with.is_some());
    let uses_search = routes.iter().any(|route| route.fetch == "fetch_search");

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("models.rs", MODELS_TEMPLATE)?;
    env.add_template("api.rs", API_TEMPLATE)?;

    let models = env
        .get_template("models.rs")?
        .render(context! { types => types, uses_datetime => uses_datetime })?;
    let api = env
        .get_template("api.rs")?
        .render(context! { routes => routes, uses_search => uses_search })?;

    log::info!(
        "rendered {} types and {} routes",
        schema.types.len(),
        schema.routes.len()
    );
    Ok(GeneratedSources { models, api })
}

fn type_view(ty: &TypeSpec, schema: &ApiSchema) -> std::result::Result<TypeView, DriftError> {
    let fields = ty
        .fields
        .iter()
        .map(|field| field_view(&ty.name, field, schema))
        .collect::<std::result::Result<_, _>>()?;
    Ok(TypeView {
        name: ty.name.clone(),
        fields,
    })
}

fn field_view(class: &str, field: &FieldSpec, schema: &ApiSchema) -> std::result::Result<FieldView, DriftError> {
    let owner = format!("{class}.{}", field.name);
    let inner = field_type(&field.ty, schema).ok_or_else(|| DriftError::UnknownType {
        owner,
        ty: field.ty.clone(),
    })?;
    let (ident, rename) = identifier(&field.name);
    let deserialize_with = match (field.ty == DATETIME, field.optional) {
        (true, false) => Some("derpi::models::de_datetime"),
        (true, true) => Some("derpi::models::maybe_de_datetime"),
        (false, _) => None,
    };

    Ok(FieldView {
        name: field.name.clone(),
        ident,
        rename,
        rust_type: if field.optional {
            format!("Option<{inner}>")
        } else {
            inner
        },
        deserialize_with,
        doc: doc_lines(&field.description, "///"),
    })
}

fn route_view(route: &RouteSpec, schema: &ApiSchema, tables: &Tables) -> std::result::Result<RouteView, DriftError> {
    let method = route.method.to_ascii_uppercase();
    if !matches!(method.as_str(), "GET" | "POST" | "PUT" | "PATCH" | "DELETE") {
        return Err(DriftError::UnsupportedMethod {
            route: route.name.clone(),
            method: route.method.clone(),
        });
    }

    let response = &route.response;
    if schema.type_named(&response.class_name).is_none() {
        return Err(DriftError::UnknownType {
            owner: format!("route {}", route.name),
            ty: response.class_name.clone(),
        });
    }
    let class = &response.class_name;
    let (return_type, fetch, key) = match (&response.key, response.is_list, response.has_total) {
        (Some(key), true, true) => (format!("SearchResult<{class}>"), "fetch_search", format!("{key:?}")),
        (Some(key), true, false) => (format!("Vec<{class}>"), "fetch_many", format!("{key:?}")),
        (Some(key), false, _) => (class.clone(), "fetch_one", format!("Some({key:?})")),
        (None, _, _) => (class.clone(), "fetch_one", "None".to_string()),
    };

    let query_idents: Vec<String> = route
        .allowed_query_parameters
        .iter()
        .map(|param| identifier(&param.name).0)
        .collect();

    let mut args = Vec::new();
    let mut path = route.path.template.clone();
    for param in &route.path.params {
        let rust_type = arg_type(&param.ty).ok_or_else(|| DriftError::UnknownType {
            owner: format!("route {} path parameter {}", route.name, param.name),
            ty: param.ty.clone(),
        })?;
        let mut ident = path_identifier(&param.name);
        if query_idents.contains(&ident) {
            ident.push_str("_path");
        }
        path = path.replace(&format!("{{{}}}", param.name), &format!("{{{ident}}}"));
        args.push(ArgView {
            ident,
            rust_type: rust_type.to_string(),
        });
    }

    let mut query = Vec::new();
    for param in &route.allowed_query_parameters {
        let (arg, value) = query_arg(route, param, tables)?;
        args.push(arg);
        query.push(QueryView {
            api_name: param.api_name.clone(),
            value,
        });
    }

    Ok(RouteView {
        name: route.name.clone(),
        doc: route_doc(route, tables),
        method,
        path,
        formatted: !route.path.params.is_empty(),
        args,
        query,
        return_type,
        fetch,
        key,
    })
}

fn query_arg(
    route: &RouteSpec,
    param: &QueryParameter,
    tables: &Tables,
) -> std::result::Result<(ArgView, String), DriftError> {
    let (ident, _) = identifier(&param.name);
    if tables.key_parameter.as_deref() == Some(param.api_name.as_str()) {
        let value = format!("client.api_key({ident})");
        let arg = ArgView {
            ident,
            rust_type: "Option<&str>".to_string(),
        };
        return Ok((arg, value));
    }

    let rust_type = arg_type(&param.ty).ok_or_else(|| DriftError::UnknownType {
        owner: format!("route {} parameter {}", route.name, param.api_name),
        ty: param.ty.clone(),
    })?;
    let (rust_type, value) = if param.optional {
        (
            format!("Option<{rust_type}>"),
            format!("{ident}.map(|value| value.to_string())"),
        )
    } else {
        (rust_type.to_string(), format!("Some({ident}.to_string())"))
    };
    Ok((ArgView { ident, rust_type }, value))
}

fn route_doc(route: &RouteSpec, tables: &Tables) -> Vec<String> {
    let example = if route.example_url.starts_with('/') {
        format!("{}{}", tables.origin, route.example_url)
    } else {
        route.example_url.clone()
    };

    let mut doc = doc_lines(&route.description, "///");
    doc.push("///".to_string());
    doc.push(format!(
        "/// `{} {}`, for example <{example}>.",
        route.method, route.path.original
    ));
    doc.push("///".to_string());
    doc.push(format!("/// The API answers with `{}`.", route.response.schema));

    let params: Vec<(&str, &str)> = route
        .path
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.description.as_str()))
        .chain(
            route
                .allowed_query_parameters
                .iter()
                .map(|p| (p.name.as_str(), p.description.as_str())),
        )
        .collect();
    if !params.is_empty() {
        doc.push("///".to_string());
        doc.push("/// # Arguments".to_string());
        doc.push("///".to_string());
        for (name, description) in params {
            let mut lines = description.lines();
            doc.push(format!("/// * `{name}`: {}", lines.next().unwrap_or_default()).trim_end().to_string());
            doc.extend(lines.map(|line| format!("///   {line}").trim_end().to_string()));
        }
    }
    doc
}

/// Prefixes every line of `text`, leaving no trailing spaces.
fn doc_lines(text: &str, prefix: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return vec![prefix.to_string()];
    }
    text.lines()
        .map(|line| format!("{prefix} {line}").trim_end().to_string())
        .collect()
}

/// A field's Rust type: a documented type, or a primitive.
fn field_type(ty: &str, schema: &ApiSchema) -> Option<String> {
    if schema.type_named(ty).is_some() {
        return Some(ty.to_string());
    }
    let primitive = match ty {
        "Integer" => "i64",
        "String" => "String",
        "Float" => "f64",
        "Boolean" => "bool",
        DATETIME => "DateTime<Utc>",
        "Array" => "Vec<serde_json::Value>",
        _ => return None,
    };
    Some(primitive.to_string())
}

/// A function argument's Rust type.
fn arg_type(ty: &str) -> Option<&'static str> {
    match ty {
        "Integer" => Some("i64"),
        "String" => Some("&str"),
        "Float" => Some("f64"),
        "Boolean" => Some("bool"),
        _ => None,
    }
}

/// A valid identifier for `name`, and the serde rename needed to keep the
/// wire name when it differs.
fn identifier(name: &str) -> (String, Option<String>) {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if KEYWORDS.contains(&ident.as_str()) {
        return (format!("r#{ident}"), None);
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    let rename = (ident != name).then(|| name.to_string());
    (ident, rename)
}

/// Like [`identifier`], but usable inside `format!` braces, which take no raw identifiers.
fn path_identifier(name: &str) -> String {
    let (ident, _) = identifier(name);
    match ident.strip_prefix("r#") {
        Some(keyword) => format!("{keyword}_"),
        None => ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::schema::{PathTemplate, ResponseShape};
    use std::collections::BTreeSet;

    fn schema() -> ApiSchema {
        ApiSchema {
            types: vec![TypeSpec {
                name: "Comment".to_string(),
                fields: vec![
                    FieldSpec::new("id", "Integer", "The comment's ID."),
                    FieldSpec::new("type", "String", "The kind of comment."),
                    FieldSpec::new("edited_at", DATETIME, "When it was edited. Optional."),
                    FieldSpec::new("created_at", DATETIME, "When it was posted."),
                ],
            }],
            routes: vec![RouteSpec {
                name: "search_comments".to_string(),
                method: "GET".to_string(),
                path: PathTemplate::parse("/api/v1/json/search/comments", &BTreeSet::new()),
                allowed_query_parameters: vec![
                    QueryParameter {
                        api_name: "q".to_string(),
                        name: "query".to_string(),
                        ty: "String".to_string(),
                        description: "The search query.".to_string(),
                        optional: false,
                    },
                    QueryParameter {
                        api_name: "page".to_string(),
                        name: "page".to_string(),
                        ty: "Integer".to_string(),
                        description: "The page.".to_string(),
                        optional: true,
                    },
                    QueryParameter {
                        api_name: "key".to_string(),
                        name: "key".to_string(),
                        ty: "String".to_string(),
                        description: "An optional\nauthentication token.".to_string(),
                        optional: true,
                    },
                ],
                description: "Executes the search.".to_string(),
                response: ResponseShape {
                    schema: r#"{"comments":[Comment],"total":0}"#.to_string(),
                    key: Some("comments".to_string()),
                    is_list: true,
                    class_name: "Comment".to_string(),
                    has_total: true,
                },
                example_url: "/api/v1/json/search/comments?q=image_id:1000000".to_string(),
            }],
        }
    }

    #[test]
    fn identifiers() {
        assert_eq!(identifier("name"), ("name".to_string(), None));
        assert_eq!(identifier("type"), ("r#type".to_string(), None));
        assert_eq!(identifier("self"), ("self_".to_string(), Some("self".to_string())));
        assert_eq!(
            identifier("thumb-small"),
            ("thumb_small".to_string(), Some("thumb-small".to_string()))
        );
        assert_eq!(identifier("4k"), ("_4k".to_string(), Some("4k".to_string())));
    }

    #[test]
    fn primitive_types() {
        let schema = schema();
        assert_eq!(field_type("Integer", &schema).as_deref(), Some("i64"));
        assert_eq!(field_type(DATETIME, &schema).as_deref(), Some("DateTime<Utc>"));
        assert_eq!(field_type("Array", &schema).as_deref(), Some("Vec<serde_json::Value>"));
        assert_eq!(field_type("Comment", &schema).as_deref(), Some("Comment"));
        assert_eq!(field_type("Object", &schema), None);
    }

    #[test]
    fn renders_models() {
        let sources = render(&schema(), &Tables::derpibooru()).unwrap();
        let models = sources.models;

        assert!(models.contains("use chrono::{DateTime, Utc};"));
        assert!(models.contains("pub struct Comment {"));
        assert!(models.contains("    /// The comment's ID.\n    pub id: i64,"));
        assert!(models.contains("    pub r#type: String,"));
        assert!(models.contains(
            "    #[serde(deserialize_with = \"derpi::models::maybe_de_datetime\")]\n    pub edited_at: Option<DateTime<Utc>>,"
        ));
        assert!(models.contains("    pub created_at: DateTime<Utc>,"));
        assert!(models.contains("impl Model for Comment {"));
        assert!(models.contains("        \"type\",\n"));
    }

    #[test]
    fn renders_routes() {
        let sources = render(&schema(), &Tables::derpibooru()).unwrap();
        let api = sources.api;

        assert!(api.contains("use derpi::{Client, Result, SearchResult};"));
        assert!(api.contains("/// Executes the search.\n"));
        assert!(api.contains(
            "/// `GET /api/v1/json/search/comments`, for example \
             <https://derpibooru.org/api/v1/json/search/comments?q=image_id:1000000>.\n"
        ));
        assert!(api.contains("/// * `key`: An optional\n///   authentication token.\n"));
        assert!(api.contains("pub async fn search_comments(\n    client: &Client,\n    query: &str,\n    page: Option<i64>,\n    key: Option<&str>,\n) -> Result<SearchResult<Comment>> {"));
        assert!(api.contains("    let path = \"/api/v1/json/search/comments\";\n"));
        assert!(api.contains("                (\"q\", Some(query.to_string())),\n"));
        assert!(api.contains("                (\"page\", page.map(|value| value.to_string())),\n"));
        assert!(api.contains("                (\"key\", client.api_key(key)),\n"));
        assert!(api.contains(".fetch_search(\n"));
        assert!(api.contains("            \"comments\",\n"));
    }

    #[test]
    fn keyword_path_segments_render_valid_arguments() {
        let mut schema = schema();
        let route = &mut schema.routes[0];
        route.name = "thing".to_string();
        route.path = PathTemplate::parse("/api/v1/json/things/:type/:self/:thing_id", &BTreeSet::new());
        route.allowed_query_parameters.clear();

        let api = render(&schema, &Tables::derpibooru()).unwrap().api;
        assert!(api.contains("    type_: &str,\n    self_: &str,\n    thing_id: i64,\n"));
        assert!(api.contains("    let path = format!(\"/api/v1/json/things/{type_}/{self_}/{thing_id}\");\n"));
    }

    #[test]
    fn path_argument_yields_to_query_argument() {
        let mut schema = schema();
        schema.routes[0].path = PathTemplate::parse("/api/v1/json/pages/:page", &BTreeSet::new());

        let api = render(&schema, &Tables::derpibooru()).unwrap().api;
        assert!(api.contains("    client: &Client,\n    page_path: &str,\n    query: &str,\n    page: Option<i64>,\n"));
        assert!(api.contains("    let path = format!(\"/api/v1/json/pages/{page_path}\");\n"));
        assert!(api.contains("                (\"page\", page.map(|value| value.to_string())),\n"));
    }

    #[test]
    fn unknown_field_type_fails() {
        let mut schema = schema();
        schema.types[0].fields.push(FieldSpec::new("mystery", "Tuple", ""));
        let err = render(&schema, &Tables::derpibooru()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Drift(DriftError::UnknownType { ref owner, ref ty })
                if owner == "Comment.mystery" && ty == "Tuple"
        ));
    }

    #[test]
    fn unknown_method_fails() {
        let mut schema = schema();
        schema.routes[0].method = "BREW".to_string();
        assert!(matches!(
            render(&schema, &Tables::derpibooru()),
            Err(crate::error::Error::Drift(DriftError::UnsupportedMethod { .. }))
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let tables = Tables::derpibooru();
        assert_eq!(render(&schema(), &tables).unwrap(), render(&schema(), &tables).unwrap());
    }
}
