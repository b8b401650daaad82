use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    codegen::{
        describe::Normalizer,
        index::ClassIndex,
        node::{Element, Node},
        schema::{PathTemplate, QueryParameter, ResponseShape, RouteSpec},
        tables::{Tables, TotalKey},
    },
    error::DriftError,
};

const HEADER: [&str; 6] = [
    "Method",
    "Path",
    "Allowed Query Parameters",
    "Description",
    "Response Format",
    "Example",
];

/// Parses the route table under the heading with id `tables.routes_section`.
///
/// # Errors
///
/// Fails on the first row that does not fit, see [`DriftError`].
pub fn parse_routes(
    root: &Element,
    index: &ClassIndex,
    normalizer: &Normalizer<'_>,
    params: &BTreeMap<String, QueryParameter>,
    tables: &Tables,
    total: TotalKey,
) -> Result<Vec<RouteSpec>, DriftError> {
    let section = &tables.routes_section;
    let (_, table) = root
        .headings_with_tables("h2")
        .into_iter()
        .find(|(heading, _)| heading.attr("id") == Some(section.as_str()))
        .ok_or_else(|| DriftError::MissingSection(format!("h2#{section}")))?;
    let table = table.ok_or_else(|| DriftError::MissingTable(section.clone()))?;

    let found = table.header_row();
    log::debug!("column_headers: {found:?}");
    if found != HEADER {
        return Err(DriftError::HeaderMismatch {
            table: section.clone(),
            expected: HEADER.map(String::from).to_vec(),
            found,
        });
    }

    let mut routes = Vec::new();
    for (row, cells) in table.body_rows().into_iter().enumerate() {
        let malformed = |reason: &str| DriftError::MalformedRow {
            table: section.clone(),
            row: row + 1,
            reason: reason.to_string(),
        };
        let [method, path, allowed, description, format, example, ..] = cells.as_slice() else {
            return Err(malformed("expected 6 cells"));
        };
        let code = |cell: &Element, column: &str| {
            cell.find("code")
                .map(Element::text)
                .ok_or_else(|| malformed(&format!("{column} cell has no <code>")))
        };

        let method = code(method, "method")?;
        let path = code(path, "path")?;
        let name = tables
            .route_names
            .get(&path)
            .cloned()
            .ok_or_else(|| DriftError::UnmappedRoute(path.clone()))?;
        let path = PathTemplate::parse(&path, &tables.string_ids);
        log::debug!("{path:?}");

        let allowed_query_parameters = allowed
            .text()
            .split(',')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(|param| {
                params
                    .get(param)
                    .cloned()
                    .ok_or_else(|| DriftError::UnknownQueryParameter {
                        route: name.clone(),
                        param: param.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let format = format
            .find("code")
            .ok_or_else(|| malformed("response format cell has no <code>"))?;
        let response = response_shape(&name, &format.children, index, total)?;

        let example_url = example
            .find("a")
            .and_then(Element::href)
            .ok_or_else(|| DriftError::MissingExample(name.clone()))?
            .to_string();

        routes.push(RouteSpec {
            method,
            path,
            allowed_query_parameters,
            description: normalizer.describe(&description.children)?,
            response,
            example_url,
            name,
        });
    }

    log::info!("parsed {} routes", routes.len());
    Ok(routes)
}

/// Derives the shape of a response from the children of its format cell.
///
/// The cell is replayed twice: once with the linked type's name, giving the
/// display schema, and once with `{}` in its place, giving JSON that can be
/// inspected.
///
/// ```text
/// {"images":[image-response]}  ->  {"images":[Image]}  /  {"images":[{}]}
/// ```
///
/// # Errors
///
/// Fails unless exactly one type is linked and the JSON is `{}`, or an
/// object with one key (besides `total`) holding `{}` or `[{}]`.
pub fn response_shape(
    route: &str,
    nodes: &[Node],
    index: &ClassIndex,
    total: TotalKey,
) -> Result<ResponseShape, DriftError> {
    let mut schema = String::new();
    let mut mock = String::new();
    let mut class_name = None;

    for node in nodes {
        match node {
            Node::Text(text) => {
                schema.push_str(text);
                mock.push_str(text);
            }
            Node::Element(element) if element.name == "a" && element.href().is_some() => {
                if class_name.is_some() {
                    return Err(DriftError::MultipleResponseTypes(route.to_string()));
                }
                let name = index.resolve(element.href().unwrap_or_default())?;
                schema.push_str(name);
                mock.push_str("{}");
                class_name = Some(name.to_string());
            }
            Node::Element(element) => {
                let text = element.text();
                schema.push_str(&text);
                mock.push_str(&text);
            }
        }
    }

    log::debug!("schema: {schema:?}");
    log::debug!("mock: {mock:?}");
    let class_name = class_name.ok_or_else(|| DriftError::MissingResponseType(route.to_string()))?;
    let mock: Value = serde_json::from_str(&mock).map_err(|e| DriftError::ResponseFormat {
        route: route.to_string(),
        reason: e.to_string(),
    })?;
    let (key, is_list, has_total) = decide(route, mock, total)?;

    Ok(ResponseShape {
        schema,
        key,
        is_list,
        class_name,
        has_total,
    })
}

fn decide(route: &str, mock: Value, total: TotalKey) -> Result<(Option<String>, bool, bool), DriftError> {
    let format_error = |reason: String| DriftError::ResponseFormat {
        route: route.to_string(),
        reason,
    };

    let mut map = match mock {
        Value::Object(map) => map,
        other => return Err(format_error(format!("expected an object, found {other}"))),
    };
    if map.is_empty() {
        return Ok((None, false, false));
    }

    let has_total = total == TotalKey::Record && map.remove("total").is_some();
    if map.len() != 1 {
        let keys: Vec<&String> = map.keys().collect();
        return Err(format_error(format!("expected a single key, found {keys:?}")));
    }
    let Some((key, value)) = map.into_iter().next() else {
        return Err(format_error("expected a single key, found none".to_string()));
    };

    let is_list = match value {
        Value::Object(inner) if inner.is_empty() => false,
        Value::Array(items) if matches!(items.as_slice(), [Value::Object(inner)] if inner.is_empty()) => {
            true
        }
        other => {
            return Err(format_error(format!(
                "expected {{}} or [{{}}] under {key:?}, found {other}"
            )))
        }
    };

    Ok((Some(key), is_list, has_total))
}
