use std::collections::BTreeSet;

use crate::{
    codegen::{
        describe::Normalizer,
        index::{response_heading, ClassIndex},
        node::Element,
        schema::{FieldSpec, TypeSpec},
        tables::Tables,
    },
    error::DriftError,
};

const HEADER: [&str; 3] = ["Field", "Type", "Description"];

/// Parses the field table under every `… Responses` heading, after the
/// synthetic types from `tables`.
///
/// # Errors
///
/// Fails when a heading has no table, a header row differs from
/// `Field, Type, Description`, a row is malformed, an `Object` field has no
/// type link, or a field name repeats within a type.
pub fn parse_types(
    root: &Element,
    index: &ClassIndex,
    normalizer: &Normalizer<'_>,
    tables: &Tables,
) -> Result<Vec<TypeSpec>, DriftError> {
    let mut types = tables.synthetic_types.clone();

    for (heading, table) in root.headings_with_tables("h2") {
        let Some((anchor, name)) = response_heading(heading) else {
            continue;
        };
        let table = table.ok_or_else(|| DriftError::MissingTable(anchor.clone()))?;
        types.push(parse_type(&name, table, index, normalizer, tables)?);
    }

    log::info!("parsed {} types", types.len());
    Ok(types)
}

fn parse_type(
    name: &str,
    table: &Element,
    index: &ClassIndex,
    normalizer: &Normalizer<'_>,
    tables: &Tables,
) -> Result<TypeSpec, DriftError> {
    let found = table.header_row();
    log::debug!("column_headers: {found:?}");
    if found != HEADER {
        return Err(DriftError::HeaderMismatch {
            table: name.to_string(),
            expected: HEADER.map(String::from).to_vec(),
            found,
        });
    }

    let mut seen = BTreeSet::new();
    let mut fields = Vec::new();
    for (row, cells) in table.body_rows().into_iter().enumerate() {
        let malformed = |reason: &str| DriftError::MalformedRow {
            table: name.to_string(),
            row: row + 1,
            reason: reason.to_string(),
        };
        let [field, ty, description, ..] = cells.as_slice() else {
            return Err(malformed("expected 3 cells"));
        };
        let field = field
            .find("code")
            .ok_or_else(|| malformed("field cell has no <code>"))?
            .text();

        let ty = match tables.forced_type(name, &field) {
            Some(forced) => forced.to_string(),
            None => declared_type(name, &field, ty, description, index)?,
        };
        let description = normalizer.describe(&description.children)?;
        log::debug!("{name}.{field}: {ty:?}, {description:?}");

        if !seen.insert(field.clone()) {
            return Err(DriftError::DuplicateField {
                class: name.to_string(),
                field,
            });
        }
        fields.push(FieldSpec::new(field, ty, description));
    }

    Ok(TypeSpec {
        name: name.to_string(),
        fields,
    })
}

/// The type column, or for `Object` the type linked from the description.
fn declared_type(
    class: &str,
    field: &str,
    ty: &Element,
    description: &Element,
    index: &ClassIndex,
) -> Result<String, DriftError> {
    let ty = ty.text().trim().to_string();
    if ty != "Object" {
        return Ok(ty);
    }

    let href = description
        .child_elements()
        .find(|child| child.name == "a" && child.href().is_some())
        .and_then(Element::href)
        .ok_or_else(|| DriftError::MissingTypeLink {
            class: class.to_string(),
            field: field.to_string(),
        })?;
    index.resolve(href).map(ToString::to_string)
}
