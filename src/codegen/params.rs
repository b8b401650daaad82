//! The global query parameter table.
//!
//! Parsing happens in stages, each a pure function of the previous result:
//! [`generic_parse`] reads the table, [`apply_overrides`] fixes what the
//! prose does not say precisely, [`with_extras`] adds parameters the table
//! lacks and [`validate`] insists every parameter ended up typed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    codegen::{describe::Normalizer, node::Element, schema::QueryParameter},
    error::DriftError,
};

const HEADER: [&str; 2] = ["Name", "Description"];

/// A parameter that may still lack a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDraft {
    /// Name on the wire.
    pub api_name: String,
    /// Name exposed to callers.
    pub name: String,
    /// `None` until a correction types it.
    pub ty: Option<String>,
    /// Normalized description.
    pub description: String,
    /// Read from the description, possibly corrected.
    pub optional: bool,
}

/// Parameters by wire name.
pub type Registry = BTreeMap<String, ParameterDraft>;

/// A manual fix for one parameter. `None` leaves the value as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correction {
    /// Replacement type.
    pub ty: Option<String>,
    /// Replacement optionality.
    pub optional: Option<bool>,
    /// Name exposed to callers instead of the wire name.
    pub rename: Option<String>,
}

impl Correction {
    /// Sets both type and optionality.
    pub fn typed(ty: &str, optional: bool) -> Correction {
        Correction {
            ty: Some(ty.to_string()),
            optional: Some(optional),
            rename: None,
        }
    }

    /// Also exposes the parameter as `name`.
    #[must_use]
    pub fn renamed(mut self, name: &str) -> Correction {
        self.rename = Some(name.to_string());
        self
    }
}

/// Reads the parameter table that follows the heading with id `section`.
///
/// A page without that heading yields an empty registry.
///
/// # Errors
///
/// Fails when the heading has no table after it, when the header row is not
/// `Name, Description`, or when a row lacks its cells.
pub fn generic_parse(
    root: &Element,
    section: &str,
    normalizer: &Normalizer<'_>,
) -> Result<Registry, DriftError> {
    let Some((_, table)) = root
        .headings_with_tables("h2")
        .into_iter()
        .find(|(heading, _)| heading.attr("id") == Some(section))
    else {
        log::warn!("no #{section} heading, continuing without query parameters");
        return Ok(Registry::new());
    };
    let table = table.ok_or_else(|| DriftError::MissingTable(section.to_string()))?;

    let found = table.header_row();
    log::debug!("column_headers: {found:?}");
    if found != HEADER {
        return Err(DriftError::HeaderMismatch {
            table: section.to_string(),
            expected: HEADER.map(String::from).to_vec(),
            found,
        });
    }

    let mut registry = Registry::new();
    for (row, cells) in table.body_rows().into_iter().enumerate() {
        let malformed = |reason: &str| DriftError::MalformedRow {
            table: section.to_string(),
            row: row + 1,
            reason: reason.to_string(),
        };
        let [name, description, ..] = cells.as_slice() else {
            return Err(malformed("expected 2 cells"));
        };
        let name = name
            .find("code")
            .ok_or_else(|| malformed("name cell has no <code>"))?
            .text();
        let description = normalizer.describe(&description.children)?;
        log::debug!("{name}: {description:?}");

        registry.insert(
            name.clone(),
            ParameterDraft {
                api_name: name.clone(),
                optional: description.to_lowercase().contains("optional"),
                name,
                ty: None,
                description,
            },
        );
    }
    Ok(registry)
}

/// Applies `corrections` in order.
///
/// # Errors
///
/// Fails with [`DriftError::UnknownOverride`] when a correction names a
/// parameter that is not in `registry`.
pub fn apply_overrides(
    mut registry: Registry,
    corrections: &[(String, Correction)],
) -> Result<Registry, DriftError> {
    for (name, correction) in corrections {
        let param = registry
            .get_mut(name)
            .ok_or_else(|| DriftError::UnknownOverride(name.clone()))?;
        if let Some(ty) = &correction.ty {
            param.ty = Some(ty.clone());
        }
        if let Some(optional) = correction.optional {
            param.optional = optional;
        }
        if let Some(rename) = &correction.rename {
            param.name = rename.clone();
        }
    }
    Ok(registry)
}

/// Adds `extras`, replacing parameters of the same wire name.
pub fn with_extras(mut registry: Registry, extras: &[ParameterDraft]) -> Registry {
    for extra in extras {
        registry.insert(extra.api_name.clone(), extra.clone());
    }
    registry
}

/// Checks every parameter is typed.
///
/// # Errors
///
/// Fails with [`DriftError::UntypedParameter`] naming the first untyped one.
pub fn validate(registry: Registry) -> Result<BTreeMap<String, QueryParameter>, DriftError> {
    registry
        .into_iter()
        .map(|(key, draft)| {
            let ty = draft
                .ty
                .ok_or_else(|| DriftError::UntypedParameter(key.clone()))?;
            Ok((
                key,
                QueryParameter {
                    api_name: draft.api_name,
                    name: draft.name,
                    ty,
                    description: draft.description,
                    optional: draft.optional,
                },
            ))
        })
        .collect()
}
