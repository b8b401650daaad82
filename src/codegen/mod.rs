//! Reads the API documentation page and generates the client from it.
//!
//! The pipeline runs in one pass over the page:
//!
//! 1. [`ClassIndex::build`] maps `#…-response` anchors to type names.
//! 2. [`fields::parse_types`] reads each type's field table.
//! 3. [`params`] reads the query parameter table and applies the corrections.
//! 4. [`routes::parse_routes`] reads the route table.
//! 5. [`render::render`] emits Rust sources.
//!
//! Any structural surprise stops the run with a [`DriftError`] naming where
//! it happened. Fix [`Tables`] and run again.
//!
//! ```rust,no_run
//! # async fn run() -> derpi::Result<()> {
//! use derpi::codegen::{self, DocumentationSource, HttpSource, Options, Tables};
//!
//! let html = HttpSource::default().fetch().await?;
//! let tables = Tables::derpibooru();
//! let schema = codegen::parse_documentation(&html, &tables, &Options::default())?;
//! let sources = codegen::render(&schema, &tables)?;
//! println!("{}", sources.api);
//! # Ok(())
//! # }
//! ```

/// Cell markup to doc comment markdown.
pub mod describe;
/// The field tables of the `… Responses` sections.
pub mod fields;
/// Link targets to type names.
pub mod index;
pub mod node;
pub mod params;
pub mod render;
/// The route table and response format inference.
pub mod routes;
pub mod schema;
/// Where the documentation page is read from.
pub mod source;
pub mod tables;

pub use crate::error::DriftError;
pub use describe::Normalizer;
pub use index::ClassIndex;
pub use render::{render, GeneratedSources};
pub use schema::{
    ApiSchema, FieldSpec, PathParameter, PathTemplate, QueryParameter, ResponseShape, RouteSpec,
    TypeSpec,
};
pub use source::{DocumentationSource, FileSource, HttpSource};
pub use tables::{Options, Tables, TotalKey, DOCUMENTATION_URL};

/// Parses a documentation page into an [`ApiSchema`].
///
/// # Errors
///
/// Fails with the first [`DriftError`] met.
pub fn parse_documentation(
    html: &str,
    tables: &Tables,
    options: &Options,
) -> Result<ApiSchema, DriftError> {
    let root = node::parse_root(html, &tables.root_selector)?;
    let index = ClassIndex::build(&root, &tables.seeded_classes);
    log::info!("indexed {} classes", index.len());
    let normalizer = Normalizer::new(&index, &tables.origin);

    let types = fields::parse_types(&root, &index, &normalizer, tables)?;

    let registry = params::generic_parse(&root, &tables.parameters_section, &normalizer)?;
    let registry = params::apply_overrides(registry, &tables.corrections)?;
    let registry = params::with_extras(registry, &tables.extra_parameters);
    let params = params::validate(registry)?;
    log::info!("parsed {} query parameters", params.len());

    let routes = routes::parse_routes(&root, &index, &normalizer, &params, tables, options.total)?;

    Ok(ApiSchema { types, routes })
}
