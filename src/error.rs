use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the API.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or its body not read.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The API answered with anything but `200 OK`.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// The body is not `application/json`.
    #[error("expected a json response, got content type {0:?}")]
    UnexpectedContentType(String),

    /// The documented top-level key is absent.
    #[error("response has no {0:?} key")]
    MissingKey(String),

    /// The payload is not the JSON type the route documents.
    #[error("expected {expected} in response, found {found}")]
    UnexpectedShape {
        /// What the route documents, e.g. "an object".
        expected: &'static str,
        /// What arrived instead.
        found: &'static str,
    },

    /// Strict mode met keys the model does not know.
    #[error("{model} got unexpected keys: {}", .keys.join(", "))]
    UnexpectedKeys {
        /// [`Model::NAME`](crate::Model::NAME) of the target.
        model: &'static str,
        /// The unknown keys.
        keys: Vec<String>,
    },

    /// Strict mode found documented keys absent.
    #[error("{model} is missing keys: {}", .keys.join(", "))]
    MissingKeys {
        /// [`Model::NAME`](crate::Model::NAME) of the target.
        model: &'static str,
        /// The absent keys.
        keys: Vec<String>,
    },

    /// The body is not valid JSON or does not fit the model.
    #[error("{}", _0)]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("{}", _0)]
    IO(#[from] std::io::Error),

    /// The documentation page no longer matches what the generator expects.
    #[cfg(feature = "codegen")]
    #[error("documentation drift: {0}")]
    Drift(#[from] DriftError),

    /// A template failed to render.
    #[cfg(feature = "codegen")]
    #[error("{0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Name of the JSON type of `value`, used in [`Error::UnexpectedShape`].
    pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
        use serde_json::Value;

        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

/// A structural assumption about the documentation page no longer holds.
///
/// Every variant names the section, table, row, route or field concerned, so
/// the override tables can be fixed and the generator rerun.
#[cfg(feature = "codegen")]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriftError {
    /// A configured CSS selector does not parse.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        /// The selector as configured.
        selector: String,
        /// The parser's complaint.
        reason: String,
    },

    /// A root selector or section heading matches nothing.
    #[error("no element matches {0:?}")]
    MissingSection(String),

    /// A section heading has no table after it.
    #[error("no table follows the {0:?} heading")]
    MissingTable(String),

    /// A table's header row changed.
    #[error("{table} table has header {found:?}, expected {expected:?}")]
    HeaderMismatch {
        /// Section or type the table belongs to.
        table: String,
        /// The known columns.
        expected: Vec<String>,
        /// The columns on the page.
        found: Vec<String>,
    },

    /// A body row lacks cells or markup.
    #[error("row {row} of the {table} table is malformed: {reason}")]
    MalformedRow {
        /// Section or type the table belongs to.
        table: String,
        /// 1-based, header excluded.
        row: usize,
        /// What is missing.
        reason: String,
    },

    /// A link points at no indexed type.
    #[error("link to {0:?} does not name a known type")]
    UnresolvedAnchor(String),

    /// An `Object` field does not link its type.
    #[error("{class}.{field} is an Object without a type link")]
    MissingTypeLink {
        /// The type holding the field.
        class: String,
        /// The field.
        field: String,
    },

    /// A field name repeats within one type.
    #[error("{class}.{field} is declared twice")]
    DuplicateField {
        /// The type holding the field.
        class: String,
        /// The repeated name.
        field: String,
    },

    /// A correction names a parameter the table lacks.
    #[error("correction for unknown parameter {0:?}")]
    UnknownOverride(String),

    /// A parameter is still untyped after corrections.
    #[error("parameter {0:?} has no type")]
    UntypedParameter(String),

    /// A documented path has no entry in the route name table.
    #[error("no route name for path {0:?}")]
    UnmappedRoute(String),

    /// A route allows a parameter the registry lacks.
    #[error("route {route} allows unknown parameter {param:?}")]
    UnknownQueryParameter {
        /// The route's name.
        route: String,
        /// The parameter's wire name.
        param: String,
    },

    /// A response format links two types.
    #[error("response format of route {0} links more than one type")]
    MultipleResponseTypes(String),

    /// A response format links no type.
    #[error("response format of route {0} links no type")]
    MissingResponseType(String),

    /// A response format is not `{}`, `{"key":{}}` or `{"key":[{}]}`.
    #[error("response format of route {route} is not understood: {reason}")]
    ResponseFormat {
        /// The route's name.
        route: String,
        /// What did not fit.
        reason: String,
    },

    /// A route row has no example link.
    #[error("route {0} has no example link")]
    MissingExample(String),

    /// A route uses a method the client cannot send.
    #[error("route {route} uses unsupported method {method:?}")]
    UnsupportedMethod {
        /// The route's name.
        route: String,
        /// The method as documented.
        method: String,
    },

    /// A declared type is neither primitive nor documented.
    #[error("{owner} uses unknown type {ty:?}")]
    UnknownType {
        /// Field, parameter or route declaring it.
        owner: String,
        /// The declared type.
        ty: String,
    },
}
