#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # derpi
//!
//! derpi is a typed client for the Derpibooru JSON API, together with the
//! generator that derives it from the API's own documentation page.
//!
//! The client can fetch:
//! - [`Image`]s, featured or by ID, and upload new ones by URL
//! - [`Comment`]s, [`Tag`]s, [`User`] profiles and [`Filter`]s
//! - [`Forum`]s with their [`Topic`]s and [`Post`]s
//! - search results for all of the above, including reverse image search
//!
//! Every call issues exactly one request, requires `200 OK` with a JSON body,
//! and maps the payload into the matching model.
//!
//! ## Example: Printing the tags of an image.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use derpi::{api, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new();
//!     let image = api::image(&client, 1, None, None).await?;
//!
//!     println!("image {} is tagged {}", image.id(), image.tags().join(", "));
//!     Ok(())
//! }
//! ```
//!
//! ## Generator
//!
//! With the default `codegen` feature, [`codegen`] scrapes
//! <https://derpibooru.org/pages/api> and renders the route functions and
//! models. The `derpi-gen` binary wraps it.
//!
//! [`Image`]:   crate::models::image::Image
//! [`Comment`]: crate::models::comment::Comment
//! [`Tag`]:     crate::models::tag::Tag
//! [`User`]:    crate::models::user::User
//! [`Filter`]:  crate::models::filter::Filter
//! [`Forum`]:   crate::models::forum::Forum
//! [`Topic`]:   crate::models::forum::Topic
//! [`Post`]:    crate::models::forum::Post

/// One async function per API route.
pub mod api;

/// Client module contains [`Client`] for sending requests.
pub mod client;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// The records returned by the API.
pub mod models;

/// Documentation scraping and source generation.
#[cfg(feature = "codegen")]
pub mod codegen;

pub(crate) mod result;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{Model, SearchResult, Strictness};
pub use result::Result;
