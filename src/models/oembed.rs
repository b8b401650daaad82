use serde::{Deserialize, Serialize};

use crate::models::Model;

/// An oEmbed description of an image, returned without a wrapper key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Oembed {
    /// The comma-delimited names of the image authors.
    pub author_name: String,
    /// The source URL of the image.
    pub author_url: String,
    /// Always 7200.
    pub cache_age: u32,
    /// The number of comments made on the image.
    pub derpibooru_comments: u32,
    /// The image's ID.
    pub derpibooru_id: u64,
    /// Upvotes minus downvotes.
    pub derpibooru_score: i64,
    /// The names of the image's tags.
    pub derpibooru_tags: Vec<String>,
    /// Always "Derpibooru".
    pub provider_name: String,
    /// Always `"https://derpibooru.org"`.
    pub provider_url: String,
    /// The image's ID and associated tags, as shown in the page title.
    pub title: String,
    /// Always "photo".
    #[serde(rename = "type")]
    pub kind: String,
    /// Always "1.0".
    pub version: String,
}

impl Model for Oembed {
    const NAME: &'static str = "Oembed";
    const FIELDS: &'static [&'static str] = &[
        "author_name",
        "author_url",
        "cache_age",
        "derpibooru_comments",
        "derpibooru_id",
        "derpibooru_score",
        "derpibooru_tags",
        "provider_name",
        "provider_url",
        "title",
        "type",
        "version",
    ];
}
