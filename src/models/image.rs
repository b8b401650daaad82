use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{de_datetime, macros::str_opt_ref, Model};

/// Internal image intensity data, used by the site for deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intensities {
    /// Northeast intensity.
    pub ne: f64,
    /// Northwest intensity.
    pub nw: f64,
    /// Southeast intensity.
    pub se: f64,
    /// Southwest intensity.
    pub sw: f64,
}

impl Model for Intensities {
    const NAME: &'static str = "Intensities";
    const FIELDS: &'static [&'static str] = &["ne", "nw", "se", "sw"];
}

/// URLs of the rendered sizes of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Representations {
    /// The full-size image.
    pub full: String,
    /// The `large` representation.
    pub large: String,
    /// The `medium` representation.
    pub medium: String,
    /// The `small` representation.
    pub small: String,
    /// The `tall` representation.
    pub tall: String,
    /// The `thumb` representation.
    pub thumb: String,
    /// The `thumb_small` representation.
    pub thumb_small: String,
    /// The `thumb_tiny` representation.
    pub thumb_tiny: String,
}

impl Model for Representations {
    const NAME: &'static str = "Representations";
    const FIELDS: &'static [&'static str] = &[
        "full",
        "large",
        "medium",
        "small",
        "tall",
        "thumb",
        "thumb_small",
        "thumb_tiny",
    ];
}

/// An uploaded image and its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// The image's width divided by its height.
    aspect_ratio: f64,

    /// The number of comments made on the image.
    comment_count: u32,

    /// The creation time, in UTC, of the image.
    #[serde(deserialize_with = "de_datetime")]
    created_at: DateTime<Utc>,

    /// The hide reason for the image. Only set on images deleted for a rule violation.
    deletion_reason: Option<String>,

    /// The image's description.
    description: String,

    /// The number of downvotes the image has.
    downvotes: u32,

    /// The ID of the target image, if this image was merged into another one.
    duplicate_of: Option<u64>,

    /// The number of faves the image has.
    faves: u32,

    /// The time, in UTC, this image was first seen (before any duplicate merging).
    #[serde(deserialize_with = "de_datetime")]
    first_seen_at: DateTime<Utc>,

    /// The file extension of this image.
    format: String,

    /// The image's height, in pixels.
    height: u32,

    /// Whether this image is hidden because it was merged or deleted.
    hidden_from_users: bool,

    /// The image's ID.
    id: u64,

    /// Intensity data, `None` until the site has generated it.
    intensities: Option<Intensities>,

    /// The MIME type of this image.
    mime_type: String,

    /// The filename that this image was uploaded with.
    name: String,

    /// The SHA512 hash of this image as it was originally uploaded.
    orig_sha512_hash: Option<String>,

    /// Whether the image has finished optimization.
    processed: bool,

    /// URLs of the rendered sizes of this image.
    representations: Representations,

    /// Upvotes minus downvotes.
    score: i64,

    /// The SHA512 hash of this image after it has been processed.
    sha512_hash: Option<String>,

    /// The current source URL of the image.
    source_url: Option<String>,

    /// Whether this image is hit by the current filter.
    spoilered: bool,

    /// The number of tags present on this image.
    tag_count: u32,

    /// The IDs of the tags on this image.
    tag_ids: Vec<u64>,

    /// The names of the tags on this image.
    tags: Vec<String>,

    /// Whether thumbnail generation has finished.
    thumbnails_generated: bool,

    /// The time, in UTC, the image was last updated.
    #[serde(deserialize_with = "de_datetime")]
    updated_at: DateTime<Utc>,

    /// The image's uploader, `None` for anonymous uploads.
    uploader: Option<String>,

    /// The ID of the image's uploader, `None` for anonymous uploads.
    uploader_id: Option<u64>,

    /// The image's number of upvotes.
    upvotes: u32,

    /// The image's view URL, including tags.
    view_url: String,

    /// The image's width, in pixels.
    width: u32,

    /// The lower bound of the Wilson score interval at 99.5% confidence.
    wilson_score: f64,
}

impl Model for Image {
    const NAME: &'static str = "Image";
    const FIELDS: &'static [&'static str] = &[
        "aspect_ratio",
        "comment_count",
        "created_at",
        "deletion_reason",
        "description",
        "downvotes",
        "duplicate_of",
        "faves",
        "first_seen_at",
        "format",
        "height",
        "hidden_from_users",
        "id",
        "intensities",
        "mime_type",
        "name",
        "orig_sha512_hash",
        "processed",
        "representations",
        "score",
        "sha512_hash",
        "source_url",
        "spoilered",
        "tag_count",
        "tag_ids",
        "tags",
        "thumbnails_generated",
        "updated_at",
        "uploader",
        "uploader_id",
        "upvotes",
        "view_url",
        "width",
        "wilson_score",
    ];
}

impl Image {
    /// Returns the image's width divided by its height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Returns the number of comments on the image.
    pub fn comment_count(&self) -> u32 {
        self.comment_count
    }

    /// Returns when the image was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the hide reason, if the image was deleted for a rule violation.
    pub fn deletion_reason(&self) -> Option<&str> {
        str_opt_ref!(self.deletion_reason)
    }

    /// Returns the image's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the number of downvotes.
    pub fn downvotes(&self) -> u32 {
        self.downvotes
    }

    /// Returns the ID of the image this one was merged into, if any.
    pub fn duplicate_of(&self) -> Option<u64> {
        self.duplicate_of
    }

    /// Returns the number of faves.
    pub fn faves(&self) -> u32 {
        self.faves
    }

    /// Returns when the image was first seen.
    pub fn first_seen_at(&self) -> DateTime<Utc> {
        self.first_seen_at
    }

    /// Returns the file extension.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether the image is hidden from users.
    pub fn hidden_from_users(&self) -> bool {
        self.hidden_from_users
    }

    /// Returns the image's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the intensity data, if generated.
    pub fn intensities(&self) -> Option<&Intensities> {
        self.intensities.as_ref()
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the filename the image was uploaded with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the SHA512 hash of the original upload.
    pub fn orig_sha512_hash(&self) -> Option<&str> {
        str_opt_ref!(self.orig_sha512_hash)
    }

    /// Returns whether optimization has finished.
    pub fn processed(&self) -> bool {
        self.processed
    }

    /// Returns the URLs of the rendered sizes.
    pub fn representations(&self) -> &Representations {
        &self.representations
    }

    /// Returns upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Returns the SHA512 hash of the processed image.
    pub fn sha512_hash(&self) -> Option<&str> {
        str_opt_ref!(self.sha512_hash)
    }

    /// Returns the source URL, if any.
    pub fn source_url(&self) -> Option<&str> {
        str_opt_ref!(self.source_url)
    }

    /// Returns whether the current filter spoilers this image.
    pub fn spoilered(&self) -> bool {
        self.spoilered
    }

    /// Returns the number of tags.
    pub fn tag_count(&self) -> u32 {
        self.tag_count
    }

    /// Returns the tag IDs.
    pub fn tag_ids(&self) -> &[u64] {
        &self.tag_ids
    }

    /// Returns the tag names.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether thumbnails have been generated.
    ///
    /// Do not load [`Image::view_url`] or [`Image::representations`] while this is `false`.
    pub fn thumbnails_generated(&self) -> bool {
        self.thumbnails_generated
    }

    /// Returns when the image was last updated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the uploader's name, `None` if anonymous.
    pub fn uploader(&self) -> Option<&str> {
        str_opt_ref!(self.uploader)
    }

    /// Returns the uploader's ID, `None` if anonymous.
    pub fn uploader_id(&self) -> Option<u64> {
        self.uploader_id
    }

    /// Returns the number of upvotes.
    pub fn upvotes(&self) -> u32 {
        self.upvotes
    }

    /// Returns the view URL.
    pub fn view_url(&self) -> &str {
        &self.view_url
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the Wilson score.
    pub fn wilson_score(&self) -> f64 {
        self.wilson_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strictness;
    use serde_json::json;

    fn cacaw() -> serde_json::Value {
        json!({
            "mime_type": "image/png",
            "tag_ids": [24249, 26029, 27084],
            "comment_count": 63,
            "score": 1103,
            "downvotes": 11,
            "thumbnails_generated": true,
            "wilson_score": 0.979_283_949_936_027_2,
            "source_url": "https://twitter.com/KamDrawings/status/1123822106784010240",
            "aspect_ratio": 1.745_409_015_025_041_6,
            "sha512_hash": "ef377b5c",
            "orig_sha512_hash": "ef377b5c",
            "first_seen_at": "2019-05-02T05:33:36",
            "height": 1198,
            "intensities": {
                "ne": 43.666_426_229_379_056,
                "nw": 55.867_096_665_865_6,
                "se": 29.931_677_346_829_446,
                "sw": 43.073_299_224_516_546
            },
            "hidden_from_users": false,
            "name": "cacaw.png",
            "spoilered": false,
            "description": "bird.",
            "uploader": "Kam3E433",
            "tag_count": 3,
            "processed": true,
            "representations": {
                "full": "https://derpicdn.net/img/view/2019/5/2/2028858.png",
                "large": "https://derpicdn.net/img/2019/5/2/2028858/large.png",
                "medium": "https://derpicdn.net/img/2019/5/2/2028858/medium.png",
                "small": "https://derpicdn.net/img/2019/5/2/2028858/small.png",
                "tall": "https://derpicdn.net/img/2019/5/2/2028858/tall.png",
                "thumb": "https://derpicdn.net/img/2019/5/2/2028858/thumb.png",
                "thumb_small": "https://derpicdn.net/img/2019/5/2/2028858/thumb_small.png",
                "thumb_tiny": "https://derpicdn.net/img/2019/5/2/2028858/thumb_tiny.png"
            },
            "width": 2091,
            "id": 2_028_858,
            "deletion_reason": null,
            "view_url": "https://derpicdn.net/img/view/2019/5/2/2028858.png",
            "created_at": "2019-05-02T05:33:36",
            "updated_at": "2020-04-10T00:14:35Z",
            "faves": 813,
            "upvotes": 1114,
            "format": "png",
            "duplicate_of": null,
            "uploader_id": 459_261,
            "tags": ["caw", "gallus", "sandbar"]
        })
    }

    #[test]
    fn parses_image_payload() {
        let image = Image::from_value(cacaw(), Strictness::Strict).unwrap();

        assert_eq!(image.id(), 2_028_858);
        assert_eq!(image.name(), "cacaw.png");
        assert_eq!(image.score(), 1103);
        assert_eq!(image.deletion_reason(), None);
        assert_eq!(image.duplicate_of(), None);
        assert_eq!(image.uploader_id(), Some(459_261));
        assert_eq!(image.tags(), ["caw", "gallus", "sandbar"]);
        assert_eq!(image.created_at().to_rfc3339(), "2019-05-02T05:33:36+00:00");
        assert_eq!(image.updated_at().to_rfc3339(), "2020-04-10T00:14:35+00:00");
        assert_eq!(
            image.representations().thumb_tiny,
            "https://derpicdn.net/img/2019/5/2/2028858/thumb_tiny.png"
        );
        let intensities = image.intensities().unwrap();
        assert!((intensities.ne - 43.666).abs() < 0.001);
    }

    #[test]
    fn null_intensities_are_allowed() {
        let mut payload = cacaw();
        payload["intensities"] = serde_json::Value::Null;
        let image = Image::from_value(payload, Strictness::Lenient).unwrap();
        assert!(image.intensities().is_none());
    }

    #[test]
    fn strict_mode_notices_new_fields() {
        let mut payload = cacaw();
        payload["animated"] = json!(false);

        assert!(Image::from_value(payload.clone(), Strictness::Lenient).is_ok());
        assert!(Image::from_value(payload, Strictness::Strict).is_err());
    }
}
