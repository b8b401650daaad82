use serde::{Deserialize, Serialize};

use crate::models::{macros::str_opt_ref, Model};

/// A tag and its relations to other tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// The slug of the tag this tag is aliased to, if any.
    aliased_tag: Option<String>,
    /// The slugs of the tags aliased to this tag.
    aliases: Vec<String>,
    /// The category class of this tag, e.g. `character` or `rating`.
    category: Option<String>,
    /// The long description for the tag.
    description: String,
    /// Do-not-post entries claimed on the tag, kept as raw JSON.
    dnp_entries: Vec<serde_json::Value>,
    /// The tag's ID.
    id: u64,
    /// The image count of the tag.
    images: u32,
    /// The slugs of the tags this tag is implied by.
    implied_by_tags: Vec<String>,
    /// The slugs of the tags this tag implies.
    implied_tags: Vec<String>,
    /// The name of the tag.
    name: String,
    /// The name of the tag in its namespace.
    name_in_namespace: String,
    /// The namespace of the tag.
    namespace: Option<String>,
    /// The short description for the tag.
    short_description: String,
    /// The slug for the tag.
    slug: String,
    /// The spoiler image URL for the tag.
    spoiler_image: Option<String>,
}

impl Model for Tag {
    const NAME: &'static str = "Tag";
    const FIELDS: &'static [&'static str] = &[
        "aliased_tag",
        "aliases",
        "category",
        "description",
        "dnp_entries",
        "id",
        "images",
        "implied_by_tags",
        "implied_tags",
        "name",
        "name_in_namespace",
        "namespace",
        "short_description",
        "slug",
        "spoiler_image",
    ];
}

impl Tag {
    /// Returns the slug this tag is aliased to, if any.
    pub fn aliased_tag(&self) -> Option<&str> {
        str_opt_ref!(self.aliased_tag)
    }

    /// Returns the slugs aliased to this tag.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the tag's category, if it has one.
    pub fn category(&self) -> Option<&str> {
        str_opt_ref!(self.category)
    }

    /// Returns the long description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw DNP entries.
    pub fn dnp_entries(&self) -> &[serde_json::Value] {
        &self.dnp_entries
    }

    /// Returns the tag's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the number of images carrying this tag.
    pub fn images(&self) -> u32 {
        self.images
    }

    /// Returns the slugs that imply this tag.
    pub fn implied_by_tags(&self) -> &[String] {
        &self.implied_by_tags
    }

    /// Returns the slugs this tag implies.
    pub fn implied_tags(&self) -> &[String] {
        &self.implied_tags
    }

    /// Returns the tag's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name without its namespace.
    pub fn name_in_namespace(&self) -> &str {
        &self.name_in_namespace
    }

    /// Returns the namespace, e.g. `artist`.
    pub fn namespace(&self) -> Option<&str> {
        str_opt_ref!(self.namespace)
    }

    /// Returns the short description.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// Returns the slug used by the tag route.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the spoiler image URL, if set.
    pub fn spoiler_image(&self) -> Option<&str> {
        str_opt_ref!(self.spoiler_image)
    }
}
