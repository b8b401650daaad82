use serde::{Deserialize, Serialize};

use crate::models::{macros::str_opt_ref, Model};

/// A user-curated collection of images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gallery {
    /// The gallery's description.
    description: String,
    /// The gallery's ID.
    id: u64,
    /// The gallery's spoiler warning.
    spoiler_warning: Option<String>,
    /// The ID of the cover image for the gallery.
    thumbnail_id: u64,
    /// The gallery's title.
    title: String,
    /// The name of the gallery's creator.
    user: String,
    /// The ID of the gallery's creator.
    user_id: u64,
}

impl Model for Gallery {
    const NAME: &'static str = "Gallery";
    const FIELDS: &'static [&'static str] = &[
        "description",
        "id",
        "spoiler_warning",
        "thumbnail_id",
        "title",
        "user",
        "user_id",
    ];
}

impl Gallery {
    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the gallery's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the spoiler warning, if any.
    pub fn spoiler_warning(&self) -> Option<&str> {
        str_opt_ref!(self.spoiler_warning)
    }

    /// Returns the ID of the cover image.
    pub fn thumbnail_id(&self) -> u64 {
        self.thumbnail_id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creator's name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the creator's ID.
    pub fn user_id(&self) -> u64 {
        self.user_id
    }
}
