use serde::{Deserialize, Serialize};

use crate::models::Model;

/// A comment left on an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// The comment's author.
    author: String,

    /// The comment text.
    body: String,

    /// The comment's ID.
    id: u64,

    /// The ID of the image the comment belongs to.
    image_id: u64,

    /// The ID of the user the comment belongs to, if any.
    user_id: Option<u64>,
}

impl Model for Comment {
    const NAME: &'static str = "Comment";
    const FIELDS: &'static [&'static str] = &["author", "body", "id", "image_id", "user_id"];
}

impl Comment {
    /// Returns the name of the comment's author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the comment text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the comment's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the ID of the image the comment was left on.
    pub fn image_id(&self) -> u64 {
        self.image_id
    }

    /// Returns the author's user ID, `None` for anonymous comments.
    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }
}
