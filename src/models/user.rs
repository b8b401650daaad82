use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{de_datetime, macros::str_opt_ref, Model};

/// A user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// The ID of the user.
    id: u64,
    /// The name of the user.
    name: String,
    /// The slug of the user.
    slug: String,
    /// The role of the user.
    role: String,
    /// The description (bio) of the user.
    description: Option<String>,
    /// The URL of the user's thumbnail. `None` if they haven't set one.
    avatar_url: Option<String>,
    /// The creation time, in UTC, of the user.
    #[serde(deserialize_with = "de_datetime")]
    created_at: DateTime<Utc>,
    /// The comment count of the user.
    comments_count: u32,
    /// The upload count of the user.
    uploads_count: u32,
    /// The forum posts count of the user.
    posts_count: u32,
    /// The forum topics count of the user.
    topics_count: u32,
    /// The links the user has registered.
    links: Vec<Links>,
    /// The awards/badges of the user.
    awards: Vec<Awards>,
}

impl Model for User {
    const NAME: &'static str = "User";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "role",
        "description",
        "avatar_url",
        "created_at",
        "comments_count",
        "uploads_count",
        "posts_count",
        "topics_count",
        "links",
        "awards",
    ];
}

impl User {
    /// Returns the user's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the user's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the user's role.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the user's bio, if any.
    pub fn description(&self) -> Option<&str> {
        str_opt_ref!(self.description)
    }

    /// Returns the avatar URL, if set.
    pub fn avatar_url(&self) -> Option<&str> {
        str_opt_ref!(self.avatar_url)
    }

    /// Returns when the account was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of comments.
    pub fn comments_count(&self) -> u32 {
        self.comments_count
    }

    /// Returns the number of uploads.
    pub fn uploads_count(&self) -> u32 {
        self.uploads_count
    }

    /// Returns the number of forum posts.
    pub fn posts_count(&self) -> u32 {
        self.posts_count
    }

    /// Returns the number of forum topics.
    pub fn topics_count(&self) -> u32 {
        self.topics_count
    }

    /// Returns the user's artist links.
    pub fn links(&self) -> &[Links] {
        &self.links
    }

    /// Returns the user's awards.
    pub fn awards(&self) -> &[Awards] {
        &self.awards
    }
}

/// An artist link a user registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    /// The ID of the user who owns this link.
    pub user_id: u64,
    /// The creation time, in UTC, of this link.
    #[serde(deserialize_with = "de_datetime")]
    pub created_at: DateTime<Utc>,
    /// The state of this link.
    pub state: String,
    /// The ID of an associated tag for this link. `None` if no tag linked.
    pub tag_id: Option<u64>,
}

impl Model for Links {
    const NAME: &'static str = "Links";
    const FIELDS: &'static [&'static str] = &["user_id", "created_at", "state", "tag_id"];
}

/// A badge awarded to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Awards {
    /// The URL of this award.
    pub image_url: String,
    /// The title of this award.
    pub title: String,
    /// The ID of the badge this award is derived from.
    pub id: u64,
    /// The label of this award.
    pub label: Option<String>,
    /// The time, in UTC, when this award was given.
    #[serde(deserialize_with = "de_datetime")]
    pub awarded_on: DateTime<Utc>,
}

impl Model for Awards {
    const NAME: &'static str = "Awards";
    const FIELDS: &'static [&'static str] = &["image_url", "title", "id", "label", "awarded_on"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strictness;
    use serde_json::json;

    #[test]
    fn nested_links_and_awards() {
        let user = User::from_value(
            json!({
                "id": 216_494,
                "name": "Some Artist",
                "slug": "some-artist",
                "role": "user",
                "description": null,
                "avatar_url": null,
                "created_at": "2012-01-03T00:00:00Z",
                "comments_count": 1,
                "uploads_count": 2,
                "posts_count": 3,
                "topics_count": 4,
                "links": [{
                    "user_id": 216_494,
                    "created_at": "2013-03-03T10:00:00Z",
                    "state": "verified",
                    "tag_id": null
                }],
                "awards": [{
                    "image_url": "https://derpicdn.net/media/badge.svg",
                    "title": "Artist",
                    "id": 4,
                    "label": null,
                    "awarded_on": "2014-04-04T00:00:00"
                }]
            }),
            Strictness::Strict,
        )
        .unwrap();

        assert_eq!(user.slug(), "some-artist");
        assert_eq!(user.links()[0].state, "verified");
        assert_eq!(user.links()[0].tag_id, None);
        assert_eq!(user.awards()[0].title, "Artist");
        assert_eq!(user.awards()[0].awarded_on.to_rfc3339(), "2014-04-04T00:00:00+00:00");
    }
}
