//! Forums, their topics and the posts inside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{maybe_de_datetime, Model};

/// A discussion forum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forum {
    /// The forum's name.
    name: String,
    /// The forum's short name (used to identify it).
    short_name: String,
    /// The forum's description.
    description: String,
    /// The amount of topics in the forum.
    topic_count: u32,
    /// The amount of posts in the forum.
    post_count: u32,
}

impl Model for Forum {
    const NAME: &'static str = "Forum";
    const FIELDS: &'static [&'static str] =
        &["name", "short_name", "description", "topic_count", "post_count"];
}

impl Forum {
    /// Returns the forum's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short name used in forum URLs.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the forum's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the number of topics.
    pub fn topic_count(&self) -> u32 {
        self.topic_count
    }

    /// Returns the number of posts.
    pub fn post_count(&self) -> u32 {
        self.post_count
    }
}

/// A topic (thread) inside a [`Forum`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    /// The topic's slug (used to identify it).
    slug: String,
    /// The topic's title.
    title: String,
    /// The amount of posts in the topic.
    post_count: u32,
    /// The amount of views the topic has received.
    view_count: u32,
    /// Whether the topic is sticky.
    sticky: bool,
    /// The time, in UTC, when the last reply was made.
    #[serde(deserialize_with = "maybe_de_datetime")]
    last_replied_to_at: Option<DateTime<Utc>>,
    /// Whether the topic is locked.
    locked: bool,
    /// The ID of the user who made the topic. `None` if posted anonymously.
    user_id: Option<u64>,
    /// The name of the user who made the topic.
    author: String,
}

impl Model for Topic {
    const NAME: &'static str = "Topic";
    const FIELDS: &'static [&'static str] = &[
        "slug",
        "title",
        "post_count",
        "view_count",
        "sticky",
        "last_replied_to_at",
        "locked",
        "user_id",
        "author",
    ];
}

impl Topic {
    /// Returns the slug used in topic URLs.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the topic's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the number of posts.
    pub fn post_count(&self) -> u32 {
        self.post_count
    }

    /// Returns the number of views.
    pub fn view_count(&self) -> u32 {
        self.view_count
    }

    /// Returns whether the topic is pinned.
    pub fn sticky(&self) -> bool {
        self.sticky
    }

    /// Returns when the last reply was made.
    pub fn last_replied_to_at(&self) -> Option<DateTime<Utc>> {
        self.last_replied_to_at
    }

    /// Returns whether the topic is locked.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Returns the ID of the topic's author, `None` if anonymous.
    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    /// Returns the name of the topic's author.
    pub fn author(&self) -> &str {
        &self.author
    }
}

/// A post inside a [`Topic`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// The post's author.
    author: String,
    /// The post text.
    body: String,
    /// The post's ID (used to identify it).
    id: u64,
    /// The ID of the user the post belongs to, if any.
    user_id: Option<u64>,
}

impl Model for Post {
    const NAME: &'static str = "Post";
    const FIELDS: &'static [&'static str] = &["author", "body", "id", "user_id"];
}

impl Post {
    /// Returns the post's author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the post text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the post's ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the author's user ID, `None` if anonymous.
    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strictness;
    use serde_json::json;

    #[test]
    fn topic_without_replies() {
        let topic = Topic::from_value(
            json!({
                "slug": "ask-the-mods-anything",
                "title": "Ask the Mods Anything",
                "post_count": 1,
                "view_count": 10,
                "sticky": true,
                "last_replied_to_at": null,
                "locked": false,
                "user_id": null,
                "author": "Background Pony #0000"
            }),
            Strictness::Strict,
        )
        .unwrap();

        assert_eq!(topic.slug(), "ask-the-mods-anything");
        assert!(topic.sticky());
        assert!(topic.last_replied_to_at().is_none());
        assert!(topic.user_id().is_none());
    }

    #[test]
    fn topic_last_reply_is_utc() {
        let topic = Topic::from_value(
            json!({"slug": "t", "last_replied_to_at": "2020-01-01T12:00:00Z"}),
            Strictness::Lenient,
        )
        .unwrap();

        assert_eq!(
            topic.last_replied_to_at().map(|at| at.to_rfc3339()),
            Some("2020-01-01T12:00:00+00:00".to_string())
        );
    }
}
