//! Every function sends one request through the given [`Client`] and maps
//! the answer into a model.
//!
//! Path parameters come first, then the route's query parameters. Optional
//! parameters left as `None` are not sent. A `key` of `None` falls back to
//! the key configured on the client.
#![allow(clippy::too_many_arguments)]

use reqwest::Method;

use crate::{
    client::Client,
    models::{
        comment::Comment,
        filter::Filter,
        forum::{Forum, Post, Topic},
        gallery::Gallery,
        image::Image,
        oembed::Oembed,
        tag::Tag,
        user::User,
        SearchResult,
    },
    result::Result,
};

fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|value| value.to_string())
}

/// Fetches the comment with the ID `comment_id`.
///
/// `GET /api/v1/json/comments/:comment_id`, for example
/// <https://derpibooru.org/api/v1/json/comments/1000>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `comment` object.
pub async fn comment(client: &Client, comment_id: u64) -> Result<Comment> {
    let path = format!("/api/v1/json/comments/{comment_id}");
    client
        .fetch_one(Method::GET, &path, &[], Some("comment"))
        .await
}

/// Fetches the image with the ID `image_id`.
///
/// `filter_id` overrides the current filter for this request, if the user
/// can access it.
///
/// `GET /api/v1/json/images/:image_id`, for example
/// <https://derpibooru.org/api/v1/json/images/1>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an `image` object.
pub async fn image(
    client: &Client,
    image_id: u64,
    filter_id: Option<u64>,
    key: Option<&str>,
) -> Result<Image> {
    let path = format!("/api/v1/json/images/{image_id}");
    client
        .fetch_one(
            Method::GET,
            &path,
            &[("filter_id", opt(filter_id)), ("key", client.api_key(key))],
            Some("image"),
        )
        .await
}

/// Submits a new image found at `url`. Requires a key.
///
/// `POST /api/v1/json/images`.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an `image` object.
pub async fn image_upload(client: &Client, url: &str, key: Option<&str>) -> Result<Image> {
    client
        .fetch_one(
            Method::POST,
            "/api/v1/json/images",
            &[("url", Some(url.to_string())), ("key", client.api_key(key))],
            Some("image"),
        )
        .await
}

/// Fetches the current featured image.
///
/// `GET /api/v1/json/images/featured`.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an `image` object.
pub async fn featured_image(client: &Client) -> Result<Image> {
    client
        .fetch_one(Method::GET, "/api/v1/json/images/featured", &[], Some("image"))
        .await
}

/// Fetches the tag with the slug `tag_id`. The tag's numeric ID is **not** used.
///
/// `GET /api/v1/json/tags/:tag_id`, for example
/// <https://derpibooru.org/api/v1/json/tags/artist-colon-atryl>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `tag` object.
pub async fn tag(client: &Client, tag_id: &str) -> Result<Tag> {
    let path = format!("/api/v1/json/tags/{tag_id}");
    client.fetch_one(Method::GET, &path, &[], Some("tag")).await
}

/// Fetches the forum post with the ID `post_id`.
///
/// `GET /api/v1/json/posts/:post_id`, for example
/// <https://derpibooru.org/api/v1/json/posts/2730144>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `post` object.
pub async fn post(client: &Client, post_id: u64) -> Result<Post> {
    let path = format!("/api/v1/json/posts/{post_id}");
    client.fetch_one(Method::GET, &path, &[], Some("post")).await
}

/// Fetches the profile of the user with the ID `user_id`.
///
/// `GET /api/v1/json/profiles/:user_id`, for example
/// <https://derpibooru.org/api/v1/json/profiles/216494>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `user` object.
pub async fn user(client: &Client, user_id: u64) -> Result<User> {
    let path = format!("/api/v1/json/profiles/{user_id}");
    client.fetch_one(Method::GET, &path, &[], Some("user")).await
}

/// Fetches the filter with the ID `filter_id`.
///
/// `GET /api/v1/json/filters/:filter_id`, for example
/// <https://derpibooru.org/api/v1/json/filters/56027>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `filter` object.
pub async fn filter(client: &Client, filter_id: u64, key: Option<&str>) -> Result<Filter> {
    let path = format!("/api/v1/json/filters/{filter_id}");
    client
        .fetch_one(Method::GET, &path, &[("key", client.api_key(key))], Some("filter"))
        .await
}

/// Fetches the system filters, usable by anyone.
///
/// `GET /api/v1/json/filters/system`.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `filters` array.
pub async fn system_filters(client: &Client, page: Option<u64>) -> Result<Vec<Filter>> {
    client
        .fetch_many(
            Method::GET,
            "/api/v1/json/filters/system",
            &[("page", opt(page))],
            "filters",
        )
        .await
}

/// Fetches the filters of the user the key belongs to.
///
/// The API answers `403 Forbidden` without a valid key.
///
/// `GET /api/v1/json/filters/user`.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `filters` array. Without a valid key this is [`Error::UnexpectedStatus`](crate::Error::UnexpectedStatus).
pub async fn user_filters(
    client: &Client,
    key: Option<&str>,
    page: Option<u64>,
) -> Result<Vec<Filter>> {
    client
        .fetch_many(
            Method::GET,
            "/api/v1/json/filters/user",
            &[("key", client.api_key(key)), ("page", opt(page))],
            "filters",
        )
        .await
}

/// Fetches an oEmbed description for an image page or CDN `url`.
///
/// The answer is not wrapped in a key.
///
/// `GET /api/v1/json/oembed`, for example
/// <https://derpibooru.org/api/v1/json/oembed?url=https://derpicdn.net/img/0/0/1/1.png>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an oEmbed object.
pub async fn oembed(client: &Client, url: &str) -> Result<Oembed> {
    client
        .fetch_one(
            Method::GET,
            "/api/v1/json/oembed",
            &[("url", Some(url.to_string()))],
            None,
        )
        .await
}

/// Searches comments, newest first.
///
/// `GET /api/v1/json/search/comments`, for example
/// <https://derpibooru.org/api/v1/json/search/comments?q=image_id:1000000>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `comments` array and a `total` count.
pub async fn search_comments(
    client: &Client,
    query: &str,
    page: Option<u64>,
    key: Option<&str>,
) -> Result<SearchResult<Comment>> {
    client
        .fetch_search(
            Method::GET,
            "/api/v1/json/search/comments",
            &[
                ("q", Some(query.to_string())),
                ("page", opt(page)),
                ("key", client.api_key(key)),
            ],
            "comments",
        )
        .await
}

/// Searches galleries, newest first.
///
/// `GET /api/v1/json/search/galleries`, for example
/// <https://derpibooru.org/api/v1/json/search/galleries?q=title:mean*>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `galleries` array and a `total` count.
pub async fn search_galleries(
    client: &Client,
    query: &str,
    page: Option<u64>,
    key: Option<&str>,
) -> Result<SearchResult<Gallery>> {
    client
        .fetch_search(
            Method::GET,
            "/api/v1/json/search/galleries",
            &[
                ("q", Some(query.to_string())),
                ("page", opt(page)),
                ("key", client.api_key(key)),
            ],
            "galleries",
        )
        .await
}

/// Searches forum posts, newest first.
///
/// `GET /api/v1/json/search/posts`, for example
/// <https://derpibooru.org/api/v1/json/search/posts?q=subject:time%20wasting%20thread>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `posts` array and a `total` count.
pub async fn search_posts(
    client: &Client,
    query: &str,
    page: Option<u64>,
    key: Option<&str>,
) -> Result<SearchResult<Post>> {
    client
        .fetch_search(
            Method::GET,
            "/api/v1/json/search/posts",
            &[
                ("q", Some(query.to_string())),
                ("page", opt(page)),
                ("key", client.api_key(key)),
            ],
            "posts",
        )
        .await
}

/// Searches images.
///
/// `sort_field` and `sort_direction` are sent as `sf` and `sd`.
///
/// `GET /api/v1/json/search/images`, for example
/// <https://derpibooru.org/api/v1/json/search/images?q=safe>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an `images` array and a `total` count.
pub async fn search_images(
    client: &Client,
    query: &str,
    filter_id: Option<u64>,
    page: Option<u64>,
    per_page: Option<u64>,
    sort_direction: Option<&str>,
    sort_field: Option<&str>,
    key: Option<&str>,
) -> Result<SearchResult<Image>> {
    client
        .fetch_search(
            Method::GET,
            "/api/v1/json/search/images",
            &[
                ("q", Some(query.to_string())),
                ("filter_id", opt(filter_id)),
                ("page", opt(page)),
                ("per_page", opt(per_page)),
                ("sd", opt(sort_direction)),
                ("sf", opt(sort_field)),
                ("key", client.api_key(key)),
            ],
            "images",
        )
        .await
}

/// Searches tags, most used first.
///
/// `GET /api/v1/json/search/tags`, for example
/// <https://derpibooru.org/api/v1/json/search/tags?q=analyzed_name:wing>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `tags` array and a `total` count.
pub async fn search_tags(
    client: &Client,
    query: &str,
    page: Option<u64>,
) -> Result<SearchResult<Tag>> {
    client
        .fetch_search(
            Method::GET,
            "/api/v1/json/search/tags",
            &[("q", Some(query.to_string())), ("page", opt(page))],
            "tags",
        )
        .await
}

/// Reverse-searches the image at `url`.
///
/// `distance` is the match distance, suggested values lie between 0.2 and 0.5.
///
/// `POST /api/v1/json/search/reverse`, for example
/// <https://derpibooru.org/api/v1/json/search/reverse?url=https://derpicdn.net/img/2019/12/24/2228439/full.jpg>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// an `images` array.
pub async fn search_reverse(
    client: &Client,
    url: &str,
    distance: Option<f64>,
    key: Option<&str>,
) -> Result<Vec<Image>> {
    client
        .fetch_many(
            Method::POST,
            "/api/v1/json/search/reverse",
            &[
                ("url", Some(url.to_string())),
                ("distance", opt(distance)),
                ("key", client.api_key(key)),
            ],
            "images",
        )
        .await
}

/// Fetches every forum.
///
/// `GET /api/v1/json/forums`.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `forums` array.
pub async fn forums(client: &Client) -> Result<Vec<Forum>> {
    client
        .fetch_many(Method::GET, "/api/v1/json/forums", &[], "forums")
        .await
}

/// Fetches the forum abbreviated `short_name`.
///
/// `GET /api/v1/json/forums/:short_name`, for example
/// <https://derpibooru.org/api/v1/json/forums/dis>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `forum` object.
pub async fn forum(client: &Client, short_name: &str) -> Result<Forum> {
    let path = format!("/api/v1/json/forums/{short_name}");
    client.fetch_one(Method::GET, &path, &[], Some("forum")).await
}

/// Fetches the topics of the forum abbreviated `short_name`.
///
/// `GET /api/v1/json/forums/:short_name/topics`, for example
/// <https://derpibooru.org/api/v1/json/forums/dis/topics>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `topics` array.
pub async fn forum_topics(
    client: &Client,
    short_name: &str,
    page: Option<u64>,
) -> Result<Vec<Topic>> {
    let path = format!("/api/v1/json/forums/{short_name}/topics");
    client
        .fetch_many(Method::GET, &path, &[("page", opt(page))], "topics")
        .await
}

/// Fetches the topic `topic_slug` of the forum `short_name`.
///
/// `GET /api/v1/json/forums/:short_name/topics/:topic_slug`, for example
/// <https://derpibooru.org/api/v1/json/forums/dis/topics/ask-the-mods-anything>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `topic` object.
pub async fn forum_topic(client: &Client, short_name: &str, topic_slug: &str) -> Result<Topic> {
    let path = format!("/api/v1/json/forums/{short_name}/topics/{topic_slug}");
    client.fetch_one(Method::GET, &path, &[], Some("topic")).await
}

/// Fetches the posts of topic `topic_slug` in forum `short_name`.
///
/// `GET /api/v1/json/forums/:short_name/topics/:topic_slug/posts`, for example
/// <https://derpibooru.org/api/v1/json/forums/dis/topics/ask-the-mods-anything/posts>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `posts` array.
pub async fn forum_posts(
    client: &Client,
    short_name: &str,
    topic_slug: &str,
    page: Option<u64>,
) -> Result<Vec<Post>> {
    let path = format!("/api/v1/json/forums/{short_name}/topics/{topic_slug}/posts");
    client
        .fetch_many(Method::GET, &path, &[("page", opt(page))], "posts")
        .await
}

/// Fetches post `post_id` of topic `topic_slug` in forum `short_name`.
///
/// `GET /api/v1/json/forums/:short_name/topics/:topic_slug/posts/:post_id`, for example
/// <https://derpibooru.org/api/v1/json/forums/dis/topics/ask-the-mods-anything/posts/2761095>.
///
/// # Errors
///
/// Fails if the request fails, or unless the answer is `200 OK` JSON holding
/// a `post` object.
pub async fn forum_post(
    client: &Client,
    short_name: &str,
    topic_slug: &str,
    post_id: u64,
) -> Result<Post> {
    let path = format!("/api/v1/json/forums/{short_name}/topics/{topic_slug}/posts/{post_id}");
    client.fetch_one(Method::GET, &path, &[], Some("post")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strictness;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(server: &MockServer, key: Option<&str>) -> Client {
        let builder = Client::builder().base_url(server.uri());
        match key {
            Some(key) => builder.key(key).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    #[tokio::test]
    async fn image_sends_configured_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/images/1"))
            .and(query_param("key", "secret"))
            .and(query_param_is_missing("filter_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "image": {"id": 1, "tags": ["safe", "derpy hooves"]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup(&server, Some("secret")).await;
        let image = image(&client, 1, None, None).await.unwrap();
        assert_eq!(image.id(), 1);
        assert_eq!(image.tags(), ["safe", "derpy hooves"]);
    }

    #[tokio::test]
    async fn explicit_key_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/filters/56027"))
            .and(query_param("key", "mine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "filter": {"id": 56027, "name": "Everything", "system": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup(&server, Some("secret")).await;
        let filter = filter(&client, 56027, Some("mine")).await.unwrap();
        assert_eq!(filter.name(), "Everything");
        assert!(filter.system());
    }

    #[tokio::test]
    async fn search_images_uses_wire_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/search/images"))
            .and(query_param("q", "safe, pony"))
            .and(query_param("sf", "score"))
            .and(query_param("sd", "desc"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": [{"id": 3}, {"id": 2}],
                "total": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup(&server, None).await;
        let result = search_images(
            &client,
            "safe, pony",
            None,
            None,
            Some(50),
            Some("desc"),
            Some("score"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.total, 2);
        let ids: Vec<_> = result.iter().map(Image::id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn tag_uses_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/tags/artist-colon-atryl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tag": {"id": 33_004, "name": "artist:atryl", "slug": "artist-colon-atryl", "namespace": "artist"}
            })))
            .mount(&server)
            .await;

        let client = setup(&server, None).await;
        let tag = tag(&client, "artist-colon-atryl").await.unwrap();
        assert_eq!(tag.namespace(), Some("artist"));
    }

    #[tokio::test]
    async fn oembed_is_not_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/oembed"))
            .and(query_param("url", "https://derpicdn.net/img/0/0/1/1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "derpibooru_id": 1,
                "provider_name": "Derpibooru",
                "type": "photo",
                "version": "1.0"
            })))
            .mount(&server)
            .await;

        let client = setup(&server, None).await;
        let oembed = oembed(&client, "https://derpicdn.net/img/0/0/1/1.png").await.unwrap();
        assert_eq!(oembed.derpibooru_id, 1);
        assert_eq!(oembed.kind, "photo");
    }

    #[tokio::test]
    async fn reverse_search_posts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/json/search/reverse"))
            .and(query_param("url", "https://example.org/pony.png"))
            .and(query_param("distance", "0.25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": [{"id": 7}]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup(&server, None).await;
        let images = search_reverse(&client, "https://example.org/pony.png", Some(0.25), None)
            .await
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id(), 7);
    }

    #[tokio::test]
    async fn forum_post_fills_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/forums/dis/topics/ask-the-mods-anything/posts/2761095"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "post": {"author": "Twilight", "body": "hi", "id": 2_761_095, "user_id": 1}
            })))
            .mount(&server)
            .await;

        let client = setup(&server, None).await;
        let post = forum_post(&client, "dis", "ask-the-mods-anything", 2_761_095)
            .await
            .unwrap();
        assert_eq!(post.author(), "Twilight");
        assert_eq!(post.user_id(), Some(1));
    }

    #[tokio::test]
    async fn strict_mode_reaches_routes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/json/forums"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "forums": [{"name": "General Discussion", "short_name": "dis"}]
            })))
            .mount(&server)
            .await;

        let client = Client::builder()
            .base_url(server.uri())
            .strictness(Strictness::Strict)
            .build()
            .unwrap();
        let err = forums(&client).await.unwrap_err();
        assert!(matches!(err, crate::error::Error::MissingKeys { model: "Forum", .. }));
    }
}
