use std::time::Duration;

use crate::{
    error::Error,
    models::{Model, SearchResult, Strictness},
    result::Result,
};
use reqwest::{
    header::{CONTENT_TYPE, USER_AGENT},
    Client as ReqwestClient, Method, StatusCode,
};
use serde_json::Value;

/// Origin every route path is appended to unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://derpibooru.org";

const DEFAULT_USER_AGENT: &str = concat!("derpi/", env!("CARGO_PKG_VERSION"));

/// Connection to the API.
///
/// A `Client` owns one HTTP session. Every call issues exactly one request on
/// it and the session's connections are released when the `Client` is dropped.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    base_url: String,
    key: Option<String>,
    user_agent: String,
    strictness: Strictness,
}

/// Configures a [`Client`].
///
/// ```rust
/// use std::time::Duration;
/// use derpi::{Client, Strictness};
///
/// let client = Client::builder()
///     .base_url("https://furbooru.org")
///     .key("my-api-key")
///     .timeout(Duration::from_secs(10))
///     .strictness(Strictness::Strict)
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url(), "https://furbooru.org");
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    http: Option<ReqwestClient>,
    base_url: Option<String>,
    key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    strictness: Strictness,
}

impl ClientBuilder {
    /// Origin to send requests to, e.g. another booru running the same software.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// API key sent with every route that accepts `key` when the call itself passes none.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Value of the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Total timeout per request. Ignored when [`ClientBuilder::http`] is used.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// How response objects are checked against the models.
    #[must_use]
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Use an already configured HTTP session.
    #[must_use]
    pub fn http(mut self, http: ReqwestClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// This function will return an error if the HTTP session cannot be created.
    pub fn build(self) -> Result<Client> {
        let http = if let Some(http) = self.http {
            http
        } else {
            let mut builder = ReqwestClient::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Client {
            http,
            base_url,
            key: self.key,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            strictness: self.strictness,
        })
    }
}

impl Client {
    /// A client for the default origin, without key, in lenient mode.
    pub fn new() -> Client {
        Client {
            http: ReqwestClient::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strictness: Strictness::default(),
        }
    }

    /// Starts configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The strictness applied to response objects.
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Resolves the `key` parameter: the explicit one, else the configured one.
    pub fn api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit.or(self.key.as_deref()).map(ToString::to_string)
    }

    /// Absolute URL of a route path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// Parameters whose value is `None` are left out of the query string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails, if the status
    /// is anything but `200 OK`, or if the body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<Value> {
        let url = self.url(path);
        let query: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|value| (*name, value)))
            .collect();

        let response = {
            let builder = self
                .http
                .request(method.clone(), &url)
                .header(USER_AGENT, &self.user_agent)
                .query(&query);
            log::info!("request for {method} {url} dispatched");
            builder.send().await?
        };

        log::debug!("response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(Error::UnexpectedStatus(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json(&content_type) {
            return Err(Error::UnexpectedContentType(content_type));
        }

        response.json::<Value>().await.map_err(Into::into)
    }

    /// Requests a single object, found under `key` or at the top level when `key` is `None`.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::request`], or if the payload does not have the expected shape.
    pub async fn fetch_one<T: Model>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
        key: Option<&str>,
    ) -> Result<T> {
        let value = self.request(method, path, query).await?;
        let value = match key {
            Some(key) => unwrap_key(value, key)?,
            None => value,
        };
        T::from_value(value, self.strictness)
    }

    /// Requests a list of objects found under `key`.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::request`], or if the payload does not have the expected shape.
    pub async fn fetch_many<T: Model>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
        key: &str,
    ) -> Result<Vec<T>> {
        let value = self.request(method, path, query).await?;
        into_models(unwrap_key(value, key)?, self.strictness)
    }

    /// Requests a page of search hits found under `key`, next to a `total` count.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::request`], or if the payload does not have the expected shape.
    pub async fn fetch_search<T: Model>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
        key: &str,
    ) -> Result<SearchResult<T>> {
        let value = self.request(method, path, query).await?;
        let total = match value.get("total") {
            Some(total) => total.as_u64().ok_or(Error::UnexpectedShape {
                expected: "a non-negative integer",
                found: Error::json_kind(total),
            })?,
            None => return Err(Error::MissingKey("total".to_string())),
        };
        let hits = into_models(unwrap_key(value, key)?, self.strictness)?;
        Ok(SearchResult { hits, total })
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case("application/json"))
}

fn unwrap_key(value: Value, key: &str) -> Result<Value> {
    match value {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| Error::MissingKey(key.to_string())),
        other => Err(Error::UnexpectedShape {
            expected: "an object",
            found: Error::json_kind(&other),
        }),
    }
}

fn into_models<T: Model>(value: Value, strictness: Strictness) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::from_value(item, strictness))
            .collect(),
        other => Err(Error::UnexpectedShape {
            expected: "an array",
            found: Error::json_kind(&other),
        }),
    }
}
