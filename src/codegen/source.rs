use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{codegen::tables::DOCUMENTATION_URL, error::Error, result::Result};

/// Somewhere the documentation page can be read from.
#[async_trait]
pub trait DocumentationSource {
    /// Returns the page's HTML.
    async fn fetch(&self) -> Result<String>;
}

/// Downloads the page.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// A source for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DOCUMENTATION_URL)
    }
}

#[async_trait]
impl DocumentationSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        log::info!("downloading documentation from {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            code => Err(Error::UnexpectedStatus(code)),
        }
    }
}

/// Reads a saved copy of the page.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// A source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentationSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        log::info!("reading documentation from {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}
