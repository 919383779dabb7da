use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use quiz_core::model::RawRow;

use super::parse::parse_csv;
use crate::error::CatalogError;

/// Produces the raw rows of the song catalog.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    /// Fetch and parse the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be read or parsed.
    async fn load(&self) -> Result<Vec<RawRow>, CatalogError>;
}

/// Where the CSV catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` inputs are fetched; anything else is a local path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Loads the catalog from a CSV file or URL.
#[derive(Clone)]
pub struct CsvCatalogLoader {
    source: CatalogSource,
    client: reqwest::Client,
}

impl CsvCatalogLoader {
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        match &self.source {
            CatalogSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            CatalogSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::HttpStatus(status));
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

#[async_trait]
impl CatalogLoader for CsvCatalogLoader {
    async fn load(&self) -> Result<Vec<RawRow>, CatalogError> {
        log::debug!("loading catalog from {}", self.source);
        let body = self.fetch().await?;
        let rows = parse_csv(&body)?;
        log::info!("catalog {}: {} rows", self.source, rows.len());
        Ok(rows)
    }
}

/// Serves a fixed set of rows.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogLoader {
    rows: Vec<RawRow>,
}

impl StaticCatalogLoader {
    #[must_use]
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl CatalogLoader for StaticCatalogLoader {
    async fn load(&self) -> Result<Vec<RawRow>, CatalogError> {
        Ok(self.rows.clone())
    }
}
