//! Notion REST API client.
//!
//! The client is an explicitly owned handle: construct it from a
//! [`ClientConfig`] and pass it to the converter. Only the first page of a
//! block's children is read, and failed requests are not retried.

use super::{BlockSource, FetchError, PageObject, require_id};
use crate::doc::{ContentBlock, PageProperties};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u8 = 100;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: String,
    pub base_url: String,
    pub notion_version: String,
    pub page_size: u8,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = version.into();
        self
    }

    /// Clamped to `1..=100`.
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: ClientConfig,
}

#[derive(Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    results: Vec<ContentBlock>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        if config.token.trim().is_empty() {
            error!("API secret cannot be empty");
            return Err(FetchError::InvalidArgument(
                "API secret cannot be empty".to_string(),
            ));
        }

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.token.trim()))
            .map_err(|_| {
                FetchError::InvalidArgument("API secret is not a valid header value".to_string())
            })?;
        bearer.set_sensitive(true);
        let version = HeaderValue::from_str(&config.notion_version).map_err(|_| {
            FetchError::InvalidArgument(format!(
                "invalid Notion version: {}",
                config.notion_version
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(NOTION_VERSION_HEADER, version);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("notion-md/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Client with default settings for `token`.
    pub fn from_token(token: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(ClientConfig::new(token))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, id: &str) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
        error!(%status, code = %body.code, message = %body.message, "Notion request failed");
        Err(match status {
            StatusCode::NOT_FOUND => FetchError::NotFound(id.to_string()),
            StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            _ => FetchError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            },
        })
    }
}

impl BlockSource for NotionClient {
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<ContentBlock>, FetchError> {
        require_id("Block", block_id)?;
        let url = format!(
            "{}/blocks/{}/children?page_size={}",
            self.config.base_url,
            block_id.trim(),
            self.config.page_size
        );
        let page: ChildrenPage = self.get(&url, block_id).await?;
        if page.has_more {
            info!(%block_id, "block has more children than one page; only the first page is read");
        }
        debug!(%block_id, count = page.results.len(), "retrieved blocks");
        Ok(page.results)
    }

    async fn fetch_page_properties(&self, page_id: &str) -> Result<PageProperties, FetchError> {
        require_id("Page", page_id)?;
        info!(%page_id, "retrieving page info");
        let url = format!("{}/pages/{}", self.config.base_url, page_id.trim());
        let page: PageObject = self.get(&url, page_id).await?;
        debug!(properties = ?page.properties.keys().collect::<Vec<_>>(), "page properties");
        Ok(page.properties)
    }
}
