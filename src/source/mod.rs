//! Block sources: where content blocks and page properties come from.
//!
//! The conversion pipeline never talks to the network itself. It is handed
//! a [`BlockSource`], either the live [`NotionClient`] or an offline
//! [`JsonSource`] reading exported API responses from disk.

use crate::doc::{ContentBlock, PageProperties};
use serde::Deserialize;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{ClientConfig, NotionClient};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: check the API token and that the page is shared with the integration")]
    Unauthorized,
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[cfg(feature = "client")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies the blocks and properties of a page.
pub trait BlockSource {
    /// First page of direct children of `block_id`, in document order.
    fn fetch_children(
        &self,
        block_id: &str,
    ) -> impl Future<Output = Result<Vec<ContentBlock>, FetchError>> + Send;

    fn fetch_page_properties(
        &self,
        page_id: &str,
    ) -> impl Future<Output = Result<PageProperties, FetchError>> + Send;
}

pub(crate) fn require_id(kind: &str, id: &str) -> Result<(), FetchError> {
    if id.trim().is_empty() {
        return Err(FetchError::InvalidArgument(format!(
            "{kind} ID cannot be empty"
        )));
    }
    Ok(())
}

/// A "list block children" response body, or a bare array of blocks.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChildrenListing {
    Page { results: Vec<ContentBlock> },
    Bare(Vec<ContentBlock>),
}

impl ChildrenListing {
    fn into_blocks(self) -> Vec<ContentBlock> {
        match self {
            Self::Page { results } => results,
            Self::Bare(blocks) => blocks,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct PageObject {
    #[serde(default)]
    pub properties: PageProperties,
}

/// Reads blocks and page properties from exported API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSource {
    blocks_path: PathBuf,
    page_path: Option<PathBuf>,
}

impl JsonSource {
    pub fn new(blocks_path: impl Into<PathBuf>) -> Self {
        Self {
            blocks_path: blocks_path.into(),
            page_path: None,
        }
    }

    /// Page object file providing `properties`. Without one the page has no
    /// properties.
    pub fn with_page(mut self, page_path: impl Into<PathBuf>) -> Self {
        self.page_path = Some(page_path.into());
        self
    }

    pub fn blocks_path(&self) -> &Path {
        &self.blocks_path
    }
}

impl BlockSource for JsonSource {
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<ContentBlock>, FetchError> {
        require_id("Block", block_id)?;
        let bytes = tokio::fs::read(&self.blocks_path).await?;
        let blocks = serde_json::from_slice::<ChildrenListing>(&bytes)?.into_blocks();
        debug!(
            path = %self.blocks_path.display(),
            count = blocks.len(),
            "read blocks"
        );
        Ok(blocks)
    }

    async fn fetch_page_properties(&self, page_id: &str) -> Result<PageProperties, FetchError> {
        require_id("Page", page_id)?;
        let Some(path) = &self.page_path else {
            return Ok(PageProperties::new());
        };
        let bytes = tokio::fs::read(path).await?;
        let page: PageObject = serde_json::from_slice(&bytes)?;
        debug!(properties = ?page.properties.keys().collect::<Vec<_>>(), "read page properties");
        Ok(page.properties)
    }
}
