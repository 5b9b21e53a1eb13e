//! Page-level façade: fetch a page from a [`BlockSource`] and convert it.

use crate::core::{ConvertConfig, ConvertError, convert, render};
use crate::doc::MarkdownBlock;
use crate::source::{BlockSource, FetchError};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts Notion pages to Markdown using an owned block source.
#[derive(Debug, Clone)]
pub struct MarkdownConverter<S> {
    source: S,
    config: ConvertConfig,
}

impl<S: BlockSource> MarkdownConverter<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ConvertConfig::default())
    }

    pub fn with_config(source: S, config: ConvertConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Fetches the page's top-level blocks (and, when titles are enabled, its
    /// properties) and converts them to Markdown blocks.
    pub async fn page_to_markdown_blocks(&self, page_id: &str) -> Result<Vec<MarkdownBlock>> {
        if page_id.trim().is_empty() {
            error!("page ID cannot be empty");
            return Err(ConvertError::InvalidArgument("page ID cannot be empty".to_string()).into());
        }

        let blocks = self.source.fetch_children(page_id).await?;
        let properties = if self.config.include_title {
            Some(self.source.fetch_page_properties(page_id).await?)
        } else {
            None
        };
        Ok(convert(&blocks, properties.as_ref(), &self.config)?)
    }

    pub fn to_markdown_string(&self, md_blocks: &[MarkdownBlock]) -> String {
        render(md_blocks)
    }

    pub async fn page_to_markdown(&self, page_id: &str) -> Result<String> {
        let md_blocks = self.page_to_markdown_blocks(page_id).await?;
        Ok(self.to_markdown_string(&md_blocks))
    }
}

#[cfg(feature = "client")]
impl MarkdownConverter<crate::source::NotionClient> {
    /// Converter backed by a live Notion client with default settings.
    pub fn from_token(token: &str) -> Result<Self> {
        Ok(Self::new(crate::source::NotionClient::from_token(token)?))
    }
}
