//! notion-md: convert Notion block trees into linear Markdown documents.
//!
//! This crate provides:
//!
//! - **Document model** - content blocks and rich text as delivered by the
//!   Notion API, and the flat Markdown records produced from them
//! - **Conversion core** - rich-text rendering, list numbering, per-type
//!   formatting and document assembly
//! - **Block sources** - a Notion API client (optional) and an offline JSON
//!   source
//! - **Converter** - a page-level façade tying a source to the core
//!
//! # Quick Start
//!
//! ```rust
//! use notion_md::{ContentBlock, ConvertConfig, convert, render};
//!
//! let blocks = vec![
//!     ContentBlock::paragraph("a", "Hello"),
//!     ContentBlock::divider("b"),
//! ];
//! let md_blocks = convert(&blocks, None, &ConvertConfig::default()).unwrap();
//! assert_eq!(render(&md_blocks), "Hello\n\n---\n\n");
//! ```
//!
//! # Features
//!
//! - `client` - Enables [`NotionClient`], the reqwest-based API client

// Document model
pub mod doc;

// Conversion pipeline
pub mod core;

// Block sources
pub mod source;

// Page-level façade
pub mod converter;

// Re-export doc types
pub use doc::{
    Annotations, BlockId, BlockKind, BlockPayload, BookmarkBody, CodeBody, ContentBlock,
    FileObject, Link, MarkdownBlock, PAGE_TITLE_KIND, PageProperties, PageProperty, RichText,
    RichTextBody, RichTextRun,
};

// Re-export core types
pub use crate::core::{
    AnnotatedBlock, ConvertConfig, ConvertError, UnsupportedPolicy, annotate, assemble, convert,
    format_block, render, render_rich_text, render_runs,
};

// Re-export source types
pub use source::{BlockSource, FetchError, JsonSource};

#[cfg(feature = "client")]
pub use source::{ClientConfig, NotionClient};

pub use converter::{Error, MarkdownConverter, Result};
