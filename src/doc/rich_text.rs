//! Styled text runs as delivered by the Notion API.

use serde::{Deserialize, Serialize};

/// A rich-text sequence. Elements are optional because the API may deliver
/// `null` entries, which are skipped at render time.
pub type RichText = Vec<Option<RichTextRun>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

impl RichTextRun {
    /// Unstyled run whose `text.content` mirrors `plain_text`.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: Some(TextContent {
                content: text.clone(),
                link: None,
            }),
            plain_text: text,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        let link = Some(Link { url: url.into() });
        match self.text.as_mut() {
            Some(text) => text.link = link,
            None => {
                self.text = Some(TextContent {
                    content: self.plain_text.clone(),
                    link,
                })
            }
        }
        self
    }

    /// URL of the run's text link. Mentions and equations carry no text
    /// object and therefore never link.
    pub fn link_url(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|text| text.link.as_ref())
            .map(|link| link.url.as_str())
    }
}

/// Wraps plain runs into a [`RichText`] sequence with no `null` entries.
pub fn rich_text<I>(runs: I) -> RichText
where
    I: IntoIterator<Item = RichTextRun>,
{
    runs.into_iter().map(Some).collect()
}
