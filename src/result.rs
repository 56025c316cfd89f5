//! Result types for extraction output.
//!
//! This module defines the structured output from article extraction.

use serde::Serialize;

use crate::extractor::{FilterFlags, Grabbed};

/// Article extracted from an HTML document.
///
/// Contains the article in both text and HTML formats, along with the
/// details of the attempt that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// Article container serialized as HTML, outer `<div>` included.
    pub content_html: String,

    /// Article as plain text, whitespace runs collapsed.
    pub content_text: String,

    /// Characters in `content_text`.
    pub text_length: usize,

    /// Author line found while classifying, if any.
    pub byline: Option<String>,

    /// Extraction passes run, the kept one included.
    pub attempts: usize,

    /// Filters in force during the kept pass.
    pub flags: FilterFlags,

    /// Whether the kept pass reached the character threshold. When false the
    /// longest of all passes was kept.
    pub reached_threshold: bool,
}

impl From<Grabbed> for Article {
    fn from(grabbed: Grabbed) -> Self {
        let attempt = &grabbed.attempt;
        Self {
            content_html: attempt.content_html(),
            content_text: attempt.content_text(),
            text_length: attempt.text_length,
            byline: attempt.byline.clone(),
            attempts: grabbed.attempts,
            flags: attempt.flags,
            reached_threshold: grabbed.reached_threshold,
        }
    }
}

/// Outcome of an extraction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Extraction {
    /// The page failed the readability pre-check. Holds the input markup,
    /// untouched.
    NotReadable(String),

    /// The page's main article.
    Article(Article),
}

impl Extraction {
    /// The article, if one was extracted.
    #[must_use]
    pub fn article(&self) -> Option<&Article> {
        match self {
            Extraction::Article(article) => Some(article),
            Extraction::NotReadable(_) => None,
        }
    }

    #[must_use]
    pub fn into_article(self) -> Option<Article> {
        match self {
            Extraction::Article(article) => Some(article),
            Extraction::NotReadable(_) => None,
        }
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        matches!(self, Extraction::Article(_))
    }
}
