//! Extraction entry point.
//!
//! [`Extractor`] pairs [`Options`] with a readability pre-check and runs the
//! article pipeline on pages that pass it.

use tracing::{debug, instrument};

use crate::dom::{self, Document};
use crate::error::Result;
use crate::extractor::grab_article;
use crate::options::Options;
use crate::readerable::{ProbablyReadable, ReadableCheck};
use crate::result::{Article, Extraction};

/// Reusable article extractor.
///
/// # Example
///
/// ```rust
/// use antar::{Document, Extraction, Extractor, Options};
///
/// let extractor = Extractor::with_check(Options::default(), |_: &Document| true);
/// let html = "<article><p>A paragraph long enough to be scored by the extractor.</p></article>";
///
/// match extractor.extract_html(html)? {
///     Extraction::Article(article) => assert!(article.content_text.contains("paragraph")),
///     Extraction::NotReadable(_) => unreachable!(),
/// }
/// # Ok::<(), antar::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Extractor<C = ProbablyReadable> {
    options: Options,
    check: C,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Extractor {
    /// Extractor using the paragraph-based readability check.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self::with_check(options, ProbablyReadable::default())
    }
}

impl<C: ReadableCheck> Extractor<C> {
    /// Extractor gating the pipeline on a custom readability check.
    ///
    /// Pass [`crate::AlwaysReadable`] to run extraction on every page. The
    /// default [`ProbablyReadable`] check turns away pages whose longest
    /// paragraphs stay under about 540 characters in total.
    #[must_use]
    pub fn with_check(options: Options, check: C) -> Self {
        Self { options, check }
    }

    /// Options every extraction of this extractor runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `html` and extract its article.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidOptions`] for out-of-range options and
    /// [`crate::Error::NoContent`] when no attempt produced any text.
    pub fn extract_html(&self, html: &str) -> Result<Extraction> {
        self.options.validate()?;
        let doc = dom::parse(html);
        if !self.check.is_probably_readable(&doc) {
            debug!("page failed the readability check");
            return Ok(Extraction::NotReadable(html.to_string()));
        }
        self.run(&doc)
    }

    /// Extract the article of an already parsed document. Every attempt runs
    /// on its own copy, so `doc` is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Extractor::extract_html`].
    #[instrument(level = "debug", skip_all)]
    pub fn extract_document(&self, doc: &Document) -> Result<Extraction> {
        self.options.validate()?;
        if !self.check.is_probably_readable(doc) {
            debug!("page failed the readability check");
            return Ok(Extraction::NotReadable(doc.html().to_string()));
        }
        self.run(doc)
    }

    fn run(&self, doc: &Document) -> Result<Extraction> {
        let grabbed = grab_article(doc, &self.options)?;
        let article = Article::from(grabbed);
        debug!(
            text_length = article.text_length,
            attempts = article.attempts,
            reached_threshold = article.reached_threshold,
            "article extracted"
        );
        Ok(Extraction::Article(article))
    }
}
