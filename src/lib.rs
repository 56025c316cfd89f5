//! # antar
//!
//! Reader-mode article extraction.
//!
//! This library finds the main article of a web page by scoring its
//! paragraphs, propagating the scores up the tree and picking the best
//! container, then gathers related sibling blocks around it. When the result
//! is too short the filters are relaxed one at a time and extraction runs
//! again.
//!
//! ## Quick Start
//!
//! ```rust
//! use antar::{extract, Extraction};
//!
//! let paragraph = "<p>Paragraph text of a real article goes on for a while, long enough \
//!     to look like prose, with commas, clauses and a full stop at the end of it. \
//!     Another sentence follows, adding detail that a reader would care about, and \
//!     the text keeps going until it clearly reads as an article rather than a menu.</p>";
//! let html = format!("<html><body><nav>Home</nav><article>{}</article></body></html>", paragraph.repeat(3));
//!
//! match extract(&html)? {
//!     Extraction::Article(article) => println!("{}", article.content_text),
//!     Extraction::NotReadable(_) => println!("nothing to read"),
//! }
//! # Ok::<(), antar::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Readability Check**: Skips pages without enough prose
//! - **Candidate Scoring**: Content scores decay with ancestor distance
//! - **Sibling Aggregation**: Collects article parts split across blocks
//! - **Retry Loop**: Relaxes filters until the article is long enough

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// Tree queries and node predicates over `dom_query` documents.
pub mod dom;

/// Article extraction pipeline (classification, scoring, selection, retries).
pub mod extractor;

/// Node scoring and score propagation.
pub mod scoring;

/// Link density of a subtree.
pub mod link_density;

/// Readability pre-check.
pub mod readerable;

/// Charset sniffing for byte input.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use options::{Options, MAX_ANCESTOR_DEPTH, MAX_TOP_CANDIDATES};
pub use readerable::{AlwaysReadable, ProbablyReadable, ReadableCheck};
pub use result::{Article, Extraction};
pub use dom::{Document, NodeId};

/// Extracts the main article from an HTML document using default options.
///
/// Pages failing the readability check come back as
/// [`Extraction::NotReadable`] holding the input unchanged. The default
/// [`ProbablyReadable`] check rejects pages without a paragraph of about 540
/// characters; use [`Extractor::with_check`] with [`AlwaysReadable`] to
/// extract such pages anyway.
///
/// # Example
///
/// ```rust
/// use antar::{extract, Extraction};
///
/// let html = "<html><body><p>Too short to read.</p></body></html>";
/// assert_eq!(extract(html)?, Extraction::NotReadable(html.to_string()));
/// # Ok::<(), antar::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<Extraction> {
    extract_with_options(html, &Options::default())
}

/// Extracts the main article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use antar::{extract_with_options, Options};
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let options = Options {
///     char_threshold: 250,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// # Ok::<(), antar::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<Extraction> {
    Extractor::new(options.clone()).extract_html(html)
}

/// Extracts the main article from HTML bytes with charset sniffing.
///
/// # Character Encoding
///
/// The encoding is taken from:
/// - A byte order mark
/// - `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`
///   within the first kilobyte
/// - Defaults to UTF-8 if neither is found
///
/// Invalid characters are replaced with � (Unicode replacement character)
/// rather than causing errors.
///
/// # Example
///
/// ```rust
/// use antar::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
/// let result = extract_bytes(html)?;
/// # Ok::<(), antar::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(html: &[u8]) -> Result<Extraction> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts the main article from HTML bytes with custom options and
/// charset sniffing.
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<Extraction> {
    let html = encoding::decode_html(html);
    extract_with_options(&html, options)
}
