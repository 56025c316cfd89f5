//! Extraction pipeline.
//!
//! One attempt runs classification, scoring, candidate selection, sibling
//! aggregation and conditional cleaning over a private copy of the document.
//! When an attempt comes back shorter than the character threshold the next
//! filter is relaxed and the whole pass runs again from a fresh copy.

use std::fmt;

use tracing::debug;

use crate::dom::{self, Document, NodeId};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::scoring;

use super::candidates::{rank_candidates, select_top_candidate};
use super::classify::collect_elements_to_score;
use super::flags::{Filter, FilterFlags};
use super::pruning::clean_conditionally;
use super::siblings::aggregate_siblings;
use super::state::PassState;

/// Outcome of one extraction pass.
pub struct Attempt {
    /// Working copy the pass ran on; `content` lives in it.
    pub document: Document,
    /// Container holding the assembled article.
    pub content: NodeId,
    /// Characters of normalized article text.
    pub text_length: usize,
    /// Filters in force during the pass.
    pub flags: FilterFlags,
    pub byline: Option<String>,
}

impl Attempt {
    #[must_use]
    pub fn content_html(&self) -> String {
        dom::outer_html(dom::node(&self.document, self.content)).to_string()
    }

    #[must_use]
    pub fn content_text(&self) -> String {
        dom::inner_text(dom::node(&self.document, self.content), true)
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attempt")
            .field("content", &self.content)
            .field("text_length", &self.text_length)
            .field("flags", &self.flags)
            .field("byline", &self.byline)
            .finish_non_exhaustive()
    }
}

/// The attempt kept by [`grab_article`].
#[derive(Debug)]
pub struct Grabbed {
    pub attempt: Attempt,
    /// Passes run, the kept one included.
    pub attempts: usize,
    /// Whether the kept attempt reached the character threshold.
    pub reached_threshold: bool,
}

/// Run a single pass over a copy of `source` with `flags` in force.
#[must_use]
pub fn run_attempt(source: &Document, flags: FilterFlags, options: &Options) -> Attempt {
    let document = dom::clone_document(source);
    let mut state = PassState::new(flags);

    let elements = collect_elements_to_score(&document, &mut state);
    scoring::score_elements(&mut state, &elements, options);

    let top = rank_candidates(&document, &mut state, options);
    let selected = select_top_candidate(&document, &mut state, &top, options);
    let content = aggregate_siblings(&document, &mut state, selected.node, options);
    let container = dom::node(&document, content);

    // The byline is reported on its own.
    if let Some(byline) = state.byline_node() {
        let byline = dom::node(&document, byline);
        if dom::contains(container, byline) {
            dom::remove(byline);
        }
    }

    let cleaned = if flags.is_enabled(Filter::CleanConditionally) {
        clean_conditionally(&state, container)
    } else {
        0
    };

    let text_length = dom::text_length(container);
    debug!(
        flags = flags.bits(),
        elements = elements.len(),
        candidates = top.len(),
        fallback = selected.is_fallback,
        cleaned,
        text_length,
        "extraction attempt finished"
    );

    Attempt {
        document,
        content,
        text_length,
        flags,
        byline: state.byline_text().map(str::to_string),
    }
}

/// Extract the article, relaxing one filter per retry.
///
/// Returns the first attempt reaching `options.char_threshold` characters.
/// Once every filter is off the longest attempt wins, the earliest on ties.
///
/// # Errors
///
/// [`Error::NoContent`] when every attempt came back empty.
pub fn grab_article(source: &Document, options: &Options) -> Result<Grabbed> {
    let mut flags = FilterFlags::ALL;
    let mut attempts: Vec<Attempt> = Vec::new();

    loop {
        let attempt = run_attempt(source, flags, options);
        if attempt.text_length >= options.char_threshold {
            return Ok(Grabbed {
                attempt,
                attempts: attempts.len() + 1,
                reached_threshold: true,
            });
        }
        debug!(
            text_length = attempt.text_length,
            threshold = options.char_threshold,
            "attempt below threshold"
        );
        attempts.push(attempt);

        match flags.relax() {
            Some(filter) => debug!(?filter, "relaxing filter"),
            None => break,
        }
    }

    let count = attempts.len();
    let best = attempts
        .into_iter()
        .reduce(|best, next| if next.text_length > best.text_length { next } else { best })
        .ok_or(Error::NoContent)?;

    if best.text_length == 0 {
        return Err(Error::NoContent);
    }

    debug!(text_length = best.text_length, flags = best.flags.bits(), "keeping longest attempt");
    Ok(Grabbed {
        attempt: best,
        attempts: count,
        reached_threshold: false,
    })
}
