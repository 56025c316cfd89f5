//! Readability pre-check.
//!
//! A quick look at a page's paragraphs deciding whether article extraction
//! is worth running at all. Pages failing the check are handed back as-is.

use crate::dom::{self, Document, NodeRef};
use crate::patterns::{MAYBE_CANDIDATE, UNLIKELY_CANDIDATES};

/// Decides whether a page is worth extracting.
///
/// Implemented for [`ProbablyReadable`], [`AlwaysReadable`] and any
/// `Fn(&Document) -> bool`.
pub trait ReadableCheck {
    fn is_probably_readable(&self, doc: &Document) -> bool;
}

impl<F> ReadableCheck for F
where
    F: Fn(&Document) -> bool,
{
    fn is_probably_readable(&self, doc: &Document) -> bool {
        self(doc)
    }
}

/// Accepts every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReadable;

impl ReadableCheck for AlwaysReadable {
    fn is_probably_readable(&self, _doc: &Document) -> bool {
        true
    }
}

/// Paragraph-based readability heuristic.
///
/// Every visible, likely `<p>`, `<pre>` or `<article>` (and every `<div>`
/// holding a `<br>` directly) with at least `min_content_length` characters
/// adds `sqrt(length - min_content_length)` to a running score. The page is
/// readable once the score exceeds `min_score`.
///
/// With the defaults a page needs one paragraph of about 541 characters, or
/// several shorter ones above 140, before it is extracted at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbablyReadable {
    pub min_content_length: usize,
    pub min_score: f64,
}

impl Default for ProbablyReadable {
    fn default() -> Self {
        Self {
            min_content_length: 140,
            min_score: 20.0,
        }
    }
}

impl ProbablyReadable {
    fn paragraph_nodes(doc: &Document) -> Vec<NodeRef<'_>> {
        let mut nodes: Vec<NodeRef> = doc.select("p, pre, article").nodes().to_vec();

        let br_parents: Vec<NodeRef> = doc
            .select("div > br")
            .nodes()
            .iter()
            .filter_map(|br| br.parent())
            .collect();
        for parent in br_parents {
            if !nodes.iter().any(|n| n.id == parent.id) {
                nodes.push(parent);
            }
        }
        nodes
    }
}

impl ReadableCheck for ProbablyReadable {
    fn is_probably_readable(&self, doc: &Document) -> bool {
        let mut score = 0.0;

        Self::paragraph_nodes(doc).into_iter().any(|node| {
            if !dom::is_probably_visible(node) {
                return false;
            }
            let match_string = dom::match_string(node);
            if UNLIKELY_CANDIDATES.is_match(&match_string) && !MAYBE_CANDIDATE.is_match(&match_string) {
                return false;
            }
            if dom::is_tag(node, "p") && dom::has_ancestor_tag(node, "li", 0, |_| true) {
                return false;
            }

            let length = node.text().trim().chars().count();
            if length < self.min_content_length {
                return false;
            }
            score += ((length - self.min_content_length) as f64).sqrt();
            score > self.min_score
        })
    }
}
