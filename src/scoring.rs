//! Node scoring.
//!
//! A node's score starts from its tag and its class/id weight, then collects
//! content scores from the scorable elements beneath it. Each contribution is
//! divided by a factor that grows with the distance between the contributor
//! and the ancestor receiving it.

use tracing::trace;

use crate::dom::{self, NodeRef};
use crate::extractor::flags::{Filter, FilterFlags};
use crate::extractor::state::PassState;
use crate::options::Options;
use crate::patterns::{NEGATIVE, POSITIVE};

/// Weight granted or withdrawn per keyword match.
pub const CLASS_WEIGHT_STEP: f64 = 25.0;

fn keyword_weight(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }
    let mut weight = 0.0;
    if NEGATIVE.is_match(value) {
        weight -= CLASS_WEIGHT_STEP;
    }
    if POSITIVE.is_match(value) {
        weight += CLASS_WEIGHT_STEP;
    }
    weight
}

/// Class/id weight in `[-50, 50]`.
///
/// The class and the id are judged separately; each gains 25 on a positive
/// keyword and loses 25 on a negative one.
#[must_use]
pub fn class_weight(node: NodeRef) -> f64 {
    keyword_weight(&dom::class_name(node)) + keyword_weight(&dom::id(node))
}

/// Base score by tag.
#[must_use]
pub fn tag_score(tag: &str) -> f64 {
    match tag {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    }
}

/// Starting score of a newly registered candidate.
#[must_use]
pub fn initial_score(node: NodeRef, flags: FilterFlags) -> f64 {
    let base = dom::tag_name(node).map_or(0.0, |tag| tag_score(&tag));
    if flags.is_enabled(Filter::WeightClasses) {
        base + class_weight(node)
    } else {
        base
    }
}

/// Score an element's text hands to its ancestors.
///
/// One point for existing, one per comma-separated segment, and one per
/// hundred characters up to three.
#[must_use]
pub fn content_score(text: &str) -> f64 {
    let segments = text.split(',').count();
    let length_bonus = (text.chars().count() / 100).min(3);
    (1 + segments + length_bonus) as f64
}

/// Divisor applied to a contribution reaching the ancestor at `level`
/// (0 = parent).
#[must_use]
pub fn ancestor_divider(level: usize) -> f64 {
    match level {
        0 => 1.0,
        1 => 2.0,
        _ => (level * 3) as f64,
    }
}

/// Hand each element's content score to its nearest ancestors.
///
/// Elements shorter than `min_paragraph_length` characters contribute
/// nothing. Synthetic paragraphs are spliced into the tree once they qualify.
/// Exempt ancestors are passed over.
pub fn score_elements(state: &mut PassState, elements: &[NodeRef], options: &Options) {
    for &element in elements {
        let is_wrapper = state.is_wrapper(element.id);
        if element.parent().is_none() && !is_wrapper {
            continue;
        }
        if state.is_exempt(element.id) {
            continue;
        }

        let text = state.inner_text(element);
        if text.chars().count() < options.min_paragraph_length {
            continue;
        }
        if is_wrapper && !state.splice_wrapper(element) {
            continue;
        }

        let ancestors = state.ancestors(element, options.max_ancestor_depth);
        let score = content_score(&text);
        trace!(element = ?element.id, score, ancestors = ancestors.len(), "scoring element");

        for (level, ancestor) in ancestors.into_iter().enumerate() {
            if !state.register_candidate(ancestor) {
                continue;
            }
            state.add_value(ancestor.id, score / ancestor_divider(level));
        }
    }
}
