//! Sibling aggregation.
//!
//! Articles are often split across several sibling blocks. Starting from the
//! top candidate, siblings that scored well enough, or that read like prose
//! paragraphs, are gathered with it into one container.

use tracing::trace;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{ALTER_TO_DIV_EXCEPTIONS, SENTENCE_END};

use super::state::PassState;

/// Smallest score a sibling needs, whatever the top candidate scored.
const MIN_SIBLING_SCORE: f64 = 10.0;
/// Share of the top candidate's score a sibling needs.
const SIBLING_SCORE_RATIO: f64 = 0.2;
/// Paragraph length separating the long and short prose rules.
const PROSE_LENGTH: usize = 80;
/// Link density under which a long paragraph counts as prose.
const PROSE_MAX_LINK_DENSITY: f64 = 0.25;

/// Thresholds derived from the top candidate.
struct SiblingCriteria {
    head: NodeId,
    head_score: f64,
    head_class: String,
    threshold: f64,
    class_bonus: f64,
}

/// Collect the top candidate and its qualifying siblings, in document order,
/// into a new `<div>` and return it.
///
/// A sibling sharing the head's non-empty class and admitted on its score
/// keeps the class bonus added to its score.
pub fn aggregate_siblings(doc: &Document, state: &mut PassState, head: NodeId, options: &Options) -> NodeId {
    let head_node = dom::node(doc, head);
    let head_score = state.value(head).unwrap_or(0.0);
    let criteria = SiblingCriteria {
        head,
        head_score,
        head_class: dom::class_name(head_node),
        threshold: f64::max(MIN_SIBLING_SCORE, head_score * SIBLING_SCORE_RATIO),
        class_bonus: options.sibling_class_bonus,
    };

    let siblings = match head_node.parent() {
        Some(parent) => dom::element_children(parent),
        None => vec![head_node],
    };

    let container = dom::create_element(head_node, "div");
    for sibling in siblings {
        if !should_include(state, sibling, &criteria) {
            continue;
        }
        if sibling.id != head {
            trace!(sibling = ?sibling.id, "appending sibling");
        }
        if !dom::tag_name(sibling).is_some_and(|tag| ALTER_TO_DIV_EXCEPTIONS.contains(&tag.as_str())) {
            dom::rename(sibling, "div");
        }
        dom::append_child(container, sibling);
    }

    container.id
}

fn should_include(state: &mut PassState, sibling: NodeRef, criteria: &SiblingCriteria) -> bool {
    if sibling.id == criteria.head {
        return true;
    }
    if state.is_exempt(sibling.id) {
        return false;
    }

    let bonus = if !criteria.head_class.is_empty() && dom::class_name(sibling) == criteria.head_class {
        criteria.head_score * criteria.class_bonus
    } else {
        0.0
    };
    if let Some(score) = state.value(sibling.id) {
        if score + bonus >= criteria.threshold {
            state.add_value(sibling.id, bonus);
            return true;
        }
    }

    dom::is_tag(sibling, "p") && is_prose_paragraph(sibling)
}

/// A long paragraph with few links, or a short link-free one that ends a
/// sentence.
fn is_prose_paragraph(node: NodeRef) -> bool {
    let density = link_density(node);
    let text = dom::inner_text(node, true);
    let length = text.chars().count();

    if length > PROSE_LENGTH {
        density < PROSE_MAX_LINK_DENSITY
    } else {
        length > 0 && length < PROSE_LENGTH && density == 0.0 && SENTENCE_END.is_match(&text)
    }
}
