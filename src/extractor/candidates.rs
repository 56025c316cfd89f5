//! Top candidate selection.
//!
//! Ranks scored nodes, then refines the winner: a common ancestor shared by
//! several strong runners-up, an ancestor whose score climbs back above the
//! winner's, or a lone-child chain all take its place. When nothing was
//! scored the whole page body is wrapped into a fresh container.

use tracing::trace;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::link_density::link_density;
use crate::options::Options;

use super::state::PassState;

/// Fraction of the head score below which the upward walk gives up.
const SCORE_WALK_FLOOR: f64 = 1.0 / 3.0;

/// The best-scoring candidates, highest first, at most `limit` of them.
#[derive(Debug, Clone)]
pub struct TopCandidates {
    limit: usize,
    entries: Vec<(NodeId, f64)>,
}

impl TopCandidates {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: Vec::with_capacity(limit + 1),
        }
    }

    /// Insert before the first entry with a strictly lower score, so equal
    /// scores keep their arrival order.
    pub fn insert(&mut self, node: NodeId, score: f64) {
        if self.limit == 0 {
            return;
        }
        let position = self
            .entries
            .iter()
            .position(|&(_, s)| score > s)
            .unwrap_or(self.entries.len());
        if position >= self.limit {
            return;
        }
        self.entries.insert(position, (node, score));
        self.entries.truncate(self.limit);
    }

    #[must_use]
    pub fn head(&self) -> Option<(NodeId, f64)> {
        self.entries.first().copied()
    }

    #[must_use]
    pub fn entries(&self) -> &[(NodeId, f64)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scale every candidate's score by `1 - link density` and rank them.
pub fn rank_candidates(doc: &Document, state: &mut PassState, options: &Options) -> TopCandidates {
    let mut top = TopCandidates::new(options.n_top_candidates);
    let candidates = state.candidates().to_vec();

    for candidate in candidates {
        let Some(score) = state.value(candidate) else {
            continue;
        };
        let scaled = score * (1.0 - link_density(dom::node(doc, candidate)));
        state.set_value(candidate, scaled);
        top.insert(candidate, scaled);
    }

    top
}

/// Node chosen to seed the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCandidate {
    pub node: NodeId,
    /// The node is a container created for the whole page body.
    pub is_fallback: bool,
}

/// Upward walks stop at `<body>` and at the document node.
fn is_walk_boundary(node: NodeRef) -> bool {
    !node.is_element() || dom::is_tag(node, "body")
}

/// Pick the article's top candidate from the ranking.
pub fn select_top_candidate(
    doc: &Document,
    state: &mut PassState,
    top: &TopCandidates,
    options: &Options,
) -> TopCandidate {
    let Some((head, head_score)) = top
        .head()
        .filter(|&(node, _)| !dom::is_tag(dom::node(doc, node), "body"))
    else {
        return TopCandidate {
            node: fallback_container(doc, state),
            is_fallback: true,
        };
    };

    let mut node = promote_common_ancestor(top, dom::node(doc, head), head_score, options);
    state.initialize(node);
    node = promote_by_score(state, node);
    node = promote_only_child(node);
    state.initialize(node);

    TopCandidate {
        node: node.id,
        is_fallback: false,
    }
}

/// Move every child of the page body into a new `<div>` appended to it.
fn fallback_container(doc: &Document, state: &mut PassState) -> NodeId {
    let page = dom::body(doc)
        .or_else(|| dom::document_element(doc))
        .unwrap_or_else(|| doc.root());
    let container = dom::create_element(page, "div");

    for child in page.children() {
        dom::append_child(container, child);
    }
    dom::append_child(page, container);
    state.initialize(container);

    trace!(page = ?page.id, "no usable candidate, wrapping page");
    container.id
}

/// Climb to the nearest ancestor shared by enough near-tied runners-up.
fn promote_common_ancestor<'a>(
    top: &TopCandidates,
    head: NodeRef<'a>,
    head_score: f64,
    options: &Options,
) -> NodeRef<'a> {
    if head_score <= 0.0 {
        return head;
    }

    let alternatives: Vec<Vec<NodeId>> = top
        .entries()
        .iter()
        .skip(1)
        .filter(|&&(_, score)| score / head_score >= options.alternative_candidate_ratio)
        .map(|&(node, _)| {
            dom::ancestors(dom::same_tree(head, node), 0)
                .into_iter()
                .map(|a| a.id)
                .collect()
        })
        .collect();
    if alternatives.len() < options.min_alternative_ancestors {
        return head;
    }

    let mut parent = head.parent();
    while let Some(ancestor) = parent {
        if is_walk_boundary(ancestor) {
            break;
        }
        let agreeing = alternatives
            .iter()
            .filter(|chain| chain.contains(&ancestor.id))
            .count();
        if agreeing >= options.min_alternative_ancestors {
            trace!(from = ?head.id, to = ?ancestor.id, agreeing, "promoted to common ancestor");
            return ancestor;
        }
        parent = ancestor.parent();
    }

    head
}

/// Climb while ancestor scores stay above a third of the start score, taking
/// the first ancestor that beats the score seen below it.
fn promote_by_score<'a>(state: &PassState, start: NodeRef<'a>) -> NodeRef<'a> {
    let Some(start_score) = state.value(start.id) else {
        return start;
    };
    let threshold = start_score * SCORE_WALK_FLOOR;
    let mut last_score = start_score;
    let mut parent = start.parent();

    while let Some(ancestor) = parent {
        if is_walk_boundary(ancestor) {
            break;
        }
        let Some(score) = state.value(ancestor.id) else {
            parent = ancestor.parent();
            continue;
        };
        if score < threshold {
            break;
        }
        if score > last_score {
            trace!(from = ?start.id, to = ?ancestor.id, score, "promoted to higher-scoring ancestor");
            return ancestor;
        }
        last_score = score;
        parent = ancestor.parent();
    }

    start
}

/// Climb while the node is its parent's only element child.
fn promote_only_child(start: NodeRef<'_>) -> NodeRef<'_> {
    let mut node = start;
    while let Some(parent) = node.parent() {
        if is_walk_boundary(parent) || dom::element_children(parent).len() != 1 {
            break;
        }
        node = parent;
    }
    if node.id != start.id {
        trace!(from = ?start.id, to = ?node.id, "promoted through single-child parents");
    }
    node
}
