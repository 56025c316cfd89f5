//! Per-pass extraction state.
//!
//! Scores live in a side-table keyed by [`NodeId`] instead of on the nodes
//! themselves. A fresh [`PassState`] is created for every attempt, so nothing
//! carries over between retries.

use std::collections::HashMap;

use crate::dom::{self, NodeId, NodeRef};
use crate::patterns::NORMALIZE;
use crate::scoring;

use super::flags::FilterFlags;

/// Score attached to a node during one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeScore {
    /// Disqualified from scoring and aggregation for the rest of the pass.
    Exempt,
    /// Inline node folded into a synthetic paragraph.
    Phrasing,
    Value(f64),
}

/// Synthetic paragraph grouping a run of inline children of a block.
///
/// The wrapper element is detached until [`PassState::splice_wrapper`] puts
/// it into the tree; until then its members stay where they are and
/// `logical_parent` stands in for its tree parent.
#[derive(Debug, Clone)]
struct Wrapper {
    logical_parent: NodeId,
    members: Vec<NodeId>,
}

/// Scores, candidates, wrappers and the byline of a single attempt.
pub struct PassState {
    flags: FilterFlags,
    scores: HashMap<NodeId, NodeScore>,
    /// Nodes that received content score, in registration order.
    candidates: Vec<NodeId>,
    wrappers: HashMap<NodeId, Wrapper>,
    byline: Option<(NodeId, String)>,
}

impl PassState {
    #[must_use]
    pub fn new(flags: FilterFlags) -> Self {
        Self {
            flags,
            scores: HashMap::new(),
            candidates: Vec::new(),
            wrappers: HashMap::new(),
            byline: None,
        }
    }

    #[must_use]
    pub fn flags(&self) -> FilterFlags {
        self.flags
    }

    // === Scores ===

    #[must_use]
    pub fn score(&self, node: NodeId) -> Option<NodeScore> {
        self.scores.get(&node).copied()
    }

    /// Numeric score, `None` when unset or a sentinel.
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<f64> {
        match self.score(node) {
            Some(NodeScore::Value(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_exempt(&self, node: NodeId) -> bool {
        self.score(node) == Some(NodeScore::Exempt)
    }

    #[must_use]
    pub fn is_phrasing(&self, node: NodeId) -> bool {
        self.score(node) == Some(NodeScore::Phrasing)
    }

    /// Store a numeric score. Exempt nodes keep their mark.
    pub fn set_value(&mut self, node: NodeId, value: f64) {
        if !self.is_exempt(node) {
            self.scores.insert(node, NodeScore::Value(value));
        }
    }

    /// Add to a numeric score; no-op on unscored or sentinel nodes.
    pub fn add_value(&mut self, node: NodeId, delta: f64) {
        if let Some(NodeScore::Value(v)) = self.scores.get_mut(&node) {
            *v += delta;
        }
    }

    pub fn mark_exempt(&mut self, node: NodeId) {
        self.scores.insert(node, NodeScore::Exempt);
    }

    pub fn mark_phrasing(&mut self, node: NodeId) {
        if !self.is_exempt(node) {
            self.scores.insert(node, NodeScore::Phrasing);
        }
    }

    /// Give an unscored node its initial score. Returns the node's numeric
    /// score afterwards, `None` for exempt nodes.
    pub fn initialize(&mut self, node: NodeRef) -> Option<f64> {
        if self.value(node.id).is_none() {
            self.set_value(node.id, scoring::initial_score(node, self.flags));
        }
        self.value(node.id)
    }

    // === Candidates ===

    /// Register `node` as a candidate the first time it receives content
    /// score. Returns false for exempt nodes, which never become candidates.
    pub fn register_candidate(&mut self, node: NodeRef) -> bool {
        if self.is_exempt(node.id) {
            return false;
        }
        if self.value(node.id).is_none() {
            self.initialize(node);
            self.candidates.push(node.id);
        }
        true
    }

    #[must_use]
    pub fn candidates(&self) -> &[NodeId] {
        &self.candidates
    }

    // === Synthetic paragraphs ===

    /// Create a detached `<p>` standing for `members`, all children of
    /// `logical_parent`. Members are marked as phrasing content.
    pub fn add_wrapper<'a>(&mut self, logical_parent: NodeRef<'a>, members: Vec<NodeId>) -> NodeRef<'a> {
        let wrapper = dom::create_element(logical_parent, "p");
        for &member in &members {
            self.mark_phrasing(member);
        }
        self.wrappers.insert(
            wrapper.id,
            Wrapper {
                logical_parent: logical_parent.id,
                members,
            },
        );
        wrapper
    }

    #[must_use]
    pub fn is_wrapper(&self, node: NodeId) -> bool {
        self.wrappers.contains_key(&node)
    }

    /// Parent for scoring purposes: the logical parent of an unspliced
    /// wrapper, the tree parent otherwise.
    #[must_use]
    pub fn parent<'a>(&self, node: NodeRef<'a>) -> Option<NodeRef<'a>> {
        match self.wrappers.get(&node.id) {
            Some(w) if node.parent().is_none() => Some(dom::same_tree(node, w.logical_parent)),
            _ => node.parent(),
        }
    }

    /// Normalized text of a node, reading an unspliced wrapper's non-exempt
    /// members.
    #[must_use]
    pub fn inner_text(&self, node: NodeRef) -> String {
        match self.wrappers.get(&node.id) {
            Some(w) if node.parent().is_none() => {
                let joined: String = w
                    .members
                    .iter()
                    .filter(|&&m| !self.is_exempt(m))
                    .map(|&m| dom::text_content(dom::same_tree(node, m)).to_string())
                    .collect();
                let trimmed = joined.trim();
                NORMALIZE.replace_all(trimmed, " ").into_owned()
            }
            _ => dom::inner_text(node, true),
        }
    }

    /// Insert a wrapper at its first member's position and move the members
    /// into it. Exempt members and members that left the logical parent in
    /// the meantime are skipped; returns false when none remain.
    pub fn splice_wrapper(&self, wrapper: NodeRef) -> bool {
        let Some(w) = self.wrappers.get(&wrapper.id) else {
            return false;
        };
        if wrapper.parent().is_some() {
            return true;
        }
        let members: Vec<NodeRef> = w
            .members
            .iter()
            .map(|&m| dom::same_tree(wrapper, m))
            .filter(|m| m.parent().map(|p| p.id) == Some(w.logical_parent) && !self.is_exempt(m.id))
            .collect();
        let Some(&first) = members.first() else {
            return false;
        };

        dom::insert_before(first, wrapper);
        for member in members {
            dom::append_child(wrapper, member);
        }
        true
    }

    /// Up to `max_depth` nearest ancestors, following logical parents.
    #[must_use]
    pub fn ancestors<'a>(&self, node: NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
        if node.parent().is_some() || !self.is_wrapper(node.id) {
            return dom::ancestors(node, max_depth);
        }
        let Some(first) = self.parent(node) else {
            return Vec::new();
        };
        let mut out = vec![first];
        if max_depth != 1 {
            let rest = if max_depth == 0 { 0 } else { max_depth - 1 };
            out.extend(dom::ancestors(first, rest));
        }
        out
    }

    // === Byline ===

    #[must_use]
    pub fn has_byline(&self) -> bool {
        self.byline.is_some()
    }

    /// Remember the pass's byline node and exempt it from scoring.
    pub fn set_byline(&mut self, node: NodeRef) {
        self.mark_exempt(node.id);
        self.byline = Some((node.id, dom::inner_text(node, true)));
    }

    #[must_use]
    pub fn byline_node(&self) -> Option<NodeId> {
        self.byline.as_ref().map(|(node, _)| *node)
    }

    #[must_use]
    pub fn byline_text(&self) -> Option<&str> {
        self.byline.as_ref().map(|(_, text)| text.as_str())
    }
}
