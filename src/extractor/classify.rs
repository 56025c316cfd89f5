//! Classification pass.
//!
//! Walks the working tree depth-first, dropping what cannot be content,
//! setting the byline aside and collecting the elements whose text will be
//! scored. `<div>`s get special treatment: a div that is really a paragraph
//! is turned into one, and inline runs inside mixed divs are grouped into
//! synthetic paragraphs.

use tracing::trace;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::link_density::link_density;

use super::flags::Filter;
use super::state::PassState;

/// Link density under which a div-wrapped paragraph is unwrapped.
const DIV_PARAGRAPH_MAX_LINK_DENSITY: f64 = 0.25;

fn remove_and_get_next(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let next = dom::next_node(node, true);
    dom::remove(node);
    next
}

/// Classify every element of `doc` and return the ones to score, in
/// document order.
pub fn collect_elements_to_score<'a>(doc: &'a Document, state: &mut PassState) -> Vec<NodeRef<'a>> {
    let strip_unlikelys = state.flags().is_enabled(Filter::StripUnlikelys);
    let mut elements = Vec::new();
    let mut current = dom::document_element(doc);

    while let Some(mut node) = current {
        if !dom::is_probably_visible(node) {
            trace!(node = ?node.id, "removing hidden node");
            current = remove_and_get_next(node);
            continue;
        }

        if dom::is_unlikely_tag(node) {
            current = remove_and_get_next(node);
            continue;
        }

        let match_string = dom::match_string(node);

        if !state.has_byline() && dom::is_byline(node, &match_string) {
            state.set_byline(node);
            current = dom::next_node(node, true);
            continue;
        }

        if strip_unlikelys && dom::is_unlikely_candidate(node, &match_string) {
            trace!(node = ?node.id, %match_string, "removing unlikely candidate");
            current = remove_and_get_next(node);
            continue;
        }

        if dom::is_without_content_candidate(node) {
            current = remove_and_get_next(node);
            continue;
        }

        if dom::is_default_score_tag(node) {
            elements.push(node);
        }

        if dom::is_tag(node, "div") {
            node = classify_div(state, node, &mut elements);
        }

        current = dom::next_node(node, false);
    }

    elements
}

/// Handle a `<div>` and return the node the traversal continues from.
fn classify_div<'a>(state: &mut PassState, div: NodeRef<'a>, elements: &mut Vec<NodeRef<'a>>) -> NodeRef<'a> {
    let children = div.children();
    let runs = phrasing_runs(&children);
    let all_phrasing = children.iter().all(|&c| dom::is_phrasing_content(c));

    if all_phrasing && !runs.is_empty() {
        // The whole div is one paragraph.
        if link_density(div) < DIV_PARAGRAPH_MAX_LINK_DENSITY {
            dom::rename(div, "p");
            elements.push(div);
        } else {
            for run in runs {
                elements.push(state.add_wrapper(div, run));
            }
        }
        return div;
    }

    if !runs.is_empty() {
        for run in runs {
            elements.push(state.add_wrapper(div, run));
        }
        return div;
    }

    if dom::has_single_tag_inside_element(div, "p") && link_density(div) < DIV_PARAGRAPH_MAX_LINK_DENSITY {
        if let Some(p) = dom::first_element_child(div) {
            dom::replace(div, p);
            elements.push(p);
            return p;
        }
    } else if !dom::has_child_block_element(div) {
        dom::rename(div, "p");
        elements.push(div);
    }

    div
}

/// Consecutive inline children, each run starting at a non-whitespace node
/// and trimmed of trailing whitespace.
fn phrasing_runs(children: &[NodeRef]) -> Vec<Vec<NodeId>> {
    let mut runs: Vec<Vec<NodeId>> = Vec::new();
    let mut run: Vec<NodeRef> = Vec::new();

    let mut flush = |run: &mut Vec<NodeRef>| {
        while run.last().is_some_and(|&last| dom::is_whitespace(last)) {
            run.pop();
        }
        if !run.is_empty() {
            runs.push(run.drain(..).map(|n| n.id).collect());
        }
    };

    for &child in children {
        if dom::is_phrasing_content(child) {
            if !run.is_empty() || !dom::is_whitespace(child) {
                run.push(child);
            }
        } else {
            flush(&mut run);
        }
    }
    flush(&mut run);

    runs
}
