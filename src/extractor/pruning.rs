//! Conditional cleaning of the assembled article.
//!
//! Forms, fieldsets, tables and lists inside the article are checked in
//! reverse document order and dropped when their shape says they are link
//! blocks or layout scaffolding rather than content.

use tracing::trace;

use crate::dom::{self, NodeRef};
use crate::link_density::link_density;
use crate::patterns::CONDITIONAL_TAGS;
use crate::scoring::class_weight;

use super::flags::Filter;
use super::state::PassState;

/// Blocks with at least this many commas read as prose and are kept.
const PROSE_COMMAS: usize = 10;
/// Shortest text kept for a block without a single image.
const MIN_BLOCK_LENGTH: usize = 25;
/// Shortest text kept next to exactly one embed.
const MIN_EMBED_TEXT_LENGTH: usize = 75;
/// List items a block may have beyond its paragraph count.
const LIST_ITEM_ALLOWANCE: usize = 100;

/// Remove suspicious conditional blocks under `container`. Returns how many
/// were removed.
pub fn clean_conditionally(state: &PassState, container: NodeRef) -> usize {
    let blocks: Vec<NodeRef> = container
        .descendants()
        .into_iter()
        .filter(|&n| dom::tag_name(n).is_some_and(|t| CONDITIONAL_TAGS.contains(&t.as_str())))
        .collect();

    let mut removed = 0;
    for block in blocks.into_iter().rev() {
        if !dom::contains(container, block) {
            continue;
        }
        if should_remove(state, block) {
            trace!(node = ?block.id, tag = dom::tag_name(block).unwrap_or_default(), "cleaning block");
            dom::remove(block);
            removed += 1;
        }
    }
    removed
}

fn count_tag(node: NodeRef, tags: &[&str]) -> usize {
    node.descendants()
        .into_iter()
        .filter(|&d| dom::tag_name(d).is_some_and(|t| tags.contains(&t.as_str())))
        .count()
}

/// A table holding data rather than page layout.
fn is_data_table(table: NodeRef) -> bool {
    if table.attr("role").is_some_and(|v| &*v == "presentation")
        || table.attr("datatable").is_some_and(|v| &*v == "0")
    {
        return false;
    }
    if table.has_attr("summary") {
        return true;
    }
    if count_tag(table, &["caption", "th", "thead", "tfoot", "colgroup"]) > 0 {
        return true;
    }
    if count_tag(table, &["table"]) > 0 {
        return false;
    }

    let rows: Vec<NodeRef> = table
        .descendants()
        .into_iter()
        .filter(|&d| dom::is_tag(d, "tr"))
        .collect();
    let columns = rows
        .iter()
        .map(|&row| {
            dom::element_children(row)
                .into_iter()
                .filter(|&c| dom::is_tag(c, "td") || dom::is_tag(c, "th"))
                .count()
        })
        .max()
        .unwrap_or(0);

    rows.len() >= 10 || columns > 4 || rows.len() * columns > 10
}

fn should_remove(state: &PassState, node: NodeRef) -> bool {
    if dom::is_tag(node, "table") && is_data_table(node) {
        return false;
    }
    if dom::has_ancestor_tag(node, "table", 0, is_data_table) {
        return false;
    }
    if dom::has_ancestor_tag(node, "code", 0, |_| true) {
        return false;
    }

    let weight = if state.flags().is_enabled(Filter::WeightClasses) {
        class_weight(node)
    } else {
        0.0
    };
    let score = state.value(node.id).unwrap_or(0.0);
    if weight + score < 0.0 {
        return true;
    }

    let text = dom::inner_text(node, true);
    if text.matches(',').count() >= PROSE_COMMAS {
        return false;
    }

    let is_list = dom::is_tag(node, "ul") || dom::is_tag(node, "ol");
    let paragraphs = count_tag(node, &["p"]);
    let images = count_tag(node, &["img"]);
    let list_items = count_tag(node, &["li"]);
    let inputs = count_tag(node, &["input"]);
    let embeds = count_tag(node, &["object", "embed", "iframe"]);
    let density = link_density(node);
    let length = text.chars().count();
    let in_figure = dom::has_ancestor_tag(node, "figure", 3, |_| true);

    (images > 1 && (paragraphs as f64) / (images as f64) < 0.5 && !in_figure)
        || (!is_list && list_items > paragraphs + LIST_ITEM_ALLOWANCE)
        || inputs > paragraphs / 3
        || (!is_list && length < MIN_BLOCK_LENGTH && (images == 0 || images > 2) && !in_figure)
        || (!is_list && weight < 25.0 && density > 0.2)
        || (weight >= 25.0 && density > 0.5)
        || (embeds == 1 && length < MIN_EMBED_TEXT_LENGTH)
        || embeds > 1
}
