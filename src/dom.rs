//! Tree access layer.
//!
//! Thin predicates and queries over `dom_query` nodes used by the classifier,
//! the scorer and the candidate selector. Nodes are addressed by
//! [`NodeRef`], a copyable handle pairing a [`NodeId`] with its tree.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns::{
    BYLINE, DEFAULT_TAGS_TO_SCORE, DISPLAY_NONE, DIV_TO_P_ELEMS, HAS_CONTENT, MAYBE_CANDIDATE,
    NORMALIZE, PHRASING_ELEMS, UNLIKELY_CANDIDATES, UNLIKELY_TAGS, WITHOUT_CONTENT_CANDIDATES,
};

// === Documents ===

/// Parse markup into a document. Parsing is complete when this returns.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Independent working copy of a document.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Handle of `id` inside `doc`.
#[inline]
#[must_use]
pub fn node(doc: &Document, id: NodeId) -> NodeRef<'_> {
    NodeRef::new(id, &doc.tree)
}

/// Handle of `id` in the same tree as `node`.
#[inline]
#[must_use]
pub fn same_tree<'a>(node: NodeRef<'a>, id: NodeId) -> NodeRef<'a> {
    NodeRef::new(id, node.tree)
}

/// The `<html>` element.
#[must_use]
pub fn document_element(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().copied()
}

/// The `<body>` element.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

/// Detached element named `tag`, created in `node`'s tree.
#[must_use]
pub fn create_element<'a>(node: NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    node.tree.new_element(tag)
}

// === Attribute Operations ===

/// `class` attribute, empty when absent.
#[must_use]
pub fn class_name(node: NodeRef) -> String {
    node.attr("class").map(|s| s.to_string()).unwrap_or_default()
}

/// `id` attribute, empty when absent.
#[must_use]
pub fn id(node: NodeRef) -> String {
    node.attr("id").map(|s| s.to_string()).unwrap_or_default()
}

/// Class and id joined by a space, the text keyword patterns run against.
#[must_use]
pub fn match_string(node: NodeRef) -> String {
    format!("{} {}", class_name(node), id(node))
}

// === Tag/Node Information ===

/// Lowercase tag name, `None` for text and document nodes.
#[must_use]
pub fn tag_name(node: NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

#[must_use]
pub fn is_tag(node: NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|t| t.eq_ignore_ascii_case(tag))
}

fn tag_in(node: NodeRef, list: &[&str]) -> bool {
    tag_name(node).is_some_and(|t| list.contains(&t.as_str()))
}

/// Rename an element in place.
#[inline]
pub fn rename(node: NodeRef, new_tag: &str) {
    Selection::from(node).rename(new_tag);
}

// === Tree Navigation ===

/// Element children in document order.
#[must_use]
pub fn element_children(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

#[must_use]
pub fn first_element_child(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    node.children().into_iter().find(NodeRef::is_element)
}

/// Next sibling that is an element, skipping text nodes.
#[must_use]
pub fn next_element_sibling(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

/// Whether `ancestor` lies on the parent chain of `node` (or is `node`).
#[must_use]
pub fn contains(ancestor: NodeRef, node: NodeRef) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.id == ancestor.id {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Up to `max_depth` nearest element ancestors, nearest first.
///
/// `max_depth == 0` returns the whole chain. The walk stops at the first
/// non-element, so a detached subtree simply yields a shorter chain.
#[must_use]
pub fn ancestors(node: NodeRef<'_>, max_depth: usize) -> Vec<NodeRef<'_>> {
    let mut out = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if !parent.is_element() {
            break;
        }
        out.push(parent);
        if max_depth > 0 && out.len() == max_depth {
            break;
        }
        current = parent.parent();
    }
    out
}

/// Depth-first successor over elements.
///
/// First child unless `skip_children`, then the next sibling, then the next
/// sibling of the nearest ancestor that has one.
#[must_use]
pub fn next_node(node: NodeRef<'_>, skip_children: bool) -> Option<NodeRef<'_>> {
    if !skip_children {
        if let Some(child) = first_element_child(node) {
            return Some(child);
        }
    }
    if let Some(sibling) = next_element_sibling(node) {
        return Some(sibling);
    }
    let mut current = node;
    loop {
        current = current.parent()?;
        if let Some(sibling) = next_element_sibling(current) {
            return Some(sibling);
        }
    }
}

/// Whether one of the nearest ancestors is a `tag` element accepted by `filter`.
///
/// Checks up to `max_depth + 1` ancestors; `max_depth == 0` walks to the root.
pub fn has_ancestor_tag<F>(node: NodeRef, tag: &str, max_depth: usize, filter: F) -> bool
where
    F: Fn(NodeRef) -> bool,
{
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        if max_depth > 0 && depth > max_depth {
            return false;
        }
        if is_tag(parent, tag) && filter(parent) {
            return true;
        }
        current = parent.parent();
        depth += 1;
    }
    false
}

// === Tree Manipulation ===

/// Move `child` to the end of `parent`'s children.
///
/// Refuses to create a cycle: appending an ancestor of `parent` is a no-op.
pub fn append_child(parent: NodeRef, child: NodeRef) {
    if contains(child, parent) {
        return;
    }
    child.remove_from_parent();
    parent.append_child(&child);
}

/// Move `child` right before `reference` under the same parent.
pub fn insert_before(reference: NodeRef, child: NodeRef) {
    if reference.parent().is_none() || child.id == reference.id || contains(child, reference) {
        return;
    }
    child.remove_from_parent();
    reference.insert_before(&child);
}

/// Put `new` where `old` is and detach `old`.
pub fn replace(old: NodeRef, new: NodeRef) {
    if old.parent().is_none() {
        return;
    }
    insert_before(old, new);
    old.remove_from_parent();
}

/// Unlink a node from its parent. The subtree stays intact.
#[inline]
pub fn remove(node: NodeRef) {
    node.remove_from_parent();
}

// === Text Content ===

/// Concatenated text of the node and all its descendants.
#[inline]
#[must_use]
pub fn text_content(node: NodeRef) -> StrTendril {
    node.text()
}

/// Trimmed text content, with whitespace runs collapsed when `normalize`.
#[must_use]
pub fn inner_text(node: NodeRef, normalize: bool) -> String {
    let text = node.text();
    let trimmed = text.trim();
    if normalize {
        NORMALIZE.replace_all(trimmed, " ").into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Character count of the normalized inner text.
#[must_use]
pub fn text_length(node: NodeRef) -> usize {
    inner_text(node, true).chars().count()
}

/// Whitespace-only text node or `<br>`.
#[must_use]
pub fn is_whitespace(node: NodeRef) -> bool {
    if node.is_text() {
        node.text().trim().is_empty()
    } else {
        is_tag(node, "br")
    }
}

/// Markup of the node including its own tag.
#[inline]
#[must_use]
pub fn outer_html(node: NodeRef) -> StrTendril {
    Selection::from(node).html()
}

// === Classification predicates ===

/// Not hidden through an inline `display: none` or the `hidden` attribute.
#[must_use]
pub fn is_probably_visible(node: NodeRef) -> bool {
    let styled_out = node
        .attr("style")
        .is_some_and(|style| DISPLAY_NONE.is_match(&style));
    !styled_out && !node.has_attr("hidden")
}

/// Tags that never hold article text (scripts, form controls, media, `<h1>`...).
#[must_use]
pub fn is_unlikely_tag(node: NodeRef) -> bool {
    tag_in(node, UNLIKELY_TAGS)
}

/// Keyword match on class/id marks the node as navigation, ads or the like.
///
/// Nodes inside a table, `<body>` and anchors are never unlikely.
#[must_use]
pub fn is_unlikely_candidate(node: NodeRef, match_string: &str) -> bool {
    UNLIKELY_CANDIDATES.is_match(match_string)
        && !MAYBE_CANDIDATE.is_match(match_string)
        && !has_ancestor_tag(node, "table", 3, |_| true)
        && !is_tag(node, "body")
        && !is_tag(node, "a")
}

/// Element with no text whose element children are all `<br>`/`<hr>`.
#[must_use]
pub fn is_element_without_content(node: NodeRef) -> bool {
    node.is_element()
        && node.text().trim().is_empty()
        && element_children(node)
            .into_iter()
            .all(|child| is_tag(child, "br") || is_tag(child, "hr"))
}

/// Empty block container (`div`, `section`, `header`, headings).
#[must_use]
pub fn is_without_content_candidate(node: NodeRef) -> bool {
    tag_in(node, WITHOUT_CONTENT_CANDIDATES) && is_element_without_content(node)
}

#[must_use]
pub fn is_default_score_tag(node: NodeRef) -> bool {
    tag_in(node, DEFAULT_TAGS_TO_SCORE)
}

/// Exactly one element child, a `tag`, and no text node with real content.
#[must_use]
pub fn has_single_tag_inside_element(node: NodeRef, tag: &str) -> bool {
    let elements = element_children(node);
    let [only] = elements.as_slice() else {
        return false;
    };
    if !is_tag(*only, tag) {
        return false;
    }

    !node
        .children()
        .into_iter()
        .any(|c| c.is_text() && HAS_CONTENT.is_match(&c.text()))
}

/// Inline-level content: text, inline tags, and `a`/`del`/`ins` wrapping
/// only inline content.
#[must_use]
pub fn is_phrasing_content(node: NodeRef) -> bool {
    if node.is_text() || tag_in(node, PHRASING_ELEMS) {
        return true;
    }
    (is_tag(node, "a") || is_tag(node, "del") || is_tag(node, "ins"))
        && node.children().into_iter().all(is_phrasing_content)
}

/// Any descendant is a block-level element.
#[must_use]
pub fn has_child_block_element(node: NodeRef) -> bool {
    node.descendants().into_iter().any(|d| tag_in(d, DIV_TO_P_ELEMS))
}

// === Byline ===

/// A plausible author line: non-empty and shorter than 100 characters.
#[must_use]
pub fn is_valid_byline(text: &str) -> bool {
    let len = text.trim().chars().count();
    len > 0 && len < 100
}

/// `rel="author"`, an `itemprop` naming the author, or a byline class/id,
/// on a node whose text looks like an author line.
#[must_use]
pub fn is_byline(node: NodeRef, match_string: &str) -> bool {
    let rel_author = node.attr("rel").is_some_and(|v| &*v == "author");
    let itemprop_author = node.attr("itemprop").is_some_and(|v| v.contains("author"));

    (rel_author || itemprop_author || BYLINE.is_match(match_string)) && is_valid_byline(&node.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
        *doc.select(tag).nodes().first().unwrap()
    }

    fn all<'a>(doc: &'a Document, tag: &str) -> Vec<NodeRef<'a>> {
        doc.select(tag).nodes().to_vec()
    }

    #[test]
    fn test_match_string_and_missing_attributes() {
        let doc = parse(r#"<div class="story" id="main">x</div><p>y</p>"#);
        assert_eq!(match_string(first(&doc, "div")), "story main");
        assert_eq!(match_string(first(&doc, "p")), " ");
    }

    #[test]
    fn test_visibility() {
        let doc = parse(r#"<p id="a" style="color: red; DISPLAY : none">a</p><p id="b" hidden>b</p><p id="c">c</p>"#);
        let ps = all(&doc, "p");

        assert!(!is_probably_visible(ps[0]));
        assert!(!is_probably_visible(ps[1]));
        assert!(is_probably_visible(ps[2]));
    }

    #[test]
    fn test_unlikely_candidate_rules() {
        let doc = parse(
            r#"<div class="sidebar">s</div>
               <div class="sidebar main">m</div>
               <table><tr><td><div class="sidebar" id="intable">t</div></td></tr></table>
               <a class="sidebar">link</a>"#,
        );
        let divs = all(&doc, "div");

        assert!(is_unlikely_candidate(divs[0], &match_string(divs[0])));
        assert!(!is_unlikely_candidate(divs[1], &match_string(divs[1])));
        assert!(!is_unlikely_candidate(divs[2], &match_string(divs[2])));
        let a = first(&doc, "a");
        assert!(!is_unlikely_candidate(a, &match_string(a)));
    }

    #[test]
    fn test_has_ancestor_tag_depth_limit() {
        let doc = parse("<table><tr><td><div><div><div><div><span>deep</span></div></div></div></div></td></tr></table>");
        let span = first(&doc, "span");
        assert!(!has_ancestor_tag(span, "table", 3, |_| true));
        assert!(has_ancestor_tag(span, "table", 0, |_| true));
        assert!(has_ancestor_tag(span, "td", 5, |_| true));
    }

    #[test]
    fn test_without_content() {
        let doc = parse("<div id='a'> <br><hr> </div><div id='b'><span></span></div><section>x</section>");
        let divs = all(&doc, "div");

        assert!(is_without_content_candidate(divs[0]));
        assert!(!is_without_content_candidate(divs[1]));
        assert!(!is_without_content_candidate(first(&doc, "section")));
    }

    #[test]
    fn test_default_score_tags() {
        let doc = parse("<section><p>a</p><pre>b</pre><div>c</div></section>");
        assert!(is_default_score_tag(first(&doc, "section")));
        assert!(is_default_score_tag(first(&doc, "p")));
        assert!(is_default_score_tag(first(&doc, "pre")));
        assert!(!is_default_score_tag(first(&doc, "div")));
    }

    #[test]
    fn test_byline_detection() {
        let doc = parse(
            r#"<a rel="author">Jane Roe</a>
               <span itemprop="author name">John Doe</span>
               <div class="byline">  </div>
               <p class="writtenby">By Someone</p>"#,
        );

        let a = first(&doc, "a");
        let span = first(&doc, "span");
        let div = first(&doc, "div");
        let p = first(&doc, "p");
        assert!(is_byline(a, &match_string(a)));
        assert!(is_byline(span, &match_string(span)));
        assert!(!is_byline(div, &match_string(div)));
        assert!(is_byline(p, &match_string(p)));
        assert!(!is_valid_byline(&"x".repeat(100)));
    }

    #[test]
    fn test_inner_text_normalization() {
        let doc = parse("<p>  one   two\n\nthree  </p>");
        let p = first(&doc, "p");
        assert_eq!(inner_text(p, true), "one two three");
        assert_eq!(inner_text(p, false), "one   two\n\nthree");
        assert_eq!(text_length(p), 13);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let doc = parse("<div id='outer'><section><p><b>x</b></p></section></div>");
        let b = first(&doc, "b");
        let chain = ancestors(b, 3);

        assert_eq!(chain.len(), 3);
        assert!(is_tag(chain[0], "p"));
        assert!(is_tag(chain[1], "section"));
        assert!(is_tag(chain[2], "div"));

        let whole = ancestors(b, 0);
        assert!(is_tag(*whole.last().unwrap(), "html"));
    }

    #[test]
    fn test_next_node_depth_first() {
        let doc = parse("<div id='a'><p id='b'>x</p></div><div id='c'></div>");
        let a = first(&doc, "div");
        let b = first(&doc, "p");
        let c = next_node(a, true).unwrap();

        assert_eq!(next_node(a, false).map(|n| n.id), Some(b.id));
        assert_eq!(next_node(b, false).map(|n| n.id), Some(c.id));
        assert_eq!(id(c), "c");
        assert!(next_node(c, false).is_none());
    }

    #[test]
    fn test_single_tag_inside_element() {
        let doc = parse("<div id='a'> <p>x</p> </div><div id='b'>text<p>x</p></div><div id='c'><p>1</p><p>2</p></div>");
        let divs = all(&doc, "div");

        assert!(has_single_tag_inside_element(divs[0], "p"));
        assert!(!has_single_tag_inside_element(divs[1], "p"));
        assert!(!has_single_tag_inside_element(divs[2], "p"));
    }

    #[test]
    fn test_phrasing_content() {
        let doc = parse("<div><span>s</span><a id='inline'><b>x</b></a><a id='block'><div>y</div></a><p>p</p></div>");
        let anchors = all(&doc, "a");

        assert!(is_phrasing_content(first(&doc, "span")));
        assert!(is_phrasing_content(anchors[0]));
        assert!(!is_phrasing_content(anchors[1]));
        assert!(!is_phrasing_content(first(&doc, "p")));
    }

    #[test]
    fn test_child_block_element() {
        let doc = parse("<div id='a'><span><img src='x'></span></div><div id='b'><span>t</span></div>");
        let divs = all(&doc, "div");

        assert!(has_child_block_element(divs[0]));
        assert!(!has_child_block_element(divs[1]));
    }

    #[test]
    fn test_moves_keep_nodes_in_one_tree() {
        let doc = parse("<div id='a'><p>one</p></div><div id='b'></div>");
        let divs = all(&doc, "div");
        let p = first(&doc, "p");

        append_child(divs[1], p);
        assert!(first_element_child(divs[0]).is_none());
        assert_eq!(p.parent().map(|n| n.id), Some(divs[1].id));

        // an ancestor never moves under its own descendant
        append_child(p, divs[1]);
        assert_eq!(divs[1].parent().map(|n| n.id), body(&doc).map(|n| n.id));

        let em = create_element(p, "em");
        replace(p, em);
        assert!(p.parent().is_none());
        assert_eq!(first_element_child(divs[1]).map(|n| n.id), Some(em.id));
    }

    #[test]
    fn test_clone_document_is_independent() {
        let doc = parse("<article><p>kept</p></article>");
        let copy = clone_document(&doc);

        remove(first(&copy, "article"));
        assert!(copy.select("article").nodes().is_empty());
        assert_eq!(first(&doc, "article").text().to_string(), "kept");
    }

    #[test]
    fn test_rename_and_outer_html() {
        let doc = parse("<div><span>text</span></div>");
        let span = first(&doc, "span");
        rename(span, "p");
        assert_eq!(outer_html(first(&doc, "div")).to_string(), "<div><p>text</p></div>");
    }
}
