//! Link density.
//!
//! The share of a node's text that sits inside `<a>` descendants. Navigation
//! blocks and link farms score close to 1, prose close to 0.

use crate::dom::{self, NodeRef};

/// Ratio of anchor text length to total text length, 0 for empty nodes.
///
/// Both lengths are taken on normalized inner text, in characters.
#[must_use]
pub fn link_density(node: NodeRef) -> f64 {
    let text_length = dom::text_length(node);
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = node
        .descendants()
        .into_iter()
        .filter(|&d| dom::is_tag(d, "a"))
        .map(dom::text_length)
        .sum();

    link_length as f64 / text_length as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
        *doc.select(tag).nodes().first().unwrap()
    }

    #[test]
    fn test_link_density_nav_menu() {
        let doc = dom::parse(
            r#"<div>
                <a href="/home">Home</a>
                <a href="/about">About</a>
                <a href="/contact">Contact</a>
            </div>"#,
        );

        // "Home About Contact": 16 of 18 characters are link text
        let density = link_density(first(&doc, "div"));
        assert!((density - 16.0 / 18.0).abs() < 1e-9, "density was {density}");
    }

    #[test]
    fn test_link_density_article_paragraph() {
        let doc = dom::parse(
            r#"<p>This is a long paragraph with substantial text content that discusses
            various topics. It contains a <a href="/link">single link</a> but the
            majority of the content is regular text.</p>"#,
        );
        let density = link_density(first(&doc, "p"));
        assert!(density > 0.0 && density < 0.1, "density was {density}");
    }

    #[test]
    fn test_link_density_no_links() {
        let doc = dom::parse("<p>This paragraph has no links at all.</p>");
        assert_eq!(link_density(first(&doc, "p")), 0.0);
    }

    #[test]
    fn test_link_density_empty_node() {
        let doc = dom::parse("<div><a href='#'> </a></div>");
        assert_eq!(link_density(first(&doc, "div")), 0.0);
    }

    #[test]
    fn test_link_density_all_links() {
        let doc = dom::parse("<ul><li><a href='#'>Only a link</a></li></ul>");
        assert_eq!(link_density(first(&doc, "li")), 1.0);
    }
}
