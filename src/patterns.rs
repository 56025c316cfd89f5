//! Compiled regex patterns and tag tables used by the classifier and scorer.
//!
//! All patterns are compiled once on first use with `LazyLock` and never
//! mutated afterwards.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class / id keyword families
// =============================================================================

/// Class/id keywords of regions that are almost never article content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|foot|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Rescues a node that matched [`UNLIKELY_CANDIDATES`].
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow").expect("MAYBE_CANDIDATE regex")
});

/// Class/id keywords that raise a node's weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE regex")
});

/// Class/id keywords that lower a node's weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE regex")
});

/// Class/id keywords of author lines.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

// =============================================================================
// Text patterns
// =============================================================================

/// Runs of two or more whitespace characters.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Text that ends, or contains the end of, a sentence.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_END regex"));

/// Text whose last character is not whitespace.
pub static HAS_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S$").expect("HAS_CONTENT regex"));

/// `display: none` inside an inline style, tolerant of spacing and case.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));

// =============================================================================
// Tag tables (lowercase)
// =============================================================================

/// Tags scored directly when met during traversal.
pub const DEFAULT_TAGS_TO_SCORE: &[&str] = &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Tags dropped from the working tree on sight.
pub const UNLIKELY_TAGS: &[&str] = &[
    "script", "noscript", "select", "style", "footer", "aside", "link", "h1", "embed", "object",
    "svg", "iframe", "input", "textarea", "button",
];

/// Containers checked by conditional cleaning.
pub const CONDITIONAL_TAGS: &[&str] = &["fieldset", "form", "table", "ul"];

/// Block-level children that stop a `<div>` from being treated as a paragraph.
pub const DIV_TO_P_ELEMS: &[&str] = &[
    "a", "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul", "select",
];

/// Inline-level tags.
pub const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn", "em",
    "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "var", "wbr",
];

/// Containers that only count as empty when they hold nothing but breaks.
pub const WITHOUT_CONTENT_CANDIDATES: &[&str] =
    &["div", "section", "header", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Sibling tags kept as-is when appended to the article container.
pub const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["div", "article", "section", "p"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_candidates_match_boilerplate_names() {
        assert!(UNLIKELY_CANDIDATES.is_match("sidebar"));
        assert!(UNLIKELY_CANDIDATES.is_match("site-Footer"));
        assert!(UNLIKELY_CANDIDATES.is_match("top-ad-slot"));
        assert!(!UNLIKELY_CANDIDATES.is_match("story-text"));
    }

    #[test]
    fn maybe_candidate_rescues_content_names() {
        assert!(MAYBE_CANDIDATE.is_match("main-header"));
        assert!(MAYBE_CANDIDATE.is_match("article-comments"));
        assert!(!MAYBE_CANDIDATE.is_match("sidebar"));
    }

    #[test]
    fn negative_hid_forms() {
        assert!(NEGATIVE.is_match("hid"));
        assert!(NEGATIVE.is_match("x hid y"));
        assert!(!NEGATIVE.is_match("hidalgo"));
    }

    #[test]
    fn sentence_end_detection() {
        assert!(SENTENCE_END.is_match("It ended."));
        assert!(SENTENCE_END.is_match("One. Two"));
        assert!(!SENTENCE_END.is_match("version 1.2 released"));
    }

    #[test]
    fn normalize_collapses_runs_only() {
        assert_eq!(NORMALIZE.replace_all("a  b\n\n c d", " "), "a b c d");
    }
}
