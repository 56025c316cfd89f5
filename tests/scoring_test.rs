//! Scoring and candidate ranking through the public modules.

use antar::extractor::candidates::rank_candidates;
use antar::extractor::classify::collect_elements_to_score;
use antar::extractor::{Filter, FilterFlags, PassState};
use antar::link_density::link_density;
use antar::scoring::{ancestor_divider, class_weight, content_score, score_elements};
use antar::{dom, Document, NodeId, Options};

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.select(&format!("#{id}")).nodes().first().unwrap().id
}

fn paragraph(words: &str) -> String {
    format!("<p>{words} {words} {words}, {words}.</p>")
}

/// Two paragraphs keep a wrapping `<div>` from being unwrapped.
fn two_paragraphs(words: &str) -> String {
    paragraph(words).repeat(2)
}

#[test]
fn class_weight_keywords() {
    let doc = dom::parse(
        r#"<div id="a" class="ad-banner-sidebar"></div>
           <div id="b" class="article-main-content"></div>
           <div id="c" class="plain"></div>
           <div id="article-footer" class="x"></div>"#,
    );

    assert_eq!(class_weight(dom::node(&doc, by_id(&doc, "a"))), -25.0);
    assert_eq!(class_weight(dom::node(&doc, by_id(&doc, "b"))), 25.0);
    assert_eq!(class_weight(dom::node(&doc, by_id(&doc, "c"))), 0.0);
    // id "article-footer" matches both lists
    assert_eq!(class_weight(dom::node(&doc, by_id(&doc, "article-footer"))), 0.0);
}

#[test]
fn content_score_counts_commas_and_length() {
    assert_eq!(content_score("no commas here"), 2.0);
    assert_eq!(content_score("one, two, three"), 4.0);
    let long = "word ".repeat(100);
    // 499 characters, length bonus capped at 3
    assert_eq!(content_score(long.trim()), 5.0);
}

#[test]
fn decay_divisors() {
    let divisors: Vec<f64> = (0..4).map(ancestor_divider).collect();
    assert_eq!(divisors, [1.0, 2.0, 6.0, 9.0]);
}

#[test]
fn scores_reach_three_ancestors() {
    let doc = dom::parse(&format!(
        r#"<article id="l4"><article id="l3"><article id="l2"><article id="l1">{}</article></article></article></article>"#,
        paragraph("alpha beta gamma")
    ));
    let mut state = PassState::new(FilterFlags::ALL);

    let elements = collect_elements_to_score(&doc, &mut state);
    score_elements(&mut state, &elements, &Options::default());

    let score = |id: &str| state.value(by_id(&doc, id));
    assert!(score("l1").unwrap() > score("l2").unwrap());
    assert!(score("l2").unwrap() > score("l3").unwrap());
    assert!(score("l3").is_some());
    assert_eq!(score("l4"), None);
}

#[test]
fn top_candidates_are_capped_and_sorted() {
    let blocks = (0..9)
        .map(|i| format!(r#"<div id="d{i}">{}</div>"#, two_paragraphs(&"word ".repeat(i + 3))))
        .collect::<String>();
    let doc = dom::parse(&format!("<main>{blocks}</main>"));
    let mut state = PassState::new(FilterFlags::ALL);
    let options = Options::default();

    let elements = collect_elements_to_score(&doc, &mut state);
    score_elements(&mut state, &elements, &options);
    let top = rank_candidates(&doc, &mut state, &options);

    assert!(state.candidates().len() > 5);
    assert_eq!(top.len(), 5);
    let scores: Vec<f64> = top.entries().iter().map(|&(_, s)| s).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn ranking_discounts_link_heavy_candidates() {
    let doc = dom::parse(&format!(
        r#"<div id="links"><p><a href="/1">{}</a></p></div><div id="text">{}</div>"#,
        "linked words, more linked words, and even more",
        two_paragraphs("plain text words")
    ));
    let mut state = PassState::new(FilterFlags::ALL);
    let options = Options::default();

    let elements = collect_elements_to_score(&doc, &mut state);
    score_elements(&mut state, &elements, &options);
    let top = rank_candidates(&doc, &mut state, &options);

    let links = by_id(&doc, "links");
    assert!(link_density(dom::node(&doc, links)) > 0.99);
    assert!(state.value(links).unwrap().abs() < 1e-9);
    assert_eq!(top.head().map(|(n, _)| n), Some(by_id(&doc, "text")));
}

#[test]
fn weight_filter_changes_initial_scores() {
    let html = format!(r#"<div id="box" class="content">{}</div>"#, two_paragraphs("some body text"));

    let doc = dom::parse(&html);
    let mut weighted = PassState::new(FilterFlags::ALL);
    let elements = collect_elements_to_score(&doc, &mut weighted);
    score_elements(&mut weighted, &elements, &Options::default());

    let doc_plain = dom::parse(&html);
    let mut flags = FilterFlags::ALL;
    flags.disable(Filter::WeightClasses);
    let mut plain = PassState::new(flags);
    let elements = collect_elements_to_score(&doc_plain, &mut plain);
    score_elements(&mut plain, &elements, &Options::default());

    let weighted_score = weighted.value(by_id(&doc, "box")).unwrap();
    let plain_score = plain.value(by_id(&doc_plain, "box")).unwrap();
    assert_eq!(weighted_score - plain_score, 25.0);
}
