//! Performance benchmarks for antar.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic article page for microbenchmarks
//! - Generated pages of growing size, to watch how the retry loop scales

use antar::extractor::{run_attempt, FilterFlags};
use antar::{dom, extract, AlwaysReadable, Extractor, Options};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p class="byline">By John Doe</p>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be picked up by the extractor, with a few commas, clauses,
        and enough words to look like real prose rather than a navigation menu.</p>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while removing navigation and other boilerplate, keeping
        the article body intact from the first sentence to the last one.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the extraction performance, since short pages end after
        a single pass while long ones exercise scoring across many candidates.</p>
    </article>
    <aside class="sidebar">
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/1">Related article 1</a></li>
            <li><a href="/2">Related article 2</a></li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

/// Page with `blocks` sections of ten paragraphs each.
fn generated_page(blocks: usize) -> String {
    let paragraph = "<p>Paragraph text with a comma, a few clauses, and enough words to be scored.</p>";
    let block = format!(r#"<div class="block">{}</div>"#, paragraph.repeat(10));
    format!("<html><body>{}</body></html>", block.repeat(blocks))
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_single_attempt(c: &mut Criterion) {
    let doc = dom::parse(SAMPLE_HTML);
    let options = Options::default();

    c.bench_function("run_attempt", |b| {
        b.iter(|| run_attempt(black_box(&doc), FilterFlags::ALL, black_box(&options)));
    });
}

/// Extraction on generated pages of growing size.
fn bench_generated_pages(c: &mut Criterion) {
    let extractor = Extractor::with_check(Options::default(), AlwaysReadable);
    let mut group = c.benchmark_group("generated");

    for blocks in [10, 50, 200] {
        let html = generated_page(blocks);
        let size_kb = html.len() / 1024;
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("extract", format!("{blocks} blocks ({size_kb}KB)")),
            &html,
            |b, html| {
                b.iter(|| extractor.extract_html(black_box(html)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_single_attempt,
    bench_generated_pages
);
criterion_main!(benches);
