// Benchmarks for markdown parsing.

use criterion::{criterion_group, criterion_main, Criterion};
use reddit_markdown::parse_markdown;

fn bench_comment(c: &mut Criterion) {
    let markdown = "Some **bold** text with a [link](https://reddit.com), `code` and a ^super script.";
    c.bench_function("typical_comment", |b| {
        b.iter(|| parse_markdown(markdown));
    });
}

fn bench_post(c: &mut Criterion) {
    let markdown = "# Title\n\nIntro paragraph that wraps\nacross lines.\n\n> a quote\n> over two lines\n\n- one\n- two\n- three\n\n|a|b|\n|-|-|\n|c|d|\n\n```\nlet x = 1;\n```";
    c.bench_function("full_post", |b| {
        b.iter(|| parse_markdown(markdown));
    });
}

criterion_group!(benches, bench_comment, bench_post);
criterion_main!(benches);
