//! Benchmarks for markdown rendering with the mermaid fence extension.

use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use mdocs_renderer::{MarkdownRenderer, MermaidFence};

fn sample_document(sections: usize) -> String {
    let mut doc = String::from("---\ntitle: Bench\n---\n\n# Bench\n\n");
    for i in 0..sections {
        write!(
            doc,
            "## Section {i}\n\nSome *text* with a footnote[^n{i}].\n\n\
             | A | B |\n|---|---|\n| {i} | {i} |\n\n\
             ```graph LR\nA{i} --- B{i}\n```\n\n\
             ```rust\nfn f{i}() {{}}\n```\n\n[^n{i}]: Note {i}.\n\n"
        )
        .unwrap();
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let small = sample_document(5);
    let large = sample_document(200);

    c.bench_function("render_small", |b| {
        b.iter(|| {
            MarkdownRenderer::new()
                .with_table_class("table")
                .with_fence_extension(MermaidFence::install)
                .render_markdown(black_box(&small))
        });
    });

    c.bench_function("render_large", |b| {
        b.iter(|| {
            MarkdownRenderer::new()
                .with_table_class("table")
                .with_fence_extension(MermaidFence::install)
                .render_markdown(black_box(&large))
        });
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
