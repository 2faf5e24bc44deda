use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsta_core::BuildState;
use rsta_processor::{extract_text, DescriptionResolver, OfflineSummarizer, Resolver, RstParser};

fn sample_article(paragraphs: usize) -> String {
    let mut src = String::from(".. new-def:: AI\n   :long: Artificial intelligence\n");
    src.push_str("   :description: Machines that think.\n\n");
    src.push_str("Introduction\n============\n\n");
    for i in 0..paragraphs {
        src.push_str(&format!(
            "Paragraph {} uses :abbrev:`AI` with *emphasis* and :fcite:`ref{}`.\n\n",
            i, i % 7
        ));
    }
    src.push_str(".. definitions::\n");
    src
}

fn bench_extraction(c: &mut Criterion) {
    let source = sample_article(200);
    let doc = RstParser::plain().parse_standalone(&source);

    c.bench_function("Parse article (200 paragraphs)", |b| {
        b.iter(|| RstParser::article().parse_standalone(black_box(&source)))
    });

    c.bench_function("Extract plain text (200 paragraphs)", |b| {
        b.iter(|| extract_text(black_box(&doc)))
    });

    c.bench_function("Resolve references (200 paragraphs)", |b| {
        let resolver = Resolver::new(DescriptionResolver::new(OfflineSummarizer, "unused-cache"));
        b.iter(|| {
            let mut state = BuildState::default();
            let mut doc = RstParser::article().parse(black_box(&source), &mut state);
            resolver.resolve(&mut doc, &mut state).unwrap();
        })
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
