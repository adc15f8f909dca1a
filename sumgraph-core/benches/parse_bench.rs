// Benchmark the summary parser on synthetic summaries of increasing size.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sumgraph_core::parse::parse_summary;

/// Build a summary with `entity_count` entities and roughly two
/// relationships per entity, half of them carrying a strength annotation.
fn synthetic_summary(entity_count: usize) -> String {
    let mut text = String::from("Some preamble the parser skips.\n\n### Entities:\n");
    for i in 0..entity_count {
        text.push_str(&format!("{}. **Entity {i}**\n", i + 1));
    }
    text.push_str("\n### Relationships:\n");
    for i in 0..entity_count {
        let a = (i * 7 + 1) % entity_count;
        let b = (i * 13 + 3) % entity_count;
        let strength = i % 10;
        text.push_str(&format!(
            "Entity {i} -> works with [strength: 0.{strength}] -> Entity {a}\n"
        ));
        text.push_str(&format!("Entity {i} -> reports to -> Entity {b}\n"));
    }
    text
}

fn bench_parse_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_summary");

    for entity_count in [10, 100, 1_000] {
        let text = synthetic_summary(entity_count);
        group.bench_with_input(
            BenchmarkId::new("entities", entity_count),
            &text,
            |b, t| {
                b.iter(|| parse_summary(t));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_summary);
criterion_main!(benches);
