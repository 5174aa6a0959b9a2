use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use passmark_core::model::{DifficultyTier, QuestionOutcome};
use passmark_core::parser::parse_session_str;
use passmark_core::score;

fn make_session(n: usize) -> Vec<QuestionOutcome> {
    (0..n)
        .map(|i| {
            let tier = DifficultyTier::ALL[i % DifficultyTier::ALL.len()];
            QuestionOutcome::new(format!("q{i}"), i % 3 != 0, tier)
                .with_angoff((i * 37 % 101) as f64)
                .with_time(30 + (i % 90) as u32)
                .with_topic(format!("topic-{}", i % 7))
        })
        .collect()
}

fn make_session_toml(n: usize) -> String {
    let mut toml = String::from("[session]\nid = \"bench\"\ncandidate = \"bench\"\n");
    for i in 0..n {
        toml.push_str(&format!(
            "\n[[outcomes]]\nquestion_id = \"q{i}\"\ncorrect = {}\ntime_spent_seconds = {}\ndifficulty = \"{}\"\nangoff_score = {}\n",
            i % 3 != 0,
            30 + i % 90,
            DifficultyTier::ALL[i % 4].as_str(),
            i * 37 % 101,
        ));
    }
    toml
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for n in [10, 50, 200] {
        let outcomes = make_session(n);
        group.bench_function(format!("n={n}"), |b| b.iter(|| score(black_box(&outcomes))));
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_session");
    let content = make_session_toml(200);

    group.bench_function("n=200", |b| {
        b.iter(|| parse_session_str(black_box(&content), Path::new("bench.toml")))
    });

    group.finish();
}

criterion_group!(benches, bench_score, bench_parse);
criterion_main!(benches);
