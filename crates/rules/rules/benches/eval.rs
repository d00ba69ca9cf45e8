//! Evaluator benchmarks.
//!
//! Measures validation and evaluation cost as the rule count grows.

use cdss_rules::{
    Condition, EngineConfig, Fact, Rule, evaluate_rules, validate_facts, validate_rules,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn facts() -> Vec<Fact> {
    (0..32)
        .map(|i| Fact::new(format!("lab_{i}"), i64::from(i) * 10))
        .collect()
}

fn rules(count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| {
            let key = format!("lab_{}", i % 40);
            Rule::new(
                format!("rule_{i}"),
                vec![
                    Condition::new(key.clone(), ">=", 50),
                    Condition::new(key, "<", 250),
                    Condition::new("lab_0", "in", vec![0, 1, 2]),
                ],
                format!("conclusion {i}"),
            )
            .with_priority(i32::try_from(i % 5).unwrap_or_default())
        })
        .collect()
}

fn evaluate(c: &mut Criterion) {
    let config = EngineConfig::default();
    let facts = validate_facts(&facts(), &config).expect("facts should validate");

    let mut group = c.benchmark_group("evaluate_rules");
    for count in [10, 100, 1_000] {
        let rules = validate_rules(&rules(count), &config).expect("rules should validate");
        group.bench_with_input(BenchmarkId::from_parameter(count), &rules, |b, rules| {
            b.iter(|| evaluate_rules(black_box(&facts), black_box(rules)));
        });
    }
    group.finish();
}

fn validate(c: &mut Criterion) {
    let config = EngineConfig::default();
    let rules = rules(1_000);

    c.bench_function("validate_rules_1000", |b| {
        b.iter(|| validate_rules(black_box(&rules), &config));
    });
}

criterion_group!(benches, evaluate, validate);
criterion_main!(benches);
