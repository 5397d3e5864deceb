use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use evalexpr::*;
use mathline::ast::{Evaluator, EvaluatorConfig};

/// Benchmark a two-operand sum from source text.
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let evaluator = Evaluator::default();

    let expr = "2 + 3";
    let parsed = evaluator.parse_expression(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("mathline_arithmetic", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box(expr)))
    });

    group.bench_function("preparsed_arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&parsed)))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0) + black_box(3.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark grouping, division and mixed precedence.
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let evaluator = Evaluator::default();

    let expr = "(10 + 20) * 3 / (4 - 1) + 5 ^ 2";
    let parsed = evaluator.parse_expression(expr).unwrap();

    group.bench_function("mathline_complex_arithmetic", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box(expr)))
    });

    group.bench_function("preparsed_complex_arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&parsed)))
    });

    group.bench_function("meval_complex_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

fn benchmark_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function call Evaluation");

    let evaluator = Evaluator::default();

    group.bench_function("mathline_nested_calls", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box("exp(math.Log(2)) + abs(-3) * sqrt(16)")))
    });

    group.bench_function("meval_nested_calls", |b| {
        b.iter(|| meval::eval_str(black_box("exp(ln(2)) + abs(-3) * sqrt(16)")).unwrap())
    });
}

/// Long flat chains exercise the iterative walk over left-nested operators.
fn benchmark_long_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("Long chain Evaluation");

    let evaluator = Evaluator::new(EvaluatorConfig::default());
    let expr = vec!["1"; 1_000].join(" + ");

    group.bench_function("mathline_parse_and_evaluate_chain", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box(&expr)))
    });

    group.bench_function("mathline_evaluate_chain", |b| {
        b.iter_batched(
            || evaluator.parse_expression(&expr).unwrap(),
            |ast| evaluator.evaluate(&ast),
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let evaluator = Evaluator::default();
    let lines: Vec<String> = (0..1_000)
        .map(|i| format!("({} + 1) * 2 ^ ({} % 7) - exp({} / 1000)", i, i, i))
        .collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

    group.bench_function("sequential", |b| {
        b.iter(|| {
            lines
                .iter()
                .map(|line| evaluator.evaluate_expression(line))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("parallel", |b| {
        b.iter(|| evaluator.evaluate_batch(black_box(&lines)))
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_function_calls,
    benchmark_long_chain,
    benchmark_batch
);
criterion_main!(benches);
