//! Cross-checks against `meval` on the subset of the notation both crates
//! read the same way: non-negative literals, `+ - * / ^`, grouping and a few
//! shared unary functions.

use mathline::parse_and_eval;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FUNCTIONS: [&str; 3] = ["exp", "abs", "sqrt"];
const OPERATORS: [&str; 5] = ["+", "-", "*", "/", "^"];

fn literal(rng: &mut StdRng) -> String {
    if rng.random_bool(0.5) {
        rng.random_range(0u32..20).to_string()
    } else {
        format!("{}.{}", rng.random_range(0u32..10), rng.random_range(0u32..100))
    }
}

fn expression(rng: &mut StdRng, depth: usize) -> String {
    if depth == 0 {
        return literal(rng);
    }
    match rng.random_range(0..4) {
        0 => literal(rng),
        1 => format!("({})", expression(rng, depth - 1)),
        2 => format!(
            "{}({})",
            FUNCTIONS[rng.random_range(0..FUNCTIONS.len())],
            expression(rng, depth - 1)
        ),
        _ => format!(
            "{} {} {}",
            expression(rng, depth - 1),
            OPERATORS[rng.random_range(0..OPERATORS.len())],
            expression(rng, depth - 1)
        ),
    }
}

fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
}

#[test]
fn test_agrees_with_meval() {
    let mut rng = StdRng::seed_from_u64(0x6d61_7468);
    for _ in 0..2_000 {
        let input = expression(&mut rng, 4);
        let ours = parse_and_eval(&input).unwrap();
        let theirs = meval::eval_str(&input).unwrap();
        assert!(
            same_value(ours, theirs),
            "{} => mathline {} vs meval {}",
            input,
            ours,
            theirs
        );
    }
}

#[test]
fn test_power_associativity_agrees_with_meval() {
    for input in ["2 ^ 3 ^ 2", "2 ^ 0.5 ^ 2", "(2 ^ 3) ^ 2", "1 + 2 * 3 ^ 2 / 4 - 5"] {
        assert_eq!(
            parse_and_eval(input).unwrap(),
            meval::eval_str(input).unwrap(),
            "{}",
            input
        );
    }
}
