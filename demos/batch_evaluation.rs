use mathline::ast::{Evaluator, EvaluatorConfig};

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(EvaluatorConfig {
        trace: true,
        ..EvaluatorConfig::default()
    });

    let expressions = [
        "1 + 2 * 3",
        "2 ^ 3 ^ 2",
        "10 % 4",
        "1 / 0",
        "hypot(3, 4)",
        "sqrt(-1)",
        "math.Abs(-7.5)",
        "(1",
        "nope(1)",
    ];

    for (expression, result) in expressions
        .iter()
        .zip(evaluator.evaluate_batch(&expressions))
    {
        match result {
            Ok(value) => println!("{:<16} => {}", expression, value),
            Err(err) => println!("{:<16} => error: {}", expression, err),
        }
    }
}
