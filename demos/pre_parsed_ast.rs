use mathline::ast::{Evaluator, EvaluatorConfig};
use mathline::functions::{Function, FunctionTable};
use std::sync::Arc;

fn main() {
    pretty_env_logger::init();

    // Start from the builtins and add a couple of domain functions.
    let mut functions = (*FunctionTable::builtin()).clone();
    functions.register_function("clamp", Function::new(3, |args| args[0].clamp(args[1], args[2])));
    functions.register_function("lerp", Function::new(3, |args| args[0] + (args[1] - args[0]) * args[2]));
    functions.register_alias("mix", "lerp");

    let evaluator = Evaluator::with_functions(Arc::new(functions), EvaluatorConfig::default());

    let ast = evaluator
        .parse_expression("clamp(mix(0, 10, 0.25) * 3, -5, 5)")
        .expect("Failed to parse");
    println!("Parsed: {}", ast);

    for _ in 0..3 {
        match evaluator.evaluate(&ast) {
            Ok(result) => println!("Result: {}", result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
