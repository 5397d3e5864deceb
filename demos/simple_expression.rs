use mathline::ast::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::default();

    let expression = "(2 + 3) * 4 - math.Log(exp(2)) ^ 2";
    match evaluator.evaluate_expression(expression) {
        Ok(result) => println!("{} = {}", expression, result),
        Err(err) => println!("Error: {}", err),
    }

    match evaluator.evaluate_expression("log(2, 8)") {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error ({} stage): {}", err.stage(), err),
    }
}
