use clap::builder::RangedU64ValueParser;
use clap::Parser;
use log::LevelFilter;
use mathline::ast::{Evaluator, EvaluatorConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use mathline::shell::{self, DEFAULT_PROMPT};
use std::io;
use std::process::ExitCode;

/// mathline evaluates arithmetic expressions such as `2 ^ 10 - math.Log(8)`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log every node visited during evaluation.
    #[arg(long)]
    trace: bool,

    /// Deepest nesting of parentheses, calls and operators accepted.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DEPTH_LIMIT as u64)
    )]
    max_depth: usize,

    /// Prompt printed before each line in interactive mode.
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Evaluate this expression once and exit instead of reading lines.
    expression: Option<String>,
}

fn init_logger(trace: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) if trace => {
            builder.filter_level(LevelFilter::Trace);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Warn);
        }
    }
    // A logger may already be installed when embedded; that's fine.
    let _ = builder.try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.trace);

    let evaluator = Evaluator::new(EvaluatorConfig {
        trace: args.trace,
        max_depth: args.max_depth,
    });

    if let Some(expression) = args.expression {
        return match evaluator.evaluate_expression(&expression) {
            Ok(value) => {
                println!("{}", value);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = shell::run(&evaluator, stdin.lock(), stdout.lock(), &args.prompt) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
