//! Parses its own command line with a small set of flags and options.
//!
//! ```text
//! cmd-parser-demo -gvv --scale 1.5 -l20 -w 1 -w 2 input.txt
//! cmd-parser-demo --help
//! ```

use cmd_parser_core::{CmdParser, OptionDef};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut parser = CmdParser::new();
    parser
        .add_flag(("--gzip", "-g"), "use gzip")
        .add_flag(("-v", "--verbose"), "")
        .add_option_def(
            OptionDef::<i32>::new(("-l", "--len"))
                .with_description("option with default value and checker")
                .with_default(10)
                .with_checker(|len| *len >= 0),
        )
        .add_option_def(
            OptionDef::<i32>::new(("-n", "--num"))
                .with_description("option with default value")
                .with_default(0),
        )
        .add_option_def(
            OptionDef::<f64>::new("--scale")
                .with_description("option with checker")
                .required()
                .with_checker(|scale| *scale >= 0.0),
        )
        .add_option::<i32>(("-w", "--weight"), "option without default value and checker", false);

    // `--help, -h` is registered by the parse call itself.
    parser.parse_check_env();

    println!("Rest:");
    for arg in parser.rest() {
        println!("{arg}");
    }

    if let Some(scale) = parser.value_of::<f64>("--scale") {
        println!("Scale: {scale}");
    }
    println!("Len: {}", parser.value_of::<i32>("--len").unwrap_or(0));
    println!("Num: {}", parser.value_of::<i32>("-n").unwrap_or(0));

    if let Some(weights) = parser.all_values_of::<i32>("-w") {
        let weights: Vec<String> = weights.iter().map(ToString::to_string).collect();
        println!("Weight: {}", weights.join(" "));
    }

    if let Some(count) = parser.flag_count("--gzip") {
        println!("gzip count: {count}");
    }
    if let Some(count) = parser.flag_count("--verbose") {
        println!("verbose count: {count}");
    }
}
