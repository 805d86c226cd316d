//! Command-line interface for fieldmark
//!
//! Usage:
//!   fieldmark parse `<path>` [--format `<format>`]   - Parse a file into a document tree
//!   fieldmark tokens `<path>` [--format `<format>`]  - Print the token stream for a file

use clap::{Arg, Command};
use fieldmark::fieldmark::processor::{self, OutputFormat, Processor, TokenFormat};

fn main() {
    let matches = Command::new("fieldmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and parsing fieldmark files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a file into a document tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to parse")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json', 'yaml', 'tree')")
                        .default_value("tree"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Tokenize a file and print the token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json', 'debug')")
                        .default_value("debug"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(path, format);
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn handle_parse_command(path: &str, format: &str) {
    let result = OutputFormat::from_string(format)
        .and_then(|format| {
            let processor = Processor::new()?;
            processor.render_file(path, format)
        });
    match result {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn handle_tokens_command(path: &str, format: &str) {
    let result = TokenFormat::from_string(format)
        .and_then(|format| processor::render_tokens_file(path, format));
    match result {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
