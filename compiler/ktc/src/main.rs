//! Kotlin parser CLI.

use ktc::commands::{check_file, explain, lex_file, parse_file};
use ktc::{CliError, Options};

fn main() {
    ktc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let result = match command.as_str() {
        "lex" => match &args[2..] {
            [path] => lex_file(path),
            [] => Err(CliError::MissingPath),
            [_, extra, ..] => Err(CliError::UnexpectedArgument(extra.clone())),
        },
        "parse" => Options::parse(&args[2..]).and_then(|options| parse_file(&options)),
        "check" => Options::parse(&args[2..]).and_then(|options| check_file(&options)),
        "explain" | "--explain" => match &args[2..] {
            [] => explain(None),
            [code] => explain(Some(code.as_str())),
            [_, extra, ..] => Err(CliError::UnexpectedArgument(extra.clone())),
        },
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("ktc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => Err(CliError::UnknownCommand(command.clone())),
    };

    match result {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(error) => {
            eprintln!("error: {error}");
            if matches!(error, CliError::UnknownCommand(_)) {
                eprintln!();
                print_usage();
            }
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("Kotlin parser driver");
    println!();
    println!("Usage: ktc <command> <file.kt> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>       Print the token stream");
    println!("  parse <file>     Print the syntax tree and any diagnostics");
    println!("  check <file>     Print diagnostics only (exit 1 on syntax errors)");
    println!("  explain [code]   Describe an error code, or list them all");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Parse/check options:");
    println!("  --entry=<name>      statements (default), script, expression, block,");
    println!("                      lambda, arguments, contract");
    println!("  --lazy              Leave lambda bodies unparsed");
    println!("  --max-depth=<n>     Expression nesting limit (default 2048)");
    println!("  --color=<mode>      auto (default), always, never");
    println!();
    println!("Environment:");
    println!("  KTC_LAZY, KTC_MAX_DEPTH   Parser defaults, overridden by flags");
    println!("  KTC_LOG (or RUST_LOG)     Tracing filter, e.g. kt_parse=debug");
}
