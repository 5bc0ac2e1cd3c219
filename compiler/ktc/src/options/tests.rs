use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn parse(list: &[&str]) -> Result<Options, CliError> {
    Options::parse_with(&args(list), ParserConfig::default())
}

#[test]
fn defaults() {
    let Ok(options) = parse(&["Foo.kt"]) else {
        panic!("a bare path should parse");
    };
    assert_eq!(
        options,
        Options {
            path: "Foo.kt".to_string(),
            entry: EntryPoint::Statements,
            config: ParserConfig::default(),
            color: ColorMode::Auto,
        }
    );
}

#[test]
fn flags_override_config() {
    let Ok(options) = parse(&[
        "--entry=expression",
        "Foo.kt",
        "--lazy",
        "--max-depth=64",
        "--color=never",
    ]) else {
        panic!("valid flags should parse");
    };
    assert_eq!(options.entry, EntryPoint::Expression);
    assert!(options.config.lazy);
    assert_eq!(options.config.max_nesting_depth, 64);
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn every_entry_point_name_is_accepted() {
    for entry in EntryPoint::ALL {
        let flag = format!("--entry={entry}");
        let Ok(options) = parse(&[&flag, "a.kt"]) else {
            panic!("{flag} should parse");
        };
        assert_eq!(options.entry, *entry);
    }
}

#[test]
fn rejected_arguments() {
    assert!(matches!(parse(&[]), Err(CliError::MissingPath)));
    assert!(matches!(
        parse(&["a.kt", "b.kt"]),
        Err(CliError::UnexpectedArgument(arg)) if arg == "b.kt"
    ));
    assert!(matches!(
        parse(&["a.kt", "--fast"]),
        Err(CliError::UnknownOption(arg)) if arg == "--fast"
    ));
    assert!(matches!(
        parse(&["a.kt", "--entry=file"]),
        Err(CliError::InvalidValue { option: "--entry", .. })
    ));
    assert!(matches!(
        parse(&["a.kt", "--max-depth=0"]),
        Err(CliError::InvalidValue { option: "--max-depth", .. })
    ));
    assert!(matches!(
        parse(&["a.kt", "--color=sometimes"]),
        Err(CliError::InvalidValue { option: "--color", .. })
    ));
}

#[test]
fn error_messages() {
    let Err(error) = parse(&["a.kt", "--max-depth=deep"]) else {
        panic!("a non-numeric depth should be rejected");
    };
    assert!(error
        .to_string()
        .starts_with("invalid value 'deep' for --max-depth:"));
}
