use super::{Cli, Commands, OutputFormat};
use clap::{CommandFactory, Parser};
use std::path::Path;

#[test]
fn cli_help_includes_required_top_level_commands() {
    let mut command = Cli::command();
    let help = command.render_long_help().to_string();
    for name in ["parse", "check", "save", "evaluate", "list", "remove"] {
        assert!(help.contains(name), "help must mention {name}");
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parses_save() {
    let cli = Cli::try_parse_from([
        "expreval-runner",
        "save",
        "--name",
        "adults",
        "--value",
        "customer.age > 17",
    ])
    .expect("save must parse");
    match cli.command {
        Commands::Save(command) => {
            assert_eq!(command.name, "adults");
            assert_eq!(command.value, "customer.age > 17");
        }
        _ => panic!("expected save"),
    }
    assert_eq!(cli.format, OutputFormat::Text);
}

#[test]
fn cli_parses_evaluate_with_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "expreval-runner",
        "evaluate",
        "--id",
        "3",
        "--data",
        "doc.json",
        "--store",
        "store.json",
        "--format",
        "json",
    ])
    .expect("evaluate must parse");
    assert_eq!(cli.store.as_deref(), Some(Path::new("store.json")));
    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::Evaluate(command) => {
            assert_eq!(command.id, 3);
            assert_eq!(command.document.data.as_deref(), Some(Path::new("doc.json")));
            assert!(command.document.json.is_none());
        }
        _ => panic!("expected evaluate"),
    }
}

#[test]
fn cli_requires_exactly_one_document_source() {
    assert!(Cli::try_parse_from(["expreval-runner", "check", "--expr", "flag"]).is_err());
    assert!(Cli::try_parse_from([
        "expreval-runner",
        "check",
        "--expr",
        "flag",
        "--json",
        "{}",
        "--data",
        "doc.json",
    ])
    .is_err());
    assert!(Cli::try_parse_from(["expreval-runner", "check", "--expr", "flag", "--json", "{}"]).is_ok());
}

#[test]
fn cli_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["expreval-runner", "remove", "--id", "abc"]).is_err());
}
