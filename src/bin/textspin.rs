//! Command-line interface for textspin
//! This binary spins spintax templates and checks them for problems.
//!
//! Usage:
//!   textspin spin `<template>` [-p name=value]... [-n `<count>`] [--raw] [--seed `<n>`]
//!   textspin validate `<template>` [--placeholders-check] [--strict]
//!   textspin audit `<template>` [-p name=value]...
//!
//! Instead of a positional template, `--file` reads the template from a file and
//! `--document` reads a JSON/YAML document holding template, placeholders and markers.
//! `--config <file>` and `--set key=value` layer settings over the built-in defaults.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use textspin::settings::{Loader, SpinConfig};
use textspin::{PlaceholderTable, SpinDocument, SpinError, Spinner};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("textspin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand spintax templates into randomized text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .global(true)
                .action(ArgAction::Append)
                .value_parser(parse_assignment)
                .help("Override one configuration key as key=value, e.g. markers.open=["),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log engine activity to stderr"),
        )
        .subcommand(
            input_args(Command::new("spin").about("Produce one or more samples of a template"))
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .value_parser(value_parser!(usize))
                        .help("Number of samples (default from config)"),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Leave placeholder references unsubstituted"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed the random source for reproducible output"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            input_args(Command::new("validate").about("Check that a template is well-formed"))
                .arg(
                    Arg::new("placeholders-check")
                        .long("placeholders-check")
                        .action(ArgAction::SetTrue)
                        .help("Also require every referenced placeholder to be valid"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Also require every close marker to follow a matching open"),
                ),
        )
        .subcommand(
            input_args(Command::new("audit").about("List placeholder references that cannot be substituted"))
                .arg(format_arg()),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let overrides: Vec<(String, String)> = matches
        .get_many::<(String, String)>("set")
        .map(|pairs| pairs.cloned().collect())
        .unwrap_or_default();
    let config = load_config(matches.get_one::<String>("config"), &overrides);

    match matches.subcommand() {
        Some(("spin", spin_matches)) => handle_spin_command(spin_matches, &config),
        Some(("validate", validate_matches)) => handle_validate_command(validate_matches, &config),
        Some(("audit", audit_matches)) => handle_audit_command(audit_matches, &config),
        _ => unreachable!(),
    }
}

/// Arguments shared by every subcommand that reads a template.
fn input_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("template")
                .help("Spintax template text")
                .index(1)
                .conflicts_with_all(["file", "document"]),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Read the template from a file")
                .conflicts_with("document"),
        )
        .arg(
            Arg::new("document")
                .long("document")
                .short('d')
                .help("Read template, placeholders and markers from a JSON or YAML document"),
        )
        .arg(
            Arg::new("placeholder")
                .long("placeholder")
                .short('p')
                .action(ArgAction::Append)
                .value_parser(parse_assignment)
                .help("Placeholder value as name=value (repeatable)"),
        )
        .arg(
            Arg::new("placeholders")
                .long("placeholders")
                .help("JSON or YAML file with an object of placeholder values"),
        )
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Output format")
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "textspin=debug" } else { "textspin=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(message: impl fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(path: Option<&String>, overrides: &[(String, String)]) -> SpinConfig {
    let mut loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    for (key, value) in overrides {
        loader = loader
            .set_override(key, value.as_str())
            .unwrap_or_else(|e| fail(format!("applying --set {}: {}", key, e)));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("loading configuration: {}", e)))
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_placeholder_file(path: &str) -> PlaceholderTable {
    let source = read_file(path);
    let parsed: Result<Value, String> = if is_yaml(path) {
        serde_yaml::from_str(&source).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&source).map_err(|e| e.to_string())
    };
    let value = parsed.unwrap_or_else(|e| fail(format!("parsing {}: {}", path, e)));
    PlaceholderTable::from_json_value(&value).unwrap_or_else(|e| fail(format!("{}: {}", path, e)))
}

fn build_spinner(matches: &ArgMatches, config: &SpinConfig) -> Result<Spinner, SpinError> {
    let document = match matches.get_one::<String>("document") {
        Some(path) => {
            let source = read_file(path);
            if is_yaml(path) {
                SpinDocument::from_yaml_str(&source)?
            } else {
                SpinDocument::from_json_str(&source)?
            }
        }
        None => {
            let template = match (
                matches.get_one::<String>("template"),
                matches.get_one::<String>("file"),
            ) {
                (Some(template), _) => template.clone(),
                (None, Some(path)) => read_file(path),
                (None, None) => fail("no template given (pass it inline, with --file or --document)"),
            };
            SpinDocument {
                template,
                placeholders: PlaceholderTable::new(),
                markers: None,
            }
        }
    };

    let markers = match document.markers {
        Some(markers) => markers,
        None => config.marker_set()?,
    };

    let mut placeholders = document.placeholders;
    if let Some(path) = matches.get_one::<String>("placeholders") {
        for (name, value) in read_placeholder_file(path).iter() {
            placeholders.insert(name, value);
        }
    }
    if let Some(pairs) = matches.get_many::<(String, String)>("placeholder") {
        for (name, value) in pairs {
            placeholders.insert(name.as_str(), value.as_str());
        }
    }

    Ok(Spinner::from_parts(document.template, placeholders, markers))
}

fn handle_spin_command(matches: &ArgMatches, config: &SpinConfig) {
    let spinner = build_spinner(matches, config).unwrap_or_else(|e| fail(e));
    let mut spinner = match matches.get_one::<u64>("seed") {
        Some(&seed) => spinner.with_rng(StdRng::seed_from_u64(seed)),
        None => spinner,
    };

    let count = matches
        .get_one::<usize>("count")
        .copied()
        .unwrap_or(config.spin.count);
    let substitute = config.spin.substitute && !matches.get_flag("raw");

    let outputs = spinner
        .spin_many(count, substitute)
        .unwrap_or_else(|e| fail(e));

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let json = serde_json::to_string_pretty(&outputs).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        _ => {
            for output in outputs {
                println!("{}", output);
            }
        }
    }
}

fn handle_validate_command(matches: &ArgMatches, config: &SpinConfig) {
    let spinner = build_spinner(matches, config).unwrap_or_else(|e| fail(e));
    let check_placeholders =
        config.spin.check_placeholders || matches.get_flag("placeholders-check");
    let strict = config.spin.strict || matches.get_flag("strict");

    if !spinner.validate(check_placeholders) {
        println!("invalid");
        std::process::exit(1);
    }
    if strict {
        if let Err(e) = spinner.check_structure() {
            println!("invalid: {}", e);
            std::process::exit(1);
        }
    }
    println!("valid");
}

fn handle_audit_command(matches: &ArgMatches, config: &SpinConfig) {
    let spinner = build_spinner(matches, config).unwrap_or_else(|e| fail(e));
    let invalid = spinner.find_invalid_placeholders();

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let json = serde_json::to_string_pretty(&invalid).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        _ => {
            for name in &invalid {
                println!("{}", name);
            }
        }
    }

    if !invalid.is_empty() {
        std::process::exit(1);
    }
}
