//! Command-line interface for rift
//! Runs expressions through the four governance-driven stages and prints what they produce.
//!
//! Usage:
//!   rift run `<expr>` [--format `<format>`] [--governance `<dir>`] [--strict]  - Run every stage
//!   rift tokens `<expr>` [--governance `<dir>`]                               - Print the token stream
//!   rift stages [--governance `<dir>`]                                        - List stage governance
//!
//! Diagnostics go to stderr (`RUST_LOG` or `--verbose`); stdout only carries results.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rift::rift::governance::GovernanceStore;
use rift::rift::pipeline::{ExecutionOptions, PipelineExecutor};
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn governance_arg() -> Arg {
    Arg::new("governance")
        .long("governance")
        .short('g')
        .value_name("DIR")
        .help("Directory with riftrc.N.yaml files overriding the built-in governance")
}

fn expression_arg() -> Arg {
    Arg::new("expr")
        .help("Expression to process, e.g. \"x + 2 * y\"")
        .required(true)
        .index(1)
}

fn main() {
    let matches = Command::new("rift")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A governance-configured expression front end")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log stage diagnostics to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run an expression through all four stages")
                .arg(expression_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (defaults to the governance primary_format)"),
                )
                .arg(governance_arg())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail if the expression leaves tokens unconsumed")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of an expression")
                .arg(expression_arg())
                .arg(governance_arg()),
        )
        .subcommand(
            Command::new("stages")
                .about("List the governance of every stage")
                .arg(governance_arg()),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    // Handle subcommands
    match matches.subcommand() {
        Some(("run", run_matches)) => handle_run_command(run_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("stages", stages_matches)) => handle_stages_command(stages_matches),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}

fn load_governance(matches: &ArgMatches) -> GovernanceStore {
    let loaded = match matches.get_one::<String>("governance") {
        Some(dir) => GovernanceStore::load_dir(Path::new(dir)),
        None => GovernanceStore::with_defaults(),
    };
    loaded.unwrap_or_else(|e| fail("Governance error", e))
}

/// Handle the run command
fn handle_run_command(matches: &ArgMatches) {
    let expr = matches.get_one::<String>("expr").unwrap();
    let options = ExecutionOptions {
        format: matches.get_one::<String>("format").cloned(),
        strict: matches.get_flag("strict"),
    };

    let executor = PipelineExecutor::with_governance(load_governance(matches));
    let output = executor
        .execute_with(expr, &options)
        .unwrap_or_else(|e| fail("Execution error", e));

    print!("{}", output.rendered);
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let expr = matches.get_one::<String>("expr").unwrap();
    let executor = PipelineExecutor::with_governance(load_governance(matches));
    let tokens = executor
        .tokenize(expr)
        .unwrap_or_else(|e| fail("Execution error", e));

    for token in &tokens {
        println!(
            "{} {} {} {}",
            token.column, token.kind, token.value, token.priority
        );
    }
}

/// Handle the stages command
fn handle_stages_command(matches: &ArgMatches) {
    let governance = load_governance(matches);
    for config in governance.stages() {
        println!(
            "{} {} ({}) version {}",
            config.stage, config.stage_name, config.sp_alignment, config.governance_version
        );
        for section in config.section_names() {
            println!("  {}", section);
            for (key, value) in config.section(section) {
                println!("    {} = {}", key, value);
            }
        }
    }
}
