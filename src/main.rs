//! site-preflight CLI entry point
//!
//! Preflight validation for Hugo sites: configuration, content, and the
//! development toolchain.

use site_preflight::checks::catalog;
use site_preflight::cli::args::{resolve_target, Args, Command, DEFAULT_CONFIG_FILE, DEFAULT_CONTENT_DIR};
use site_preflight::cli::output::{format_catalog, OutputFormatter, TerminalFormatter};
use site_preflight::platform::process::SystemRunner;
use site_preflight::version::get_build_info;
use site_preflight::{run_config_validation, run_content_validation, run_environment_validation, Settings};

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for settings that cannot be loaded
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    match args.command {
        Command::Version => {
            println!("{}", get_build_info());
            return ExitCode::SUCCESS;
        }
        Command::List => {
            print!("{}", format_catalog(&catalog()));
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let color = args.use_color();
    if !color {
        colored::control::set_override(false);
    }

    let repo_root = args.repo_root();
    let run = match &args.command {
        Command::Config { path } => {
            let target = resolve_target(path.as_deref(), &repo_root, DEFAULT_CONFIG_FILE);
            run_config_validation(&target, &settings)
        }
        Command::Content { dir } => {
            let target = resolve_target(dir.as_deref(), &repo_root, DEFAULT_CONTENT_DIR);
            run_content_validation(&target, &settings)
        }
        Command::Env => run_environment_validation(&repo_root, &settings, &SystemRunner),
        Command::Version | Command::List => return ExitCode::SUCCESS,
    };

    let formatter = TerminalFormatter::new(color, args.verbose, args.quiet).with_limits(&settings);
    print!("{}", formatter.format(&run));

    let status = run.status();
    tracing::debug!(status = status.label(), "validation finished");
    ExitCode::from(status.exit_code() as u8)
}

/// Logs go to stderr so the report on stdout stays clean
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    match &args.settings {
        Some(path) => Settings::load(path).context("loading settings"),
        None => Ok(Settings::default()),
    }
}
