//! # snyk-test-frequency
//!
//! A CLI tool for bulk-updating the recurring test frequency of Snyk projects.
//!
//! The tool lists every project of an organization through the Snyk REST API,
//! keeps those whose type belongs to the selected category, and sets the
//! requested test frequency on each of them, one request at a time.
//!
//! ## Features
//!
//! - Category filters for open source, IaC and container projects, or all
//! - Explicit project type lists (`--types npm,maven`)
//! - Token and org ID from flags, environment, config file or prompt
//! - Dry-run mode for safe previewing
//! - Interactive project selection
//! - JSON report for scripting
//! - Persistent configuration via `~/.config/snyk-test-frequency/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Set every open source project to weekly
//! SNYK_TOKEN=... snyk-test-frequency --sca --org-id <ORG> --frequency weekly
//!
//! # Preview which container projects would change
//! snyk-test-frequency --container --dry-run
//!
//! # Disable recurring tests for Terraform and Helm projects only
//! snyk-test-frequency --types terraformconfig,helmconfig -f never
//! ```

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use snyk_test_frequency::{
    api::SnykClient,
    config::{Credentials, FileConfig, TestFrequency, resolve_frequency},
    output::{JsonOutput, RunContext},
    updater::{UpdateResult, Updater},
};
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// Entry point for the snyk-test-frequency application.
///
/// Errors are printed to stderr and turn into a non-zero exit status.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red());

        exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "snyk_test_frequency=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file.
///
/// An explicit `--config` file must load. Problems with the default file only
/// produce a warning and fall back to an empty configuration.
fn load_file_config(args: &Cli, json_mode: bool) -> Result<FileConfig> {
    if let Some(path) = args.config_path() {
        return FileConfig::load_from(path);
    }

    Ok(FileConfig::load().unwrap_or_else(|e| {
        if !json_mode {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
        }
        FileConfig::default()
    }))
}

/// Main application logic that can return errors.
///
/// This function:
/// 1. Parses command-line arguments and validates the project filter
/// 2. Loads the persistent configuration file (if present)
/// 3. Resolves the credentials and target frequency, prompting if needed
/// 4. Lists the organization's projects and keeps the matching ones
/// 5. Either performs a dry run, an interactive selection, or the update
/// 6. If `--json` is active, emits a single JSON document to stdout
///
/// # Errors
///
/// Invalid options, prompt failures, authentication failures and a failed
/// project listing are fatal. Individual update failures are not: they are
/// reported in the summary. A run aborted mid-way still prints the summary
/// (or JSON report) of what was done before returning the error.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose());

    let json_mode = args.json();
    let project_filter = args.project_filter()?;

    // --json is incompatible with --interactive
    if json_mode && args.interactive() {
        bail!("--json and --interactive cannot be used together");
    }

    let file_config = load_file_config(&args, json_mode)?;

    if !json_mode {
        println!("{}", "Snyk Project Test Frequency Updater".bold());
        println!("{}\n", "=".repeat(35));
    }

    let credentials = Credentials::resolve(
        args.token(),
        args.org_id(),
        &file_config,
        args.allow_prompt(),
    )?;
    let frequency = resolve_frequency(args.frequency(), &file_config, args.allow_prompt())?;
    let execution_options = args.execution_options(frequency);

    tracing::debug!(
        org_id = %credentials.org_id,
        filter = %project_filter,
        %frequency,
        "resolved run settings"
    );

    if !json_mode {
        println!("Filtering by {} project types.", project_filter.to_string().cyan());

        if frequency == TestFrequency::Daily && project_filter.may_include_weekly_only_types() {
            println!(
                "{}",
                "Note: SAST and IaC projects can only be set to weekly or never. Contact your account team if you would like to test daily."
                    .yellow()
            );
        }
    }

    let client = SnykClient::new(&args.api_url(&file_config), credentials.token.clone())?
        .with_request_delay(args.request_delay(&file_config));
    let updater = Updater::new(&client).with_quiet(json_mode);

    if !json_mode {
        println!(
            "\nFetching projects for Organization ID: {}...",
            credentials.org_id.bright_white()
        );
    }

    let projects = updater
        .fetch_matching(&credentials.org_id, &project_filter)
        .context("Failed to retrieve projects")?;

    let context = RunContext {
        org_id: &credentials.org_id,
        filter: &project_filter,
        frequency,
    };

    if projects.is_empty() {
        if json_mode {
            let mut output = JsonOutput::from_result(context, &UpdateResult::default());
            output.dry_run = execution_options.dry_run;
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", "✨ No matching projects found. Nothing to update.".green());
        }
        return Ok(());
    }

    if !json_mode {
        println!("\n{}", "📊 Found projects:".bold());
        projects.print_summary();
    }

    let projects = if execution_options.interactive {
        let selected = projects.interactive_selection()?;

        if selected.is_empty() {
            println!("{}", "✨ No projects selected for update!".green());
            return Ok(());
        }

        selected
    } else {
        projects
    };

    if execution_options.dry_run {
        if json_mode {
            let output = JsonOutput::from_dry_run(context, &projects);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
            projects.print_list();
            println!(
                "\n{} {}",
                "🧪 Dry run complete!".yellow(),
                format!("Would set {} projects to {frequency}", projects.len()).bright_white()
            );
        }
        return Ok(());
    }

    match updater.update_projects(&credentials.org_id, projects, &execution_options) {
        Ok(result) => {
            if json_mode {
                let output = JsonOutput::from_result(context, &result);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                result.print_summary();
            }

            Ok(())
        }
        Err(aborted) => {
            // Some projects may already be changed: report them before failing.
            if json_mode {
                let output = JsonOutput::from_aborted(context, &aborted);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                aborted.result.print_summary();
            }

            Err(aborted.into())
        }
    }
}
