//! EmbyIcons options host: entry point.
//!
//! A small command-line host around [`PluginServices`]: it loads the plugin
//! options the same way the media server does and lets an administrator
//! inspect or change them without the settings page.
//!
//! # Usage
//!
//! ```text
//! icons-plugin [--config-dir <DIR>] <COMMAND>
//!
//! Commands:
//!   show              Print the persisted options as JSON
//!   reload            Re-read the document from disk, then print it
//!   path              Print the path of the options document
//!   set KEY=VALUE...  Change one or more options and save them
//!   run-job           Start a job and print its transcript
//! ```
//!
//! `--config-dir` falls back to `ICONS_CONFIG_DIR`, then to the platform
//! default (see [`icons_plugin::paths`]).  Log verbosity follows `RUST_LOG`.
//! Logs go to stderr so stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use icons_plugin::edit::{apply_assignments, Assignment};
use icons_plugin::paths::default_config_dir;
use icons_plugin::{PluginServices, PluginUiOptions};
use icons_store::domain::projection::project;
use icons_store::SaveOutcome;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "icons-plugin",
    about = "Inspect and edit EmbyIcons plugin options",
    version
)]
struct Cli {
    /// Directory holding `EmbyIcons.json`.
    #[arg(long, env = "ICONS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the persisted options as JSON.
    Show,
    /// Re-read the options document, then print it.
    Reload,
    /// Print the path of the options document.
    Path,
    /// Change options, e.g. `set IconSize=20 ShowAudioIcons=false`.
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<Assignment>,
    },
    /// Start an overlay job and print what it would process.
    RunJob {
        /// Library names to check against the library selection.
        #[arg(long = "library", value_name = "NAME")]
        libraries: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => default_config_dir()
            .context("pass --config-dir or set ICONS_CONFIG_DIR")?,
    };
    let services = PluginServices::start(config_dir);
    let store = services.store();

    match cli.command {
        Command::Show => print_options(&store.get_options())?,
        Command::Reload => print_options(&store.reload_options())?,
        Command::Path => println!("{}", store.path().display()),
        Command::Set { assignments } => {
            let updated = apply_assignments(&store.get_options(), &assignments)
                .context("invalid assignment")?;
            match services
                .save_config(updated)
                .with_context(|| format!("failed to save {}", store.path().display()))?
            {
                SaveOutcome::Saved => info!(
                    "{}: saved {}",
                    PluginUiOptions::SAVE_CONFIG.caption,
                    store.path().display()
                ),
                SaveOutcome::Cancelled => warn!("save was cancelled; nothing written"),
            }
            print_options(&store.get_options())?;
        }
        Command::RunJob { libraries } => {
            info!("{}", PluginUiOptions::RUN_JOB.caption);
            let options = services.begin_job();
            plan_job(&services, &options, &libraries);
            println!("{}", services.transcript_as_string());
        }
    }
    Ok(())
}

/// Writes what a job with `options` covers to the transcript.
fn plan_job(services: &PluginServices, options: &PluginUiOptions, libraries: &[String]) {
    let note = |message: String| services.job_note(message);

    if options.show_audio_icons {
        note(format!("Audio icons: {}", options.audio_language_codes().join(", ")));
    }
    if options.show_subtitle_icons {
        note(format!(
            "Subtitle icons: {}",
            options.subtitle_language_codes().join(", ")
        ));
    }
    let selected = options.selected_library_names();
    if selected.is_empty() {
        note("Libraries: all".to_string());
    } else {
        note(format!("Libraries: {}", selected.join(", ")));
    }
    for library in libraries {
        let verdict = if options.includes_library(library) {
            "included"
        } else {
            "skipped"
        };
        note(format!("{library}: {verdict}"));
    }
}

fn print_options(options: &PluginUiOptions) -> anyhow::Result<()> {
    let document = project(options)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
