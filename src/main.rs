//! Treepick CLI - interactive tree picker
//!
//! Usage: treepick [DIR] [--tree FILE] [-m]
//!
//! Browses DIR (or the items of a tree file) and prints the chosen value as
//! JSON on stdout. Exits with status 130 when the prompt is cancelled.

mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use treepick::sources::{self, ListerOptions};
use treepick::ui::{self, CursorGuard, KeyboardSource, TerminalScreen, Theme};
use treepick::{config, PickerError, TreePrompt};

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let (config, warnings) = config::load_or_default(cli.config.as_deref())?;
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    let mut config = cli.apply(config);

    let caps = ui::detect_capabilities();
    if !caps.is_tty {
        anyhow::bail!("treepick needs an interactive terminal on stderr");
    }
    let theme = Theme::from_settings(&caps, config.output.color, config.output.unicode);

    let builder = match &cli.tree {
        Some(path) => {
            let file = sources::load_tree_file(path)?;
            if let (Some(message), None) = (file.message, &cli.message) {
                config.message = message;
            }
            TreePrompt::builder(file.items)
        }
        None => {
            let dir = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let dir = std::fs::canonicalize(&dir)
                .with_context(|| format!("Cannot open directory {}", dir.display()))?;
            config.root_directory = Some(dir.clone());

            let options = ListerOptions {
                directories_only: cli.dirs_only,
            };
            let builder = TreePrompt::builder(sources::directory_lister(dir, options));
            if cli.allow_hidden {
                builder
            } else {
                builder.validate_with(|value, _| !sources::is_dotfile(value))
            }
        }
    };
    let mut prompt = builder.config(config).theme(theme).build();

    let outcome = {
        let _guard = CursorGuard::acquire()?;
        let mut screen = TerminalScreen::stderr();
        prompt.run(&mut KeyboardSource, &mut screen).await
    };

    match outcome {
        Ok(answer) => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer(&mut stdout, &answer)?;
            writeln!(stdout)?;
            Ok(())
        }
        Err(PickerError::Cancelled) => std::process::exit(130),
        Err(err) => Err(err.into()),
    }
}

/// Logs go to `--log-file`, or to stderr when RUST_LOG is set; never to stdout.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "treepick=debug".into()))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}
