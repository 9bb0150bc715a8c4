//! Gallery Viewer - Browse a sensenet image library from the terminal
//!
//! Loads the image library once on start, then lets the user page through
//! the grid and the full-screen detail view with simple commands.

mod commands;
mod config;
mod error;
mod gallery;
mod logging;
mod repository;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use commands::{Command, Outcome};
use config::Settings;
use error::GalleryError;
use gallery::GallerySession;
use repository::RepositoryClient;

const USAGE: &str = "\
Usage: gallery-viewer [OPTIONS]

Options:
  --repository <URL>   repository base URL
  --library <PATH>     image library path
  --config <FILE>      settings file
  --verbose            debug logging
  -h, --help           print this help";

/// Command line arguments
struct Args {
    repository: Option<String>,
    library: Option<String>,
    config: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let parsed = Args {
        help: args.contains(["-h", "--help"]),
        verbose: args.contains("--verbose"),
        repository: args.opt_value_from_str("--repository")?,
        library: args.opt_value_from_str("--library")?,
        config: args.opt_value_from_str("--config")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {:?}", rest),
        });
    }
    Ok(parsed)
}

/// Defaults, then settings file, then environment, then flags
fn resolve_settings(args: &Args) -> Result<Settings, GalleryError> {
    let file = args.config.clone().or_else(Settings::default_file);
    let mut settings = Settings::load(file.as_deref())?;
    settings.apply_env(|key| std::env::var(key).ok());
    settings.apply_overrides(args.repository.clone(), args.library.clone());
    settings.validate()
}

async fn run_shell(session: &mut GallerySession<RepositoryClient>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type 'help' for commands.");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => match commands::execute(session, command).await {
                Outcome::Continue(output) => println!("{}", output),
                Outcome::Quit => break,
            },
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    logging::init(args.verbose);

    log_info!("main", "=== Gallery Viewer Starting ===");
    log_info!("main", "Version: {}", env!("CARGO_PKG_VERSION"));

    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log_error!("main", "{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log_info!("main", "Repository: {}", settings.repository_url);
    log_info!("main", "Library: {}", settings.library_path);

    let client = match RepositoryClient::new(&settings.repository_url) {
        Ok(client) => client,
        Err(e) => {
            log_error!("main", "Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match GallerySession::mount(client, &settings.library_path).await {
        Ok(session) => session,
        Err(e) => {
            log_error!("main", "Failed to mount gallery: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Loading images from {}{}...",
        settings.repository_url, settings.library_path
    );
    session.wait().await;
    println!("{}", commands::render_status(&*session.gallery().await));

    let result = run_shell(&mut session).await;
    session.unmount().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("main", "Failed to read input: {}", e);
            ExitCode::FAILURE
        }
    }
}
