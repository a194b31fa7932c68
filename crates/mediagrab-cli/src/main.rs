//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the context and routes
//! the command to its handler. Handler errors become the process exit code.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mediagrab_cli::handlers::download::DownloadArgs;
use mediagrab_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Log to stderr so progress rendering on stdout stays intact.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(CliConfig {
        config_path: cli.config,
        yt_dlp: cli.yt_dlp,
    })?;

    match command {
        Commands::Download {
            url,
            format,
            quality,
            dir,
        } => {
            let args = DownloadArgs {
                url,
                format,
                quality,
                dir,
            };
            handlers::download::execute(&ctx, args).await?;
        }
        Commands::Info { url } => {
            handlers::info::execute(&ctx, &url).await?;
        }
        Commands::History { limit } => {
            handlers::history::execute(&ctx, limit)?;
        }
        Commands::Config { command } => {
            handlers::config::execute(&ctx, command)?;
        }
        Commands::Open { path } => {
            handlers::open::execute(&ctx, path.as_deref())?;
        }
        Commands::Formats => {
            handlers::formats::execute()?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(CliError::exit_code_for(&err))
        }
    }
}
