/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Dashboard commands run against the content backend with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
[UPDATE]: 2026-10-07 Optional file logging through a non-blocking appender
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use creator_dashboard::{ConsoleSurface, DashboardConfig, TaskController};

const APP_DIR: &str = "creator-dashboard";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_level, args.log_file.as_deref())?;

    if let Some(Command::Init { output }) = &args.command {
        return cli::init::run_init(output.clone());
    }

    let config_path = resolve_config_path(args.config_path.as_deref());
    info!(
        config_path = ?config_path.as_ref().map(|path| path.display().to_string()),
        dry_run = args.dry_run,
        "starting creator-dashboard"
    );

    let mut config = DashboardConfig::load(config_path.as_deref()).context("load config")?;
    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url;
    }
    config.validate().context("validate config")?;
    info!(base_url = %config.backend.base_url, "configuration loaded");

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let client = config.build_client()?;
    let controller = TaskController::new(
        Arc::new(client),
        Arc::new(ConsoleSurface::new()),
        config.controller.clone(),
    )
    .with_history_limit(config.history_limit);

    setup_signal_handlers(controller.shutdown_token());

    let result = cli::commands::run(&controller, command).await;
    controller.shutdown();
    result
}

fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().context("log file path must name a file")?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}

/// Explicit path, else `<config dir>/creator-dashboard/config.yaml` when it exists
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
