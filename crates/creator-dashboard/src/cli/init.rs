/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When DashboardConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use creator_dashboard::config::{BackendConfig, ControllerConfig, DEFAULT_HISTORY_LIMIT};
use creator_dashboard::DashboardConfig;
use creator_dashboard_adapter::ContentType;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Creator Dashboard Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new dashboard configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = DashboardConfig::default();

    println!("\n{}", style("--- Backend ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Backend base URL")
        .default(defaults.backend.base_url.clone())
        .interact_text()?;

    let connect_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Connect timeout (seconds)")
        .default(defaults.backend.connect_timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Tasks ---").bold());
    let content_types: Vec<&str> = ContentType::ALL.iter().map(|kind| kind.as_str()).collect();
    let type_selection = Select::with_theme(&theme)
        .with_prompt("Default content type")
        .items(&content_types)
        .default(0)
        .interact()?;
    let default_content_type = ContentType::ALL[type_selection];

    let batch_throttle_ms: u64 = Input::with_theme(&theme)
        .with_prompt("Delay between batch launches (ms)")
        .default(defaults.controller.batch_throttle_ms)
        .interact_text()?;

    let cancel_superseded = Confirm::with_theme(&theme)
        .with_prompt("Cancel a running task when a newer one replaces its card?")
        .default(false)
        .interact()?;

    let history_limit: u32 = Input::with_theme(&theme)
        .with_prompt("History records to load")
        .default(DEFAULT_HISTORY_LIMIT)
        .interact_text()?;

    let config = DashboardConfig {
        backend: BackendConfig {
            base_url,
            connect_timeout_secs,
            request_timeout_secs: None,
        },
        controller: ControllerConfig {
            batch_throttle_ms,
            cancel_superseded,
            default_content_type,
            ..defaults.controller
        },
        history_limit,
    };
    config.validate().context("configuration is not usable")?;

    let yaml = config.to_yaml()?;

    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Configuration written to: {}", style(output.display()).cyan());

    Ok(())
}
