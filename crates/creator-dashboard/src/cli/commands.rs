/*
[INPUT]:  Parsed subcommands, TaskController
[OUTPUT]: Console output and process exit status per command
[POS]:    CLI layer - command handlers
[UPDATE]: When adding commands or changing their console output
*/

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use console::style;
use creator_dashboard::settings::{PlatformChange, apply_platform};
use creator_dashboard::{
    HistoryFilter, SelectionState, StartTask, TaskController, TaskHandle, TaskId, TaskStatus,
};
use creator_dashboard_adapter::{ContentType, DashboardSettings};
use dialoguer::{MultiSelect, theme::ColorfulTheme};

use super::{BatchArgs, Command, ConfigCommand, SettingsArgs};

pub async fn run(controller: &TaskController, command: Command) -> Result<()> {
    match command {
        Command::Generate {
            topic,
            content_type,
            retry_id,
        } => generate(controller, topic.join(" "), content_type, retry_id).await,
        Command::Trending { domain, batch } => {
            let mut selection = SelectionState::new();
            controller
                .discover_trending(&domain, &mut selection)
                .await
                .context("fetch trending topics")?;
            batch_from_selection(controller, selection, batch).await
        }
        Command::FromUrl { url, batch } => {
            let mut selection = SelectionState::new();
            controller
                .discover_from_url(&url, &mut selection)
                .await
                .context("extract topics from url")?;
            batch_from_selection(controller, selection, batch).await
        }
        Command::History {
            filter,
            limit,
            show,
        } => history(controller, filter, limit, show).await,
        Command::RetryFailed { date, task_id } => retry_failed(controller, date, task_id).await,
        Command::RetryPublish { task_id } => {
            controller.load_history().await.context("load history")?;
            if !controller.retry_publish_record(&task_id).await? {
                bail!("publishing {task_id} failed");
            }
            Ok(())
        }
        Command::Delete { task_id } => {
            controller.load_history().await.context("load history")?;
            if !controller.delete_record(&task_id).await? {
                bail!("backend refused to delete {task_id}");
            }
            Ok(())
        }
        Command::Config { action } => config(controller, action).await,
        Command::Init { .. } => bail!("init does not talk to the backend"),
    }
}

async fn generate(
    controller: &TaskController,
    topic: String,
    content_type: Option<ContentType>,
    retry_id: Option<String>,
) -> Result<()> {
    let launch = match retry_id {
        Some(id) => StartTask::retry(topic, content_type, TaskId::from(id)),
        None => StartTask::topic(topic, content_type),
    };
    let handle = controller.start_task(launch)?;
    let id = handle.id.clone();
    match handle.wait().await {
        Some(TaskStatus::Succeeded) => Ok(()),
        Some(status) => bail!("task {id} {status}"),
        None => bail!("task {id} cancelled"),
    }
}

async fn batch_from_selection(
    controller: &TaskController,
    mut selection: SelectionState,
    batch: BatchArgs,
) -> Result<()> {
    if selection.topics().is_empty() {
        return Ok(());
    }
    for (index, topic) in selection.topics().iter().enumerate() {
        println!("{:>3}. {}", index + 1, style(&topic.title).bold());
        if !topic.summary.is_empty() {
            println!("     {}", style(&topic.summary).dim());
        }
    }

    if batch.all {
        selection.toggle_all();
    } else if batch.choose {
        let titles: Vec<&str> = selection
            .topics()
            .iter()
            .map(|topic| topic.title.as_str())
            .collect();
        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Topics to generate")
            .items(&titles)
            .interact()?;
        for index in picked {
            selection.toggle(index);
        }
    } else {
        for number in &batch.pick {
            if number.checked_sub(1).and_then(|index| selection.toggle(index)).is_none() {
                bail!("topic number {number} is out of range");
            }
        }
    }

    if selection.selected_count() == 0 {
        return Ok(());
    }
    if let Some(content_type) = batch.content_type {
        controller.set_content_type(content_type);
    }
    let handles = controller.batch_generate(&mut selection).await;
    wait_all(handles).await
}

async fn wait_all(handles: Vec<TaskHandle>) -> Result<()> {
    let total = handles.len();
    let mut failed = 0usize;
    for handle in handles {
        if handle.wait().await != Some(TaskStatus::Succeeded) {
            failed += 1;
        }
    }
    println!(
        "{} {} succeeded, {} failed",
        style("batch finished:").bold(),
        total - failed,
        failed
    );
    if failed > 0 {
        bail!("{failed} of {total} tasks did not succeed");
    }
    Ok(())
}

async fn history(
    controller: &TaskController,
    filter: HistoryFilter,
    limit: Option<u32>,
    show: Option<String>,
) -> Result<()> {
    let controller = match limit {
        Some(limit) => controller.clone().with_history_limit(limit),
        None => controller.clone(),
    };
    controller.load_history().await.context("load history")?;

    if let Some(id) = show {
        controller.open_history_result(&id)?;
        return Ok(());
    }

    controller.set_history_filter(filter);
    let view = controller.history_view();
    let groups = view.groups();
    if groups.is_empty() {
        println!("{}", style("No matching records").dim());
        return Ok(());
    }

    for group in groups {
        let failed = group.failed_count();
        let failed_note = if failed > 0 {
            style(format!("{failed} failed")).red().to_string()
        } else {
            String::new()
        };
        println!(
            "\n{} {} {}",
            style(group.label()).bold().cyan(),
            style(format!("{} records", group.total())).dim(),
            failed_note
        );
        for record in &group.records {
            let time = record
                .created_at_local()
                .map(|created| created.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            let status = if record.is_failed() {
                style("failed").red()
            } else {
                style("ok").green()
            };
            println!(
                "  {} {:<6} {} {}",
                time,
                status,
                record.topic,
                style(record.identity().unwrap_or("-")).dim()
            );
        }
    }
    Ok(())
}

async fn retry_failed(
    controller: &TaskController,
    date: Option<NaiveDate>,
    task_id: Option<String>,
) -> Result<()> {
    controller.load_history().await.context("load history")?;
    let handles = match task_id {
        Some(id) => vec![controller.retry_from_history(&id)?],
        None => controller.retry_failed_in_group(date).await,
    };
    if handles.is_empty() {
        println!("{}", style("No failed records to retry").dim());
        return Ok(());
    }
    wait_all(handles).await
}

async fn config(controller: &TaskController, action: ConfigCommand) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            let settings = controller.load_settings().await?;
            print_settings(&settings);
            Ok(())
        }
        ConfigCommand::Set(args) => {
            let mut settings = controller.load_settings().await?;
            apply_settings_args(&mut settings, args);
            if !controller.save_settings(&settings).await? {
                bail!("backend rejected the configuration");
            }
            Ok(())
        }
        ConfigCommand::Validate { api_key } => {
            let mut settings = controller.load_settings().await?;
            if api_key.is_some() {
                settings.llm_api_key = api_key;
            }
            if !controller.validate_model(&settings).await? {
                bail!("model is not available");
            }
            Ok(())
        }
    }
}

fn apply_settings_args(settings: &mut DashboardSettings, args: SettingsArgs) {
    if let Some(platform) = args.platform.as_deref() {
        match apply_platform(settings, platform) {
            PlatformChange::Defaults => {
                println!("Switched to {platform} with its default base URL and model");
            }
            PlatformChange::KeptModel => {
                println!("Switched to {platform} base URL, kept the current model name");
            }
            PlatformChange::UnknownPlatform => {
                println!("Unknown platform {platform}; stored as given");
                settings.ai_platform = Some(platform.to_string());
            }
        }
    }
    let overrides = [
        (&mut settings.llm_api_key, args.api_key),
        (&mut settings.openai_base_url, args.model_base_url),
        (&mut settings.default_model, args.model),
        (&mut settings.xhs_mcp_url, args.xhs_mcp_url),
        (&mut settings.jina_api_key, args.jina_api_key),
        (&mut settings.tavily_api_key, args.tavily_api_key),
    ];
    for (field, value) in overrides {
        if value.is_some() {
            *field = value;
        }
    }
}

fn print_settings(settings: &DashboardSettings) {
    let rows = [
        ("ai_platform", &settings.ai_platform),
        ("llm_api_key", &settings.llm_api_key),
        ("openai_base_url", &settings.openai_base_url),
        ("default_model", &settings.default_model),
        ("xhs_mcp_url", &settings.xhs_mcp_url),
        ("jina_api_key", &settings.jina_api_key),
        ("tavily_api_key", &settings.tavily_api_key),
    ];
    for (name, value) in rows {
        let shown = value.as_deref().unwrap_or("(not set)");
        println!("{:<16} {}", style(name).bold(), shown);
    }
}
