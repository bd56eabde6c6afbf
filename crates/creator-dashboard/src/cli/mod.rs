/*
[INPUT]:  Command line arguments
[OUTPUT]: Parsed CLI definition and subcommand dispatch
[POS]:    CLI layer - argument schema
[UPDATE]: When adding commands or global flags
*/

pub mod commands;
pub mod init;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use creator_dashboard::HistoryFilter;
use creator_dashboard_adapter::ContentType;

#[derive(Parser, Debug)]
#[command(
    name = "creator-dashboard",
    version,
    about = "Generate, publish and review creator content from the terminal"
)]
pub struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    /// Override backend.base_url from the configuration
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
    /// Load and validate the configuration, then exit
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate and publish one post
    Generate {
        /// Topic text; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
        #[arg(long = "type", value_name = "TYPE")]
        content_type: Option<ContentType>,
        /// Reuse an existing task id so the backend updates that record
        #[arg(long = "retry-id", value_name = "TASK_ID")]
        retry_id: Option<String>,
    },
    /// Discover trending topics for a domain and optionally batch-generate them
    Trending {
        domain: String,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Extract topics from a web page and optionally batch-generate them
    FromUrl {
        url: String,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// List task history grouped by date
    History {
        #[arg(long, default_value = "all", value_name = "all|succeeded|failed")]
        filter: HistoryFilter,
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
        /// Print the stored content of one record
        #[arg(long = "show", value_name = "TASK_ID")]
        show: Option<String>,
    },
    /// Retry failed history records of one date, or a single record
    RetryFailed {
        /// Local date (YYYY-MM-DD); omit to retry records with an unknown date
        #[arg(long, value_name = "DATE", conflicts_with = "task_id")]
        date: Option<NaiveDate>,
        #[arg(long = "task-id", value_name = "TASK_ID")]
        task_id: Option<String>,
    },
    /// Publish the stored content of a history record again
    RetryPublish { task_id: String },
    /// Delete one history record
    Delete { task_id: String },
    /// Backend model configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Interactively write a dashboard configuration file
    Init {
        #[arg(long, default_value = "creator-dashboard.yaml", value_name = "PATH")]
        output: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BatchArgs {
    /// Generate every discovered topic
    #[arg(long, conflicts_with_all = ["pick", "choose"])]
    pub all: bool,
    /// 1-based topic numbers to generate
    #[arg(long, value_delimiter = ',', value_name = "N,N,..")]
    pub pick: Vec<usize>,
    /// Pick topics interactively
    #[arg(long, conflicts_with = "pick")]
    pub choose: bool,
    #[arg(long = "type", value_name = "TYPE")]
    pub content_type: Option<ContentType>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the backend configuration (secrets masked)
    Show,
    /// Update backend configuration fields
    Set(SettingsArgs),
    /// Check that the configured model answers
    Validate {
        /// Plain API key; the stored key is masked and cannot be reused
        #[arg(long = "api-key", value_name = "KEY")]
        api_key: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// openai, claude, gemini, tongyi, wenxin or doubao
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long = "api-key")]
    pub api_key: Option<String>,
    #[arg(long = "model-base-url")]
    pub model_base_url: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long = "xhs-mcp-url")]
    pub xhs_mcp_url: Option<String>,
    #[arg(long = "jina-api-key")]
    pub jina_api_key: Option<String>,
    #[arg(long = "tavily-api-key")]
    pub tavily_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_joins_topic_words() {
        let cli = Cli::try_parse_from([
            "creator-dashboard",
            "--base-url",
            "http://localhost:9000",
            "generate",
            "spring",
            "hiking",
            "--type",
            "paper_analysis",
        ])
        .expect("parse");

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Some(Command::Generate {
                topic,
                content_type,
                retry_id,
            }) => {
                assert_eq!(topic.join(" "), "spring hiking");
                assert_eq!(content_type, Some(ContentType::PaperAnalysis));
                assert_eq!(retry_id, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_retry_publish_takes_task_id() {
        let cli = Cli::try_parse_from(["creator-dashboard", "retry-publish", "task-42"])
            .expect("parse");
        match cli.command {
            Some(Command::RetryPublish { task_id }) => assert_eq!(task_id, "task-42"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_trending_pick_list() {
        let cli = Cli::try_parse_from(["creator-dashboard", "trending", "AI", "--pick", "1,3"])
            .expect("parse");
        match cli.command {
            Some(Command::Trending { domain, batch }) => {
                assert_eq!(domain, "AI");
                assert_eq!(batch.pick, vec![1, 3]);
                assert!(!batch.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_dry_run_without_command() {
        let cli = Cli::try_parse_from(["creator-dashboard", "--config", "x.yaml", "--dry-run"])
            .expect("parse");
        assert!(cli.dry_run);
        assert!(cli.command.is_none());
    }
}
