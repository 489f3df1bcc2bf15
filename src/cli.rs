use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::mapping::EstimateUnit;
use crate::render::OutputFormat;

const QUICKSTART_HELP: &str = "\
Get started:
  export JIRA_SERVER=https://acme.atlassian.net JIRA_EMAIL=me@acme.io JIRA_API_TOKEN=...
  version-report check                          Verify credentials
  version-report versions --project APP         List unreleased versions
  version-report report --project APP --fix-version 1.4.0
                                                Write APP-1.4.0.svg";

#[derive(Debug, Parser)]
#[command(name = "version-report", version)]
#[command(about = "Burn-up charts for Jira versions and sprints, rebuilt from issue history")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the configured credentials
    Check,

    /// List the versions of a project
    Versions {
        /// Project key (defaults to JIRA_PROJECT_KEY / config)
        #[arg(long, short)]
        project: Option<String>,

        /// Include released and archived versions
        #[arg(long)]
        all: bool,
    },

    /// Build a burn-up report for a version or sprint
    #[command(after_help = "Examples:\n  \
        version-report report -p APP --fix-version 1.4.0\n  \
        version-report report -p APP --sprint 31 --format text\n  \
        version-report report -p APP --fix-version 10042 --start 2024-06-01 -o burnup.svg")]
    Report(ReportArgs),

    /// Show the effective configuration, or store values given as flags
    Config {
        #[arg(long)]
        server: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Project key (defaults to JIRA_PROJECT_KEY / config)
    #[arg(long, short)]
    pub project: Option<String>,

    /// Version name or id
    #[arg(
        long,
        value_name = "NAME|ID",
        required_unless_present = "sprint",
        conflicts_with = "sprint"
    )]
    pub fix_version: Option<String>,

    /// Sprint id
    #[arg(long, value_name = "ID")]
    pub sprint: Option<u64>,

    /// First day of the report (YYYY-MM-DD); defaults to the version start date
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the report (YYYY-MM-DD); defaults to the release date or today
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    #[arg(long, short, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Output file; text goes to stdout when omitted
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Restrict to issue type(s), repeatable
    #[arg(long = "issue-type", value_name = "NAME")]
    pub issue_types: Vec<String>,

    /// Status name(s) always counted as done, repeatable
    #[arg(long = "done-status", value_name = "NAME")]
    pub done_statuses: Vec<String>,

    /// Custom field id holding the estimate
    #[arg(long, value_name = "ID")]
    pub estimate_field: Option<String>,

    /// Display name of the estimate field as it appears in changelogs
    #[arg(long, value_name = "NAME")]
    pub estimate_name: Option<String>,

    #[arg(long, value_enum)]
    pub estimate_unit: Option<EstimateUnit>,
}
