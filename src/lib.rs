//! Burn-up reports for Jira versions and sprints, rebuilt from issue changelogs.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod jql;
pub mod mapping;
pub mod model;
pub mod reconstruct;
pub mod render;
pub mod report;
pub mod status;
pub mod window;

use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use jira_api::JiraClient;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use cli::{Cli, Command, ReportArgs};
use config::{Config, ConfigManager};
use error::{ConfigError, RenderError};
use fetch::{FetchRequest, IssueSource, JiraIssueSource, ScopeTarget};
use render::OutputFormat;
use report::{build_report, ReportInput, VersionReport};

pub use error::{ReportError, Result};

static FILE_NAME_UNSAFE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("invalid file name regex"));

pub fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp_millis()
    .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("loaded environment from {}", path.display());
    }
    let manager = match &cli.config {
        Some(path) => ConfigManager::at(path),
        None => ConfigManager::new()?,
    };
    let file_config = manager.load();
    let mut config = file_config.clone();
    config.apply_env(|name| env::var(name).ok());

    match cli.command {
        Command::Check => check(&config).await,
        Command::Versions { project, all } => {
            list_versions(&config, project.as_deref(), all).await
        }
        Command::Report(args) => run_report(&config, args).await,
        Command::Config {
            server,
            email,
            project,
        } => configure(&manager, file_config, &config, server, email, project),
    }
}

/// Fetches the scope, resolves the window and reconstructs the daily totals.
pub async fn build_version_report<S: IssueSource>(
    fetcher: &S,
    request: &FetchRequest,
    estimate_label: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<VersionReport> {
    let scope = fetcher
        .fetch(request)
        .await
        .map_err(|source| ReportError::Fetch {
            project: request.project.clone(),
            target: request.target.to_string(),
            source,
        })?;

    let noun = request.target.noun();
    let label = format!("{} {}", noun.to_lowercase(), scope.name);
    let window = window::resolve_window(start, end, scope.start, scope.end, today, &label)?;
    info!(
        "reconstructing {} issues of {} from {} to {}",
        scope.issues.len(),
        label,
        window.start(),
        window.end()
    );

    Ok(build_report(ReportInput {
        project: &request.project,
        noun,
        scope: scope.name,
        estimate_label,
        window,
        issues: &scope.issues,
        warnings: scope.warnings,
    }))
}

/// `<PROJECT>-<scope>.<ext>` with anything unsafe in a file name replaced.
pub fn default_output_path(project: &str, scope: &str, format: OutputFormat) -> PathBuf {
    let scope = FILE_NAME_UNSAFE_REGEX.replace_all(scope.trim(), "-");
    PathBuf::from(format!("{}-{}.{}", project, scope.trim_matches('-'), format.extension()))
}

fn project_key(
    explicit: Option<&str>,
    config: &Config,
) -> std::result::Result<String, ConfigError> {
    let key = explicit
        .or(config.project_key.as_deref())
        .ok_or(ConfigError::Missing {
            what: "project key",
            hint: "pass --project KEY or set JIRA_PROJECT_KEY",
        })?;
    jql::validate_project_key(key)
}

async fn check(config: &Config) -> Result<()> {
    let client = JiraClient::new(config.jira_config()?)?;
    let me = client.myself().await?;
    println!("authenticated as {}", me.label());
    Ok(())
}

async fn list_versions(config: &Config, project: Option<&str>, all: bool) -> Result<()> {
    let project = project_key(project, config)?;
    let client = JiraClient::new(config.jira_config()?)?;
    let versions = client.project_versions(&project).await?;

    let shown: Vec<_> = versions
        .iter()
        .filter(|version| all || !(version.released || version.archived))
        .collect();
    if shown.is_empty() {
        info!("no matching versions in project {}", project);
        return Ok(());
    }
    println!("{:<10}  {:<28}  {:<10}  {:<10}  State", "Id", "Name", "Start", "Release");
    for version in shown {
        let state = if version.archived {
            "archived"
        } else if version.released {
            "released"
        } else {
            "unreleased"
        };
        println!(
            "{:<10}  {:<28}  {:<10}  {:<10}  {}",
            version.id.as_deref().unwrap_or("-"),
            version.name,
            version.start().map_or_else(|| "-".to_string(), |day| day.to_string()),
            version.release().map_or_else(|| "-".to_string(), |day| day.to_string()),
            state
        );
    }
    Ok(())
}

async fn run_report(config: &Config, args: ReportArgs) -> Result<()> {
    let project = project_key(args.project.as_deref(), config)?;
    let target = match (args.fix_version, args.sprint) {
        (Some(version), _) => ScopeTarget::Version(version),
        (None, Some(sprint)) => ScopeTarget::Sprint(sprint),
        (None, None) => {
            return Err(ConfigError::Missing {
                what: "version or sprint",
                hint: "pass --fix-version NAME or --sprint ID",
            }
            .into())
        }
    };

    let mut estimate = config.estimate_field();
    if let Some(id) = args.estimate_field {
        estimate.id = id;
    }
    if let Some(name) = args.estimate_name {
        estimate.name = name;
    }
    if let Some(unit) = args.estimate_unit {
        estimate.unit = unit;
    }
    let done_statuses = if args.done_statuses.is_empty() {
        config.done_statuses.clone()
    } else {
        args.done_statuses
    };
    let issue_types = if args.issue_types.is_empty() {
        config.issue_types.clone()
    } else {
        args.issue_types
    };

    let estimate_label = estimate.unit.label();
    let client = JiraClient::new(config.jira_config()?)?;
    let fetcher = JiraIssueSource::new(client, estimate, done_statuses);
    let request = FetchRequest {
        project,
        target,
        issue_types,
    };
    let today = Local::now().date_naive();
    let report = build_version_report(
        &fetcher,
        &request,
        estimate_label,
        args.start,
        args.end,
        today,
    )
    .await?;

    log_summary(&report);
    write_report(&report, args.format, args.output).await
}

fn log_summary(report: &VersionReport) {
    if let Some(last) = report.last_total() {
        info!(
            "{}: {} issues, scope {:.1}, completed {:.1}, {:.0}% unestimated on {}",
            report.title,
            report.issue_count,
            last.scope,
            last.completed,
            last.unestimated_percent,
            last.day
        );
    }
    if !report.warnings.is_empty() {
        warn!("{} warning(s) while building the report:", report.warnings.len());
        for warning in &report.warnings {
            warn!("  {}", warning);
        }
    }
}

async fn write_report(
    report: &VersionReport,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let render_error = |source: RenderError| ReportError::Render {
        target: report.title.clone(),
        source,
    };
    let rendered = format.renderer().render(report).map_err(render_error)?;

    let path = match output {
        Some(path) => path,
        None if format == OutputFormat::Text => {
            print!("{}", rendered);
            return Ok(());
        }
        None => default_output_path(&report.project, &report.scope, format),
    };
    tokio::fs::write(&path, rendered).await.map_err(|source| {
        render_error(RenderError::Write {
            path: path.clone(),
            source,
        })
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

fn configure(
    manager: &ConfigManager,
    mut file_config: Config,
    effective: &Config,
    server: Option<String>,
    email: Option<String>,
    project: Option<String>,
) -> Result<()> {
    if server.is_none() && email.is_none() && project.is_none() {
        let shown = effective.masked();
        let unset = || "(unset)".to_string();
        println!("config file      {}", manager.path().display());
        println!("server           {}", shown.server.unwrap_or_else(unset));
        println!("email            {}", shown.email.unwrap_or_else(unset));
        println!("api token        {}", shown.api_token.unwrap_or_else(unset));
        println!("project          {}", shown.project_key.unwrap_or_else(unset));
        println!(
            "estimate field   {} ({}, {})",
            shown.estimate_field_id,
            shown.estimate_field_name,
            shown.estimate_unit.label()
        );
        println!("done statuses    {}", shown.done_statuses.join(", "));
        return Ok(());
    }

    if let Some(server) = server {
        file_config.server = Some(server);
    }
    if let Some(email) = email {
        file_config.email = Some(email);
    }
    if let Some(project) = project {
        file_config.project_key = Some(jql::validate_project_key(&project)?);
    }
    manager.save(&file_config)?;
    info!("saved {}", manager.path().display());
    Ok(())
}
