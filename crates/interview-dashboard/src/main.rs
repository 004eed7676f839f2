//! Interview dashboard
//!
//! Terminal front end for the screening-interview backend: watch the live
//! job list, create interviews, start calls and read reports.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::{Parser, Subcommand};
use interview_core::{Config, InterviewId, NewInterview};
use interview_dashboard::commands::HELP;
use interview_dashboard::components::{ReportView, form::CREATE_FAILED_MESSAGE};
use interview_dashboard::dashboard::START_CALL_FAILED_MESSAGE;
use interview_dashboard::render::{render_dashboard, render_report};
use interview_dashboard::{
    ApiClient, Command, CommandError, Dashboard, DashboardError, InterviewApi, Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, info, warn};

/// Command line interface for the interview dashboard
#[derive(Parser)]
#[command(
    name = "interview-dashboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dashboard for AI phone-screening interviews",
    long_about = "Watch interview jobs update live, create new ones, start their calls and read the analysis reports."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long)]
    log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Show the live dashboard and read commands from stdin
    Watch,

    /// Print the interview list once
    List,

    /// Create an interview
    Create {
        /// Candidate name
        #[arg(long)]
        name: String,

        /// Candidate phone number
        #[arg(long)]
        phone: String,

        /// Job position
        #[arg(long)]
        position: String,

        /// Job description
        #[arg(long)]
        description: String,

        /// Skills to assess
        #[arg(long, default_value = "")]
        skills: String,
    },

    /// Start the call for a pending interview
    StartCall {
        /// Interview ID
        #[arg(value_name = "ID")]
        id: InterviewId,
    },

    /// Print the report of an interview
    Report {
        /// Interview ID
        #[arg(value_name = "ID")]
        id: InterviewId,
    },

    /// Inspect configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.api_url.clone())?;

    interview_core::init_logging(
        cli.log_level.as_deref().unwrap_or(&config.logging.level),
        cli.log_format.as_deref().unwrap_or(&config.logging.format),
    )?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "Interview dashboard starting"
    );

    let client = ApiClient::new(&config.api.base_url);

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => run_watch(&config, client).await,
        Commands::List => list_once(&config, client).await,
        Commands::Create {
            name,
            phone,
            position,
            description,
            skills,
        } => {
            let request = NewInterview {
                candidate_name: name,
                phone_number: phone,
                job_position: position,
                job_description: description,
                skills_to_assess: skills,
            };
            create_interview(&client, &request).await
        }
        Commands::StartCall { id } => start_call(&client, id).await,
        Commands::Report { id } => show_report(&client, id).await,
        Commands::Config { show } => handle_config_command(&config, show),
    }
}

/// Load configuration and apply the command-line override
///
/// # Errors
///
/// Returns error if the configuration cannot be read or is invalid
fn load_config(path: Option<&Path>, api_url: Option<String>) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(url) = api_url {
        config.api.base_url = url;
        config.validate()?;
    }
    Ok(config)
}

/// Run the live dashboard until `quit`, end of input or Ctrl+C
///
/// # Errors
///
/// Returns error if stdin cannot be read
async fn run_watch(config: &Config, client: ApiClient) -> Result<()> {
    let dashboard = Dashboard::new(Arc::new(client), &config.dashboard);

    // A failed initial load is shown inline
    let _ = dashboard.load().await;
    dashboard.start_polling();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(config.dashboard.redraw_interval());
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut last_frame = String::new();
    let mut notice = String::new();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                // Any input acknowledges a pending alert
                dashboard.take_alert();
                notice.clear();
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => notice = format!("\n{HELP}\n"),
                    Ok(Command::New(_)) if dashboard.is_submitting() => {
                        notice = format!("\n{}\n", DashboardError::SubmitInProgress);
                    }
                    Ok(command) => spawn_command(&dashboard, command),
                    Err(CommandError::Empty) => {}
                    Err(e) => notice = format!("\n{e}\n"),
                }
                last_frame.clear();
            }
            _ = redraw.tick() => {}
        }

        let frame = dashboard.with_state(render_dashboard) + &notice;
        if frame != last_frame {
            print!("\x1b[2J\x1b[H{frame}> ");
            flush_stdout();
            last_frame = frame;
        }
    }

    dashboard.teardown();
    Ok(())
}

fn flush_stdout() {
    use std::io::Write;
    if let Err(e) = std::io::stdout().flush() {
        debug!(error = %e, "Failed to flush stdout");
    }
}

/// Run `command` in the background so the view keeps redrawing
fn spawn_command(dashboard: &Dashboard, command: Command) {
    let dashboard = dashboard.clone();
    tokio::spawn(async move {
        let result = match command {
            Command::Start(id) => dashboard.activate(id).await.map(|action| {
                if action.is_none() {
                    debug!(interview_id = %id, "Row has no active control");
                }
            }),
            Command::Report(id) => dashboard.open_report(id).await,
            Command::Close => {
                dashboard.close_report();
                Ok(())
            }
            Command::Dismiss => {
                dashboard.dismiss_banner();
                Ok(())
            }
            Command::Refresh => dashboard.load().await.map(drop),
            Command::New(fields) => dashboard.submit_form(fields).await.map(drop),
            Command::Help | Command::Quit => Ok(()),
        };
        // Failures are already surfaced in the view
        if let Err(e) = result {
            debug!(error = %e, "Command failed");
        }
    });
}

/// Print the interview list once
///
/// # Errors
///
/// Returns error if the list cannot be fetched
async fn list_once(config: &Config, client: ApiClient) -> Result<()> {
    let dashboard = Dashboard::new(Arc::new(client), &config.dashboard);
    let result = dashboard.load().await;
    print!("{}", dashboard.with_state(render_dashboard));
    dashboard.teardown();
    result.map(drop)
}

/// Create one interview and print its ID
///
/// # Errors
///
/// Returns error if the backend rejects the request
async fn create_interview(client: &ApiClient, request: &NewInterview) -> Result<()> {
    match client.create_interview(request).await {
        Ok(interview) => {
            println!(
                "Created interview {} for {} ({})",
                interview.id, interview.candidate_name, interview.status
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message(CREATE_FAILED_MESSAGE));
            Err(e)
        }
    }
}

/// Start one call
///
/// # Errors
///
/// Returns error if the backend refuses to start the call
async fn start_call(client: &ApiClient, id: InterviewId) -> Result<()> {
    match client.start_call(id).await {
        Ok(interview) => {
            println!("Interview {} is now {}", interview.id, interview.status);
            Ok(())
        }
        Err(e) => {
            warn!(interview_id = %id, error = %e, "Failed to start call");
            eprintln!("{}", e.user_message(START_CALL_FAILED_MESSAGE));
            Err(e)
        }
    }
}

/// Print one report
///
/// # Errors
///
/// Returns error if the interview cannot be fetched
async fn show_report(client: &ApiClient, id: InterviewId) -> Result<()> {
    let interview = client.get_interview(id).await?;
    print!("{}", render_report(&ReportView::from(&interview)));
    Ok(())
}

/// Handle configuration commands
///
/// # Errors
///
/// Returns error if configuration cannot be serialized
fn handle_config_command(config: &Config, show: bool) -> Result<()> {
    if show {
        let config_toml = toml::to_string_pretty(config).map_err(|e| {
            DashboardError::from(interview_core::Error::configuration(format!(
                "Failed to serialize configuration: {e}"
            )))
        })?;
        println!("{config_toml}");
    } else {
        println!(
            "Configuration is valid (backend {}, polling every {:?})",
            config.api.base_url,
            config.dashboard.poll_interval()
        );
    }
    Ok(())
}
