mod commands;
mod context;
mod render;
mod utils;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use docket_core::EventType;
use docket_core::grid::ViewMode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::context::Context;

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Court calendar for your cases, hearings and deadlines")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output (-q errors only, -qq nothing)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month of events
    Month {
        /// Month to show (YYYY-MM), defaults to this month
        month: Option<String>,

        /// Only show events of this type (e.g. hearing, client_meeting)
        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,

        /// Only show events for this case id
        #[arg(short, long)]
        case: Option<String>,
    },
    /// Show the week (Sunday to Saturday) around a day
    Week {
        /// Any day in the week (YYYY-MM-DD), defaults to today
        date: Option<String>,

        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,

        #[arg(short, long)]
        case: Option<String>,
    },
    /// List upcoming events
    Agenda {
        /// First day (YYYY-MM-DD), defaults to now
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to two weeks after --from
        #[arg(long)]
        to: Option<String>,

        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,

        #[arg(short, long)]
        case: Option<String>,
    },
    /// Create an event (prompts for anything not given)
    New {
        title: Option<String>,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (e.g. "10:30 AM")
        #[arg(short = 'T', long)]
        time: Option<String>,

        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,

        /// Case id the event belongs to
        #[arg(short, long)]
        case: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Change an event. Moving it needs both --date and --time.
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short = 'T', long)]
        time: Option<String>,

        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,

        #[arg(short, long)]
        case: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List cases
    Cases {
        /// Only cases with this status (e.g. open, closed)
        #[arg(long)]
        status: Option<String>,

        /// Search titles and case numbers
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a case with its hearing history, events and documents
    Case { id: String },
    /// Schedule a one-hour hearing for a case
    ScheduleHearing {
        case_id: String,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short = 'T', long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Show hearing outcomes for a case, or record one
    Outcome {
        case_id: String,

        /// Hearing number as listed (1 = first hearing)
        hearing: Option<usize>,

        /// Outcome text (prompted if omitted)
        outcome: Option<String>,
    },
    /// Delete a case
    DeleteCase {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Upload a document, optionally attached to a case
    Upload {
        path: PathBuf,

        /// Defaults to the file name
        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        case: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Show the API, time zone and signed-in user in use
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let ctx = Context::load()?;

    match cli.command {
        Commands::Month {
            month,
            event_type,
            case,
        } => {
            let cursor = match month {
                Some(m) => commands::calendar::parse_month(&m)?,
                None => ctx.today(),
            };
            commands::calendar::run(&ctx, ViewMode::Month, cursor, event_type, case).await
        }
        Commands::Week {
            date,
            event_type,
            case,
        } => {
            let cursor = match date {
                Some(d) => docket_core::datetime::parse_date(&d)?,
                None => ctx.today(),
            };
            commands::calendar::run(&ctx, ViewMode::Week, cursor, event_type, case).await
        }
        Commands::Agenda {
            from,
            to,
            event_type,
            case,
        } => commands::agenda::run(&ctx, from.as_deref(), to.as_deref(), event_type, case).await,
        Commands::New {
            title,
            date,
            time,
            event_type,
            case,
            location,
            description,
        } => {
            let args = commands::new::NewArgs {
                title,
                date,
                time,
                event_type,
                case,
                location,
                description,
            };
            commands::new::run(&ctx, args).await
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            event_type,
            case,
            location,
            description,
        } => {
            let date = date
                .as_deref()
                .map(docket_core::datetime::parse_date)
                .transpose()?;
            let edit = docket_core::draft::EventEdit {
                title,
                date,
                time,
                event_type,
                location,
                description,
                case_id: case,
            };
            commands::edit::run(&ctx, &id, edit).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&ctx, &id, yes).await,
        Commands::Cases { status, search } => commands::cases::run(&ctx, status, search).await,
        Commands::Case { id } => commands::case::run(&ctx, &id).await,
        Commands::ScheduleHearing {
            case_id,
            date,
            time,
            description,
        } => commands::schedule_hearing::run(&ctx, &case_id, date, time, description).await,
        Commands::Outcome {
            case_id,
            hearing,
            outcome,
        } => commands::outcome::run(&ctx, &case_id, hearing, outcome).await,
        Commands::DeleteCase { id, yes } => commands::delete_case::run(&ctx, &id, yes).await,
        Commands::Upload {
            path,
            title,
            case,
            description,
        } => commands::upload::run(&ctx, path, title, case, description).await,
        Commands::Session => commands::session::run(&ctx),
    }
}

/// Install the log subscriber. `RUST_LOG` wins over the -v/-q counts.
fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let default_level = if quiet >= 2 {
        "off"
    } else if quiet == 1 {
        "error"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
