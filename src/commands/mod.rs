use clap::{Parser, Subcommand, ValueEnum};
use nightlist::config::Config;
use nightlist::error::SiteResult;
use std::path::PathBuf;

// Export submodules
pub mod events;
pub mod saved;

/// Saved events and calendar tools for the events site
#[derive(Debug, Parser)]
#[command(name = "nightlist", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or change the saved (bookmarked) events
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Print calendar fields or exports for catalog events
    Calendar {
        /// JSON file holding an array of events
        events: PathBuf,
        /// Only this event id
        #[arg(long)]
        id: Option<String>,
        #[arg(long, value_enum, default_value_t = CalendarFormat::Fields)]
        format: CalendarFormat,
    },
    /// Show upcoming / today / past for each catalog event
    Status {
        /// JSON file holding an array of events
        events: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum SavedAction {
    /// List saved event ids in bookmark order
    List,
    /// Print how many events are saved
    Count,
    /// Print whether an event is saved
    Check { id: String },
    /// Save an event, or unsave it if already saved
    Toggle { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CalendarFormat {
    /// Calendar fields as JSON, plus the display range
    Fields,
    /// An .ics document
    Ics,
    /// A Google Calendar link
    Google,
}

/// Type alias for command result
pub type CommandResult = SiteResult<()>;

/// Dispatch a parsed command line
pub async fn run(cli: Cli, config: Config) -> miette::Result<()> {
    match cli.command {
        Command::Saved { action } => saved::run(action, &config).await,
        Command::Calendar { events, id, format } => {
            Ok(events::calendar(&events, id.as_deref(), format).await?)
        }
        Command::Status { events } => Ok(events::status(&events).await?),
    }
}
