mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use counselcal_core::Reconciler;
use counselcal_core::config::Config;
use counselcal_core::remote::Remote;
use counselcal_core::store::ScheduleStore;

#[derive(Parser)]
#[command(name = "counselcal")]
#[command(about = "View and edit counseling schedules synced through the sheet proxy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List schedules, newest first
    List {
        /// Only show this counselor's schedules
        #[arg(long)]
        counselor: Option<String>,

        /// Only show this client's schedules
        #[arg(long)]
        client: Option<String>,

        /// Restrict to a month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Search date, counselor and client fields
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the Mon-Fri week grid
    Week {
        /// Any date inside the week to show (YYYY-MM-DD, defaults to the week
        /// of the latest schedule)
        #[arg(long)]
        date: Option<String>,

        /// Only show this counselor's schedules
        #[arg(long)]
        counselor: Option<String>,
    },
    /// Add a schedule slot
    Add {
        #[arg(long)]
        counselor: String,

        #[arg(long)]
        client: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM)
        #[arg(long)]
        end: String,

        /// Session ordinal, at least 1 (ignored with --terminated)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        session: u32,

        /// Mark the counseling relationship as closed
        #[arg(long)]
        terminated: bool,
    },
    /// Edit an existing schedule
    Edit {
        id: String,

        #[arg(long)]
        counselor: Option<String>,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        /// Session ordinal, at least 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        session: Option<u32>,

        /// Mark the counseling relationship as closed
        #[arg(long)]
        terminated: bool,
    },
    /// Delete a schedule by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Keep the week view on screen, refreshing periodically
    Watch {
        /// Refresh interval in seconds
        #[arg(long, default_value_t = 10)]
        interval: u64,

        /// Only show this counselor's schedules
        #[arg(long)]
        counselor: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let store = ScheduleStore::shared();
    let reconciler = Reconciler::new(
        store,
        Remote::new(config.proxy_url.clone()),
        config.tz_offset_hours,
    );

    match cli.command {
        Commands::List {
            counselor,
            client,
            month,
            search,
        } => commands::list::run(&reconciler, counselor, client, month, search).await,
        Commands::Week { date, counselor } => {
            commands::week::run(&reconciler, date.as_deref(), counselor).await
        }
        Commands::Add {
            counselor,
            client,
            date,
            start,
            end,
            session,
            terminated,
        } => {
            commands::add::run(
                &reconciler,
                counselor,
                client,
                date,
                start,
                end,
                session,
                terminated,
            )
            .await
        }
        Commands::Edit {
            id,
            counselor,
            client,
            date,
            start,
            end,
            session,
            terminated,
        } => {
            commands::edit::run(
                &reconciler,
                &id,
                counselor,
                client,
                date,
                start,
                end,
                session,
                terminated,
            )
            .await
        }
        Commands::Delete { id, yes } => commands::delete::run(&reconciler, &id, yes).await,
        Commands::Watch {
            interval,
            counselor,
        } => commands::watch::run(&reconciler, interval, counselor).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args(session: &str) -> Vec<&str> {
        vec![
            "counselcal",
            "add",
            "--counselor",
            "Kim",
            "--client",
            "Lee",
            "--date",
            "2025-01-06",
            "--start",
            "09:00",
            "--end",
            "10:00",
            "--session",
            session,
        ]
    }

    // A session of 0 is the backend's terminated sentinel; it must never be
    // expressible as an ordinal from the CLI.
    #[test]
    fn test_add_rejects_session_zero() {
        assert!(Cli::try_parse_from(add_args("0")).is_err());
    }

    #[test]
    fn test_add_accepts_positive_session() {
        assert!(Cli::try_parse_from(add_args("1")).is_ok());
    }

    #[test]
    fn test_edit_rejects_session_zero() {
        let result = Cli::try_parse_from(["counselcal", "edit", "123", "--session", "0"]);
        assert!(result.is_err());
    }
}
