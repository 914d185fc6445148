mod commands;
mod config;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leitura")]
#[command(about = "Track your Bible reading plan, local-first with optional remote sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's reading
    Today {
        /// Also print the verse text (fetched from public Bible APIs)
        #[arg(long)]
        text: bool,
    },
    /// Show plan progress, streak and badges
    Status,
    /// Toggle a day's completion (today's day when omitted)
    Done {
        /// Plan day number (1-based)
        day: Option<u32>,
    },
    /// Show, set or delete a note on a plan day
    Note {
        /// Plan day number (1-based)
        day: u32,

        /// Note text; omit to show the current note
        text: Option<String>,

        /// Delete the note instead
        #[arg(long, conflicts_with = "text")]
        delete: bool,
    },
    /// Manage the active reading plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Set the plan's start date (day 1)
    StartDate {
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// Sign in to a remote account
    Login {
        /// Account id (uuid from your auth provider)
        user_id: String,
    },
    /// Sign out, back to guest mode
    Logout,
}

#[derive(Subcommand)]
enum PlanCommands {
    /// List available plans
    List,
    /// Switch to a catalog plan
    Set { plan_id: String },
    /// Read a single book at your own pace
    Custom {
        /// Book name, e.g. "Ester"
        book: String,
        /// Number of days to spread it over
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Today { text } => commands::today::run(text).await,
        Commands::Status => commands::status::run().await,
        Commands::Done { day } => commands::done::run(day).await,
        Commands::Note { day, text, delete } => commands::note::run(day, text, delete).await,
        Commands::Plan { command } => match command {
            PlanCommands::List => commands::plan::list().await,
            PlanCommands::Set { plan_id } => commands::plan::set(&plan_id).await,
            PlanCommands::Custom { book, days } => commands::plan::custom(&book, days).await,
        },
        Commands::StartDate { date } => commands::start_date::run(&date).await,
        Commands::Login { user_id } => commands::login::login(&user_id).await,
        Commands::Logout => commands::login::logout().await,
    }
}
