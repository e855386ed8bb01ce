//! Command-line access to topic mastery progress.
//!
//! Environment:
//!   ADMATHS_DB_URL : database URL or path (default `admaths.sqlite3`)
//!   LOG_LEVEL      : tracing filter directives
//!   LOG_FORMAT     : `json` for structured logs

mod db;
mod telemetry;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use mastery_core::model::{Category, TopicId};
use mastery_core::scoring;
use services::{AppServices, ProgressSnapshot, ProgressUpdate};

#[derive(Parser)]
#[command(name = "admaths-progress")]
#[command(about = "Inspect and record topic mastery progress", long_about = None)]
struct Cli {
    /// SQLite database URL or file path
    #[arg(long, global = true, env = "ADMATHS_DB_URL", default_value = "admaths.sqlite3")]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a topic's progress breakdown
    Show {
        /// Topic id, e.g. coordinate-geometry
        topic: TopicId,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Record one completed activity for a topic
    Record {
        topic: TopicId,
        /// quest, spin, riddle, rearrange, error, hotspot, tutor or exam
        category: Category,
        #[arg(long)]
        json: bool,
    },
    /// List topics with stored progress
    Topics,
    /// Print the scoring table
    Table,
}

async fn open_services(raw_db: &str) -> Result<AppServices, Box<dyn std::error::Error>> {
    // Binary glue owns file creation so the services stay storage-agnostic.
    let cwd = std::env::current_dir()?;
    let db_url = db::normalize_sqlite_url(raw_db, &cwd)?;
    db::prepare_sqlite_file(&db_url)?;
    Ok(AppServices::new_sqlite(&db_url).await?)
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Table => print_table(out)?,
        Command::Show { topic, json } => {
            let progress = open_services(&cli.db).await?.progress();
            let snapshot = progress.snapshot(&topic).await;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            } else {
                print_snapshot(out, &snapshot)?;
            }
        }
        Command::Record {
            topic,
            category,
            json,
        } => {
            let progress = open_services(&cli.db).await?.progress();
            let update = progress.record_completion(&topic, category).await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&update)?)?;
            } else {
                print_update(out, &update)?;
            }
        }
        Command::Topics => {
            let progress = open_services(&cli.db).await?.progress();
            for topic in progress.list_topics().await? {
                let percent = progress.get_percent(&topic).await;
                writeln!(out, "{topic:<32} {percent:>5.1}%")?;
            }
        }
    }

    Ok(())
}

fn print_table(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<10} {:>7} {:>5} {:>8}", "category", "weight", "cap", "to cap")?;
    for category in Category::ALL {
        let rule = scoring::rule(category);
        writeln!(
            out,
            "{:<10} {:>7.1} {:>5.0} {:>8}",
            category.as_str(),
            rule.weight,
            rule.cap,
            rule.completions_to_cap()
        )?;
    }
    Ok(())
}

fn print_snapshot(out: &mut impl Write, snapshot: &ProgressSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "{}  {} Level  {}% Explored",
        snapshot.topic_id, snapshot.rank, snapshot.display_percent
    )?;
    for row in &snapshot.categories {
        writeln!(
            out,
            "  {:<10} {:>4}  {:>4.1} / {:.0}",
            row.category.as_str(),
            row.count,
            row.contribution,
            row.cap
        )?;
    }
    Ok(())
}

fn print_update(out: &mut impl Write, update: &ProgressUpdate) -> io::Result<()> {
    writeln!(
        out,
        "{}: +1 {}  {:.1}% -> {:.1}%",
        update.topic_id, update.category, update.previous_percent, update.percent
    )?;
    if let Some(rank) = update.rank_up {
        writeln!(out, "Reached {rank} Level!")?;
    }
    if let Some(reward) = update.reward {
        writeln!(out, "Reward Unlocked! {}", reward.title)?;
        writeln!(out, "  {}", reward.content)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli, &mut io::stdout().lock()).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
