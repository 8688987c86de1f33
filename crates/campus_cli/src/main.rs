//! Campus Buddy command-line front end.
//!
//! Usage:
//!   campus_cli ask "semester 3 timetable"
//!   campus_cli add-resource --category "Class Timetables" --name "CSE Sem 3" ./cse3.pdf
//!   campus_cli add-classroom 204 "Block A, second floor"
//!   campus_cli add-event 2026-10-17 "Hackathon"
//!   campus_cli list "Exam Timetables"

use anyhow::{anyhow, Context, Result};
use campus_core::db::open_db;
use campus_core::{
    default_log_level, init_logging, AnswerService, CatalogService, Category, QueryRouter, Reply,
    SqliteCalendarRepository, SqliteClassroomRepository, SqliteResourceRepository,
    StaticFallback, SystemClock, UploadStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus_cli", version, about = "Campus Buddy query and catalog tool")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "CAMPUS_DB", default_value = "campus_buddy.sqlite3")]
    db: PathBuf,

    /// Directory for uploaded files
    #[arg(long, env = "CAMPUS_UPLOADS", default_value = "uploads")]
    uploads: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CAMPUS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "CAMPUS_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a free-text question
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Upload a file as a categorized resource
    AddResource {
        #[arg(long, value_parser = parse_category)]
        category: Category,
        #[arg(long)]
        name: String,
        file: PathBuf,
    },
    /// Record classroom details
    AddClassroom { room: String, details: String },
    /// Add a calendar event (date as YYYY-MM-DD)
    AddEvent { date: String, event: String },
    /// List resources of one category
    List {
        #[arg(value_parser = parse_category)]
        category: Category,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = open_db(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    let catalog = CatalogService::new(
        SqliteResourceRepository::new(&conn),
        SqliteClassroomRepository::new(&conn),
        SqliteCalendarRepository::new(&conn),
        UploadStore::new(&cli.uploads),
    );

    match cli.command {
        Command::Ask { query } => {
            let query = query.join(" ");
            let router = QueryRouter::new(
                SqliteResourceRepository::new(&conn),
                SqliteClassroomRepository::new(&conn),
                SqliteCalendarRepository::new(&conn),
                SystemClock,
            );
            let outcome = router.resolve(&query)?;
            let reply = AnswerService::new(StaticFallback::default()).render(&query, outcome)?;
            println!("{}", reply.message());
            if let Reply::Resource {
                locator, mime_type, ..
            } = &reply
            {
                println!("{locator} ({mime_type})");
            }
        }
        Command::AddResource {
            category,
            name,
            file,
        } => {
            let bytes =
                std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("file path has no usable name"))?;
            let resource = catalog.upload_resource(category, &name, file_name, &bytes)?;
            println!("stored {} at {}", resource.name, resource.locator);
        }
        Command::AddClassroom { room, details } => {
            let record = catalog.add_classroom(&room, &details)?;
            println!("added classroom {}", record.room_token);
        }
        Command::AddEvent { date, event } => {
            let entry = catalog.add_calendar_event(&date, &event)?;
            println!("added event on {}", entry.date);
        }
        Command::List { category } => {
            for resource in catalog.list_resources(category)? {
                println!(
                    "{}\t{}\t{}",
                    resource.id.unwrap_or_default(),
                    resource.name,
                    resource.locator
                );
            }
        }
    }

    Ok(())
}

/// Accepts a category label or its dashed form, ignoring case
/// (`"Exam Timetables"`, `exam-timetables`).
fn parse_category(value: &str) -> Result<Category, String> {
    let wanted = slug(value);
    Category::ALL
        .into_iter()
        .find(|category| slug(category.label()) == wanted)
        .ok_or_else(|| {
            let known = Category::ALL.map(|category| slug(category.label()));
            format!("unknown category `{value}`; expected one of {}", known.join(", "))
        })
}

fn slug(value: &str) -> String {
    value
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
