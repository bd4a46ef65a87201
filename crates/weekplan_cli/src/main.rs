//! Terminal driver for the weekly board.
//!
//! Runs the same controller the UI shell uses, against the same database
//! file, so boards can be inspected and edited without the app.

mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use render::Render;
use std::path::PathBuf;
use weekplan_core::config::resolve_db_path;
use weekplan_core::db::open_db;
use weekplan_core::week::{iso_date, parse_iso_date, today, NaiveDate};
use weekplan_core::{
    default_log_level, init_logging, CalendarController, DragLocation, DropResult, EventId, Route,
    SqliteEventStoreRepository,
};

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Inspect and edit the weekly board")]
struct Cli {
    /// Board database file (defaults to $WEEKPLAN_DB_PATH, then the temp dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week containing a day
    Week {
        /// Day to treat as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Add an event
    Add {
        date: String,
        title: String,
        /// HH:MM
        time: String,
    },
    /// Move an event by position, within a day or to another day
    Move {
        from: String,
        index: usize,
        to: String,
        to_index: usize,
    },
    /// Delete an event (requires --yes to confirm)
    Delete {
        date: String,
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Resolve a navigation path
    Route { path: String },
    /// Print core linkage info
    Ping,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    match cli.command {
        Commands::Ping => {
            println!("weekplan_core ping={}", weekplan_core::ping());
            println!("weekplan_core version={}", weekplan_core::core_version());
            Ok(())
        }
        Commands::Route { path } => {
            match Route::parse(&path) {
                Some(Route::Week) => println!("week board"),
                Some(route) => match route.day_detail() {
                    Some(detail) => println!("{}", detail.render()),
                    None => println!("{route}"),
                },
                None => bail!("unknown route `{path}`"),
            }
            Ok(())
        }
        Commands::Week { today: day } => {
            let board = open_board(cli.db)?;
            let day = match day {
                Some(raw) => parse_date(&raw)?,
                None => today(),
            };
            println!("{}", board.week_view(day).render());
            Ok(())
        }
        Commands::Add { date, title, time } => {
            let mut board = open_board(cli.db)?;
            let id = board.add_event(parse_date(&date)?, &title, &time)?;
            println!("added {id}");
            Ok(())
        }
        Commands::Move {
            from,
            index,
            to,
            to_index,
        } => {
            let (from, to) = (parse_date(&from)?, parse_date(&to)?);
            let mut board = open_board(cli.db)?;
            let drop = DropResult {
                source: DragLocation::new(iso_date(from), index),
                destination: Some(DragLocation::new(iso_date(to), to_index)),
            };
            let outcome = board.on_drag_end(&drop)?;
            println!("{outcome:?}");
            Ok(())
        }
        Commands::Delete { date, id, yes } => {
            let mut board = open_board(cli.db)?;
            let date = parse_date(&date)?;
            board.open_delete(date, EventId::from(id.clone()));
            if !yes {
                board.cancel_delete();
                println!("delete of {id} not confirmed; rerun with --yes");
                return Ok(());
            }
            match board.confirm_delete()? {
                Some(removed) => println!("deleted {}", removed.id),
                None => println!("no event {id} on {date}"),
            }
            Ok(())
        }
    }
}

fn open_board(db: Option<PathBuf>) -> Result<CalendarController<SqliteEventStoreRepository>> {
    let path = resolve_db_path(db.as_deref());
    let conn = open_db(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let repo = SqliteEventStoreRepository::try_new(conn)?;
    Ok(CalendarController::open(repo))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    parse_iso_date(raw).ok_or_else(|| anyhow!("invalid date `{raw}`; expected YYYY-MM-DD"))
}
