//! Interactive line-oriented front-end.
//!
//! # Responsibility
//! - Load configuration and logging, open the database, and run the app.
//! - Translate each input line into `AppEvent`s and redraw once afterwards.

use log::{error, info, warn};
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use taskpad_core::db::open_db;
use taskpad_core::{
    init_logging, App, AppEvent, Route, SqliteKeyValueStore, SystemClock, TaskId, TaskpadConfig,
};

const HELP: &str = "\
commands:
  add <text>         add a task from <text>
  toggle <id>        flip completion of a task
  delete <id>        remove a task
  go <path>          open / or /settings
  dark on|off|toggle change the theme
  show               redraw the current view
  help               print this text
  quit               exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Events(Vec<AppEvent>),
    Show,
    Help,
    Quit,
}

fn main() {
    let config = TaskpadConfig::from_env();
    let log_dir = config.log_dir.to_string_lossy();
    if let Err(err) = init_logging(&config.log_level, &log_dir) {
        eprintln!("taskpad: logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "taskpad: cannot open database `{}`: {err}",
                config.db_path.display()
            );
            std::process::exit(1);
        }
    };

    let mut app = match App::load(SqliteKeyValueStore::new(&conn), SystemClock) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("taskpad: cannot load state: {err}");
            std::process::exit(1);
        }
    };
    let dirty = Rc::new(Cell::new(false));
    let mark = Rc::clone(&dirty);
    app.subscribe(move |_| mark.set(true));

    info!("event=cli_start module=cli status=ok");
    println!("{}", app.render());
    run(&mut app, &dirty, io::stdin().lock());
    info!("event=cli_exit module=cli status=ok");
}

/// Reads commands until EOF or `quit`, redrawing whenever a dispatch
/// marked the screen `dirty`.
fn run(
    app: &mut App<SqliteKeyValueStore<'_>, SystemClock>,
    dirty: &Cell<bool>,
    input: impl BufRead,
) {
    prompt();
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("event=cli_read module=cli status=error error={err}");
                break;
            }
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => {
                if let Err(err) = app.dispatch(AppEvent::Tick) {
                    eprintln!("taskpad: {err}");
                }
            }
            Ok(Command::Events(events)) => {
                for event in events {
                    if let Err(err) = app.dispatch(event) {
                        error!("event=cli_dispatch module=cli status=error error={err}");
                        eprintln!("taskpad: could not save: {err}");
                    }
                }
            }
            Err(message) => {
                warn!("event=cli_parse module=cli status=rejected");
                println!("{message}");
            }
        }
        if dirty.replace(false) {
            println!("\n{}", app.render());
        }
        prompt();
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim_start();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed.trim_end(), ""),
    };

    match verb {
        "" | "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "add" => Ok(Command::Events(vec![
            AppEvent::Navigate(Route::Home),
            AppEvent::EditDraft(rest.to_string()),
            AppEvent::SubmitDraft,
        ])),
        "toggle" => parse_id(rest).map(|id| Command::Events(vec![AppEvent::ToggleTask(id)])),
        "delete" | "rm" => parse_id(rest).map(|id| Command::Events(vec![AppEvent::DeleteTask(id)])),
        "go" => Route::from_path(rest)
            .map(|route| Command::Events(vec![AppEvent::Navigate(route)]))
            .ok_or_else(|| format!("unknown path `{}`; expected / or /settings", rest.trim())),
        "dark" => {
            let event = match rest.trim() {
                "on" | "true" => AppEvent::SetDarkMode(true),
                "off" | "false" => AppEvent::SetDarkMode(false),
                "" | "toggle" => AppEvent::ToggleDarkMode,
                other => return Err(format!("expected on|off|toggle, got `{other}`")),
            };
            Ok(Command::Events(vec![event]))
        }
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    raw.parse::<TaskId>()
        .map_err(|_| format!("expected a numeric task id, got `{}`", raw.trim()))
}
