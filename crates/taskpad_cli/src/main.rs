//! Line-oriented front end over the taskpad core.
//!
//! # Responsibility
//! - Implement [`Surface`] on plain stdout lines.
//! - Map prompt input to controller gestures and report their errors.
//!
//! Configuration comes from the environment: `TASKPAD_DB_PATH` selects
//! the database file, `TASKPAD_LOG_DIR` (absolute) enables rolling file
//! diagnostics.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::PoisonError;

use taskpad_core::{
    core_version, default_log_level, init_logging, open_session, ListLane, RowId, Surface, UiError,
};

const DEFAULT_DB_FILE: &str = "taskpad.db";

/// Renders each surface operation as one stdout line.
///
/// The entry field is fed by the prompt loop right before a submit, so
/// the controller reads exactly what the user typed.
struct LineSurface {
    pending_entry: String,
}

impl LineSurface {
    fn new() -> Self {
        Self {
            pending_entry: String::new(),
        }
    }

    fn set_entry(&mut self, text: &str) {
        self.pending_entry = text.to_owned();
    }
}

impl Surface for LineSurface {
    fn entry_text(&self) -> String {
        self.pending_entry.clone()
    }

    fn clear_entry(&mut self) {
        self.pending_entry.clear();
    }

    fn show_warning(&mut self, message: &str) {
        println!("! {message}");
    }

    fn append_row(&mut self, lane: ListLane, id: RowId, text: &str) {
        println!("+ {lane} #{id} {text}");
    }

    fn remove_row(&mut self, lane: ListLane, id: RowId) {
        println!("- {lane} #{id}");
    }
}

enum Command<'a> {
    Submit,
    Quit,
    Help,
    List,
    Delete(u64),
    BadDelete(&'a str),
    Unknown(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    let Some(rest) = input.strip_prefix(':') else {
        return Command::Submit;
    };
    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("q") | Some("quit") => Command::Quit,
        Some("help") => Command::Help,
        Some("list") | Some("ls") => Command::List,
        Some("del") => match parts.next() {
            Some(arg) => match arg.trim_start_matches('#').parse::<u64>() {
                Ok(value) => Command::Delete(value),
                Err(_) => Command::BadDelete(arg),
            },
            None => Command::BadDelete(""),
        },
        Some(other) => Command::Unknown(other),
        None => Command::Unknown(""),
    }
}

fn print_help() {
    println!("type a task and press enter to add it");
    println!("  :del <id>   delete the row with that id");
    println!("  :list       reprint tasks and activity from memory");
    println!("  :help       show this help");
    println!("  :quit       exit");
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn main() {
    if let Err(err) = run() {
        eprintln!("taskpad: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = std::env::var_os("TASKPAD_LOG_DIR") {
        let log_dir = PathBuf::from(log_dir);
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("taskpad: file logging disabled: {err}");
        }
    }

    let db_path = std::env::var_os("TASKPAD_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

    println!("taskpad {} (db: {})", core_version(), db_path.display());

    let mut controller = open_session(&db_path, LineSurface::new())?;
    let surface = controller.surface_handle();

    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        prompt()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\n', '\r']);

        match parse_command(input) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::List => {
                for task in controller.task_items() {
                    println!("task | {task}");
                }
                for entry in controller.log_items() {
                    println!("log  | {entry}");
                }
            }
            Command::Delete(value) => match controller.delete_row(RowId::from_value(value)) {
                Ok(()) => {}
                Err(UiError::UnknownRow(id)) => println!("! no row #{id}"),
                Err(err) => return Err(err.into()),
            },
            Command::BadDelete(arg) => println!("! `:del` needs a numeric row id, got `{arg}`"),
            Command::Unknown(cmd) => println!("! unknown command `{cmd}`; try :help"),
            Command::Submit => {
                surface
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .set_entry(input);
                controller.submit()?;
            }
        }
    }

    Ok(())
}
