//! Interactive session
//!
//! Reads one command per line from stdin. State (login, filters, open
//! detail) lives for the whole session and is lost on exit.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::{print_equipment, print_facets, print_outcome, print_specifications};
use crate::{
    models::{LoginCredentials, SearchPanel},
    services::directory::DirectoryEvent,
    AppState,
};

const HELP: &str = "\
Commands:
  login <email> <password>     Log in
  logout                       Log out
  whoami                       Show the logged-in user
  reload                       Fetch the equipment list again
  list                         Show equipment matching the current filters
  search <term>                Set the free-text search (empty clears it)
  filter <field> [value]       Set status|brand|category filter (no value clears it)
  clear                        Clear search and filters
  facets                       Show available filter values
  set <id> <status>            Request a status change (e.g. set 3 EN USO)
  specs <id>                   Show technical specifications
  close                        Close the specification view
  help                         Show this help
  quit                         Exit";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Reload,
    List,
    Search(String),
    Filter { field: FilterField, value: String },
    Clear,
    Facets,
    Set { id: i64, status: String },
    Specs(i64),
    Close,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Status,
    Brand,
    Category,
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(email), Some(password)) => ShellCommand::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                _ => return Err("usage: login <email> <password>".to_string()),
            }
        }
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::WhoAmI,
        "reload" => ShellCommand::Reload,
        "list" | "ls" => ShellCommand::List,
        "search" => ShellCommand::Search(rest.to_string()),
        "filter" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let field = match field.to_lowercase().as_str() {
                "status" | "estado" => FilterField::Status,
                "brand" | "marca" => FilterField::Brand,
                "category" | "categoria" => FilterField::Category,
                _ => return Err("usage: filter status|brand|category [value]".to_string()),
            };
            ShellCommand::Filter {
                field,
                value: value.to_string(),
            }
        }
        "clear" => ShellCommand::Clear,
        "facets" => ShellCommand::Facets,
        "set" => {
            let (id, status) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <id> <status>".to_string())?;
            ShellCommand::Set {
                id: parse_id(id)?,
                status: status.trim().to_string(),
            }
        }
        "specs" => ShellCommand::Specs(parse_id(rest)?),
        "close" => ShellCommand::Close,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(command))
}

fn parse_id(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an equipment ID", value.trim()))
}

/// Run the interactive loop until `quit` or end of input
pub async fn run(state: &mut AppState) -> Result<()> {
    let mut events = state.services.directory.subscribe();
    let mut panel = SearchPanel::new();

    println!("Tech Lab monitor - {}", state.config.api.base_url);
    if let Err(e) = state.services.directory.load().await {
        println!("[!!] {}", e.user_message());
    }
    drain_events(&mut events);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(state);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage);
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        execute(state, &mut panel, command).await;
        drain_events(&mut events);
    }

    Ok(())
}

async fn execute(state: &mut AppState, panel: &mut SearchPanel, command: ShellCommand) {
    let services = &mut state.services;

    match command {
        ShellCommand::Login { email, password } => {
            let credentials = LoginCredentials::new(email, password);
            match services.session.login(&credentials).await {
                Ok(user) => println!("Welcome, {}", user.full_name()),
                Err(e) => println!("[!!] {}", e.user_message()),
            }
        }
        ShellCommand::Logout => {
            services.session.logout();
            println!("Logged out.");
        }
        ShellCommand::WhoAmI => match services.session.current_user() {
            Some(user) => println!("{} <{}> (id {})", user.full_name(), user.email, user.id),
            None => println!("Not logged in."),
        },
        ShellCommand::Reload => {
            if let Err(e) = services.directory.load().await {
                println!("[!!] {}", e.user_message());
            }
        }
        ShellCommand::List => print_equipment(&services.directory.view(&panel.query())),
        ShellCommand::Search(term) => {
            panel.set_term(term);
            print_equipment(&services.directory.view(&panel.query()));
        }
        ShellCommand::Filter { field, value } => {
            match field {
                FilterField::Status => panel.set_status(&value),
                FilterField::Brand => panel.set_brand(&value),
                FilterField::Category => panel.set_category(&value),
            }
            print_equipment(&services.directory.view(&panel.query()));
        }
        ShellCommand::Clear => {
            panel.clear();
            print_equipment(&services.directory.view(&panel.query()));
        }
        ShellCommand::Facets => print_facets(&services.directory.facets()),
        ShellCommand::Set { id, status } => match services.change_status(id, &status).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => println!("[!!] {}", e.user_message()),
        },
        ShellCommand::Specs(id) => {
            let Some(equipment) = services.directory.find(id).cloned() else {
                println!("[!!] Equipment {} not found", id);
                return;
            };
            let opened = services.specifications.open(equipment).await.map(|_| ());
            match opened {
                Ok(()) => print_specifications(&services.specifications),
                Err(e) => println!("[!!] {}", e.user_message()),
            }
        }
        ShellCommand::Close => services.specifications.close(),
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }
}

fn print_prompt(state: &AppState) {
    use std::io::Write;

    match state.services.session.current_user() {
        Some(user) => print!("{}> ", user.email),
        None => print!("> "),
    }
    let _ = std::io::stdout().flush();
}

/// Print the notifications the directory published since the last command
fn drain_events(events: &mut broadcast::Receiver<DirectoryEvent>) {
    loop {
        match events.try_recv() {
            Ok(DirectoryEvent::Loaded { count }) => println!("Loaded {} equipment.", count),
            Ok(DirectoryEvent::StatusChanged { record, new_status }) => {
                tracing::debug!("Equipment {} changed to {}", record.id, new_status);
            }
            Ok(DirectoryEvent::LoginRequired) => println!("Use 'login <email> <password>' first."),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Skipped {} directory events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}
