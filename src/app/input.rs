//! Terminal entry point.
//!
//! When stdin is an interactive terminal, each line is read as a command:
//! an empty line toggles the timer, `s` toggles sound and `q` quits.

use std::io::{BufRead, IsTerminal};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::types::AppEvent;

/// Parses one line of terminal input.
///
/// ```
/// use tomatobar::app::parse_command;
/// use tomatobar::types::AppEvent;
///
/// assert_eq!(parse_command(""), Some(AppEvent::Toggle));
/// assert_eq!(parse_command(" q "), Some(AppEvent::Quit));
/// assert_eq!(parse_command("hello"), None);
/// ```
pub fn parse_command(line: &str) -> Option<AppEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Some(AppEvent::Toggle),
        "s" | "sound" => Some(AppEvent::ToggleSound),
        "q" | "quit" => Some(AppEvent::Quit),
        _ => None,
    }
}

/// Forwards commands read from `input` until it ends or the channel closes.
pub fn forward_commands<R: BufRead>(input: R, events: &Sender<AppEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read terminal input: {}", e);
                return;
            }
        };
        let Some(event) = parse_command(&line) else {
            eprintln!("Enter: start/stop, s: toggle sound, q: quit");
            continue;
        };
        if events.send(event).is_err() {
            return;
        }
    }
    debug!("terminal input closed");
}

/// Reads commands from stdin on a background thread.
///
/// Returns `None` when stdin is not a terminal.
pub fn spawn_terminal_input(events: Sender<AppEvent>) -> Option<JoinHandle<()>> {
    if !std::io::stdin().is_terminal() {
        return None;
    }

    let spawned = thread::Builder::new()
        .name("terminal-input".to_string())
        .spawn(move || forward_commands(std::io::stdin().lock(), &events));

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to start terminal input: {}", e);
            None
        }
    }
}
