use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use feed_core::Msg;
use feed_logging::{feed_debug, feed_warn};

use super::app::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    LoadNext,
    Reset,
    Help,
    Quit,
}

impl InputCommand {
    pub fn into_event(self) -> AppEvent {
        match self {
            InputCommand::LoadNext => AppEvent::Core(Msg::LoadNextClicked),
            InputCommand::Reset => AppEvent::Core(Msg::ResetClicked),
            InputCommand::Help => AppEvent::ShowHelp,
            InputCommand::Quit => AppEvent::Quit,
        }
    }
}

/// An empty line means "next photo"; unknown words yield `None`.
pub fn parse_command(line: &str) -> Option<InputCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Some(InputCommand::LoadNext),
        "r" | "reset" => Some(InputCommand::Reset),
        "h" | "help" | "?" => Some(InputCommand::Help),
        "q" | "quit" | "exit" => Some(InputCommand::Quit),
        _ => None,
    }
}

/// Forwards stdin commands to the UI thread; end of input counts as quit.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    feed_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let event = match parse_command(&line) {
                Some(command) => command.into_event(),
                None => {
                    feed_debug!("unknown command {:?}", line);
                    AppEvent::ShowHelp
                }
            };
            let quit = matches!(event, AppEvent::Quit);
            if tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}
