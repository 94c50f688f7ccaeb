//! Shared plumbing for the tool subcommands: input, dispatch and printing.

use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use std::io::{IsTerminal, Read};
use toolbelt_core::{dispatch, Action, Event, Session, ToolKey};

/// Drives one tool against its own session.
pub struct ToolRunner {
    tool: ToolKey,
    session: Session,
}

impl ToolRunner {
    pub fn new(tool: ToolKey) -> Self {
        Self {
            tool,
            session: Session::new(),
        }
    }

    pub fn send(&mut self, action: Action) -> Result<Vec<(&'static str, String)>> {
        log::debug!("dispatching {} {}", self.tool, action.name());
        let outputs = dispatch(&mut self.session, Event::new(self.tool, action))
            .map_err(Error::from)?;
        Ok(outputs)
    }

    /// Send every action in order and return the slots after the last one.
    pub fn run(mut self, actions: Vec<Action>) -> Result<Vec<(&'static str, String)>> {
        let mut outputs = self.session.outputs(self.tool);
        for action in actions {
            outputs = self.send(action)?;
        }
        Ok(outputs)
    }
}

/// Positional input, or all of stdin without its trailing newline.
pub fn read_input(input: Option<String>) -> Result<String> {
    if let Some(input) = input {
        return Ok(input);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| Error::Input(e.to_string()))?;

    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }

    Ok(buffer)
}

/// Print a tool's slots. Headers go to stderr and only on a terminal so
/// piped output stays clean.
pub fn print_slots(tool: ToolKey, outputs: &[(&'static str, String)]) {
    let is_tty = std::io::stdout().is_terminal();

    if is_tty {
        eprintln!("{}", tool.title().bright_cyan().bold());
    }

    for (name, text) in outputs {
        if is_tty && outputs.len() > 1 {
            eprintln!("{}", name.yellow());
        }
        if is_tty && text.starts_with("Error: ") {
            println!("{}", text.red());
        } else {
            println!("{text}");
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
}

/// `--json` rendition of a fallible tool. Tool errors print as
/// `{"error": ...}` and still exit successfully.
pub fn print_json_result<T: Serialize, E: std::fmt::Display>(
    result: std::result::Result<T, E>,
) -> Result<()> {
    match result {
        Ok(value) => print_json(&value),
        Err(err) => print_json(&ErrorOutput {
            error: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_prefers_positional() {
        assert_eq!(read_input(Some("abc".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_tool_runner_keeps_state_between_actions() {
        let outputs = ToolRunner::new(ToolKey::Hmac)
            .run(vec![
                Action::SetMessage("msg".to_string()),
                Action::SetKey("key".to_string()),
            ])
            .unwrap();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].1.starts_with("HMAC-SHA256: "));
    }

    #[test]
    fn test_tool_runner_without_actions_returns_initial_slots() {
        let outputs = ToolRunner::new(ToolKey::Jwt).run(Vec::new()).unwrap();
        assert_eq!(outputs[0], ("jwt_header", "{}".to_string()));
    }

    #[test]
    fn test_tool_runner_rejects_unsupported_action() {
        let err = ToolRunner::new(ToolKey::Uuid)
            .send(Action::Input("x".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("does not support"));
    }
}
