//! Typed event dispatch.
//!
//! An [`Event`] pairs a [`ToolKey`] with an [`Action`]. [`dispatch`] resolves
//! the tool through an explicit handler table, runs the handler against the
//! session and returns the tool's refreshed output slots. Tool failures are
//! written into the slots as `"Error: ..."` text and never returned; the only
//! error here is an action the tool does not understand.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::converters::{case_convert, json_to_yaml, number_base_convert};
use crate::crypto::{hash_generate, render_hmac};
use crate::encoders::{render_jwt, Codec, Mode};
use crate::error::ToolError;
use crate::generators::{lorem_ipsum, password_generate, uuid_generate};
use crate::registry::ToolKey;
use crate::session::Session;
use crate::text::{regex_test, stats_analyze, REGEX_PROMPT};

/// What happened in the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// The tool's main input changed
    Input(String),
    /// Codec direction selected
    SetMode(Mode),
    SetPattern(String),
    SetText(String),
    SetMessage(String),
    SetKey(String),
    SetLength(usize),
    SetParagraphs(usize),
    /// Generate button pressed
    Generate,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Input(_) => "input",
            Action::SetMode(_) => "set_mode",
            Action::SetPattern(_) => "set_pattern",
            Action::SetText(_) => "set_text",
            Action::SetMessage(_) => "set_message",
            Action::SetKey(_) => "set_key",
            Action::SetLength(_) => "set_length",
            Action::SetParagraphs(_) => "set_paragraphs",
            Action::Generate => "generate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub tool: ToolKey,
    #[serde(flatten)]
    pub action: Action,
}

impl Event {
    pub fn new(tool: ToolKey, action: Action) -> Self {
        Self { tool, action }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Tool '{tool}' does not support action '{action}'")]
    Unsupported { tool: ToolKey, action: &'static str },
}

type Handler = fn(&mut Session, ToolKey, Action) -> Result<(), DispatchError>;

const HANDLERS: [(ToolKey, Handler); 14] = [
    (ToolKey::Base64, handle_base64),
    (ToolKey::Url, handle_url),
    (ToolKey::Html, handle_html),
    (ToolKey::Jwt, handle_jwt),
    (ToolKey::Uuid, handle_uuid),
    (ToolKey::Password, handle_password),
    (ToolKey::Lorem, handle_lorem),
    (ToolKey::JsonYaml, handle_json_yaml),
    (ToolKey::Case, handle_case),
    (ToolKey::Number, handle_number),
    (ToolKey::Stats, handle_stats),
    (ToolKey::Regex, handle_regex),
    (ToolKey::Hash, handle_hash),
    (ToolKey::Hmac, handle_hmac),
];

/// Apply one event to the session and return the tool's output slots.
pub fn dispatch(
    session: &mut Session,
    event: Event,
) -> Result<Vec<(&'static str, String)>, DispatchError> {
    let tool = event.tool;
    let handler = HANDLERS
        .iter()
        .find(|(key, _)| *key == tool)
        .map(|(_, handler)| *handler)
        .ok_or(DispatchError::Unsupported {
            tool,
            action: event.action.name(),
        })?;

    handler(session, tool, event.action)?;
    Ok(session.outputs(tool))
}

fn unsupported(tool: ToolKey, action: &Action) -> DispatchError {
    DispatchError::Unsupported {
        tool,
        action: action.name(),
    }
}

/// Slot text for a fallible tool whose empty input clears the slot.
fn slot_text<T>(
    input: &str,
    run: impl FnOnce(&str) -> Result<T, ToolError>,
    render: impl FnOnce(T) -> String,
) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match run(input) {
        Ok(value) => render(value),
        Err(err) => err.to_slot(),
    }
}

// ============================================================================
// Encoders
// ============================================================================

fn handle_base64(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    handle_codec(session, tool, action, Codec::Base64, "base64_out", |s| &mut s.base64_mode)
}

fn handle_url(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    handle_codec(session, tool, action, Codec::Url, "url_out", |s| &mut s.url_mode)
}

fn handle_html(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    handle_codec(session, tool, action, Codec::Html, "html_out", |s| &mut s.html_mode)
}

fn handle_codec(
    session: &mut Session,
    tool: ToolKey,
    action: Action,
    codec: Codec,
    slot: &'static str,
    mode: fn(&mut Session) -> &mut Mode,
) -> Result<(), DispatchError> {
    match action {
        Action::SetMode(selected) => {
            *mode(session) = selected;
            Ok(())
        }
        Action::Input(text) => {
            let selected = *mode(session);
            let output = match codec.apply(selected, &text) {
                Ok(output) => output,
                Err(err) => err.to_slot(),
            };
            session.set_slot(slot, output);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_jwt(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Input(token) => {
            let (header, payload) = render_jwt(&token);
            session.set_slot("jwt_header", header);
            session.set_slot("jwt_payload", payload);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

// ============================================================================
// Generators
// ============================================================================

fn handle_uuid(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Generate => {
            session.set_slot("uuid_result", uuid_generate());
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_password(
    session: &mut Session,
    tool: ToolKey,
    action: Action,
) -> Result<(), DispatchError> {
    match action {
        Action::SetLength(length) => {
            session.set_password_length(length);
            Ok(())
        }
        Action::Generate => {
            let password = password_generate(session.password_length());
            session.set_slot("password", password);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_lorem(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::SetParagraphs(paragraphs) => {
            session.set_lorem_paragraphs(paragraphs);
            Ok(())
        }
        Action::Generate => {
            let text = lorem_ipsum(session.lorem_paragraphs());
            session.set_slot("lorem_out", text);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

// ============================================================================
// Converters
// ============================================================================

fn handle_json_yaml(
    session: &mut Session,
    tool: ToolKey,
    action: Action,
) -> Result<(), DispatchError> {
    match action {
        Action::Input(text) => {
            session.set_slot("yaml_out", slot_text(&text, json_to_yaml, |yaml| yaml));
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_case(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Input(text) => {
            let output = if text.is_empty() {
                String::new()
            } else {
                case_convert(&text).render()
            };
            session.set_slot("case_out", output);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_number(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Input(text) => {
            let output = slot_text(&text, number_base_convert, |bases| bases.render());
            session.set_slot("base_out", output);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

// ============================================================================
// Text
// ============================================================================

fn handle_stats(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Input(text) => {
            let output = if text.is_empty() {
                String::new()
            } else {
                stats_analyze(&text).render()
            };
            session.set_slot("stats_out", output);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_regex(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::SetPattern(pattern) => session.regex_pattern = pattern,
        Action::SetText(text) => session.regex_text = text,
        other => return Err(unsupported(tool, &other)),
    }

    // Always recompute from both fields
    let output = if session.regex_pattern.is_empty() || session.regex_text.is_empty() {
        REGEX_PROMPT.to_string()
    } else {
        match regex_test(&session.regex_pattern, &session.regex_text) {
            Ok(report) => report.render(),
            Err(err) => err.to_slot(),
        }
    };
    session.set_slot("regex_out", output);
    Ok(())
}

// ============================================================================
// Crypto
// ============================================================================

fn handle_hash(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::Input(text) => {
            let output = if text.is_empty() {
                String::new()
            } else {
                hash_generate(&text).render()
            };
            session.set_slot("hash_out", output);
            Ok(())
        }
        other => Err(unsupported(tool, &other)),
    }
}

fn handle_hmac(session: &mut Session, tool: ToolKey, action: Action) -> Result<(), DispatchError> {
    match action {
        Action::SetMessage(message) => session.hmac_message = message,
        Action::SetKey(key) => session.hmac_key = key,
        other => return Err(unsupported(tool, &other)),
    }

    let output = render_hmac(&session.hmac_message, &session.hmac_key);
    session.set_slot("hmac_out", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, tool: ToolKey, action: Action) -> Vec<(&'static str, String)> {
        dispatch(session, Event::new(tool, action)).unwrap()
    }

    fn single(session: &mut Session, tool: ToolKey, action: Action) -> String {
        run(session, tool, action).remove(0).1
    }

    // ============================================================================
    // handler table tests
    // ============================================================================

    #[test]
    fn test_every_tool_has_a_handler() {
        for key in ToolKey::ALL {
            assert!(HANDLERS.iter().any(|(k, _)| *k == key), "{key} missing");
        }
    }

    #[test]
    fn test_unsupported_action() {
        let mut session = Session::new();
        let err = dispatch(
            &mut session,
            Event::new(ToolKey::Hash, Action::SetMode(Mode::Decode)),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tool 'hash' does not support action 'set_mode'"
        );
    }

    #[test]
    fn test_event_serde_shape() {
        let event = Event::new(ToolKey::Base64, Action::SetMode(Mode::Decode));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tool": "base64", "action": "set_mode", "value": "decode"})
        );
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    // ============================================================================
    // codec tests
    // ============================================================================

    #[test]
    fn test_codec_mode_switch() {
        let mut session = Session::new();
        assert_eq!(
            single(&mut session, ToolKey::Base64, Action::Input("hello".into())),
            "aGVsbG8="
        );

        run(&mut session, ToolKey::Base64, Action::SetMode(Mode::Decode));
        assert_eq!(
            single(&mut session, ToolKey::Base64, Action::Input("aGVsbG8=".into())),
            "hello"
        );
    }

    #[test]
    fn test_codec_modes_are_per_tool() {
        let mut session = Session::new();
        run(&mut session, ToolKey::Url, Action::SetMode(Mode::Decode));
        assert_eq!(session.mode(ToolKey::Url), Some(Mode::Decode));
        assert_eq!(session.mode(ToolKey::Html), Some(Mode::Encode));
        assert_eq!(
            single(&mut session, ToolKey::Html, Action::Input("<b>".into())),
            "&lt;b&gt;"
        );
    }

    #[test]
    fn test_codec_handlers_own_slot_and_mode() {
        let mut session = Session::new();
        run(&mut session, ToolKey::Html, Action::SetMode(Mode::Decode));
        assert_eq!(session.mode(ToolKey::Base64), Some(Mode::Encode));
        assert_eq!(session.mode(ToolKey::Url), Some(Mode::Encode));

        let outputs = run(&mut session, ToolKey::Url, Action::Input("a b".into()));
        assert_eq!(outputs, vec![("url_out", "a%20b".to_string())]);
        let outputs = run(&mut session, ToolKey::Html, Action::Input("&amp;".into()));
        assert_eq!(outputs, vec![("html_out", "&".to_string())]);
        assert_eq!(session.slot("base64_out"), Some(""));
    }

    #[test]
    fn test_codec_error_goes_to_slot() {
        let mut session = Session::new();
        run(&mut session, ToolKey::Url, Action::SetMode(Mode::Decode));
        let output = single(&mut session, ToolKey::Url, Action::Input("%zz".into()));
        assert!(output.starts_with("Error: "));
    }

    #[test]
    fn test_codec_empty_input_clears_slot() {
        let mut session = Session::new();
        single(&mut session, ToolKey::Base64, Action::Input("x".into()));
        assert_eq!(single(&mut session, ToolKey::Base64, Action::Input(String::new())), "");
    }

    #[test]
    fn test_jwt_error_clears_payload() {
        let mut session = Session::new();
        let outputs = run(&mut session, ToolKey::Jwt, Action::Input("a.b".into()));
        assert_eq!(outputs[0].0, "jwt_header");
        assert!(outputs[0].1.contains("3 parts"));
        assert_eq!(outputs[1], ("jwt_payload", String::new()));
    }

    // ============================================================================
    // generator tests
    // ============================================================================

    #[test]
    fn test_uuid_generate_replaces_slot() {
        let mut session = Session::new();
        let before = session.slot("uuid_result").unwrap().to_string();
        let after = single(&mut session, ToolKey::Uuid, Action::Generate);
        assert_ne!(before, after);
    }

    #[test]
    fn test_password_uses_session_length() {
        let mut session = Session::new();
        run(&mut session, ToolKey::Password, Action::SetLength(32));
        assert_eq!(single(&mut session, ToolKey::Password, Action::Generate).len(), 32);
    }

    #[test]
    fn test_lorem_uses_session_paragraphs() {
        let mut session = Session::new();
        run(&mut session, ToolKey::Lorem, Action::SetParagraphs(5));
        let text = single(&mut session, ToolKey::Lorem, Action::Generate);
        assert_eq!(text.split("\n\n").count(), 5);
    }

    // ============================================================================
    // converter and text tests
    // ============================================================================

    #[test]
    fn test_number_invalid_input() {
        let mut session = Session::new();
        assert_eq!(
            single(&mut session, ToolKey::Number, Action::Input("abc".into())),
            "Error: Invalid decimal number"
        );
        assert_eq!(single(&mut session, ToolKey::Number, Action::Input("  ".into())), "");
    }

    #[test]
    fn test_json_yaml_error_and_success() {
        let mut session = Session::new();
        let err = single(&mut session, ToolKey::JsonYaml, Action::Input("{".into()));
        assert!(err.starts_with("Error: "));
        let yaml = single(&mut session, ToolKey::JsonYaml, Action::Input(r#"{"a": [1]}"#.into()));
        assert_eq!(yaml, "a:\n  - 1");
    }

    #[test]
    fn test_case_and_stats_render() {
        let mut session = Session::new();
        let case = single(&mut session, ToolKey::Case, Action::Input("hello world".into()));
        assert!(case.contains("snake_case: hello_world"));
        let stats = single(&mut session, ToolKey::Stats, Action::Input("one two".into()));
        assert!(stats.contains("Words: 2"));
    }

    #[test]
    fn test_regex_recomputes_from_both_fields() {
        let mut session = Session::new();
        assert_eq!(
            single(&mut session, ToolKey::Regex, Action::SetPattern(r"\d+".into())),
            "Enter pattern and text to test"
        );
        let output = single(&mut session, ToolKey::Regex, Action::SetText("a1 b22".into()));
        assert!(output.starts_with("Found 2 match(es):"));

        // Changing only the pattern must use the stored text
        let output = single(&mut session, ToolKey::Regex, Action::SetPattern("b".into()));
        assert!(output.contains("Match 1: 'b' at position 3-4"));

        let output = single(&mut session, ToolKey::Regex, Action::SetPattern("(".into()));
        assert!(output.starts_with("Error: Invalid regex: "));

        let output = single(&mut session, ToolKey::Regex, Action::SetPattern("z".into()));
        assert_eq!(output, "No matches found");
    }

    // ============================================================================
    // crypto tests
    // ============================================================================

    #[test]
    fn test_hash_empty_input_clears_slot() {
        let mut session = Session::new();
        assert_eq!(single(&mut session, ToolKey::Hash, Action::Input(String::new())), "");
        let output = single(&mut session, ToolKey::Hash, Action::Input("hello".into()));
        assert!(output.starts_with("MD5:     5d41402abc4b2a76b9719d911017c592"));
    }

    #[test]
    fn test_hmac_recomputes_from_both_fields() {
        let mut session = Session::new();
        assert_eq!(
            single(&mut session, ToolKey::Hmac, Action::SetMessage("msg".into())),
            "Enter message and key"
        );
        let first = single(&mut session, ToolKey::Hmac, Action::SetKey("k1".into()));
        assert!(first.starts_with("HMAC-SHA256: "));

        let second = single(&mut session, ToolKey::Hmac, Action::SetKey("k2".into()));
        assert_ne!(first, second);

        let again = single(&mut session, ToolKey::Hmac, Action::SetKey("k1".into()));
        assert_eq!(first, again);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::new();
        let mut b = Session::new();
        run(&mut a, ToolKey::Base64, Action::SetMode(Mode::Decode));
        assert_eq!(b.mode(ToolKey::Base64), Some(Mode::Encode));
        single(&mut b, ToolKey::Hash, Action::Input("x".into()));
        assert_eq!(a.slot("hash_out"), Some(""));
    }
}
