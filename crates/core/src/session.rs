//! Per-session tool state.
//!
//! A [`Session`] holds everything a shell would otherwise keep in reactive
//! signals: codec modes, the two-field inputs of the HMAC and regex tools,
//! generator parameters and the named output slots. It is passed by `&mut`
//! into every handler; nothing is shared between sessions.

use std::collections::HashMap;

use crate::encoders::Mode;
use crate::generators::{
    self, DEFAULT_LOREM_PARAGRAPHS, DEFAULT_PASSWORD_LENGTH, MAX_LOREM_PARAGRAPHS,
    MAX_PASSWORD_LENGTH, MIN_LOREM_PARAGRAPHS, MIN_PASSWORD_LENGTH,
};
use crate::registry::ToolKey;

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) base64_mode: Mode,
    pub(crate) url_mode: Mode,
    pub(crate) html_mode: Mode,
    pub(crate) password_length: usize,
    pub(crate) lorem_paragraphs: usize,
    pub(crate) regex_pattern: String,
    pub(crate) regex_text: String,
    pub(crate) hmac_message: String,
    pub(crate) hmac_key: String,
    slots: HashMap<&'static str, String>,
}

impl Session {
    /// A fresh session with the initial slot values a new view shows: a
    /// generated UUID, password and Lorem Ipsum, `{}` for the JWT slots.
    pub fn new() -> Self {
        let mut slots: HashMap<&'static str, String> = ToolKey::ALL
            .iter()
            .flat_map(|key| key.slots().iter())
            .map(|slot| (*slot, String::new()))
            .collect();

        slots.insert("jwt_header", "{}".to_string());
        slots.insert("jwt_payload", "{}".to_string());
        slots.insert("uuid_result", generators::uuid_generate());
        slots.insert(
            "password",
            generators::password_generate(DEFAULT_PASSWORD_LENGTH),
        );
        slots.insert(
            "lorem_out",
            generators::lorem_ipsum(DEFAULT_LOREM_PARAGRAPHS),
        );
        slots.insert("regex_out", "No matches".to_string());

        Self {
            base64_mode: Mode::Encode,
            url_mode: Mode::Encode,
            html_mode: Mode::Encode,
            password_length: DEFAULT_PASSWORD_LENGTH,
            lorem_paragraphs: DEFAULT_LOREM_PARAGRAPHS,
            regex_pattern: String::new(),
            regex_text: String::new(),
            hmac_message: String::new(),
            hmac_key: String::new(),
            slots,
        }
    }

    /// Current text of a slot, `None` for names no tool declares.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    /// `(slot name, text)` pairs for a tool, in declaration order.
    pub fn outputs(&self, tool: ToolKey) -> Vec<(&'static str, String)> {
        tool.slots()
            .iter()
            .map(|name| (*name, self.slot(name).unwrap_or_default().to_string()))
            .collect()
    }

    pub fn mode(&self, tool: ToolKey) -> Option<Mode> {
        match tool {
            ToolKey::Base64 => Some(self.base64_mode),
            ToolKey::Url => Some(self.url_mode),
            ToolKey::Html => Some(self.html_mode),
            _ => None,
        }
    }

    pub fn password_length(&self) -> usize {
        self.password_length
    }

    pub fn lorem_paragraphs(&self) -> usize {
        self.lorem_paragraphs
    }

    pub(crate) fn set_slot(&mut self, name: &'static str, value: impl Into<String>) {
        self.slots.insert(name, value.into());
    }

    pub(crate) fn set_password_length(&mut self, length: usize) {
        self.password_length = length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
    }

    pub(crate) fn set_lorem_paragraphs(&mut self, paragraphs: usize) {
        self.lorem_paragraphs = paragraphs.clamp(MIN_LOREM_PARAGRAPHS, MAX_LOREM_PARAGRAPHS);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
