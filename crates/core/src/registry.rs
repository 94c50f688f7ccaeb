//! Typed registry of every tool.
//!
//! Shells route navigation and requests through [`ToolKey`] instead of
//! free-form strings. The string form of a key is stable and is what the CLI
//! and the MCP server expose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Navigation group a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Group {
    Encoders,
    Generators,
    Converters,
    Text,
    Crypto,
}

impl Group {
    pub fn title(self) -> &'static str {
        match self {
            Group::Encoders => "Encoders",
            Group::Generators => "Generators",
            Group::Converters => "Converters",
            Group::Text => "Text",
            Group::Crypto => "Crypto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKey {
    Base64,
    Url,
    Html,
    Jwt,
    Uuid,
    Password,
    Lorem,
    JsonYaml,
    Case,
    Number,
    Stats,
    Regex,
    Hash,
    Hmac,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl ToolKey {
    /// Every tool in navigation order.
    pub const ALL: [ToolKey; 14] = [
        ToolKey::Base64,
        ToolKey::Url,
        ToolKey::Html,
        ToolKey::Jwt,
        ToolKey::Uuid,
        ToolKey::Password,
        ToolKey::Lorem,
        ToolKey::JsonYaml,
        ToolKey::Case,
        ToolKey::Number,
        ToolKey::Stats,
        ToolKey::Regex,
        ToolKey::Hash,
        ToolKey::Hmac,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKey::Base64 => "base64",
            ToolKey::Url => "url",
            ToolKey::Html => "html",
            ToolKey::Jwt => "jwt",
            ToolKey::Uuid => "uuid",
            ToolKey::Password => "password",
            ToolKey::Lorem => "lorem",
            ToolKey::JsonYaml => "json_yaml",
            ToolKey::Case => "case",
            ToolKey::Number => "number",
            ToolKey::Stats => "stats",
            ToolKey::Regex => "regex",
            ToolKey::Hash => "hash",
            ToolKey::Hmac => "hmac",
        }
    }

    pub fn group(self) -> Group {
        match self {
            ToolKey::Base64 | ToolKey::Url | ToolKey::Html | ToolKey::Jwt => Group::Encoders,
            ToolKey::Uuid | ToolKey::Password | ToolKey::Lorem => Group::Generators,
            ToolKey::JsonYaml | ToolKey::Case | ToolKey::Number => Group::Converters,
            ToolKey::Stats | ToolKey::Regex => Group::Text,
            ToolKey::Hash | ToolKey::Hmac => Group::Crypto,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ToolKey::Base64 => "Base64 Encoder/Decoder",
            ToolKey::Url => "URL Encoder/Decoder",
            ToolKey::Html => "HTML Entity Encoder/Decoder",
            ToolKey::Jwt => "JWT Decoder",
            ToolKey::Uuid => "UUID Generator",
            ToolKey::Password => "Password Generator",
            ToolKey::Lorem => "Lorem Ipsum Generator",
            ToolKey::JsonYaml => "JSON to YAML Converter",
            ToolKey::Case => "Case Converter",
            ToolKey::Number => "Number Base Converter",
            ToolKey::Stats => "Text Statistics",
            ToolKey::Regex => "Regex Tester",
            ToolKey::Hash => "Hash Generator",
            ToolKey::Hmac => "HMAC Generator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKey::Base64 => "Encode and decode text using Base64 encoding.",
            ToolKey::Url => "Encode and decode URLs for safe transmission.",
            ToolKey::Html => "Encode and decode HTML entities.",
            ToolKey::Jwt => "Decode JWT tokens to view header and payload. The signature is not verified.",
            ToolKey::Uuid => "Generate UUIDs (Universally Unique Identifiers).",
            ToolKey::Password => "Generate secure random passwords.",
            ToolKey::Lorem => "Generate placeholder text.",
            ToolKey::JsonYaml => "Convert JSON to YAML format.",
            ToolKey::Case => "Convert text between different case formats.",
            ToolKey::Number => "Convert numbers between different bases.",
            ToolKey::Stats => "Analyze text and get detailed statistics.",
            ToolKey::Regex => "Test regular expressions against text.",
            ToolKey::Hash => "Generate cryptographic hashes from text.",
            ToolKey::Hmac => "Generate HMAC (Hash-based Message Authentication Code).",
        }
    }

    /// Names of the output slots a shell renders for this tool.
    pub fn slots(self) -> &'static [&'static str] {
        match self {
            ToolKey::Base64 => &["base64_out"],
            ToolKey::Url => &["url_out"],
            ToolKey::Html => &["html_out"],
            ToolKey::Jwt => &["jwt_header", "jwt_payload"],
            ToolKey::Uuid => &["uuid_result"],
            ToolKey::Password => &["password"],
            ToolKey::Lorem => &["lorem_out"],
            ToolKey::JsonYaml => &["yaml_out"],
            ToolKey::Case => &["case_out"],
            ToolKey::Number => &["base_out"],
            ToolKey::Stats => &["stats_out"],
            ToolKey::Regex => &["regex_out"],
            ToolKey::Hash => &["hash_out"],
            ToolKey::Hmac => &["hmac_out"],
        }
    }

    /// Tools in one navigation group.
    pub fn in_group(group: Group) -> impl Iterator<Item = ToolKey> {
        Self::ALL.into_iter().filter(move |key| key.group() == group)
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKey {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_key_round_trips_through_str() {
        for key in ToolKey::ALL {
            assert_eq!(key.as_str().parse::<ToolKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_tool_key_unknown() {
        let err = "base32".parse::<ToolKey>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: base32");
    }

    #[test]
    fn test_tool_key_serde_matches_as_str() {
        let json = serde_json::to_string(&ToolKey::JsonYaml).unwrap();
        assert_eq!(json, "\"json_yaml\"");
    }

    #[test]
    fn test_groups_cover_navigation_layout() {
        let encoders: Vec<_> = ToolKey::in_group(Group::Encoders).collect();
        assert_eq!(
            encoders,
            vec![ToolKey::Base64, ToolKey::Url, ToolKey::Html, ToolKey::Jwt]
        );
        assert_eq!(ToolKey::in_group(Group::Text).count(), 2);
        assert_eq!(ToolKey::in_group(Group::Crypto).count(), 2);
    }

    #[test]
    fn test_every_tool_has_a_slot() {
        for key in ToolKey::ALL {
            assert!(!key.slots().is_empty(), "{key} has no slots");
        }
        assert_eq!(ToolKey::Jwt.slots(), &["jwt_header", "jwt_payload"]);
    }
}
