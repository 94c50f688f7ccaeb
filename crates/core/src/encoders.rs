//! Encoder and decoder tools: Base64, URL percent-encoding, HTML entities and
//! structural JWT decoding.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Direction of a codec tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

/// The two-way text codecs that share the encode/decode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Base64,
    Url,
    Html,
}

impl Codec {
    /// Run the codec in the given direction.
    ///
    /// Empty input always yields empty output.
    pub fn apply(self, mode: Mode, input: &str) -> Result<String, ToolError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        match (self, mode) {
            (Codec::Base64, Mode::Encode) => Ok(base64_encode(input)),
            (Codec::Base64, Mode::Decode) => base64_decode(input),
            (Codec::Url, Mode::Encode) => Ok(url_encode(input)),
            (Codec::Url, Mode::Decode) => url_decode(input),
            (Codec::Html, Mode::Encode) => Ok(html_encode(input)),
            (Codec::Html, Mode::Decode) => Ok(html_decode(input)),
        }
    }
}

// ============================================================================
// Base64
// ============================================================================

/// Standard (RFC 4648, padded) Base64 of the UTF-8 bytes of `input`.
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input.as_bytes())
}

/// Decode standard Base64 text back into a UTF-8 string.
///
/// ASCII whitespace is ignored so line-wrapped input decodes. Everything else
/// must be valid padded Base64.
pub fn base64_decode(input: &str) -> Result<String, ToolError> {
    let compact: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

// ============================================================================
// URL
// ============================================================================

/// Percent-encode everything outside the unreserved set (`A-Za-z0-9-_.~`).
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Percent-decode `input`.
///
/// A `%` that is not followed by two hex digits is rejected instead of being
/// passed through. `+` is left alone.
pub fn url_decode(input: &str) -> Result<String, ToolError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(ToolError::Decode(format!(
                "Invalid percent-encoding at byte {i}"
            )));
        }
        i += 3;
    }

    Ok(urlencoding::decode(input)?.into_owned())
}

// ============================================================================
// HTML entities
// ============================================================================

/// Escape `& < > " '` as HTML entities.
pub fn html_encode(input: &str) -> String {
    html_escape::encode_quoted_attribute(input).into_owned()
}

/// Resolve named and numeric character references.
pub fn html_decode(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

// ============================================================================
// JWT
// ============================================================================

/// Decoded header and payload of a JWT. The signature is kept verbatim and
/// never verified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JwtParts {
    pub header: serde_json::Value,
    pub payload: serde_json::Value,
    pub signature: String,
}

/// Structurally decode a JWT.
pub fn jwt_decode(token: &str) -> Result<JwtParts, ToolError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(ToolError::Format(
            "Invalid JWT format - expected 3 parts".to_string(),
        ));
    }

    Ok(JwtParts {
        header: decode_segment(parts[0])?,
        payload: decode_segment(parts[1])?,
        signature: parts[2].to_string(),
    })
}

/// Base64-URL segment with optional padding, holding a JSON document.
fn decode_segment(segment: &str) -> Result<serde_json::Value, ToolError> {
    let mut padded = segment.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = URL_SAFE.decode(padded.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Header and payload slot contents for a token.
///
/// An empty token shows `{}` in both slots. Any failure puts the error in the
/// header slot and clears the payload slot.
pub fn render_jwt(token: &str) -> (String, String) {
    if token.trim().is_empty() {
        return ("{}".to_string(), "{}".to_string());
    }

    let rendered = jwt_decode(token).and_then(|parts| {
        Ok((
            serde_json::to_string_pretty(&parts.header)?,
            serde_json::to_string_pretty(&parts.payload)?,
        ))
    });

    match rendered {
        Ok(slots) => slots,
        Err(err) => (err.to_slot(), String::new()),
    }
}
