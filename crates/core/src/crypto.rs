//! Hash and HMAC tools.
//!
//! MD5 and SHA-1 are offered for compatibility and checksum inspection only.
//! Neither is collision resistant; do not pick them for new security work.

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::ToolError;

type HmacSha256 = Hmac<Sha256>;

/// Digests of one input, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashDigests {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
    pub sha512: String,
}

impl HashDigests {
    pub fn render(&self) -> String {
        [
            format!("MD5:     {}", self.md5),
            format!("SHA-1:   {}", self.sha1),
            format!("SHA-256: {}", self.sha256),
            format!("SHA-512: {}", self.sha512),
        ]
        .join("\n")
    }
}

pub fn hash_generate(text: &str) -> HashDigests {
    let data = text.as_bytes();
    HashDigests {
        md5: format!("{:x}", md5::compute(data)),
        sha1: hex::encode(Sha1::digest(data)),
        sha256: hex::encode(Sha256::digest(data)),
        sha512: hex::encode(Sha512::digest(data)),
    }
}

/// Shown until both the message and the key are filled in.
pub const HMAC_PROMPT: &str = "Enter message and key";

/// HMAC-SHA256 of `message` under `key`, lowercase hex.
pub fn hmac_sha256(message: &str, key: &str) -> Result<String, ToolError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| ToolError::Format(format!("Invalid HMAC key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Slot text for the HMAC tool: a prompt until both fields are filled.
pub fn render_hmac(message: &str, key: &str) -> String {
    if message.is_empty() || key.is_empty() {
        return HMAC_PROMPT.to_string();
    }
    match hmac_sha256(message, key) {
        Ok(digest) => format!("HMAC-SHA256: {digest}"),
        Err(err) => err.to_slot(),
    }
}
