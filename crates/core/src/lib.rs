//! Core library for toolbelt
//!
//! This crate implements the **Functional Core** of the toolbelt application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The toolbelt project uses a two-crate architecture:
//!
//! - **`toolbelt_core`** (this crate): Tool transformations, the tool registry,
//!   per-session state and the event dispatcher
//! - **`toolbelt`**: The CLI and the MCP server (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! Tool functions take text and return text or structured values. The only
//! impure pieces are the generators, which read an RNG. Everything that needs
//! randomness also has a variant that accepts an injected `Rng` so tests can
//! seed it.
//!
//! Tool failures never escape as panics or shell errors. Each fallible tool
//! returns a [`ToolError`], and the dispatcher renders it into the tool's
//! output slot as `"Error: <message>"`.
//!
//! # Module Organization
//!
//! - [`encoders`]: Base64, URL, HTML entities and JWT decoding
//! - [`generators`]: UUID v4, passwords and Lorem Ipsum
//! - [`converters`]: JSON to YAML, case variants and number bases
//! - [`text`]: Text statistics and regex testing
//! - [`crypto`]: Hash digests and HMAC-SHA256
//! - [`registry`]: The typed [`ToolKey`] list with titles, groups and slots
//! - [`session`]: Per-session modes, parameters and output slots
//! - [`dispatch`]: Routes an [`Event`] to its handler and returns the slots
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use toolbelt_core::{dispatch, Action, Event, Session, ToolKey};
//!
//! let mut session = Session::new();
//! let outputs = dispatch(
//!     &mut session,
//!     Event::new(ToolKey::Base64, Action::Input("hello".to_string())),
//! )?;
//!
//! assert_eq!(outputs, vec![("base64_out", "aGVsbG8=".to_string())]);
//! ```

pub mod converters;
pub mod crypto;
pub mod dispatch;
pub mod encoders;
pub mod error;
pub mod generators;
pub mod registry;
pub mod session;
pub mod text;

pub use dispatch::{dispatch, Action, DispatchError, Event};
pub use error::ToolError;
pub use registry::{Group, ToolKey, UnknownTool};
pub use session::Session;
