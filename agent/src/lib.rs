//! Remote capability invocation and process execution.
//!
//! This crate covers everything on the far side of a [`CapabilitySchema`]:
//!
//! - [`wire`] — serializing one schema into a function-calling spec and
//!   decoding the response into plain text or a capability call.
//! - [`client`] — a blocking client for an OpenAI-compatible
//!   chat-completions endpoint.
//! - [`exec`] — running a finished argv list without a shell.
//!
//! Decoded argument mappings are returned raw; callers validate them
//! against the schema (key membership) before building an invocation,
//! so an unrecognized flag from the remote side can never reach argv.
//!
//! [`CapabilitySchema`]: mancap_core::CapabilitySchema

pub mod client;
pub mod exec;
pub mod wire;

use thiserror::Error;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, RemoteClient, RemoteConfig};
pub use exec::{ExecError, ExecOutput, run_invocation};
pub use wire::{CapabilityReply, FunctionSpec, decode_reply};

/// Failures of the remote collaboration.
#[derive(Debug, Error)]
pub enum AgentError {
    /// `OPENAI_API_KEY` is unset or empty.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("remote API returned status {status}: {detail}")]
    Api { status: u16, detail: String },
    /// The response does not follow the function-calling contract:
    /// unknown capability name, unparseable arguments, or no choices.
    /// Non-fatal for callers holding the raw message — fall back to its
    /// plain text instead of failing silently.
    #[error("remote protocol violation: {detail}")]
    RemoteProtocolViolation { detail: String },
}
