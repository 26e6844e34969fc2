//! Core types for turning manual-page capabilities into safe invocations.
//!
//! This crate defines the shared data model of the workspace:
//!
//! - [`CapabilitySchema`] — a command described as a capability: name,
//!   prose description, and one typed property per documented flag.
//! - [`PropertySchema`] / [`PropertyKind`] — a single flag property; the
//!   property name is the literal flag spelling.
//! - [`Description`] — extracted DESCRIPTION prose, or one of two
//!   distinct absent reasons rendered verbatim.
//! - [`ArgumentMapping`] / [`ValidatedMapping`] — caller-supplied
//!   arguments and the proof they passed [`CapabilitySchema::validate`].
//! - [`build_invocation`] — encodes a validated mapping into an argv
//!   token list for shell-free execution.
//!
//! # Example
//!
//! ```
//! use mancap_core::*;
//! use serde_json::Value;
//!
//! let mut schema = CapabilitySchema::new(
//!     "ls",
//!     &Description::Found("list directory contents".into()),
//! );
//! schema.insert_property("-l", "enable");
//! schema.insert_property("--sort", "sort by WORD instead of name");
//!
//! let mut mapping = ArgumentMapping::new();
//! mapping.insert("-l".into(), Value::Bool(true));
//! mapping.insert("--sort".into(), Value::String("name".into()));
//!
//! let validated = schema.validate(mapping)?;
//! assert_eq!(build_invocation("ls", &validated), vec!["ls", "-l", "--sort=name"]);
//! # Ok::<(), mancap_core::SchemaError>(())
//! ```

mod invocation;
mod mapping;
mod types;

pub use invocation::{Invocation, build_invocation};
pub use mapping::{ArgumentMapping, SchemaError, ValidatedMapping};
pub use types::{CapabilitySchema, Description, PropertyKind, PropertySchema};
