//! Capability schema extraction from manual pages.
//!
//! This crate turns the free-text manual page of a command into a
//! [`CapabilitySchema`]: the DESCRIPTION prose becomes the schema
//! description, and every documented flag becomes one typed property.
//!
//! # Main entry points
//!
//! - [`build_schema`] — look the page up through a [`ManualSource`] and
//!   build the schema.
//! - [`build_schema_from_text`] — build from pre-captured manual text
//!   without running anything.
//!
//! Both always return a usable schema: a missing page or a page without a
//! DESCRIPTION section surfaces as verbatim absent-reason text in the
//! schema description, and a page without recognizable options simply
//! yields zero properties.
//!
//! # Example
//!
//! ```
//! use mancap_manual::build_schema_from_text;
//!
//! let page = "\
//! NAME
//!     ls - list directory contents
//!
//! DESCRIPTION
//!     List information about the FILEs.
//!
//! OPTIONS
//!     -l  use a long listing format
//!     --all  enable
//! ";
//!
//! let schema = build_schema_from_text("ls", page);
//! assert_eq!(schema.command, "ls");
//! assert_eq!(schema.description, "List information about the FILEs.");
//! assert_eq!(schema.property_names(), vec!["-l", "--all"]);
//! ```
//!
//! [`CapabilitySchema`]: mancap_core::CapabilitySchema

pub mod description;
pub mod lookup;
pub mod options;
pub mod output;

use mancap_core::{CapabilitySchema, Description};
use tracing::debug;

pub use lookup::{ManCommand, ManualSource};

/// Builds the capability schema for `command`, fetching its manual page
/// through `source`.
///
/// The page is fetched once; the description segmenter and the option
/// extractor both consume the same snapshot. A failed lookup produces the
/// "no man page" schema with zero properties.
pub fn build_schema(command: &str, source: &impl ManualSource) -> CapabilitySchema {
    match source.manual_text(command) {
        Some(text) => build_schema_from_text(command, &text),
        None => schema_without_manual(command),
    }
}

/// Builds the capability schema from pre-captured manual text.
///
/// Deterministic and pure: the same text always yields the same schema,
/// with one property per unique flag token in scan order.
pub fn build_schema_from_text(command: &str, text: &str) -> CapabilitySchema {
    let description = description::extract_description(command, text);
    let mut schema = CapabilitySchema::new(command, &description);
    for entry in options::extract_options(text) {
        schema.insert_property(&entry.flag, &entry.effect);
    }

    debug!(
        command,
        description_found = description.is_found(),
        properties = schema.properties.len(),
        "Built capability schema"
    );
    schema
}

/// The schema for a command with no manual page at all.
pub fn schema_without_manual(command: &str) -> CapabilitySchema {
    CapabilitySchema::new(command, &Description::no_man_page(command))
}
