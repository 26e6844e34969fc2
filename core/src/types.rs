//! Capability schema type definitions.
//!
//! This module defines the data model used to describe a command-line
//! program as a capability: a name, a prose description, and one typed
//! property per documented flag. The types serialize with [`serde`] and
//! round-trip through JSON unchanged.
//!
//! The property name of every [`PropertySchema`] IS the literal flag
//! spelling from the manual page (`-l`, `--sort`). That convention is
//! load-bearing in both directions: schema consumers generate argument
//! mappings keyed by flag spellings, and the invocation builder emits
//! those same spellings into argv without any renaming step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a capability property.
///
/// `Boolean` marks a toggle flag that takes no value; `String` marks a
/// flag that expects one. Kind inference is deliberately narrow: only an
/// effect text reading exactly `enable` or `disable` (case-insensitive,
/// trimmed) produces a toggle, everything else is assumed to carry a
/// value even when the manual prose never spells out a type.
///
/// # Examples
///
/// ```
/// use mancap_core::PropertyKind;
///
/// assert_eq!(PropertyKind::infer("enable"), PropertyKind::Boolean);
/// assert_eq!(PropertyKind::infer("  Disable  "), PropertyKind::Boolean);
/// assert_eq!(PropertyKind::infer("lists all entries"), PropertyKind::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Toggle flag; presence alone changes behavior.
    Boolean,
    /// Flag that expects an associated value.
    String,
}

impl PropertyKind {
    /// Infers the kind from a flag's effect text.
    pub fn infer(effect_text: &str) -> Self {
        let folded = effect_text.trim().to_lowercase();
        if folded == "enable" || folded == "disable" {
            PropertyKind::Boolean
        } else {
            PropertyKind::String
        }
    }

    /// Wire-format name of the kind (`"boolean"` or `"string"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::String => "string",
        }
    }
}

/// One typed property of a capability schema.
///
/// # Examples
///
/// ```
/// use mancap_core::{PropertyKind, PropertySchema};
///
/// let prop = PropertySchema::from_effect("-l", "use a long listing format");
/// assert_eq!(prop.flag, "-l");
/// assert_eq!(prop.kind, PropertyKind::String);
///
/// let toggle = PropertySchema::from_effect("--all", "enable");
/// assert!(toggle.is_toggle());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Literal flag spelling, short or long (e.g. `-l`, `--sort`).
    pub flag: String,
    /// Declared kind of the property.
    pub kind: PropertyKind,
    /// Effect text lifted from the manual page.
    pub description: String,
}

impl PropertySchema {
    /// Creates a property from a flag token and its effect text,
    /// inferring the kind.
    pub fn from_effect(flag: &str, effect_text: &str) -> Self {
        Self {
            flag: flag.to_string(),
            kind: PropertyKind::infer(effect_text),
            description: effect_text.to_string(),
        }
    }

    /// Whether the property is a toggle (boolean) flag.
    pub fn is_toggle(&self) -> bool {
        self.kind == PropertyKind::Boolean
    }
}

/// Outcome of extracting a command's DESCRIPTION prose.
///
/// The two absent reasons are distinct on purpose: "the page exists but
/// has no DESCRIPTION section" and "the command has no manual page at
/// all" surface as different description texts, and callers rely on
/// telling them apart.
///
/// # Examples
///
/// ```
/// use mancap_core::Description;
///
/// let found = Description::Found("list directory contents".into());
/// assert!(found.is_found());
///
/// let absent = Description::no_man_page("frobnicate");
/// assert_eq!(absent.to_text(), "No man page found for command 'frobnicate'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Trimmed DESCRIPTION body.
    Found(String),
    /// Page exists but no DESCRIPTION section matched.
    NoSection { command: String },
    /// Manual lookup produced no page at all.
    NoManPage { command: String },
}

impl Description {
    /// Absent reason for a page without a DESCRIPTION section.
    pub fn no_section(command: &str) -> Self {
        Description::NoSection {
            command: command.to_string(),
        }
    }

    /// Absent reason for a command with no manual page.
    pub fn no_man_page(command: &str) -> Self {
        Description::NoManPage {
            command: command.to_string(),
        }
    }

    /// Whether a DESCRIPTION body was actually extracted.
    pub fn is_found(&self) -> bool {
        matches!(self, Description::Found(_))
    }

    /// Renders the description as schema text.
    ///
    /// Absent reasons render verbatim, so downstream consumers see the
    /// exact circumstance instead of an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Description::Found(text) => text.clone(),
            Description::NoSection { command } => {
                format!("No DESCRIPTION found for command '{command}'")
            }
            Description::NoManPage { command } => {
                format!("No man page found for command '{command}'")
            }
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Capability schema for one command.
///
/// Built once from a single manual-page snapshot, immutable afterwards,
/// and deterministic: the same manual text always yields the same
/// property set in the same order. No property is ever required — the
/// extraction cannot reliably tell from prose which options are
/// mandatory, so the schema deliberately never claims one is.
///
/// # Examples
///
/// ```
/// use mancap_core::{CapabilitySchema, Description, PropertyKind};
///
/// let mut schema = CapabilitySchema::new(
///     "ls",
///     &Description::Found("list directory contents".into()),
/// );
/// schema.insert_property("-l", "use a long listing format");
/// schema.insert_property("--all", "enable");
///
/// assert_eq!(schema.properties.len(), 2);
/// assert_eq!(schema.find_property("--all").unwrap().kind, PropertyKind::Boolean);
///
/// // A repeated flag token overwrites the earlier effect text in place.
/// schema.insert_property("-l", "long format, with owner column");
/// assert_eq!(schema.properties.len(), 2);
/// assert_eq!(schema.properties[0].flag, "-l");
/// assert_eq!(schema.properties[0].description, "long format, with owner column");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySchema {
    /// The command name (e.g. `ls`, `tar`).
    pub command: String,
    /// Description text, or a verbatim absent reason.
    pub description: String,
    /// Properties in manual-page scan order, one per unique flag token.
    pub properties: Vec<PropertySchema>,
}

impl CapabilitySchema {
    /// Creates a schema with no properties yet.
    pub fn new(command: &str, description: &Description) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_text(),
            properties: Vec::new(),
        }
    }

    /// Inserts a property, overwriting a same-flag entry in place.
    ///
    /// Last write wins for the effect text (and the kind re-inferred from
    /// it); the first occurrence keeps its position.
    pub fn insert_property(&mut self, flag: &str, effect_text: &str) {
        if let Some(existing) = self.properties.iter_mut().find(|p| p.flag == flag) {
            *existing = PropertySchema::from_effect(flag, effect_text);
        } else {
            self.properties
                .push(PropertySchema::from_effect(flag, effect_text));
        }
    }

    /// Finds a property by its literal flag spelling.
    pub fn find_property(&self, flag: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.flag == flag)
    }

    /// All declared property names, in schema order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.flag.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference_is_exact_match_only() {
        assert_eq!(PropertyKind::infer("enable"), PropertyKind::Boolean);
        assert_eq!(PropertyKind::infer("DISABLE"), PropertyKind::Boolean);
        assert_eq!(PropertyKind::infer("enables colors"), PropertyKind::String);
        assert_eq!(PropertyKind::infer(""), PropertyKind::String);
    }

    #[test]
    fn test_absent_descriptions_render_verbatim() {
        assert_eq!(
            Description::no_section("tar").to_text(),
            "No DESCRIPTION found for command 'tar'"
        );
        assert_eq!(
            Description::no_man_page("tar").to_text(),
            "No man page found for command 'tar'"
        );
    }

    #[test]
    fn test_insert_property_last_write_wins_keeps_position() {
        let mut schema = CapabilitySchema::new("ls", &Description::Found("list contents".into()));
        schema.insert_property("-a", "enable");
        schema.insert_property("-l", "long listing");
        schema.insert_property("-a", "show hidden entries");

        assert_eq!(schema.property_names(), vec!["-a", "-l"]);
        let prop = schema.find_property("-a").unwrap();
        assert_eq!(prop.description, "show hidden entries");
        assert_eq!(prop.kind, PropertyKind::String);
    }

    #[test]
    fn test_schema_round_trips_through_json() {
        let mut schema = CapabilitySchema::new("ls", &Description::Found("list contents".into()));
        schema.insert_property("--all", "enable");

        let json = serde_json::to_string(&schema).unwrap();
        let back: CapabilitySchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
