//! Argument-mapping validation against a capability schema.
//!
//! An [`ArgumentMapping`] arrives from outside the trust boundary
//! (typically decoded from a remote model's function call). Every key
//! must be a property the schema declares; an unrecognized key forwarded
//! into argv would be a direct injection surface into the executed
//! process, so validation happens here, before invocation building is
//! ever attempted. The result is a [`ValidatedMapping`], which is the
//! only input type [`build_invocation`](crate::build_invocation) accepts.

use serde_json::Value;
use thiserror::Error;

use crate::CapabilitySchema;

/// Mapping from property name (literal flag spelling) to argument value.
///
/// `serde_json::Map` preserves insertion order (the `preserve_order`
/// feature), so iteration follows the order in which the producer emitted
/// the arguments.
pub type ArgumentMapping = serde_json::Map<String, Value>;

/// Errors raised at the schema boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A mapping key is not declared as a property of the schema.
    #[error("invalid argument '{flag}': not a declared property of '{command}'")]
    InvalidArgument { command: String, flag: String },
}

/// An argument mapping that passed [`CapabilitySchema::validate`].
///
/// Holds the entries in their original iteration order. Construction is
/// only possible through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMapping {
    entries: ArgumentMapping,
}

impl ValidatedMapping {
    /// Number of argument entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl CapabilitySchema {
    /// Validates an argument mapping against this schema's properties.
    ///
    /// Every key must be a declared property name; the first unknown key
    /// fails the whole mapping with [`SchemaError::InvalidArgument`].
    /// Values are not checked against the command's real syntax — only
    /// key membership guards the boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use mancap_core::{ArgumentMapping, CapabilitySchema, Description, SchemaError};
    /// use serde_json::Value;
    ///
    /// let mut schema = CapabilitySchema::new("ls", &Description::Found("list".into()));
    /// schema.insert_property("-l", "use a long listing format");
    ///
    /// let mut ok = ArgumentMapping::new();
    /// ok.insert("-l".into(), Value::Bool(true));
    /// assert!(schema.validate(ok).is_ok());
    ///
    /// let mut bad = ArgumentMapping::new();
    /// bad.insert("--bogus".into(), Value::String("x".into()));
    /// assert_eq!(
    ///     schema.validate(bad),
    ///     Err(SchemaError::InvalidArgument {
    ///         command: "ls".into(),
    ///         flag: "--bogus".into(),
    ///     })
    /// );
    /// ```
    pub fn validate(&self, mapping: ArgumentMapping) -> Result<ValidatedMapping, SchemaError> {
        for flag in mapping.keys() {
            if self.find_property(flag).is_none() {
                return Err(SchemaError::InvalidArgument {
                    command: self.command.clone(),
                    flag: flag.clone(),
                });
            }
        }
        Ok(ValidatedMapping { entries: mapping })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Description;

    fn ls_schema() -> CapabilitySchema {
        let mut schema = CapabilitySchema::new("ls", &Description::Found("list".into()));
        schema.insert_property("-l", "use a long listing format");
        schema.insert_property("--sort", "sort by WORD instead of name");
        schema
    }

    #[test]
    fn test_validate_accepts_subset_of_properties() {
        let mut mapping = ArgumentMapping::new();
        mapping.insert("-l".to_string(), Value::Bool(true));

        let validated = ls_schema().validate(mapping).unwrap();
        assert_eq!(validated.len(), 1);
    }

    #[test]
    fn test_validate_accepts_empty_mapping() {
        let validated = ls_schema().validate(ArgumentMapping::new()).unwrap();
        assert!(validated.is_empty());
    }

    #[test]
    fn test_validate_rejects_unknown_key() {
        let mut mapping = ArgumentMapping::new();
        mapping.insert("-l".to_string(), Value::Bool(true));
        mapping.insert("--bogus".to_string(), Value::String("x".to_string()));

        let err = ls_schema().validate(mapping).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidArgument {
                command: "ls".to_string(),
                flag: "--bogus".to_string(),
            }
        );
    }

    #[test]
    fn test_validated_mapping_preserves_insertion_order() {
        let mut mapping = ArgumentMapping::new();
        mapping.insert("--sort".to_string(), Value::String("name".to_string()));
        mapping.insert("-l".to_string(), Value::Bool(true));

        let validated = ls_schema().validate(mapping).unwrap();
        let keys: Vec<&str> = validated.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["--sort", "-l"]);
    }
}
