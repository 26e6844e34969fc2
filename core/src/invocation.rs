//! Argv construction from a validated argument mapping.
//!
//! The output is a literal token list intended for direct process exec,
//! never for interpolation into a shell string. Skipping the shell is the
//! load-bearing safety property: values land in argv byte-for-byte, so
//! there is nothing for a shell to re-interpret. Values are still not
//! checked against the command's real syntax — that remains the
//! executed program's problem.

use serde_json::Value;

use crate::ValidatedMapping;

/// Ordered argv token list; the first token is the command name.
pub type Invocation = Vec<String>;

/// Builds an argv list from a command name and validated arguments.
///
/// Encoding, applied per entry in mapping order:
/// - JSON `true` or the literal string `"true"` appends the flag token
///   alone. The toggle treatment is kind-independent: producers sometimes
///   send toggle-like strings for properties declared `string`, and those
///   behave the same as a real boolean.
/// - Any other value appends one token `flag=value` — a single argv
///   element with a literal equals sign, never two elements.
///
/// # Examples
///
/// ```
/// use mancap_core::{ArgumentMapping, CapabilitySchema, Description, build_invocation};
/// use serde_json::Value;
///
/// let mut schema = CapabilitySchema::new("ls", &Description::Found("list".into()));
/// schema.insert_property("-l", "enable");
/// schema.insert_property("--sort", "sort by WORD instead of name");
///
/// let mut mapping = ArgumentMapping::new();
/// mapping.insert("-l".into(), Value::Bool(true));
/// mapping.insert("--sort".into(), Value::String("name".into()));
/// let validated = schema.validate(mapping).unwrap();
///
/// assert_eq!(
///     build_invocation("ls", &validated),
///     vec!["ls", "-l", "--sort=name"],
/// );
/// ```
pub fn build_invocation(command: &str, mapping: &ValidatedMapping) -> Invocation {
    let mut argv = Vec::with_capacity(1 + mapping.len());
    argv.push(command.to_string());

    for (flag, value) in mapping.iter() {
        if is_toggle_true(value) {
            argv.push(flag.clone());
        } else {
            argv.push(format!("{flag}={}", literal_value(value)));
        }
    }

    argv
}

fn is_toggle_true(value: &Value) -> bool {
    match value {
        Value::Bool(true) => true,
        Value::String(s) => s == "true",
        _ => false,
    }
}

/// Renders a value as it should appear after the equals sign.
///
/// Strings are inserted raw (no JSON quotes); any other value uses its
/// JSON text.
fn literal_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgumentMapping, CapabilitySchema, Description};

    fn schema_with(flags: &[(&str, &str)]) -> CapabilitySchema {
        let mut schema = CapabilitySchema::new("ls", &Description::Found("list".into()));
        for (flag, effect) in flags {
            schema.insert_property(flag, effect);
        }
        schema
    }

    fn validated(schema: &CapabilitySchema, entries: &[(&str, Value)]) -> ValidatedMapping {
        let mut mapping = ArgumentMapping::new();
        for (flag, value) in entries {
            mapping.insert((*flag).to_string(), value.clone());
        }
        schema.validate(mapping).unwrap()
    }

    #[test]
    fn test_boolean_true_appends_flag_alone() {
        let schema = schema_with(&[("-l", "enable")]);
        let mapping = validated(&schema, &[("-l", Value::Bool(true))]);
        assert_eq!(build_invocation("ls", &mapping), vec!["ls", "-l"]);
    }

    #[test]
    fn test_string_value_becomes_single_equals_token() {
        let schema = schema_with(&[("--sort", "sort by WORD instead of name")]);
        let mapping = validated(&schema, &[("--sort", Value::String("name".into()))]);
        assert_eq!(build_invocation("ls", &mapping), vec!["ls", "--sort=name"]);
    }

    #[test]
    fn test_string_true_is_treated_as_toggle_regardless_of_kind() {
        // -z is declared boolean, the producer sent the string "true".
        let schema = schema_with(&[("-z", "enable")]);
        let mapping = validated(&schema, &[("-z", Value::String("true".into()))]);
        assert_eq!(build_invocation("ls", &mapping), vec!["ls", "-z"]);
    }

    #[test]
    fn test_boolean_false_is_encoded_as_value() {
        let schema = schema_with(&[("-z", "enable")]);
        let mapping = validated(&schema, &[("-z", Value::Bool(false))]);
        assert_eq!(build_invocation("ls", &mapping), vec!["ls", "-z=false"]);
    }

    #[test]
    fn test_tokens_follow_mapping_order() {
        let schema = schema_with(&[("-l", "enable"), ("--sort", "sort order"), ("-a", "enable")]);
        let mapping = validated(
            &schema,
            &[
                ("--sort", Value::String("size".into())),
                ("-a", Value::Bool(true)),
                ("-l", Value::Bool(true)),
            ],
        );
        assert_eq!(
            build_invocation("ls", &mapping),
            vec!["ls", "--sort=size", "-a", "-l"],
        );
    }

    #[test]
    fn test_all_boolean_round_trip_has_no_equals_tokens() {
        let schema = schema_with(&[("-a", "enable"), ("-l", "enable"), ("-t", "disable")]);
        let mapping = validated(
            &schema,
            &[
                ("-a", Value::Bool(true)),
                ("-l", Value::Bool(true)),
                ("-t", Value::Bool(true)),
            ],
        );

        let argv = build_invocation("ls", &mapping);
        assert_eq!(argv.len(), 1 + mapping.len());
        assert!(argv.iter().all(|token| !token.contains('=')));
    }

    #[test]
    fn test_value_with_shell_metacharacters_stays_one_token() {
        let schema = schema_with(&[("--pattern", "match entries against PATTERN")]);
        let mapping = validated(
            &schema,
            &[("--pattern", Value::String("$(rm -rf /); foo".into()))],
        );
        assert_eq!(
            build_invocation("ls", &mapping),
            vec!["ls", "--pattern=$(rm -rf /); foo"],
        );
    }
}
