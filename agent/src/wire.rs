//! Function-calling wire format.
//!
//! One [`CapabilitySchema`] serializes to one function spec: the name is
//! the command with a `_command` suffix, the parameters are an object
//! schema with one `boolean`/`string` property per flag, and the
//! required list is always empty. The shape is stable and
//! round-trippable; decoding reverses the naming convention and parses
//! the argument mapping back out of the response.

use mancap_core::{ArgumentMapping, CapabilitySchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::AgentError;

/// Suffix appended to the command name to form the capability name.
pub const CAPABILITY_NAME_SUFFIX: &str = "_command";

/// Wire name of a command's capability (e.g. `ls` → `ls_command`).
pub fn capability_name(command: &str) -> String {
    format!("{command}{CAPABILITY_NAME_SUFFIX}")
}

/// A capability schema serialized per the function-calling contract.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    #[serde(rename = "type")]
    pub spec_type: &'static str,
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionSpec {
    /// Builds the wire spec for one schema.
    pub fn from_schema(schema: &CapabilitySchema) -> Self {
        let mut properties = Map::new();
        for prop in &schema.properties {
            properties.insert(
                prop.flag.clone(),
                json!({
                    "type": prop.kind.as_str(),
                    "description": prop.description,
                }),
            );
        }

        Self {
            spec_type: "function",
            name: capability_name(&schema.command),
            description: schema.description.clone(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": [],
            }),
        }
    }
}

/// Assistant message returned by the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

/// A chosen capability plus its serialized arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Argument mapping as a JSON-encoded string, per the wire contract.
    pub arguments: String,
}

/// Decoded outcome of one capability request.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityReply {
    /// No capability was invoked; the reply is plain text.
    Text(String),
    /// The offered capability was chosen with the given arguments.
    Call {
        command: String,
        mapping: ArgumentMapping,
    },
}

/// Decodes a response message against the schema that was offered.
///
/// A message without a function call is plain text. A function call must
/// name exactly the offered capability and carry arguments that parse as
/// a JSON object; anything else is a [`AgentError::RemoteProtocolViolation`].
/// The mapping is returned unvalidated — key membership is checked by
/// [`CapabilitySchema::validate`] before any argv is built.
pub fn decode_reply(
    schema: &CapabilitySchema,
    message: &ResponseMessage,
) -> Result<CapabilityReply, AgentError> {
    let Some(call) = &message.function_call else {
        return Ok(CapabilityReply::Text(
            message.content.clone().unwrap_or_default(),
        ));
    };

    let expected = capability_name(&schema.command);
    if call.name != expected {
        return Err(AgentError::RemoteProtocolViolation {
            detail: format!(
                "response names capability '{}', offered '{expected}'",
                call.name
            ),
        });
    }

    let mapping: ArgumentMapping =
        serde_json::from_str(&call.arguments).map_err(|e| AgentError::RemoteProtocolViolation {
            detail: format!("capability arguments are not a JSON object: {e}"),
        })?;

    Ok(CapabilityReply::Call {
        command: schema.command.clone(),
        mapping,
    })
}
