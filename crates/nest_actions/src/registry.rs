//! Closed catalog of actions the model may propose.
//!
//! Each descriptor lives in a `schema.json` next to its handler and is parsed
//! once. The registry is the only authority on which action names exist.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &JsonValue) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default)]
    pub required: bool,
    pub description: String,
    /// Closed set of accepted string values.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
}

impl ActionSchema {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &ParamSpec> {
        self.parameters.iter().filter(|p| p.required)
    }

    /// JSON-schema `object` handed to the model as the function's parameters.
    pub fn to_json_schema(&self) -> JsonValue {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut prop = json!({
                "type": param.kind.as_str(),
                "description": param.description,
            });
            if let Some(allowed) = &param.allowed {
                prop["enum"] = json!(allowed);
            }
            properties.insert(param.name.clone(), prop);
        }
        let required: Vec<&str> = self.required().map(|p| p.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check untyped model arguments against this descriptor.
    ///
    /// `null` counts as an empty object. Required parameters must be present,
    /// non-null and (for strings) non-blank. Optional parameters may be `null`,
    /// which callers treat as "clear". Unknown keys are ignored.
    pub fn validate(&self, args: &JsonValue) -> Result<(), ActionError> {
        let empty = Map::new();
        let obj = match args {
            JsonValue::Null => &empty,
            JsonValue::Object(obj) => obj,
            other => {
                return Err(ActionError::InvalidArguments(format!(
                    "{} expects an object of parameters, got {}",
                    self.name,
                    json_kind(other)
                )));
            }
        };

        for param in &self.parameters {
            let value = obj.get(&param.name).unwrap_or(&JsonValue::Null);

            if value.is_null() {
                if param.required {
                    return Err(ActionError::MissingParameter(param.name.clone()));
                }
                continue;
            }

            if !param.kind.accepts(value) {
                return Err(ActionError::InvalidParameter {
                    name: param.name.clone(),
                    reason: format!("expected {}, got {}", param.kind.as_str(), json_kind(value)),
                });
            }

            if let Some(text) = value.as_str() {
                if param.required && text.trim().is_empty() {
                    return Err(ActionError::MissingParameter(param.name.clone()));
                }
                if let Some(allowed) = &param.allowed {
                    if !allowed.iter().any(|a| a == text) {
                        return Err(ActionError::InvalidParameter {
                            name: param.name.clone(),
                            reason: format!("must be one of {}", allowed.join(", ")),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Parse a bundled `schema.json`. Panics on malformed input; every bundled
/// schema is covered by the registry tests.
pub(crate) fn parse_action_schema(raw: &'static str) -> ActionSchema {
    match serde_json::from_str(raw) {
        Ok(schema) => schema,
        Err(e) => panic!("malformed bundled action schema: {e}"),
    }
}

/// Name, description and JSON-schema parameters of one action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionInfo {
    pub name: String,
    pub description: String,
    pub parameters: JsonValue,
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    schemas: Vec<ActionSchema>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight built-in list and task actions.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for action in crate::actions::builtin() {
            registry.register(action.schema().clone());
        }
        registry
    }

    /// Add a descriptor, replacing any existing one with the same name.
    pub fn register(&mut self, schema: ActionSchema) {
        match self.schemas.iter_mut().find(|s| s.name == schema.name) {
            Some(existing) => *existing = schema,
            None => self.schemas.push(schema),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ActionSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn schemas(&self) -> &[ActionSchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Capability manifest in registration order.
    pub fn manifest(&self) -> Vec<ActionInfo> {
        self.schemas
            .iter()
            .map(|s| ActionInfo {
                name: s.name.clone(),
                description: s.description.clone(),
                parameters: s.to_json_schema(),
            })
            .collect()
    }
}
