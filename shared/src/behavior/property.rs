use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brainstem_serde::Color;

use crate::memory::Memory;

/// The kind of value a behavior property holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertyType {
    Boolean,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    String,
    Enum {
        options: Vec<String>,
    },
    /// Name of a single actor; empty means none
    Actor,
    /// One actor name, or a list of them
    ActorGroup,
    /// Ordered use ids from the same brain
    Deck,
    Color,
}

/// One entry of a behavior's property schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default: Value,
}

impl PropertySpec {
    pub fn new(name: &str, property_type: PropertyType, default: Value) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            property_type,
            default,
        }
    }

    pub fn boolean(name: &str, default: bool) -> Self {
        Self::new(name, PropertyType::Boolean, Value::Bool(default))
    }

    pub fn number(name: &str, default: f64) -> Self {
        Self::new(
            name,
            PropertyType::Number {
                min: None,
                max: None,
            },
            Value::from(default),
        )
    }

    pub fn string(name: &str, default: &str) -> Self {
        Self::new(name, PropertyType::String, Value::from(default))
    }

    pub fn enumeration(name: &str, options: &[&str], default: &str) -> Self {
        Self::new(
            name,
            PropertyType::Enum {
                options: options.iter().map(|option| option.to_string()).collect(),
            },
            Value::from(default),
        )
    }

    pub fn actor(name: &str) -> Self {
        Self::new(name, PropertyType::Actor, Value::from(""))
    }

    pub fn actor_group(name: &str) -> Self {
        Self::new(name, PropertyType::ActorGroup, Value::Array(Vec::new()))
    }

    pub fn deck(name: &str) -> Self {
        Self::new(name, PropertyType::Deck, Value::Array(Vec::new()))
    }

    pub fn color(name: &str, default: Color) -> Self {
        let default = serde_json::to_value(default).unwrap_or(Value::Null);
        Self::new(name, PropertyType::Color, default)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Restricts a number property to `[min, max]`. No effect on other types.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        if let PropertyType::Number {
            min: ref mut lower,
            max: ref mut upper,
        } = self.property_type
        {
            *lower = Some(min);
            *upper = Some(max);
        }
        self
    }

    /// Whether `value` is a legal assignment for this property
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.property_type {
            PropertyType::Boolean => value.is_boolean(),
            PropertyType::Number { min, max } => match value.as_f64() {
                Some(number) => {
                    min.map_or(true, |min| number >= min) && max.map_or(true, |max| number <= max)
                }
                None => false,
            },
            PropertyType::String | PropertyType::Actor => value.is_string(),
            PropertyType::Enum { options } => value
                .as_str()
                .is_some_and(|choice| options.iter().any(|option| option == choice)),
            PropertyType::ActorGroup => value.is_string() || is_string_array(value),
            PropertyType::Deck => is_string_array(value),
            PropertyType::Color => serde_json::from_value::<Color>(value.clone()).is_ok(),
        }
    }
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

/// Overlays a use's property assignments on the schema defaults. Assignments
/// that fail validation, or name no property, are dropped with a warning.
pub fn resolve_properties(uri: &str, schema: &[PropertySpec], assignments: &Memory) -> Memory {
    let mut resolved: Memory = schema
        .iter()
        .map(|spec| (spec.name.clone(), spec.default.clone()))
        .collect();

    for (name, value) in assignments {
        match schema.iter().find(|spec| &spec.name == name) {
            Some(spec) if spec.accepts(value) => {
                resolved.insert(name.clone(), value.clone());
            }
            Some(spec) => {
                warn!(
                    "Property {name:?} of behavior {uri:?} rejected value {value}, using default {}",
                    spec.default
                );
            }
            None => {
                warn!("Behavior {uri:?} has no property {name:?}, assignment ignored");
            }
        }
    }

    resolved
}
