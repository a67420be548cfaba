use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use brainstem_shared::{MessageOrigin, PlayerActorRecord};

/// A message from the host simulation, or relayed by it from another peer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMessage {
    pub name: String,
    /// `None` or `""` broadcasts to every actor
    #[serde(default)]
    pub target_actor: Option<String>,
    #[serde(default)]
    pub args_json: String,
    #[serde(default)]
    pub from_remote: bool,
}

impl HostMessage {
    pub fn to_actor(target: &str, name: &str, args_json: &str) -> Self {
        Self {
            name: name.to_string(),
            target_actor: Some(target.to_string()),
            args_json: args_json.to_string(),
            from_remote: false,
        }
    }

    pub fn broadcast(name: &str, args_json: &str) -> Self {
        Self {
            name: name.to_string(),
            target_actor: None,
            args_json: args_json.to_string(),
            from_remote: false,
        }
    }

    /// The actor this message is for. An empty target broadcasts, like a
    /// missing one.
    pub fn target(&self) -> Option<&str> {
        self.target_actor
            .as_deref()
            .filter(|target| !target.is_empty())
    }

    pub fn origin(&self) -> MessageOrigin {
        if self.from_remote {
            MessageOrigin::Remote
        } else {
            MessageOrigin::Host
        }
    }

    /// The message arguments; an empty object when they are missing or do
    /// not parse
    pub fn args(&self) -> Value {
        serde_json::from_str(&self.args_json).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// The JSON half of a tick request. The binary half travels in the frame
/// buffer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRequest {
    pub delta_seconds: f32,
    pub game_time: f64,
    #[serde(default)]
    pub player_actors: Vec<PlayerActorRecord>,
    #[serde(default)]
    pub messages_from_host: Vec<HostMessage>,
}

impl TickRequest {
    pub fn new(delta_seconds: f32, game_time: f64) -> Self {
        Self {
            delta_seconds,
            game_time,
            ..Default::default()
        }
    }
}
