use serde::{Deserialize, Serialize};

use crate::memory::Memory;

/// Host-side state for a player-controlled actor, merged into the actor's
/// player state before any handler runs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActorRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Memory,
}

impl PlayerActorRecord {
    pub fn new(name: &str, fields: Memory) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }
}
