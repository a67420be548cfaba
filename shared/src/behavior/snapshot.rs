use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    behavior::{
        definition::BehaviorDefinition, error::DatabaseError, library::BehaviorLibrary,
        property::resolve_properties,
    },
    memory::Memory,
};

#[derive(Deserialize)]
struct RawDatabase {
    #[serde(default)]
    brains: HashMap<String, RawBrain>,
}

#[derive(Deserialize)]
struct RawBrain {
    #[serde(default)]
    uses: Vec<RawUse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUse {
    id: String,
    behavior_uri: String,
    #[serde(default)]
    properties: Memory,
}

/// One use as the database describes it: which behavior, with which
/// resolved property values
#[derive(Debug, Clone)]
pub struct UseRecord {
    pub id: String,
    pub definition: Arc<BehaviorDefinition>,
    pub properties: Memory,
}

/// A brain is the ordered list of uses an actor runs
#[derive(Debug, Clone, Default)]
pub struct BrainRecord {
    pub uses: Vec<UseRecord>,
}

/// A complete behavior database, resolved against a library and ready to
/// replace whatever the runtime currently holds
#[derive(Debug, Clone, Default)]
pub struct DatabaseSnapshot {
    pub(crate) definitions: HashMap<String, Arc<BehaviorDefinition>>,
    pub(crate) brains: HashMap<String, BrainRecord>,
}

impl DatabaseSnapshot {
    /// Parses the serialized database:
    /// `{"brains": {"<brain>": {"uses": [{"id", "behaviorUri", "properties"}]}}}`
    pub fn from_json(json: &str, library: &BehaviorLibrary) -> Result<Self, DatabaseError> {
        let raw: RawDatabase =
            serde_json::from_str(json).map_err(|error| DatabaseError::MalformedSnapshot {
                reason: error.to_string(),
            })?;
        Self::from_raw(raw, library)
    }

    pub fn from_value(value: Value, library: &BehaviorLibrary) -> Result<Self, DatabaseError> {
        let raw: RawDatabase =
            serde_json::from_value(value).map_err(|error| DatabaseError::MalformedSnapshot {
                reason: error.to_string(),
            })?;
        Self::from_raw(raw, library)
    }

    fn from_raw(raw: RawDatabase, library: &BehaviorLibrary) -> Result<Self, DatabaseError> {
        let mut seen_ids = HashSet::new();
        let mut brains = HashMap::with_capacity(raw.brains.len());

        for (brain_name, raw_brain) in raw.brains {
            let mut uses = Vec::with_capacity(raw_brain.uses.len());
            for raw_use in raw_brain.uses {
                if !seen_ids.insert(raw_use.id.clone()) {
                    return Err(DatabaseError::DuplicateUseId { use_id: raw_use.id });
                }
                let Some(definition) = library.get(&raw_use.behavior_uri) else {
                    return Err(DatabaseError::UnknownBehaviorUri {
                        brain: brain_name,
                        use_id: raw_use.id,
                        uri: raw_use.behavior_uri,
                    });
                };
                let properties = resolve_properties(
                    definition.uri(),
                    definition.properties(),
                    &raw_use.properties,
                );
                uses.push(UseRecord {
                    id: raw_use.id,
                    definition: definition.clone(),
                    properties,
                });
            }
            brains.insert(brain_name, BrainRecord { uses });
        }

        Ok(Self {
            definitions: library.definitions().clone(),
            brains,
        })
    }

    pub fn brain(&self, name: &str) -> Option<&BrainRecord> {
        self.brains.get(name)
    }

    pub fn brain_count(&self) -> usize {
        self.brains.len()
    }
}
