use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use log::info;

use crate::behavior::{
    definition::{BehaviorDefinition, Handler, COLLISION_MESSAGE, TOUCH_ENTER_MESSAGE},
    error::DatabaseError,
    property::PropertySpec,
    snapshot::{BrainRecord, DatabaseSnapshot, UseRecord},
};

/// Behaviors that react to collisions, and the brains that use them. The
/// host uses this to decide which actors need collision reporting at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollisionHandlers {
    pub behaviors: Vec<String>,
    pub brains: Vec<String>,
}

/// The live behavior database: definitions, brains, and a per-use handler
/// cache
#[derive(Default)]
pub struct BehaviorDatabase {
    definitions: HashMap<String, Arc<BehaviorDefinition>>,
    brains: HashMap<String, BrainRecord>,
    // use id -> (brain, index in brain)
    use_index: HashMap<String, (String, usize)>,
    // use id -> message -> handler, negative results included
    handler_cache: HashMap<String, HashMap<String, Option<Handler>>>,
}

impl BehaviorDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every definition and brain. The handler cache is dropped.
    pub fn reset_database(&mut self, snapshot: DatabaseSnapshot) -> CollisionHandlers {
        let DatabaseSnapshot {
            definitions,
            brains,
        } = snapshot;

        let mut use_index = HashMap::new();
        for (brain_name, brain) in &brains {
            for (index, record) in brain.uses.iter().enumerate() {
                use_index.insert(record.id.clone(), (brain_name.clone(), index));
            }
        }

        self.definitions = definitions;
        self.brains = brains;
        self.use_index = use_index;
        self.handler_cache.clear();

        let handlers = self.collision_handlers();
        info!(
            "Behavior database reset: {} behaviors, {} brains, {} uses",
            self.definitions.len(),
            self.brains.len(),
            self.use_index.len()
        );
        handlers
    }

    fn collision_handlers(&self) -> CollisionHandlers {
        let mut behaviors = BTreeSet::new();
        let mut brains = BTreeSet::new();
        for (brain_name, brain) in &self.brains {
            for record in &brain.uses {
                let definition = &record.definition;
                if definition.handles(COLLISION_MESSAGE) || definition.handles(TOUCH_ENTER_MESSAGE)
                {
                    behaviors.insert(definition.uri().to_string());
                    brains.insert(brain_name.clone());
                }
            }
        }
        CollisionHandlers {
            behaviors: behaviors.into_iter().collect(),
            brains: brains.into_iter().collect(),
        }
    }

    pub fn get_properties(&self, uri: &str) -> Result<&[PropertySpec], DatabaseError> {
        self.definitions
            .get(uri)
            .map(|definition| definition.properties())
            .ok_or_else(|| DatabaseError::UnknownBehavior {
                uri: uri.to_string(),
            })
    }

    pub fn definition(&self, uri: &str) -> Option<&Arc<BehaviorDefinition>> {
        self.definitions.get(uri)
    }

    pub fn brain(&self, name: &str) -> Option<&BrainRecord> {
        self.brains.get(name)
    }

    /// Uses of `brain` in order; empty for unknown brains
    pub fn brain_uses(&self, brain: &str) -> &[UseRecord] {
        self.brains
            .get(brain)
            .map(|record| record.uses.as_slice())
            .unwrap_or(&[])
    }

    pub fn use_record(&self, use_id: &str) -> Option<&UseRecord> {
        let (brain, index) = self.use_index.get(use_id)?;
        self.brains.get(brain)?.uses.get(*index)
    }

    /// Finds the handler `use_id` runs for `message`. Resolved once per pair
    /// until the next reset.
    pub fn lookup_handler(&mut self, use_id: &str, message: &str) -> Option<Handler> {
        if let Some(cached) = self
            .handler_cache
            .get(use_id)
            .and_then(|messages| messages.get(message))
        {
            return cached.clone();
        }

        let resolved = self
            .use_record(use_id)
            .and_then(|record| record.definition.handler(message).cloned());
        self.handler_cache
            .entry(use_id.to_string())
            .or_default()
            .insert(message.to_string(), resolved.clone());
        resolved
    }

    pub fn clear_handler_cache(&mut self) {
        self.handler_cache.clear();
    }

    /// Number of cached (use, message) resolutions
    pub fn cached_handler_count(&self) -> usize {
        self.handler_cache.values().map(HashMap::len).sum()
    }
}
