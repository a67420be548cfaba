use std::{collections::HashMap, sync::Arc};

use log::warn;

use crate::behavior::definition::BehaviorDefinition;

/// Every behavior the host can reference from a database snapshot, by uri
#[derive(Debug, Default, Clone)]
pub struct BehaviorLibrary {
    definitions: HashMap<String, Arc<BehaviorDefinition>>,
}

impl BehaviorLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: BehaviorDefinition) -> Arc<BehaviorDefinition> {
        let definition = Arc::new(definition);
        let uri = definition.uri().to_string();
        if self
            .definitions
            .insert(uri.clone(), definition.clone())
            .is_some()
        {
            warn!("Behavior {uri:?} registered twice, the later definition wins");
        }
        definition
    }

    pub fn with(mut self, definition: BehaviorDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn get(&self, uri: &str) -> Option<&Arc<BehaviorDefinition>> {
        self.definitions.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.definitions.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub(crate) fn definitions(&self) -> &HashMap<String, Arc<BehaviorDefinition>> {
        &self.definitions
    }
}
