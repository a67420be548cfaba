use std::sync::Arc;

use crate::{
    behavior::{definition::BehaviorDefinition, snapshot::UseRecord},
    memory::Memory,
};

/// One behavior attached to one actor, with its own memory
#[derive(Debug, Clone)]
pub struct BehaviorUse {
    id: String,
    definition: Arc<BehaviorDefinition>,
    properties: Memory,
    card: Memory,
    temp: Memory,
    dirty: bool,
    init_pending: bool,
}

impl BehaviorUse {
    pub fn new(record: &UseRecord) -> Self {
        Self {
            id: record.id.clone(),
            definition: record.definition.clone(),
            properties: record.properties.clone(),
            card: Memory::new(),
            temp: Memory::new(),
            dirty: false,
            init_pending: true,
        }
    }

    /// Points an existing use at a new database record, keeping its memory
    pub(crate) fn rebind(&mut self, record: &UseRecord) {
        self.definition = record.definition.clone();
        self.properties = record.properties.clone();
        self.init_pending = true;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn uri(&self) -> &str {
        self.definition.uri()
    }

    pub fn definition(&self) -> &Arc<BehaviorDefinition> {
        &self.definition
    }

    pub fn properties(&self) -> &Memory {
        &self.properties
    }

    pub fn card(&self) -> &Memory {
        &self.card
    }

    pub fn temp(&self) -> &Memory {
        &self.temp
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_init_pending(&self) -> bool {
        self.init_pending
    }

    pub(crate) fn card_mut(&mut self) -> &mut Memory {
        &mut self.card
    }

    pub(crate) fn temp_mut(&mut self) -> &mut Memory {
        &mut self.temp
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn mark_init_pending(&mut self) {
        self.init_pending = true;
    }

    pub(crate) fn clear_init_pending(&mut self) {
        self.init_pending = false;
    }

    pub(crate) fn reset_scratch(&mut self) {
        self.temp.clear();
    }
}
