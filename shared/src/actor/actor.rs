use brainstem_serde::{Quat, Vec3};

use crate::{
    behavior::{behavior_use::BehaviorUse, database::BehaviorDatabase},
    memory::Memory,
};

/// A simulated entity, named stably by the host, and the behaviors it runs
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    temp_id: u16,
    sequence: u64,
    onstage: bool,
    player_controllable: bool,
    remote: bool,
    position: Vec3,
    rotation: Quat,
    brain: String,
    uses: Vec<BehaviorUse>,
    memory: Memory,
    player_state: Memory,
    dirty: bool,
}

impl Actor {
    pub(crate) fn new(name: &str, temp_id: u16, sequence: u64) -> Self {
        Self {
            name: name.to_string(),
            temp_id,
            sequence,
            onstage: true,
            player_controllable: false,
            remote: false,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            brain: String::new(),
            uses: Vec::new(),
            memory: Memory::new(),
            player_state: Memory::new(),
            dirty: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Only meaningful for the tick that assigned it
    pub fn temp_id(&self) -> u16 {
        self.temp_id
    }

    /// Creation order across the actor's lifetime
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_onstage(&self) -> bool {
        self.onstage
    }

    pub fn is_player_controllable(&self) -> bool {
        self.player_controllable
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    pub fn is_local(&self) -> bool {
        !self.remote
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn brain(&self) -> &str {
        &self.brain
    }

    pub fn uses(&self) -> &[BehaviorUse] {
        &self.uses
    }

    pub fn use_ids(&self) -> Vec<String> {
        self.uses.iter().map(|use_| use_.id().to_string()).collect()
    }

    pub fn find_use(&self, use_id: &str) -> Option<&BehaviorUse> {
        self.uses.iter().find(|use_| use_.id() == use_id)
    }

    pub(crate) fn find_use_mut(&mut self, use_id: &str) -> Option<&mut BehaviorUse> {
        self.uses.iter_mut().find(|use_| use_.id() == use_id)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub(crate) fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn player_state(&self) -> &Memory {
        &self.player_state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_dirty_memory(&self) -> bool {
        self.dirty || self.uses.iter().any(BehaviorUse::is_dirty)
    }

    pub(crate) fn set_temp_id(&mut self, temp_id: u16) {
        self.temp_id = temp_id;
    }

    pub(crate) fn set_flags(&mut self, onstage: bool, player_controllable: bool) {
        self.onstage = onstage;
        self.player_controllable = player_controllable;
    }

    pub(crate) fn set_remote(&mut self, remote: bool) {
        self.remote = remote;
    }

    pub(crate) fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    pub(crate) fn set_brain(&mut self, brain: &str) {
        self.brain = brain.to_string();
    }

    pub(crate) fn merge_player_state(&mut self, fields: &Memory) {
        for (key, value) in fields {
            self.player_state.insert(key.clone(), value.clone());
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
        for use_ in &mut self.uses {
            use_.clear_dirty();
        }
    }

    pub(crate) fn reset_scratch(&mut self) {
        for use_ in &mut self.uses {
            use_.reset_scratch();
        }
    }

    pub(crate) fn mark_all_init_pending(&mut self) {
        for use_ in &mut self.uses {
            use_.mark_init_pending();
        }
    }

    /// Rebuilds the use list from the actor's brain. Uses whose id survives
    /// keep their instance and scratch memory. Every resulting use is pending
    /// initialization.
    pub(crate) fn rebuild_uses(&mut self, database: &BehaviorDatabase) {
        let mut previous: Vec<BehaviorUse> = self.uses.drain(..).collect();
        self.uses = database
            .brain_uses(&self.brain)
            .iter()
            .map(|record| {
                match previous.iter().position(|use_| use_.id() == record.id) {
                    Some(index) => {
                        let mut kept = previous.swap_remove(index);
                        kept.rebind(record);
                        kept
                    }
                    None => BehaviorUse::new(record),
                }
            })
            .collect();
    }
}
