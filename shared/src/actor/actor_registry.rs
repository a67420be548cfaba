use std::collections::{HashMap, HashSet};

use log::debug;
use serde_json::{json, Value};

use crate::{
    actor::{actor::Actor, player_state::PlayerActorRecord},
    behavior::database::BehaviorDatabase,
    memory::{Memory, ScratchReset},
    wire::{
        dirty_memory::{DirtyActorRecord, DirtyMemorySection, DirtyUseRecord},
        error::ProtocolError,
        roster::RosterSection,
        state_sync::StateSyncSection,
    },
};

/// What a roster diff did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterChanges {
    pub created: Vec<String>,
    pub destroyed: Vec<String>,
}

/// All live actors, by name, in creation order, and by this tick's temp id
#[derive(Debug, Default)]
pub struct ActorRegistry {
    actors: HashMap<String, Actor>,
    creation_order: Vec<String>,
    temp_ids: HashMap<u16, String>,
    next_sequence: u64,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actors.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.get_mut(name)
    }

    pub fn name_for_temp_id(&self, temp_id: u16) -> Option<&str> {
        self.temp_ids.get(&temp_id).map(String::as_str)
    }

    /// Actor names, oldest first
    pub fn names(&self) -> &[String] {
        &self.creation_order
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.creation_order
            .iter()
            .filter_map(|name| self.actors.get(name))
    }

    /// Names of player-controllable actors, oldest first
    pub fn player_actors(&self) -> Vec<String> {
        self.actors()
            .filter(|actor| actor.is_player_controllable())
            .map(|actor| actor.name().to_string())
            .collect()
    }

    /// Creates actors the roster introduces, destroys the ones it omits, and
    /// reassigns every temp id
    pub fn apply_roster_diff(
        &mut self,
        roster: &RosterSection,
    ) -> Result<RosterChanges, ProtocolError> {
        let mut listed = HashSet::with_capacity(roster.entries.len());
        let mut temp_ids = HashMap::with_capacity(roster.entries.len());
        for entry in &roster.entries {
            if !listed.insert(entry.name.as_str()) {
                return Err(ProtocolError::MalformedRoster {
                    reason: format!("actor {:?} is listed twice", entry.name),
                });
            }
            if temp_ids.insert(entry.temp_id, entry.name.clone()).is_some() {
                return Err(ProtocolError::MalformedRoster {
                    reason: format!("temp id {} is assigned twice", entry.temp_id),
                });
            }
        }

        let mut changes = RosterChanges::default();
        let actors = &mut self.actors;
        self.creation_order.retain(|name| {
            let keep = listed.contains(name.as_str());
            if !keep {
                actors.remove(name);
                changes.destroyed.push(name.clone());
            }
            keep
        });

        for entry in &roster.entries {
            match self.actors.get_mut(&entry.name) {
                Some(actor) => actor.set_temp_id(entry.temp_id),
                None => {
                    let actor = Actor::new(&entry.name, entry.temp_id, self.next_sequence);
                    self.next_sequence += 1;
                    self.actors.insert(entry.name.clone(), actor);
                    self.creation_order.push(entry.name.clone());
                    changes.created.push(entry.name.clone());
                }
            }
        }
        self.temp_ids = temp_ids;

        if !changes.created.is_empty() || !changes.destroyed.is_empty() {
            debug!(
                "Roster: {} created, {} destroyed, {} live",
                changes.created.len(),
                changes.destroyed.len(),
                self.actors.len()
            );
        }
        Ok(changes)
    }

    /// Applies host-owned state. Memory is never touched here, except that an
    /// ownership flip throws away the actor's scratch memory.
    pub fn apply_state_sync(
        &mut self,
        section: &StateSyncSection,
        database: &BehaviorDatabase,
    ) -> Result<(), ProtocolError> {
        for entry in &section.entries {
            let actor = self
                .temp_ids
                .get(&entry.temp_id)
                .and_then(|name| self.actors.get_mut(name))
                .ok_or(ProtocolError::UnknownTempId {
                    temp_id: entry.temp_id,
                })?;

            actor.set_flags(entry.onstage, entry.player_controllable);
            actor.set_transform(entry.position, entry.rotation);

            if actor.is_remote() != entry.remote {
                actor.set_remote(entry.remote);
                reset_actor_scratch(actor, ScratchReset::OwnershipTransfer);
            }

            if actor.brain() != entry.brain {
                debug!(
                    "Actor {:?} switched brain {:?} -> {:?}",
                    actor.name(),
                    actor.brain(),
                    entry.brain
                );
                actor.set_brain(&entry.brain);
                actor.rebuild_uses(database);
            }
        }
        Ok(())
    }

    /// Merges host JSON into the player state of player-controllable actors.
    /// Records for anyone else are ignored.
    pub fn merge_player_state(&mut self, records: &[PlayerActorRecord]) {
        for record in records {
            match self.actors.get_mut(&record.name) {
                Some(actor) if actor.is_player_controllable() => {
                    actor.merge_player_state(&record.fields);
                }
                Some(_) => {
                    debug!(
                        "Ignoring player state for {:?}, which is not player controllable",
                        record.name
                    );
                }
                None => {
                    debug!("Ignoring player state for unknown actor {:?}", record.name);
                }
            }
        }
    }

    /// Rebuilds every actor's uses after a database reset
    pub fn rebuild_uses(&mut self, database: &BehaviorDatabase) {
        for actor in self.actors.values_mut() {
            actor.rebuild_uses(database);
        }
    }

    pub fn reset_scratch(&mut self, reason: ScratchReset) {
        for actor in self.actors.values_mut() {
            reset_actor_scratch(actor, reason);
        }
    }

    pub fn mark_all_init_pending(&mut self) {
        for actor in self.actors.values_mut() {
            actor.mark_all_init_pending();
        }
    }

    /// (actor, use id) pairs still waiting for `Init`, in creation order then
    /// brain order
    pub fn pending_inits(&self) -> Vec<(String, String)> {
        self.actors()
            .flat_map(|actor| {
                actor
                    .uses()
                    .iter()
                    .filter(|use_| use_.is_init_pending())
                    .map(move |use_| (actor.name().to_string(), use_.id().to_string()))
            })
            .collect()
    }

    /// Serializes actors and uses whose memory changed, oldest actor first
    pub fn collect_dirty(&self) -> Result<DirtyMemorySection, serde_json::Error> {
        let mut section = DirtyMemorySection::default();
        for actor in self.actors().filter(|actor| actor.has_dirty_memory()) {
            let actor_memory_json = if actor.is_dirty() {
                Some(serde_json::to_string(actor.memory())?)
            } else {
                None
            };
            let mut uses = Vec::new();
            for use_ in actor.uses().iter().filter(|use_| use_.is_dirty()) {
                uses.push(DirtyUseRecord {
                    use_id: use_.id().to_string(),
                    memory_json: serde_json::to_string(use_.card())?,
                });
            }
            section.actors.push(DirtyActorRecord {
                name: actor.name().to_string(),
                actor_memory_json,
                uses,
            });
        }
        Ok(section)
    }

    pub fn clear_dirty(&mut self) {
        for actor in self.actors.values_mut() {
            actor.clear_dirty();
        }
    }

    /// Actor memory plus the instance memory of each of its uses
    pub fn memory_snapshot(&self, name: &str) -> Option<Value> {
        let actor = self.actors.get(name)?;
        let uses: Memory = actor
            .uses()
            .iter()
            .map(|use_| (use_.id().to_string(), Value::Object(use_.card().clone())))
            .collect();
        Some(json!({
            "memory": actor.memory(),
            "uses": uses,
        }))
    }
}

fn reset_actor_scratch(actor: &mut Actor, reason: ScratchReset) {
    debug!("Resetting scratch memory of {:?} ({reason:?})", actor.name());
    actor.reset_scratch();
}
