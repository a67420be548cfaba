use log::debug;
use serde_json::{json, Value};

use brainstem_serde::Vec3;

use crate::{
    actor::Actor,
    behavior::behavior_use::BehaviorUse,
    handler::{dispatch::Dispatch, error::BehaviorError},
    memory::Memory,
    messages::{
        Audience, HostBoundMessage, Message, MessageOrigin, PlayerToolTip, RemoteActorMessage,
        TorqueRequest, VelocityChange,
    },
};

/// Key in instance memory under which [`HandlerContext::every_seconds`]
/// keeps its countdowns
pub const TIMERS_MEMORY_KEY: &str = "__timers__";

/// What a handler sees while it runs: its own actor and use, the three
/// memory tiers, and the ways it can affect the world
pub struct HandlerContext<'d, 'a> {
    dispatch: &'d mut Dispatch<'a>,
    actor: &'d str,
    use_id: &'d str,
    message_name: &'d str,
    depth: usize,
}

impl<'d, 'a> HandlerContext<'d, 'a> {
    pub(crate) fn new(
        dispatch: &'d mut Dispatch<'a>,
        actor: &'d str,
        use_id: &'d str,
        message_name: &'d str,
        depth: usize,
    ) -> Self {
        Self {
            dispatch,
            actor,
            use_id,
            message_name,
            depth,
        }
    }

    pub fn actor_name(&self) -> &str {
        self.actor
    }

    pub fn use_id(&self) -> &str {
        self.use_id
    }

    pub fn message_name(&self) -> &str {
        self.message_name
    }

    /// Deck nesting depth; 0 for a top-level call
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn delta_seconds(&self) -> f32 {
        self.dispatch.clock.delta_seconds
    }

    pub fn game_time(&self) -> f64 {
        self.dispatch.clock.game_time
    }

    pub fn actor(&self) -> Result<&Actor, BehaviorError> {
        self.dispatch
            .registry
            .get(self.actor)
            .ok_or_else(|| BehaviorError::ActorNotFound {
                actor: self.actor.to_string(),
            })
    }

    /// Read-only view of any live actor
    pub fn other_actor(&self, name: &str) -> Option<&Actor> {
        self.dispatch.registry.get(name)
    }

    /// Names of player-controllable actors, oldest first
    pub fn player_actors(&self) -> Vec<String> {
        self.dispatch.registry.player_actors()
    }

    fn use_not_found(&self) -> BehaviorError {
        BehaviorError::UseNotFound {
            actor: self.actor.to_string(),
            use_id: self.use_id.to_string(),
        }
    }

    fn behavior_use(&self) -> Result<&BehaviorUse, BehaviorError> {
        self.actor()?
            .find_use(self.use_id)
            .ok_or_else(|| self.use_not_found())
    }

    fn behavior_use_mut(&mut self) -> Result<&mut BehaviorUse, BehaviorError> {
        let missing = self.use_not_found();
        self.dispatch
            .registry
            .get_mut(self.actor)
            .ok_or_else(|| BehaviorError::ActorNotFound {
                actor: self.actor.to_string(),
            })?
            .find_use_mut(self.use_id)
            .ok_or(missing)
    }

    fn ensure_scope(&self) -> Result<(), BehaviorError> {
        match self.dispatch.scope.current() {
            Some(frame) if frame.actor == self.actor && frame.use_id == self.use_id => Ok(()),
            _ => Err(BehaviorError::NoActiveScope),
        }
    }

    // Properties

    pub fn props(&self) -> Result<&Memory, BehaviorError> {
        Ok(self.behavior_use()?.properties())
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.behavior_use().ok()?.properties().get(name)
    }

    // Memory

    /// Actor memory, shared by every use on this actor
    pub fn mem(&self) -> Result<&Memory, BehaviorError> {
        Ok(self.actor()?.memory())
    }

    /// Marks actor memory dirty unless the call declares it unchanged
    pub fn mem_mut(&mut self) -> Result<&mut Memory, BehaviorError> {
        self.ensure_scope()?;
        self.dispatch.scope.touch_actor();
        self.dispatch
            .registry
            .get_mut(self.actor)
            .map(Actor::memory_mut)
            .ok_or_else(|| BehaviorError::ActorNotFound {
                actor: self.actor.to_string(),
            })
    }

    /// Instance memory of this use
    pub fn card(&self) -> Result<&Memory, BehaviorError> {
        Ok(self.behavior_use()?.card())
    }

    pub fn card_mut(&mut self) -> Result<&mut Memory, BehaviorError> {
        self.ensure_scope()?;
        self.dispatch.scope.touch_use();
        Ok(self.behavior_use_mut()?.card_mut())
    }

    /// Scratch memory of this use; never flushed
    pub fn temp(&self) -> Result<&Memory, BehaviorError> {
        Ok(self.behavior_use()?.temp())
    }

    pub fn temp_mut(&mut self) -> Result<&mut Memory, BehaviorError> {
        Ok(self.behavior_use_mut()?.temp_mut())
    }

    pub fn player_state(&self) -> Result<&Memory, BehaviorError> {
        Ok(self.actor()?.player_state())
    }

    /// This call leaves memory as it found it, so nothing it touched needs
    /// flushing
    pub fn declare_memory_unchanged(&mut self) {
        self.dispatch.scope.mark_unchanged();
    }

    /// Counts down a named timer in instance memory. Returns true when the
    /// timer has never been set or has just run out, and restarts it.
    pub fn every_seconds(&mut self, seconds: f64, key: &str) -> Result<bool, BehaviorError> {
        let delta = f64::from(self.delta_seconds());
        let card = self.card_mut()?;
        let timers = card
            .entry(TIMERS_MEMORY_KEY)
            .or_insert_with(|| json!({}));
        if !timers.is_object() {
            *timers = json!({});
        }
        let Value::Object(timers) = timers else {
            return Ok(false);
        };

        let fire = match timers.get(key).and_then(Value::as_f64) {
            None => true,
            Some(remaining) => {
                let remaining = remaining - delta;
                if remaining < 0.0 {
                    true
                } else {
                    timers.insert(key.to_string(), json!(remaining));
                    false
                }
            }
        };
        if fire {
            timers.insert(key.to_string(), json!(seconds));
        }
        Ok(fire)
    }

    // Messaging

    /// Queues `name` for `target` if this runtime owns it, or hands it to the
    /// host for the owning peer if it is remote. Unknown targets are dropped.
    pub fn send(&mut self, target: &str, name: &str, args: Value) {
        match self.dispatch.registry.get(target).map(Actor::is_remote) {
            Some(false) => self.dispatch.router.enqueue(Message::to_actor(
                target,
                name,
                args,
                MessageOrigin::Local,
            )),
            Some(true) => self
                .dispatch
                .response
                .messages_to_remote_actors
                .push(RemoteActorMessage {
                    name: name.to_string(),
                    target_actor: target.to_string(),
                    args_json: args.to_string(),
                }),
            None => debug!(
                "Dropping {name:?} from {:?} to unknown actor {target:?}",
                self.actor
            ),
        }
    }

    pub fn send_to_self(&mut self, name: &str, args: Value) {
        let actor = self.actor;
        self.send(actor, name, args);
    }

    /// Queues `name` for every actor
    pub fn send_to_all(&mut self, name: &str, args: Value) {
        self.dispatch.router.enqueue(Message::broadcast(
            Audience::Everyone,
            name,
            args,
            MessageOrigin::Local,
        ));
    }

    pub fn send_to_host(&mut self, name: &str) {
        self.dispatch.response.messages_to_host.push(HostBoundMessage {
            target_actor: self.actor.to_string(),
            name: name.to_string(),
        });
    }

    // Physics and UI requests

    pub fn push(&mut self, target: &str, velocity: Vec3) {
        self.dispatch.response.velocity_changes.push(VelocityChange {
            actor: target.to_string(),
            velocity,
        });
    }

    pub fn add_torque(&mut self, target: &str, torque: Vec3) {
        self.dispatch.response.torque_requests.push(TorqueRequest {
            actor: target.to_string(),
            torque,
        });
    }

    pub fn show_tool_tip(&mut self, text: &str) {
        self.dispatch.response.player_tool_tips.push(PlayerToolTip {
            actor: self.actor.to_string(),
            text: text.to_string(),
        });
    }

    // Host

    pub fn log(&mut self, text: &str) {
        self.dispatch
            .record_log(self.actor, self.use_id, self.message_name, text);
    }

    pub fn call_service(&mut self, name: &str, args: &Value) -> Result<Value, BehaviorError> {
        Ok(self.dispatch.services.call_service(name, args)?)
    }

    // Decks

    /// Sends `message_name` to each card listed in the deck property
    /// `property`, in order, each under its own scope. A faulting card is
    /// recorded and skipped; the values of the others are returned.
    pub fn call_deck(
        &mut self,
        property: &str,
        message_name: &str,
        args: Value,
    ) -> Result<Vec<Value>, BehaviorError> {
        let depth = self.depth + 1;
        if depth > self.dispatch.max_deck_depth {
            return Err(BehaviorError::DeckTooDeep {
                depth,
                max: self.dispatch.max_deck_depth,
            });
        }

        let invalid = |reason: &str| BehaviorError::InvalidDeck {
            property: property.to_string(),
            reason: reason.to_string(),
        };
        let cards: Vec<String> = match self.prop(property) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("entries must be use ids"))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(invalid("not a list of use ids")),
            None => return Err(invalid("no such property")),
        };

        let actor = self.actor;
        let message = Message::to_actor(actor, message_name, args, MessageOrigin::Local);
        let mut results = Vec::with_capacity(cards.len());
        for card in cards {
            let attached = self
                .dispatch
                .registry
                .get(actor)
                .is_some_and(|entry| entry.find_use(&card).is_some());
            if !attached {
                debug!("Deck {property:?} on {actor:?} lists {card:?}, which is not in its brain");
                continue;
            }
            let Some(handler) = self.dispatch.database.lookup_handler(&card, message_name) else {
                continue;
            };
            if let Some(value) = self
                .dispatch
                .invoke_isolated(actor, &card, &handler, &message, depth)
            {
                results.push(value);
            }
        }
        Ok(results)
    }
}
