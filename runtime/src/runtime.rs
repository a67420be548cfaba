use log::info;
use serde_json::Value;

use brainstem_shared::{
    ActorRegistry, BehaviorDatabase, CollisionHandlers, DatabaseSnapshot, Dispatch, FrameBuffer,
    HostServices, Message, MessageOrigin, MessageRouter, PropertySpec, ScratchReset, TickClock,
    TickResponse,
};

use crate::{RuntimeConfig, RuntimeError};

/// Runs actor behaviors on behalf of a host simulation. All state lives
/// here between ticks; the host drives it with [`Runtime::tick`].
pub struct Runtime<S: HostServices> {
    pub(crate) config: RuntimeConfig,
    pub(crate) services: S,
    pub(crate) registry: ActorRegistry,
    pub(crate) database: BehaviorDatabase,
    pub(crate) router: MessageRouter,
    pub(crate) clock: TickClock,
}

impl<S: HostServices> Runtime<S> {
    /// Create a new Runtime
    pub fn new(config: RuntimeConfig, services: S) -> Self {
        Self {
            config,
            services,
            registry: ActorRegistry::new(),
            database: BehaviorDatabase::new(),
            router: MessageRouter::new(),
            clock: TickClock::default(),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut S {
        &mut self.services
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn database(&self) -> &BehaviorDatabase {
        &self.database
    }

    /// Messages waiting for the next pump
    pub fn queued_messages(&self) -> usize {
        self.router.len()
    }

    /// A frame buffer with the configured capacity
    pub fn new_frame_buffer(&self) -> FrameBuffer {
        FrameBuffer::with_capacity(self.config.frame_capacity)
    }

    /// Replaces the behavior database. Every use of every actor is rebuilt
    /// and runs `Init` again on the next tick.
    pub fn update_behavior_database(&mut self, snapshot: DatabaseSnapshot) -> CollisionHandlers {
        let handlers = self.database.reset_database(snapshot);
        self.registry.rebuild_uses(&self.database);
        handlers
    }

    pub fn behavior_properties(&self, uri: &str) -> Result<&[PropertySpec], RuntimeError> {
        Ok(self.database.get_properties(uri)?)
    }

    /// Invokes one handler of one use directly, outside of a tick, and
    /// returns what it returned. Faults are returned rather than logged.
    /// Messages it sends wait for the next tick.
    pub fn call_behavior_use_method(
        &mut self,
        use_id: &str,
        actor: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, RuntimeError> {
        let attached = self
            .registry
            .get(actor)
            .ok_or_else(|| RuntimeError::ActorNotFound {
                actor: actor.to_string(),
            })?
            .find_use(use_id)
            .is_some();
        if !attached {
            return Err(RuntimeError::UseNotFound {
                actor: actor.to_string(),
                use_id: use_id.to_string(),
            });
        }
        let handler =
            self.database
                .lookup_handler(use_id, method)
                .ok_or_else(|| RuntimeError::HandlerNotFound {
                    use_id: use_id.to_string(),
                    method: method.to_string(),
                })?;

        let mut response = TickResponse::default();
        let mut dispatch = Dispatch::new(
            &mut self.registry,
            &mut self.database,
            &mut self.router,
            &mut response,
            &mut self.services,
            self.clock,
            self.config.max_deck_depth,
        );
        let message = Message::to_actor(actor, method, args, MessageOrigin::Host);
        Ok(dispatch.invoke(actor, use_id, &handler, &message, 0)?)
    }

    /// Actor memory and the instance memory of each use, as JSON
    pub fn actor_memory_json(&self, actor: &str) -> Result<String, RuntimeError> {
        let snapshot =
            self.registry
                .memory_snapshot(actor)
                .ok_or_else(|| RuntimeError::ActorNotFound {
                    actor: actor.to_string(),
                })?;
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Throws away scratch memory and queued messages. Actor and instance
    /// memory survive.
    pub fn reset_world(&mut self) {
        info!("World reset");
        self.registry.reset_scratch(ScratchReset::WorldReset);
        self.router.clear();
    }

    /// Starts behaviors over as if freshly loaded: scratch memory and queued
    /// messages are dropped, handler lookups are re-resolved and every use
    /// runs `Init` again on the next tick
    pub fn reload(&mut self) {
        info!("Runtime reload");
        self.registry.reset_scratch(ScratchReset::Reload);
        self.registry.mark_all_init_pending();
        self.database.clear_handler_cache();
        self.router.clear();
    }
}
