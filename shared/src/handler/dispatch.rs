use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use log::{debug, warn};
use serde_json::{json, Value};

use crate::{
    actor::ActorRegistry,
    behavior::{
        database::BehaviorDatabase,
        definition::{Handler, INIT_MESSAGE},
    },
    handler::{error::BehaviorError, handler_context::HandlerContext, services::HostServices},
    memory::{MemoryScope, ScopeFrame, ScopeGuard, ScopeHost},
    messages::{
        BehaviorLogItem, BehaviorLogKind, Message, MessageOrigin, MessageRouter, TickResponse,
    },
};

/// Time as the host reported it for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickClock {
    pub delta_seconds: f32,
    pub game_time: f64,
}

/// How far a pump got through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpReport {
    pub delivered: usize,
    pub remaining: usize,
}

/// Everything a handler call can reach, borrowed for the duration of one
/// tick (or one direct method call)
pub struct Dispatch<'a> {
    pub(crate) registry: &'a mut ActorRegistry,
    pub(crate) database: &'a mut BehaviorDatabase,
    pub(crate) router: &'a mut MessageRouter,
    pub(crate) response: &'a mut TickResponse,
    pub(crate) services: &'a mut dyn HostServices,
    pub(crate) scope: MemoryScope,
    pub(crate) clock: TickClock,
    pub(crate) max_deck_depth: usize,
}

impl<'a> Dispatch<'a> {
    pub fn new(
        registry: &'a mut ActorRegistry,
        database: &'a mut BehaviorDatabase,
        router: &'a mut MessageRouter,
        response: &'a mut TickResponse,
        services: &'a mut dyn HostServices,
        clock: TickClock,
        max_deck_depth: usize,
    ) -> Self {
        Self {
            registry,
            database,
            router,
            response,
            services,
            scope: MemoryScope::new(),
            clock,
            max_deck_depth,
        }
    }

    pub fn registry(&self) -> &ActorRegistry {
        &*self.registry
    }

    pub fn clock(&self) -> TickClock {
        self.clock
    }

    pub fn enqueue(&mut self, message: Message) {
        self.router.enqueue(message);
    }

    /// Sends `Init` to every use waiting for it, oldest actor first, then in
    /// brain order. A use is no longer pending once its `Init` has run, even
    /// if the handler faulted.
    pub fn run_pending_inits(&mut self) -> usize {
        let mut invoked = 0;
        for (actor, use_id) in self.registry.pending_inits() {
            match self
                .registry
                .get_mut(&actor)
                .and_then(|entry| entry.find_use_mut(&use_id))
            {
                Some(use_) => use_.clear_init_pending(),
                None => continue,
            }
            let Some(handler) = self.database.lookup_handler(&use_id, INIT_MESSAGE) else {
                continue;
            };
            let message = Message::to_actor(
                &actor,
                INIT_MESSAGE,
                json!({ "time": self.clock.game_time }),
                MessageOrigin::Local,
            );
            self.invoke_isolated(&actor, &use_id, &handler, &message, 0);
            invoked += 1;
        }
        invoked
    }

    /// Delivers one message to every recipient's uses, in brain order
    pub fn deliver(&mut self, message: &Message) -> usize {
        let mut invoked = 0;
        for actor in MessageRouter::recipients(message, self.registry) {
            let Some(use_ids) = self.registry.get(&actor).map(|entry| entry.use_ids()) else {
                continue;
            };
            for use_id in use_ids {
                if let Some(handler) = self.database.lookup_handler(&use_id, &message.name) {
                    self.invoke_isolated(&actor, &use_id, &handler, message, 0);
                    invoked += 1;
                }
            }
        }
        invoked
    }

    /// Delivers queued messages until the queue is empty or `max_messages`
    /// have gone out. Anything left stays queued.
    pub fn pump(&mut self, max_messages: usize) -> PumpReport {
        let mut delivered = 0;
        while delivered < max_messages {
            let Some(message) = self.router.pop() else {
                break;
            };
            self.deliver(&message);
            delivered += 1;
        }

        let remaining = self.router.len();
        if remaining > 0 {
            warn!(
                "Delivered the limit of {max_messages} messages this tick, {remaining} left for the next one"
            );
        }
        PumpReport {
            delivered,
            remaining,
        }
    }

    /// Runs `handler` as (`actor`, `use_id`). The scope frame is popped and
    /// its dirty flags applied however the call ends; a panic comes back as
    /// [`BehaviorError::Panicked`].
    pub fn invoke(
        &mut self,
        actor: &str,
        use_id: &str,
        handler: &Handler,
        message: &Message,
        depth: usize,
    ) -> Result<Value, BehaviorError> {
        self.response.handlers_invoked = self.response.handlers_invoked.saturating_add(1);
        let mut guard = ScopeGuard::enter(self, actor, use_id);
        let mut context = HandlerContext::new(&mut guard, actor, use_id, &message.name, depth);
        panic::catch_unwind(AssertUnwindSafe(|| handler(&mut context, message))).unwrap_or_else(
            |payload| {
                Err(BehaviorError::Panicked {
                    reason: panic_reason(payload.as_ref()),
                })
            },
        )
    }

    /// Like [`Dispatch::invoke`], but a fault is logged and recorded instead
    /// of returned
    pub(crate) fn invoke_isolated(
        &mut self,
        actor: &str,
        use_id: &str,
        handler: &Handler,
        message: &Message,
        depth: usize,
    ) -> Option<Value> {
        match self.invoke(actor, use_id, handler, message, depth) {
            Ok(value) => Some(value),
            Err(error) => {
                self.record_fault(actor, use_id, &message.name, &error);
                None
            }
        }
    }

    fn behavior_uri(&self, use_id: &str) -> String {
        self.database
            .use_record(use_id)
            .map(|record| record.definition.uri().to_string())
            .unwrap_or_default()
    }

    fn log_item(
        &self,
        kind: BehaviorLogKind,
        actor: &str,
        use_id: &str,
        message_name: &str,
        text: String,
    ) -> BehaviorLogItem {
        BehaviorLogItem {
            kind,
            actor: actor.to_string(),
            use_id: use_id.to_string(),
            behavior_uri: self.behavior_uri(use_id),
            message_name: message_name.to_string(),
            text,
        }
    }

    pub(crate) fn record_fault(
        &mut self,
        actor: &str,
        use_id: &str,
        message_name: &str,
        error: &BehaviorError,
    ) {
        let item = self.log_item(
            BehaviorLogKind::Fault,
            actor,
            use_id,
            message_name,
            error.to_string(),
        );
        warn!(
            "Behavior {:?} (use {use_id:?}) on actor {actor:?} failed handling {message_name:?}: {error}",
            item.behavior_uri
        );
        self.services.report_behavior_exception(&item);
        self.response.behavior_log.push(item);
    }

    pub(crate) fn record_log(&mut self, actor: &str, use_id: &str, message_name: &str, text: &str) {
        let item = self.log_item(
            BehaviorLogKind::Message,
            actor,
            use_id,
            message_name,
            text.to_string(),
        );
        debug!("[{actor}/{use_id}] {text}");
        self.services.log_behavior_message(&item);
        self.response.behavior_log.push(item);
    }
}

impl ScopeHost for Dispatch<'_> {
    fn scope_mut(&mut self) -> &mut MemoryScope {
        &mut self.scope
    }

    fn on_exit(&mut self, frame: ScopeFrame) {
        if !frame.dirties_actor() && !frame.dirties_use() {
            return;
        }
        let Some(actor) = self.registry.get_mut(&frame.actor) else {
            return;
        };
        if frame.dirties_actor() {
            actor.mark_dirty();
        }
        if frame.dirties_use() {
            if let Some(use_) = actor.find_use_mut(&frame.use_id) {
                use_.mark_dirty();
            }
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        reason.to_string()
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
