use std::collections::VecDeque;

use log::debug;

use crate::{
    actor::ActorRegistry,
    messages::message::{Message, MessageTarget},
};

/// FIFO queue of messages for the current tick
#[derive(Debug, Default)]
pub struct MessageRouter {
    queue: VecDeque<Message>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    pub fn pop(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Actors that should receive `message`, oldest first. A message for an
    /// actor that no longer exists reaches nobody.
    pub fn recipients(message: &Message, registry: &ActorRegistry) -> Vec<String> {
        match &message.target {
            MessageTarget::Actor(name) => {
                if registry.contains(name) {
                    vec![name.clone()]
                } else {
                    debug!(
                        "Dropping {:?} for {:?}, which no longer exists",
                        message.name, name
                    );
                    Vec::new()
                }
            }
            MessageTarget::Broadcast(audience) => registry
                .actors()
                .filter(|actor| audience.includes(actor))
                .map(|actor| actor.name().to_string())
                .collect(),
        }
    }
}
