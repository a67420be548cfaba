use serde_json::Value;

use crate::actor::Actor;

/// Which actors a broadcast reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every actor, on or off stage, local or remote
    Everyone,
    /// Onstage actors, including remotely owned ones
    Onstage,
    /// Onstage actors this runtime owns
    OnstageLocal,
    /// Offstage actors this runtime owns
    OffstageLocal,
}

impl Audience {
    pub fn includes(&self, actor: &Actor) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Onstage => actor.is_onstage(),
            Audience::OnstageLocal => actor.is_onstage() && actor.is_local(),
            Audience::OffstageLocal => !actor.is_onstage() && actor.is_local(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Actor(String),
    Broadcast(Audience),
}

/// Where a message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Sent by a handler in this runtime, or generated by the tick pipeline
    Local,
    /// Sent by the host simulation
    Host,
    /// Relayed by the host from another peer
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    pub args: Value,
    pub target: MessageTarget,
    pub origin: MessageOrigin,
}

impl Message {
    pub fn to_actor(actor: &str, name: &str, args: Value, origin: MessageOrigin) -> Self {
        Self {
            name: name.to_string(),
            args,
            target: MessageTarget::Actor(actor.to_string()),
            origin,
        }
    }

    pub fn broadcast(audience: Audience, name: &str, args: Value, origin: MessageOrigin) -> Self {
        Self {
            name: name.to_string(),
            args,
            target: MessageTarget::Broadcast(audience),
            origin,
        }
    }

    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    pub fn is_from_remote(&self) -> bool {
        self.origin == MessageOrigin::Remote
    }
}
