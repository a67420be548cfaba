use thiserror::Error;

/// Errors a host service can report back to a handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Host service {name:?} does not exist")]
    UnknownService { name: String },

    #[error("Host service {name:?} failed: {reason}")]
    Failed { name: String, reason: String },
}

/// Faults raised inside a handler call. These are caught at the invocation
/// boundary and never abort a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    /// The handler returned an error of its own
    #[error("Handler failed: {reason}")]
    Failed { reason: String },

    /// The handler panicked
    #[error("Handler panicked: {reason}")]
    Panicked { reason: String },

    #[error("Actor {actor:?} does not exist")]
    ActorNotFound { actor: String },

    #[error("Use {use_id:?} is not attached to actor {actor:?}")]
    UseNotFound { actor: String, use_id: String },

    #[error("Memory was accessed outside of any handler scope")]
    NoActiveScope,

    #[error("Deck nesting reached depth {depth}, the limit is {max}")]
    DeckTooDeep { depth: usize, max: usize },

    #[error("Deck property {property:?} is invalid: {reason}")]
    InvalidDeck { property: String, reason: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl BehaviorError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
