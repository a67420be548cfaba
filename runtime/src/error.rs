use thiserror::Error;

use brainstem_shared::{BehaviorError, DatabaseError, ProtocolError, WireErr};

/// Errors returned by the [`Runtime`](crate::Runtime)
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The inbound frame was malformed; the tick did not run
    #[error("Tick aborted by a protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// A direct method call faulted
    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("Actor {actor:?} does not exist")]
    ActorNotFound { actor: String },

    #[error("Use {use_id:?} is not attached to actor {actor:?}")]
    UseNotFound { actor: String, use_id: String },

    #[error("Use {use_id:?} has no handler for {method:?}")]
    HandlerNotFound { use_id: String, method: String },

    /// Dirty memory did not fit back into the frame buffer. Dirty flags are
    /// kept, so the next tick tries again.
    #[error("Dirty memory could not be written to the frame buffer: {0}")]
    Flush(WireErr),

    #[error("Memory could not be serialized: {0}")]
    Json(#[from] serde_json::Error),
}
