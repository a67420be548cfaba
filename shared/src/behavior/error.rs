use thiserror::Error;

/// Errors that can occur while loading or querying the behavior database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// The snapshot was not valid JSON, or did not have the database shape
    #[error("Behavior database snapshot could not be parsed: {reason}")]
    MalformedSnapshot { reason: String },

    /// A brain refers to a behavior that was never registered
    #[error("Use {use_id:?} in brain {brain:?} refers to behavior {uri:?}, which is not registered in the behavior library")]
    UnknownBehaviorUri {
        brain: String,
        use_id: String,
        uri: String,
    },

    /// Two uses share an id
    #[error("Use id {use_id:?} appears more than once in the database. Use ids must be unique across all brains")]
    DuplicateUseId { use_id: String },

    /// Property lookup for a behavior that is not in the database
    #[error("Behavior {uri:?} is not in the behavior database")]
    UnknownBehavior { uri: String },
}
