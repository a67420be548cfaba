use thiserror::Error;

use brainstem_serde::WireErr;

/// Errors raised while reading or validating the inbound frame. Any of these
/// aborts the tick before state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The codec failed underneath a section
    #[error("Frame could not be decoded: {0}")]
    Wire(#[from] WireErr),

    /// A sanity marker after a variable-length section did not match
    #[error("Sanity marker after the {section} section should be {expected} but was {found}. Host and runtime disagree about the frame layout")]
    SanityMismatch {
        section: &'static str,
        expected: i32,
        found: i32,
    },

    /// The roster names the same actor or temp id twice
    #[error("Malformed roster: {reason}")]
    MalformedRoster { reason: String },

    /// State sync refers to a temp id the roster did not assign this tick
    #[error("Temp id {temp_id} is not assigned by this tick's roster")]
    UnknownTempId { temp_id: u16 },

    /// A section count prefix was negative
    #[error("Negative entry count {count} in the {section} section")]
    NegativeCount { section: &'static str, count: i32 },
}
