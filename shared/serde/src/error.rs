use thiserror::Error;

/// Errors raised while encoding or decoding a wire frame. Any of these means
/// the host and the runtime disagree about framing, so they are fatal to the
/// operation that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireErr {
    /// A write would go past the end of the buffer
    #[error("Buffer overflow: trying to write {needed} bytes at position {position}, but buffer size is {capacity}")]
    Overflow {
        needed: usize,
        position: usize,
        capacity: usize,
    },

    /// A read would go past the end of the written data
    #[error("Buffer underflow: trying to read {needed} bytes at position {position}, but buffer size is {length}")]
    Underflow {
        needed: usize,
        position: usize,
        length: usize,
    },

    /// A length prefix was negative
    #[error("Negative length prefix {length} at position {position}")]
    NegativeLength { length: i32, position: usize },

    /// A string contained an unpaired UTF-16 surrogate
    #[error("Invalid UTF-16 string data ending at position {position}")]
    InvalidUtf16 { position: usize },

    /// A compact name carried an unknown encoding tag
    #[error("Unknown compact name tag {tag} at position {position}")]
    InvalidNameTag { tag: u8, position: usize },

    /// A string or list is too long for its length prefix
    #[error("Length {length} does not fit in its length prefix, the maximum is {max}")]
    LengthTooLarge { length: usize, max: usize },
}
