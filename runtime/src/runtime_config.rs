use std::default::Default;

/// Contains Config properties which will be used by the Runtime
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Capacity in bytes of frame buffers made by
    /// [`Runtime::new_frame_buffer`](crate::Runtime::new_frame_buffer)
    pub frame_capacity: usize,
    /// Messages delivered per tick before the rest are left for the next one
    pub max_messages_per_tick: usize,
    /// How deep decks may nest inside other decks
    pub max_deck_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_capacity: 1024 * 1024,
            max_messages_per_tick: 65536,
            max_deck_depth: 8,
        }
    }
}
