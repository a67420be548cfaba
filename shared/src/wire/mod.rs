pub mod collisions;
pub mod dirty_memory;
pub mod error;
pub mod inbound_frame;
pub mod list;
pub mod roster;
pub mod state_sync;
