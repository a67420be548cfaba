use serde_json::{Map, Value};

mod memory_scope;

pub use memory_scope::{MemoryScope, ScopeFrame, ScopeGuard, ScopeHost};

/// A JSON object holding one tier of behavior memory
pub type Memory = Map<String, Value>;

/// Why scratch memory is being thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchReset {
    OwnershipTransfer,
    Reload,
    WorldReset,
}
