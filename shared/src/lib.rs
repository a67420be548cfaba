//! # Brainstem Shared
//! Actors, the behavior database, memory scopes, message routing and the
//! frame sections exchanged with the host, shared by the brainstem runtime
//! and the hosts that drive it.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use brainstem_serde::{
    Color, CompactName, ConstByteLength, FrameBuffer, Quat, Serde, Vec3, WireErr, WireReader,
    WireWriter,
};

mod actor;
mod behavior;
mod handler;
mod memory;
mod messages;
mod wire;

pub use actor::{Actor, ActorRegistry, PlayerActorRecord, RosterChanges};
pub use behavior::{
    behavior_use::BehaviorUse,
    database::{BehaviorDatabase, CollisionHandlers},
    definition::{
        BehaviorBuilder, BehaviorDefinition, Handler, COLLISION_MESSAGE, INIT_MESSAGE,
        LOCAL_TICK_MESSAGE, OFFSTAGE_TICK_MESSAGE, TERRAIN_COLLISION_MESSAGE, TICK_MESSAGE,
        TOUCH_ENTER_MESSAGE,
    },
    error::DatabaseError,
    library::BehaviorLibrary,
    property::{resolve_properties, PropertySpec, PropertyType},
    snapshot::{BrainRecord, DatabaseSnapshot, UseRecord},
};
pub use handler::{
    BehaviorError, Dispatch, HandlerContext, HostServices, NullServices, PumpReport, ServiceError,
    TickClock, TIMERS_MEMORY_KEY,
};
pub use memory::{Memory, MemoryScope, ScopeFrame, ScopeGuard, ScopeHost, ScratchReset};
pub use messages::{
    Audience, BehaviorLogItem, BehaviorLogKind, HostBoundMessage, Message, MessageOrigin,
    MessageRouter, MessageTarget, PlayerToolTip, RemoteActorMessage, TickResponse, TorqueRequest,
    VelocityChange,
};
pub use wire::{
    collisions::{
        CollisionEntry, CollisionSection, TerrainCollisionEntry, TerrainSection,
        COLLISION_SANITY_MARKER, TERRAIN_SANITY_MARKER,
    },
    dirty_memory::{DirtyActorRecord, DirtyMemorySection, DirtyUseRecord},
    error::ProtocolError,
    inbound_frame::InboundFrame,
    roster::{RosterEntry, RosterSection},
    state_sync::{StateSyncEntry, StateSyncSection},
};
