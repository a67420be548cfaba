//! # Brainstem Runtime
//! An embedded behavior runtime. Once per simulation tick the host hands it
//! a snapshot of the world, it runs every actor's behaviors against that
//! snapshot, and it returns their side effects along with whatever memory
//! changed.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use brainstem_shared::{
        Actor, BehaviorDefinition, BehaviorError, BehaviorLibrary, BehaviorLogItem,
        BehaviorLogKind, CollisionEntry, CollisionHandlers, CollisionSection, Color,
        DatabaseError, DatabaseSnapshot, DirtyActorRecord, DirtyMemorySection, DirtyUseRecord,
        FrameBuffer, HandlerContext, HostBoundMessage, HostServices, InboundFrame, Memory,
        Message, MessageOrigin, NullServices, PlayerActorRecord, PlayerToolTip, PropertySpec,
        PropertyType, ProtocolError, Quat, RemoteActorMessage, RosterEntry, RosterSection, Serde,
        ServiceError, StateSyncEntry, StateSyncSection, TerrainCollisionEntry, TerrainSection,
        TickResponse, TorqueRequest, Vec3, VelocityChange, WireErr, WireReader, WireWriter,
    };
}

mod error;
mod request;
mod runtime;
mod runtime_config;
mod tick_pipeline;

pub use error::RuntimeError;
pub use request::{HostMessage, TickRequest};
pub use runtime::Runtime;
pub use runtime_config::RuntimeConfig;
