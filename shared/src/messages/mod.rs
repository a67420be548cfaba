mod message;
mod message_router;
mod tick_response;

pub use message::{Audience, Message, MessageOrigin, MessageTarget};
pub use message_router::MessageRouter;
pub use tick_response::{
    BehaviorLogItem, BehaviorLogKind, HostBoundMessage, PlayerToolTip, RemoteActorMessage,
    TickResponse, TorqueRequest, VelocityChange,
};
