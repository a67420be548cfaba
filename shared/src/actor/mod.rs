mod actor;
mod actor_registry;
mod player_state;

pub use actor::Actor;
pub use actor_registry::{ActorRegistry, RosterChanges};
pub use player_state::PlayerActorRecord;
