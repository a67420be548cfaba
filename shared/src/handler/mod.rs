mod dispatch;
mod error;
mod handler_context;
mod services;

pub use dispatch::{Dispatch, PumpReport, TickClock};
pub use error::{BehaviorError, ServiceError};
pub use handler_context::{HandlerContext, TIMERS_MEMORY_KEY};
pub use services::{HostServices, NullServices};
