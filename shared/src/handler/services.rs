use serde_json::Value;

use crate::{handler::error::ServiceError, messages::BehaviorLogItem};

/// Synchronous services the host offers to behaviors. The result of a call
/// is available as soon as it returns.
pub trait HostServices {
    fn call_service(&mut self, name: &str, args: &Value) -> Result<Value, ServiceError>;

    /// Output a behavior chose to log
    fn log_behavior_message(&mut self, _item: &BehaviorLogItem) {}

    /// A fault caught at a handler boundary
    fn report_behavior_exception(&mut self, _item: &BehaviorLogItem) {}
}

/// A host with no services at all
#[derive(Debug, Default, Clone, Copy)]
pub struct NullServices;

impl HostServices for NullServices {
    fn call_service(&mut self, name: &str, _args: &Value) -> Result<Value, ServiceError> {
        Err(ServiceError::UnknownService {
            name: name.to_string(),
        })
    }
}
