use std::{collections::HashMap, fmt, sync::Arc};

use serde_json::Value;

use crate::{
    behavior::property::PropertySpec,
    handler::{BehaviorError, HandlerContext},
    messages::Message,
};

/// A type-erased message handler. Returns a value for direct method calls;
/// broadcast delivery ignores it.
pub type Handler =
    Arc<dyn Fn(&mut HandlerContext<'_, '_>, &Message) -> Result<Value, BehaviorError> + Send + Sync>;

pub const INIT_MESSAGE: &str = "Init";
pub const COLLISION_MESSAGE: &str = "Collision";
pub const TOUCH_ENTER_MESSAGE: &str = "TouchEnter";
pub const TERRAIN_COLLISION_MESSAGE: &str = "TerrainCollision";
pub const TICK_MESSAGE: &str = "Tick";
pub const OFFSTAGE_TICK_MESSAGE: &str = "OffstageTick";
pub const LOCAL_TICK_MESSAGE: &str = "LocalTick";

/// An immutable behavior: its property schema and message handlers.
/// Shared by every use of it.
pub struct BehaviorDefinition {
    uri: String,
    properties: Vec<PropertySpec>,
    handlers: HashMap<String, Handler>,
}

impl BehaviorDefinition {
    pub fn builder(uri: &str) -> BehaviorBuilder {
        BehaviorBuilder {
            definition: Self {
                uri: uri.to_string(),
                properties: Vec::new(),
                handlers: HashMap::new(),
            },
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|spec| spec.name == name)
    }

    pub fn handler(&self, message: &str) -> Option<&Handler> {
        self.handlers.get(message)
    }

    pub fn handles(&self, message: &str) -> bool {
        self.handlers.contains_key(message)
    }

    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl fmt::Debug for BehaviorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages: Vec<&str> = self.message_names().collect();
        messages.sort_unstable();
        f.debug_struct("BehaviorDefinition")
            .field("uri", &self.uri)
            .field("properties", &self.properties)
            .field("messages", &messages)
            .finish()
    }
}

pub struct BehaviorBuilder {
    definition: BehaviorDefinition,
}

impl BehaviorBuilder {
    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.definition.properties.push(spec);
        self
    }

    /// Registers the handler for `message`, replacing any earlier one
    pub fn on<F>(mut self, message: &str, handler: F) -> Self
    where
        F: Fn(&mut HandlerContext<'_, '_>, &Message) -> Result<Value, BehaviorError>
            + Send
            + Sync
            + 'static,
    {
        self.definition
            .handlers
            .insert(message.to_string(), Arc::new(handler));
        self
    }

    pub fn build(self) -> BehaviorDefinition {
        self.definition
    }
}
