use serde::{Deserialize, Serialize};

use brainstem_serde::Vec3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityChange {
    pub actor: String,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorqueRequest {
    pub actor: String,
    pub torque: Vec3,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerToolTip {
    pub actor: String,
    pub text: String,
}

/// A message for an actor some other peer owns. The host relays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteActorMessage {
    pub name: String,
    pub target_actor: String,
    pub args_json: String,
}

/// A message for the host simulation itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostBoundMessage {
    pub target_actor: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorLogKind {
    Message,
    Fault,
}

/// A line of behavior output, or a fault caught at a handler boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorLogItem {
    pub kind: BehaviorLogKind,
    pub actor: String,
    pub use_id: String,
    pub behavior_uri: String,
    pub message_name: String,
    pub text: String,
}

/// Side effects of one tick, for the host to apply
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickResponse {
    pub velocity_changes: Vec<VelocityChange>,
    pub torque_requests: Vec<TorqueRequest>,
    pub player_tool_tips: Vec<PlayerToolTip>,
    pub messages_to_remote_actors: Vec<RemoteActorMessage>,
    pub messages_to_host: Vec<HostBoundMessage>,
    pub behavior_log: Vec<BehaviorLogItem>,
    pub handlers_invoked: u32,
}

impl TickResponse {
    pub fn faults(&self) -> impl Iterator<Item = &BehaviorLogItem> {
        self.behavior_log
            .iter()
            .filter(|item| item.kind == BehaviorLogKind::Fault)
    }
}
