use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_ASSET: &str = "/static/images/logo.png";

/// Identifies the messaging project.  Values are opaque and handed to
/// `firebase.initializeApp` unchanged, in declaration order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationAssets {
    pub icon: String,
    pub badge: String,
}

impl Default for NotificationAssets {
    fn default() -> Self {
        return NotificationAssets {
            icon: DEFAULT_ASSET.to_string(),
            badge: DEFAULT_ASSET.to_string(),
        };
    }
}

/// What to do with a payload that can't produce a display request.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum MalformedPayloadPolicy {
    /// Log and show nothing.
    #[default]
    Suppress,
    /// Show a notification with fixed text instead.  Whatever `data` decoded is
    /// still passed through.
    Fallback {
        title: String,
        body: String,
    },
    /// Return the error to the host.  Display errors are returned too.
    Propagate,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BridgeSettings {
    pub assets: NotificationAssets,
    pub on_malformed: MalformedPayloadPolicy,
}

impl BridgeSettings {
    /// Display failures reach the host instead of being logged and dropped.
    pub fn propagates_errors(&self) -> bool {
        return self.on_malformed == MalformedPayloadPolicy::Propagate;
    }
}
