use {
    crate::firebase::DEFAULT_SDK_VERSION,
    serde::Deserialize,
    shared::{
        error::ConfigurationError,
        interface::config::{
            BridgeSettings,
            FirebaseConfig,
            MalformedPayloadPolicy,
            NotificationAssets,
        },
    },
};

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MalformedMode {
    #[default]
    Suppress,
    Fallback,
    Propagate,
}

/// Query parameters of the worker script url, ex
/// `firebase-messaging-sw.js?apiKey=...&projectId=...&onMalformed=fallback`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkerParams {
    #[serde(flatten)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub on_malformed: MalformedMode,
    #[serde(default)]
    pub fallback_title: Option<String>,
    #[serde(default)]
    pub fallback_body: Option<String>,
    #[serde(default)]
    pub sdk_version: Option<String>,
}

impl WorkerParams {
    /// Accepts `location.search` as is, with or without the leading `?`.
    pub fn parse(search: &str) -> Result<WorkerParams, ConfigurationError> {
        return serde_urlencoded::from_str::<WorkerParams>(
            search.strip_prefix('?').unwrap_or(search),
        ).map_err(|e| ConfigurationError::Params(e.to_string()));
    }

    pub fn bridge_settings(&self) -> Result<BridgeSettings, ConfigurationError> {
        let defaults = NotificationAssets::default();
        let on_malformed = match self.on_malformed {
            MalformedMode::Suppress => MalformedPayloadPolicy::Suppress,
            MalformedMode::Propagate => MalformedPayloadPolicy::Propagate,
            MalformedMode::Fallback => {
                let (Some(title), Some(body)) = (&self.fallback_title, &self.fallback_body) else {
                    return Err(
                        ConfigurationError::Params(
                            "onMalformed=fallback requires fallbackTitle and fallbackBody".to_string(),
                        ),
                    );
                };
                MalformedPayloadPolicy::Fallback {
                    title: title.clone(),
                    body: body.clone(),
                }
            },
        };
        return Ok(BridgeSettings {
            assets: NotificationAssets {
                icon: self.icon.clone().unwrap_or(defaults.icon),
                badge: self.badge.clone().unwrap_or(defaults.badge),
            },
            on_malformed,
        });
    }

    pub fn sdk_version(&self) -> &str {
        return self.sdk_version.as_deref().unwrap_or(DEFAULT_SDK_VERSION);
    }
}
