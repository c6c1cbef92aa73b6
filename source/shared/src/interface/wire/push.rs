use {
    crate::{
        error::MalformedPayloadError,
        interface::config::NotificationAssets,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::collections::BTreeMap,
};

/// Notification section of an FCM message.  Fields are optional here, presence
/// is checked when building the display request.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Payload delivered with a background message.  Produced by the messaging
/// provider so unknown fields are tolerated.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(default)]
    pub notification: Option<PushNotification>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl PushPayload {
    pub fn decode(raw: serde_json::Value) -> Result<PushPayload, MalformedPayloadError> {
        if !raw.is_object() {
            return Err(MalformedPayloadError::Decode(format!("expected an object, got [{}]", raw)));
        }
        return serde_json::from_value(raw).map_err(|e| MalformedPayloadError::Decode(e.to_string()));
    }

    /// Identifies the message in log lines.
    pub fn label(&self) -> String {
        return format!(
            "[{}] from [{}]",
            self.message_id.as_deref().unwrap_or("no message id"),
            self.from.as_deref().unwrap_or("unknown sender")
        );
    }
}

/// Parameters for `registration.showNotification`.  Everything except `title`
/// serializes to the `NotificationOptions` dictionary shape; absent `data` stays
/// absent.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRequest {
    #[serde(skip)]
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

/// Build the display request for a payload.  `data` is passed through as is.
pub fn display_request(
    payload: &PushPayload,
    assets: &NotificationAssets,
) -> Result<DisplayRequest, MalformedPayloadError> {
    let Some(notification) = &payload.notification else {
        return Err(MalformedPayloadError::MissingNotification);
    };
    let Some(title) = &notification.title else {
        return Err(MalformedPayloadError::MissingTitle);
    };
    let Some(body) = &notification.body else {
        return Err(MalformedPayloadError::MissingBody);
    };
    return Ok(DisplayRequest {
        title: title.clone(),
        body: body.clone(),
        icon: assets.icon.clone(),
        badge: assets.badge.clone(),
        data: payload.data.clone(),
    });
}

#[cfg(test)]
mod tests {
    use {
        super::{
            display_request,
            PushPayload,
        },
        crate::{
            error::MalformedPayloadError,
            interface::config::NotificationAssets,
        },
        serde_json::json,
    };

    #[test]
    fn extracts_title_body_and_data() {
        let payload = PushPayload::decode(json!({
            "notification": {
                "title": "T",
                "body": "B"
            },
            "data": {
                "k": "v"
            }
        })).unwrap();
        let req = display_request(&payload, &NotificationAssets::default()).unwrap();
        assert_eq!(req.title, "T");
        assert_eq!(req.body, "B");
        assert_eq!(req.icon, "/static/images/logo.png");
        assert_eq!(req.badge, "/static/images/logo.png");
        let data = req.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn label_from_provider_fields() {
        let payload = PushPayload::decode(json!({
            "notification": {
                "title": "T",
                "body": "B",
                "image": "/img/banner.png"
            },
            "from": "1082376703847",
            "collapseKey": "campaign",
            "messageId": "m-1",
            "fcmOptions": {}
        })).unwrap();
        assert_eq!(payload.label(), "[m-1] from [1082376703847]");
        assert_eq!(PushPayload::default().label(), "[no message id] from [unknown sender]");
        assert_eq!(payload.data, None);
    }

    #[test]
    fn missing_sections_are_reported() {
        let assets = NotificationAssets::default();
        let no_notification = PushPayload::decode(json!({
            "data": {
                "k": "v"
            }
        })).unwrap();
        assert_eq!(display_request(&no_notification, &assets), Err(MalformedPayloadError::MissingNotification));
        let no_title = PushPayload::decode(json!({
            "notification": {
                "body": "B"
            }
        })).unwrap();
        assert_eq!(display_request(&no_title, &assets), Err(MalformedPayloadError::MissingTitle));
        let no_body = PushPayload::decode(json!({
            "notification": {
                "title": "T"
            }
        })).unwrap();
        assert_eq!(display_request(&no_body, &assets), Err(MalformedPayloadError::MissingBody));
    }

    #[test]
    fn rejects_non_objects_and_non_string_data() {
        assert!(matches!(PushPayload::decode(json!(null)), Err(MalformedPayloadError::Decode(_))));
        assert!(matches!(PushPayload::decode(json!("text")), Err(MalformedPayloadError::Decode(_))));
        assert!(matches!(PushPayload::decode(json!({
            "data": {
                "k": 1
            }
        })), Err(MalformedPayloadError::Decode(_))));
    }

    #[test]
    fn display_options_omit_title() {
        let payload = PushPayload::decode(json!({
            "notification": {
                "title": "T",
                "body": "B"
            },
            "data": {}
        })).unwrap();
        let req = display_request(&payload, &NotificationAssets::default()).unwrap();
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "body": "B",
            "icon": "/static/images/logo.png",
            "badge": "/static/images/logo.png",
            "data": {}
        }));
    }

    #[test]
    fn absent_data_stays_absent() {
        let payload = PushPayload::decode(json!({
            "notification": {
                "title": "T",
                "body": "B"
            }
        })).unwrap();
        let req = display_request(&payload, &NotificationAssets::default()).unwrap();
        assert_eq!(req.data, None);
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "body": "B",
            "icon": "/static/images/logo.png",
            "badge": "/static/images/logo.png"
        }));
    }
}
