use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FcmRequest {
    pub message: FcmMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FcmMessage {
    pub token: String,
    pub notification: FcmNotification,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AndroidConfig {
    pub collapse_key: String,
    pub priority: String,
    pub ttl: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AndroidNotification {
    pub sound: String,
}

impl FcmRequest {
    /// iOS messages go out without a platform block.
    pub fn ios(
        token: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            message: FcmMessage {
                token: token.to_string(),
                notification: FcmNotification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
                android: None,
                data: data.filter(|d| !d.is_empty()),
            },
        }
    }

    /// Android messages collapse on the title and are delivered immediately
    /// at high priority.
    pub fn android(
        token: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
        sound: &str,
    ) -> Self {
        let mut request = Self::ios(token, title, body, data);
        request.message.android = Some(AndroidConfig {
            collapse_key: title.to_string(),
            priority: "high".to_string(),
            ttl: "0s".to_string(),
            notification: AndroidNotification {
                sound: sound.to_string(),
            },
        });
        request
    }
}

/// One queued entry of a batch, serialized as the body of a sub-request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    Message(FcmRequest),
    Custom(serde_json::Value),
}

impl Payload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
