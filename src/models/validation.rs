use serde_json::Value;

use crate::error::{FcmBatchError, Result};

const REQUIRED_FIELDS: [&str; 3] = [
    "message.token",
    "message.notification.title",
    "message.notification.body",
];

/// Checks that a hand-built message still carries a target token, a title and a body.
pub fn validate_custom_payload(payload: &Value) -> Result<()> {
    let missing = REQUIRED_FIELDS
        .iter()
        .any(|path| lookup(payload, path).is_none_or(Value::is_null));

    if missing {
        return Err(FcmBatchError::Validation(
            "\"fcm token\", \"body\" and \"title\" are required".to_string(),
        ));
    }

    Ok(())
}

fn lookup<'a>(value: &'a Value, dotted_path: &str) -> Option<&'a Value> {
    dotted_path
        .split('.')
        .try_fold(value, |current, key| current.get(key))
}
