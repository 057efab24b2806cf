use serde::{Deserialize, Serialize};

/// Response wrapper shared by every match endpoint:
/// `{ "isSuccess": bool, "data": T | null, "messageText": string | null }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub data: Option<T>,
    pub message_text: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_success: true,
            data: Some(data),
            message_text: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            data: None,
            message_text: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.is_success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(self
                .message_text
                .unwrap_or_else(|| "Request failed".to_string())),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(e) => Envelope::rejected(e.to_string()),
        }
    }
}
