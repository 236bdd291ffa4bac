use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Warning,
    Error,
}

/// A notification as seen by its recipient.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<String>,
    pub created_at: String,
}

impl Notification {
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Admin payload for sending a notification. Without a user or team it is a
/// broadcast.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
}

/// A notification as listed in the admin history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentNotification {
    pub id: u64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unread_notification() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 1,
            "title": "Maintenance",
            "message": "Instances restart at noon",
            "type": "warning",
            "createdAt": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(notification.kind, NotificationType::Warning);
        assert!(!notification.is_read());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let parsed = serde_json::from_value::<Notification>(json!({
            "id": 1,
            "title": "t",
            "message": "m",
            "type": "success",
            "createdAt": "2025-03-01T10:00:00Z"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn broadcast_input_omits_targets() {
        let input = NotificationInput {
            title: "Hint released".to_string(),
            message: "Check the web category".to_string(),
            kind: NotificationType::Info,
            user_id: None,
            team_id: None,
        };

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "title": "Hint released",
                "message": "Check the web category",
                "type": "info"
            })
        );
    }
}
