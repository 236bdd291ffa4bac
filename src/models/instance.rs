use super::{challenge::Challenge, team::Team};
use serde::{Deserialize, Serialize};

/// A running challenge container owned by a user for their team.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: u64,
    pub container: String,
    pub user_id: u64,
    pub team_id: u64,
    pub challenge_id: u64,
    pub challenge: Challenge,
    pub team: Team,
    pub created_at: String,
}

/// Answer to a start/stop request on an instance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceResponse {
    pub status: String,
    pub image_name: String,
    pub container_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_info: Option<Vec<String>>,
}

impl InstanceResponse {
    /// Connection strings to show the player, empty while the container boots.
    #[must_use]
    pub fn connection_lines(&self) -> &[String] {
        self.connection_info.as_deref().unwrap_or_default()
    }
}
