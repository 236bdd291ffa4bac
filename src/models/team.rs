use super::user::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub creator_id: u64,
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Team {
    #[must_use]
    pub fn creator(&self) -> Option<&User> {
        self.members.iter().find(|member| member.id == self.creator_id)
    }
}
