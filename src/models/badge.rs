use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Minimal challenge reference embedded in awards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeChallenge {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeTeam {
    pub id: u64,
    pub name: String,
}

/// A badge awarded to a user, optionally for a challenge or as part of a team.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: u64,
    pub user_id: u64,
    pub badge_id: u64,
    pub badge: Badge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<BadgeChallenge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<BadgeTeam>,
    pub awarded_at: String,
}
