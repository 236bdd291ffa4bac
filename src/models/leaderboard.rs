use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndividualLeaderboardEntry {
    pub rank: u32,
    pub id: u64,
    pub username: String,
    pub points: i64,
    pub solves: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamLeaderboardEntry {
    pub rank: u32,
    pub id: u64,
    pub name: String,
    pub points: i64,
    pub solves: u32,
    pub member_count: u32,
}
