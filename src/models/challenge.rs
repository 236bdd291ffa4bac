//! Challenge catalogue. The challenge payload keeps the backend's Go field
//! names (`ID`, `Name`, ...) while the lookup tables use lower case.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Challenge {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub category: ChallengeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeCategory {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<Challenge>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeDifficulty {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<Challenge>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeType {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<Challenge>>,
}

/// Admin form payload shared by categories, difficulties and types.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedFormData {
    pub name: String,
}

pub type ChallengeCategoryFormData = NamedFormData;
pub type ChallengeDifficultyFormData = NamedFormData;
pub type ChallengeTypeFormData = NamedFormData;

impl ChallengeCategory {
    /// Number of challenges listed in the category, zero when not expanded.
    #[must_use]
    pub fn challenge_count(&self) -> usize {
        self.challenges.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn challenge_uses_go_field_names() {
        let challenge: Challenge = serde_json::from_value(json!({
            "ID": 12,
            "Name": "Baby ROP",
            "Description": "Return to win",
            "Difficulty": "easy",
            "Category": { "id": 2, "name": "pwn" },
            "CreatedAt": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(challenge.id, 12);
        assert_eq!(challenge.category.name, "pwn");
        assert_eq!(challenge.category.challenge_count(), 0);

        let value = serde_json::to_value(&challenge).unwrap();
        assert_eq!(value["Name"], "Baby ROP");
        assert!(value.get("UpdatedAt").is_none());
    }

    #[test]
    fn category_counts_nested_challenges() {
        let category: ChallengeCategory = serde_json::from_value(json!({
            "id": 2,
            "name": "pwn",
            "challenges": [{
                "ID": 1,
                "Name": "a",
                "Description": "",
                "Difficulty": "easy",
                "Category": { "id": 2, "name": "pwn" }
            }]
        }))
        .unwrap();

        assert_eq!(category.challenge_count(), 1);
    }
}
