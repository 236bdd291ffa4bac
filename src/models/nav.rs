use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavSubItem {
    pub title: String,
    pub url: String,
}

/// Sidebar entry. `icon` names an icon from the UI kit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavSubItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NavItem {
    /// True when `path` is this entry or one of its sub-entries.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.url == path
            || self
                .items
                .iter()
                .flatten()
                .any(|item| item.url == path)
    }
}
