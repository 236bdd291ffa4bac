//! Route table for the frontend. Each page is either public or protected;
//! protected pages mount a [`ProtectedRoute`](crate::features::auth::ProtectedRoute)
//! before rendering anything. Admin pages are gated on authentication only,
//! role checks belong to the API.

pub mod paths;

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminSection {
    Dashboard,
    Challenges,
    ChallengeCategories,
    Configuration,
    Instances,
    Notifications,
    Submissions,
    Users,
}

impl AdminSection {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "dashboard" => Some(Self::Dashboard),
            "challenges" => Some(Self::Challenges),
            "challenge-categories" => Some(Self::ChallengeCategories),
            "configuration" => Some(Self::Configuration),
            "instances" => Some(Self::Instances),
            "notifications" => Some(Self::Notifications),
            "submissions" => Some(Self::Submissions),
            "users" => Some(Self::Users),
            _ => None,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Challenges => "challenges",
            Self::ChallengeCategories => "challenge-categories",
            Self::Configuration => "configuration",
            Self::Instances => "instances",
            Self::Notifications => "notifications",
            Self::Submissions => "submissions",
            Self::Users => "users",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "param", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Login,
    Register,
    NotFound,
    Pwn,
    PwnCategory(String),
    Scoreboard,
    Notifications,
    Team,
    Profile,
    Users,
    Admin,
    AdminSection(AdminSection),
}

impl Route {
    /// Resolves a browser path (query and fragment allowed) to a route.
    /// Unknown paths resolve to [`Route::NotFound`].
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["404"] => Self::NotFound,
            ["pwn"] => Self::Pwn,
            ["pwn", category] => Self::PwnCategory((*category).to_string()),
            ["scoreboard"] => Self::Scoreboard,
            ["notifications"] => Self::Notifications,
            ["team"] => Self::Team,
            ["profile"] => Self::Profile,
            ["users"] => Self::Users,
            ["admin"] => Self::Admin,
            ["admin", section] => {
                AdminSection::from_segment(section).map_or(Self::NotFound, Self::AdminSection)
            }
            _ => Self::NotFound,
        }
    }

    /// Whether the page must be gated behind an authenticated session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Home | Self::Login | Self::Register | Self::NotFound
        )
    }

    /// Canonical path for the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => paths::HOME.to_string(),
            Self::Login => paths::LOGIN.to_string(),
            Self::Register => paths::REGISTER.to_string(),
            Self::NotFound => paths::NOT_FOUND.to_string(),
            Self::Pwn => paths::PWN.to_string(),
            Self::PwnCategory(category) => format!("{}/{category}", paths::PWN),
            Self::Scoreboard => paths::SCOREBOARD.to_string(),
            Self::Notifications => paths::NOTIFICATIONS.to_string(),
            Self::Team => paths::TEAM.to_string(),
            Self::Profile => paths::PROFILE.to_string(),
            Self::Users => paths::USERS.to_string(),
            Self::Admin => paths::ADMIN.to_string(),
            Self::AdminSection(section) => format!("{}/{}", paths::ADMIN, section.segment()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
