//! Typed data contracts mirroring the pwnthemall backend JSON. Field names
//! follow what the backend sends, which is not uniform across resources.

pub mod badge;
pub mod challenge;
pub mod instance;
pub mod leaderboard;
pub mod nav;
pub mod notification;
pub mod team;
pub mod user;

pub use badge::{Badge, UserBadge};
pub use challenge::{Challenge, ChallengeCategory, ChallengeDifficulty, ChallengeType};
pub use instance::{Instance, InstanceResponse};
pub use leaderboard::{IndividualLeaderboardEntry, TeamLeaderboardEntry};
pub use nav::{NavItem, NavSubItem};
pub use notification::{Notification, NotificationInput, NotificationType, SentNotification};
pub use team::Team;
pub use user::{User, UserFormData};
