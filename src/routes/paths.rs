pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const NOT_FOUND: &str = "/404";
pub const PWN: &str = "/pwn";
pub const SCOREBOARD: &str = "/scoreboard";
pub const NOTIFICATIONS: &str = "/notifications";
pub const TEAM: &str = "/team";
pub const PROFILE: &str = "/profile";
pub const USERS: &str = "/users";
pub const ADMIN: &str = "/admin";
