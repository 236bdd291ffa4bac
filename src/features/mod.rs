//! Domain-level frontend features and their shared logic. Pages import these
//! modules to keep view code focused while auth handling stays in one place.

pub mod auth;
