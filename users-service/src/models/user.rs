use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Test User";
pub const DEFAULT_EMAIL: &str = "test@example.com";

/// Placeholder user held only in process memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Millisecond timestamp assigned at creation.
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Trims the supplied values and falls back to the placeholders when a
    /// value is absent or blank.
    pub fn new(id: i64, name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            id,
            name: or_default(name, DEFAULT_NAME),
            email: or_default(email, DEFAULT_EMAIL),
        }
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}
