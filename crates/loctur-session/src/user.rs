//! Signed-in user record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User as the server describes it. Only `id` and `username` are required;
/// fields this client does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            is_active: None,
            extra: Map::new(),
        }
    }

    /// Full name when the server has one, otherwise the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_identity_probe() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "username": "olga",
            "email": "olga@example.com",
            "first_name": "Olga",
            "last_name": "Petrova",
            "is_staff": true,
            "is_active": true,
            "avatar": "https://cdn.example.com/olga.png"
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert!(user.is_staff);
        assert_eq!(user.display_name(), "Olga Petrova");
        assert_eq!(user.extra["avatar"], "https://cdn.example.com/olga.png");
    }

    #[test]
    fn test_deserialize_login_user() {
        // The login endpoint omits email and is_active
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "admin",
            "first_name": "",
            "last_name": "",
            "is_staff": true
        }))
        .unwrap();

        assert_eq!(user.email, None);
        assert_eq!(user.is_active, None);
        assert_eq!(user.display_name(), "admin");
        assert!(user.extra.is_empty());
    }
}
