//! User Model

use serde::{Deserialize, Serialize};

/// Known user (created on first contact, never deleted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Channel user id
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Preferred locale tag: "ru" | "uz"
    pub lang: String,
    pub created_at: String,
}

/// Upsert payload built from the channel peer info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpsert {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserUpsert {
    /// Human-readable name for staff-facing messages
    pub fn display_name(&self) -> String {
        let full = match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => self.user_id.to_string(),
        };
        match &self.username {
            Some(u) => format!("{full} (@{u})"),
            None => full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut u = UserUpsert {
            user_id: 7,
            username: Some("ivan".into()),
            first_name: Some("Иван".into()),
            last_name: None,
        };
        assert_eq!(u.display_name(), "Иван (@ivan)");

        u.username = None;
        assert_eq!(u.display_name(), "Иван");

        u.first_name = None;
        assert_eq!(u.display_name(), "7");
    }
}
