//! User profile model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User profile keyed by the auth provider's subject id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub avatar: Option<String>,
    pub portfolio: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Name, email and phone are all required before hosting or booking
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }

    /// First missing required field, for user-facing error messages
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else if self.phone.trim().is_empty() {
            Some("phone")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub avatar: Option<String>,
    pub portfolio: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, phone: &str) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            bio: None,
            city: None,
            avatar: None,
            portfolio: serde_json::json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_complete_profile() {
        let p = profile("Asha", "asha@example.com", "+911234567890");
        assert!(p.is_complete());
        assert_eq!(p.missing_field(), None);
    }

    #[test]
    fn test_incomplete_profile_reports_first_missing_field() {
        assert_eq!(
            profile("", "asha@example.com", "123").missing_field(),
            Some("name")
        );
        assert_eq!(profile("Asha", "", "123").missing_field(), Some("email"));
        assert_eq!(
            profile("Asha", "asha@example.com", "  ").missing_field(),
            Some("phone")
        );
    }
}
