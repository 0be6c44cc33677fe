//! User profile service implementation
//!
//! Profile fetch/upsert with field validation and the completeness check
//! the booking and hosting flows depend on.

use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::database::UserRepository;
use crate::middleware::auth::AuthContext;
use crate::models::user::{UpsertProfileRequest, UserProfile};
use crate::utils::errors::{CornerClubError, Result};

/// Portfolio image caps mirror the event gallery limits
const MAX_PORTFOLIO_IMAGES: usize = 10;
const MAX_IMAGE_REF_BYTES: usize = 256 * 1024;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,14}$").expect("valid phone regex"))
}

#[derive(Clone)]
pub struct ProfileService {
    users: UserRepository,
}

impl ProfileService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Get a profile. Not-found is a value, not an error.
    pub async fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.users.find_by_id(user_id).await
    }

    /// Upsert the caller's own profile
    pub async fn upsert(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        request: UpsertProfileRequest,
    ) -> Result<UserProfile> {
        if ctx.user_id != user_id && !ctx.is_admin {
            return Err(CornerClubError::PermissionDenied(
                "Profiles can only be edited by their owner".to_string(),
            ));
        }

        validate_profile_request(&request)?;

        let profile = self.users.upsert(user_id, request).await?;

        info!(user_id = user_id, "Profile updated");
        Ok(profile)
    }

    /// Create the profile on first login if missing, seeded from the auth
    /// provider's display snapshot
    pub async fn ensure_exists(&self, ctx: &AuthContext) -> Result<UserProfile> {
        if let Some(existing) = self.users.find_by_id(&ctx.user_id).await? {
            return Ok(existing);
        }

        let request = UpsertProfileRequest {
            name: ctx.name.clone(),
            email: ctx.email.clone(),
            phone: None,
            bio: None,
            city: None,
            avatar: ctx.avatar.clone(),
            portfolio: None,
        };

        self.users.upsert(&ctx.user_id, request).await
    }

    /// Fetch a profile and require name, email and phone to be present
    pub async fn require_complete(&self, user_id: &str) -> Result<UserProfile> {
        let profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CornerClubError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        match profile.missing_field() {
            Some(field) => Err(CornerClubError::ProfileIncomplete(format!(
                "{} is required",
                field
            ))),
            None => Ok(profile),
        }
    }
}

/// Validate profile fields that are present in the request
fn validate_profile_request(request: &UpsertProfileRequest) -> Result<()> {
    if let Some(email) = request.email.as_deref() {
        if !email.is_empty() && !email_regex().is_match(email) {
            return Err(CornerClubError::InvalidInput(
                "Email address is not valid".to_string(),
            ));
        }
    }

    if let Some(phone) = request.phone.as_deref() {
        if !phone.is_empty() && !phone_regex().is_match(phone) {
            return Err(CornerClubError::InvalidInput(
                "Phone number is not valid".to_string(),
            ));
        }
    }

    if let Some(portfolio) = &request.portfolio {
        if portfolio.len() > MAX_PORTFOLIO_IMAGES {
            return Err(CornerClubError::InvalidInput(format!(
                "Portfolio is limited to {} images",
                MAX_PORTFOLIO_IMAGES
            )));
        }

        for image in portfolio {
            if image.len() > MAX_IMAGE_REF_BYTES {
                return Err(CornerClubError::InvalidInput(
                    "Portfolio image exceeds the maximum allowed size".to_string(),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpsertProfileRequest {
        UpsertProfileRequest {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("+911234567890".to_string()),
            bio: None,
            city: Some("Lucknow".to_string()),
            avatar: None,
            portfolio: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_profile_request(&request()).is_ok());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut r = request();
        r.email = Some("not-an-email".to_string());
        assert!(validate_profile_request(&r).is_err());
    }

    #[test]
    fn test_bad_phone_rejected() {
        let mut r = request();
        r.phone = Some("call me".to_string());
        assert!(validate_profile_request(&r).is_err());
    }

    #[test]
    fn test_absent_fields_are_not_validated() {
        let r = UpsertProfileRequest {
            name: None,
            email: None,
            phone: None,
            bio: Some("hi".to_string()),
            city: None,
            avatar: None,
            portfolio: None,
        };
        assert!(validate_profile_request(&r).is_ok());
    }

    #[test]
    fn test_oversized_portfolio_rejected() {
        let mut r = request();
        r.portfolio = Some(vec!["x".repeat(MAX_IMAGE_REF_BYTES + 1)]);
        assert!(validate_profile_request(&r).is_err());

        let mut r = request();
        r.portfolio = Some((0..=MAX_PORTFOLIO_IMAGES).map(|i| format!("img://{}", i)).collect());
        assert!(validate_profile_request(&r).is_err());
    }
}
