//! Authentication middleware
//!
//! This module verifies bearer tokens issued by the auth provider and turns
//! them into an explicit `AuthContext` that is passed to every workflow
//! call. There is no ambient current-user state anywhere in the service.

use std::collections::HashSet;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::utils::errors::{CornerClubError, Result};

/// Token claims issued by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub exp: usize,
}

/// Authenticated caller identity, passed explicitly to services
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl AuthContext {
    /// Require admin privileges
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin {
            debug!(user_id = %self.user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = %self.user_id, "Unauthorized admin access attempt");
            Err(CornerClubError::PermissionDenied(
                "Admin privileges required".to_string(),
            ))
        }
    }
}

/// Bearer token verifier
#[derive(Clone)]
pub struct AuthVerifier {
    decoding_key: DecodingKey,
    admin_ids: HashSet<String>,
}

impl AuthVerifier {
    /// Create a new AuthVerifier instance
    pub fn new(settings: &Settings) -> Self {
        let admin_ids: HashSet<String> = settings.auth.admin_ids.iter().cloned().collect();

        Self {
            decoding_key: DecodingKey::from_secret(settings.auth.jwt_secret.as_bytes()),
            admin_ids,
        }
    }

    /// Check if a user id is an admin
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.contains(user_id)
    }

    /// Verify a bearer token and build the caller context
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| CornerClubError::Authentication(format!("Invalid token: {}", e)))?;

        let claims = data.claims;
        let is_admin = self.is_admin(&claims.sub);

        Ok(AuthContext {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            avatar: claims.picture,
            is_admin,
        })
    }

    /// Verify an `Authorization: Bearer ...` header value
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<AuthContext> {
        let header = header.ok_or_else(|| {
            CornerClubError::Authentication("Missing Authorization header".to_string())
        })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            CornerClubError::Authentication("Authorization header must be a bearer token".to_string())
        })?;

        self.verify_token(token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    AuthVerifier: FromRef<S>,
{
    type Rejection = CornerClubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let verifier = AuthVerifier::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        verifier.verify_bearer(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "test-secret".to_string();
        settings.auth.admin_ids = vec!["admin-1".to_string()];
        settings
    }

    fn token(sub: &str, secret: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            picture: None,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_builds_context() {
        let verifier = AuthVerifier::new(&settings());
        let ctx = verifier.verify_token(&token("u1", "test-secret")).unwrap();

        assert_eq!(ctx.user_id, "u1");
        assert_eq!(ctx.name.as_deref(), Some("Asha"));
        assert!(!ctx.is_admin);
    }

    #[test]
    fn test_admin_flag_from_settings() {
        let verifier = AuthVerifier::new(&settings());
        let ctx = verifier
            .verify_token(&token("admin-1", "test-secret"))
            .unwrap();

        assert!(ctx.is_admin);
        assert!(ctx.require_admin().is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = AuthVerifier::new(&settings());
        assert!(verifier.verify_token(&token("u1", "other-secret")).is_err());
    }

    #[test]
    fn test_bearer_header_parsing() {
        let verifier = AuthVerifier::new(&settings());
        let token = token("u1", "test-secret");

        assert!(verifier
            .verify_bearer(Some(&format!("Bearer {}", token)))
            .is_ok());
        assert!(verifier.verify_bearer(Some(&token)).is_err());
        assert!(verifier.verify_bearer(None).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            sub: "u1".to_string(),
            name: None,
            email: None,
            picture: None,
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let verifier = AuthVerifier::new(&settings());
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_non_admin_cannot_require_admin() {
        let ctx = AuthContext {
            user_id: "u1".to_string(),
            name: None,
            email: None,
            avatar: None,
            is_admin: false,
        };
        assert!(ctx.require_admin().is_err());
    }
}
