//! User profile repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{UpsertProfileRequest, UserProfile};
use crate::utils::errors::CornerClubError;

const PROFILE_COLUMNS: &str =
    "id, name, email, phone, bio, city, avatar, portfolio, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find profile by auth identity
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>, CornerClubError> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Upsert a profile. Profiles are created lazily on first login and
    /// updated in place afterwards; they are never deleted in-app.
    pub async fn upsert(
        &self,
        id: &str,
        request: UpsertProfileRequest,
    ) -> Result<UserProfile, CornerClubError> {
        let portfolio = request.portfolio.map(|p| serde_json::json!(p));

        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            r#"
            INSERT INTO user_profiles (id, name, email, phone, bio, city, avatar, portfolio,
                created_at, updated_at)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), $5, $6, $7,
                COALESCE($8, '[]'::jsonb), $9, $9)
            ON CONFLICT (id) DO UPDATE
            SET name = COALESCE($2, user_profiles.name),
                email = COALESCE($3, user_profiles.email),
                phone = COALESCE($4, user_profiles.phone),
                bio = COALESCE($5, user_profiles.bio),
                city = COALESCE($6, user_profiles.city),
                avatar = COALESCE($7, user_profiles.avatar),
                portfolio = COALESCE($8, user_profiles.portfolio),
                updated_at = $9
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.bio)
        .bind(request.city)
        .bind(request.avatar)
        .bind(portfolio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Count total profiles
    pub async fn count(&self) -> Result<i64, CornerClubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
