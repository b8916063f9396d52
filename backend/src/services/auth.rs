//! Authentication service for admin login and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Admin ID
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Admin info from database
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            token_expiry: config.jwt.token_expiry,
        }
    }

    /// Authenticate an admin and issue a token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let admin = sqlx::query_as::<_, AdminRow>(
            "SELECT id, email, password_hash FROM admins WHERE email = $1",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let password_matches = verify(password, &admin.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !password_matches {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_tokens(&admin)
    }

    /// Create the configured admin account when it does not exist yet.
    /// Returns true when an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AppResult<bool> {
        let email = email.trim().to_lowercase();

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE email = $1")
            .bind(&email)
            .fetch_one(&self.db)
            .await?;

        if existing > 0 {
            return Ok(false);
        }

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query("INSERT INTO admins (email, password_hash) VALUES ($1, $2)")
            .bind(&email)
            .bind(&password_hash)
            .execute(&self.db)
            .await?;

        Ok(true)
    }

    fn issue_tokens(&self, admin: &AdminRow) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
        })
    }
}
