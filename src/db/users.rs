/// User account persistence
///
/// Passwords are stored as argon2 PHC strings; plaintext never touches the
/// database. Verification returns the user id rather than the row so callers
/// only ever hold the identity.
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::User;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a user with a freshly salted password hash.
    ///
    /// A taken username surfaces as `AppError::Conflict`.
    pub async fn create(&self, username: &str, password: &str) -> AppResult<i64> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?
            .to_string();

        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict("Username already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a username/password pair; `Some(user_id)` only when both match.
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<Option<i64>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Stored password hash is malformed");
                return Ok(None);
            }
        };

        let matches = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        Ok(matches.then_some(user.id))
    }
}
