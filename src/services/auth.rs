//! Authentication service: password hashing and credential checks.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ARGON2ID_IDENT,
};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::User;

/// The single authority granted to every authenticated user.
pub const ROLE_USER: &str = "ROLE_USER";

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// True when `hash` is a well-formed argon2id PHC string.
pub fn is_valid_hash(hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| parsed.algorithm == ARGON2ID_IDENT && parsed.hash.is_some())
        .unwrap_or(false)
}

/// Find a user by email.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM tb_user WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Check an email/password pair, returning the matching user.
///
/// Every failure mode collapses to [`AppError::Unauthorized`]; the reason is
/// only logged.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<User, AppError> {
    let Some(user) = find_user_by_email(pool, email).await? else {
        tracing::debug!("User not found with email: {email}");
        return Err(AppError::Unauthorized);
    };

    let password = password.to_string();
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {e}")))?;

    match verified {
        Ok(true) => Ok(user),
        Ok(false) => {
            tracing::debug!(user_id = user.id, "Password mismatch");
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash is unusable");
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_and_verify() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("WrongPassword", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("swagger123").unwrap();
        let b = hash_password("swagger123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("swagger123", &a).unwrap());
        assert!(verify_password("swagger123", &b).unwrap());
    }

    #[test]
    fn hash_validity() {
        let hash = hash_password("swagger123").unwrap();
        assert!(is_valid_hash(&hash));
        assert!(!is_valid_hash("plain-text-password"));
        assert!(!is_valid_hash("$2a$10$encodedPasswordHash"));
        assert!(!is_valid_hash(""));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-hash").is_err());
    }
}
