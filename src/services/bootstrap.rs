//! Startup guarantee of a usable login for the API and Swagger UI.

use sqlx::PgPool;

use crate::config::BootstrapUserConfig;
use crate::errors::AppError;
use crate::models::user::User;
use crate::services::auth::{find_user_by_email, hash_password, is_valid_hash, verify_password};

const BOOTSTRAP_USER_NAME: &str = "Swagger UI Test User";

/// What [`ensure_bootstrap_user`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    Recreated,
    PasswordRefreshed,
}

/// Decide the action for an existing stored hash (or none).
pub fn plan(stored_hash: Option<&str>) -> BootstrapOutcome {
    match stored_hash {
        None => BootstrapOutcome::Created,
        Some(hash) if is_valid_hash(hash) => BootstrapOutcome::PasswordRefreshed,
        Some(_) => BootstrapOutcome::Recreated,
    }
}

/// Make sure the bootstrap account exists and accepts the configured password.
///
/// An account whose stored hash is not argon2id is deleted and recreated; a
/// valid one gets its hash refreshed to the current password. The result is
/// re-read and verified, and a mismatch aborts startup.
pub async fn ensure_bootstrap_user(
    pool: &PgPool,
    config: &BootstrapUserConfig,
) -> Result<BootstrapOutcome, AppError> {
    if config.password_defaulted {
        tracing::info!("SWAGGER_UI_PASSWORD not set, using default password");
    }

    let existing = find_user_by_email(pool, &config.email).await?;
    let outcome = plan(existing.as_ref().map(|u| u.password_hash.as_str()));
    let password_hash = hash_password(&config.password)?;

    let mut tx = pool.begin().await?;
    match outcome {
        BootstrapOutcome::PasswordRefreshed => {
            sqlx::query("UPDATE tb_user SET password_hash = $1, updated_at = NOW() WHERE email = $2")
                .bind(&password_hash)
                .bind(&config.email)
                .execute(&mut *tx)
                .await?;
            tracing::info!(email = %config.email, "Updated bootstrap user password");
        }
        BootstrapOutcome::Recreated | BootstrapOutcome::Created => {
            if outcome == BootstrapOutcome::Recreated {
                tracing::warn!(
                    email = %config.email,
                    "Existing bootstrap user has invalid password hash, recreating"
                );
                sqlx::query("DELETE FROM tb_user WHERE email = $1")
                    .bind(&config.email)
                    .execute(&mut *tx)
                    .await?;
            }
            sqlx::query("INSERT INTO tb_user (email, password_hash, name) VALUES ($1, $2, $3)")
                .bind(&config.email)
                .bind(&password_hash)
                .bind(BOOTSTRAP_USER_NAME)
                .execute(&mut *tx)
                .await?;
            tracing::info!(email = %config.email, "Created bootstrap user");
        }
    }
    tx.commit().await?;

    let stored = sqlx::query_as::<_, User>("SELECT * FROM tb_user WHERE email = $1")
        .bind(&config.email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Internal("Failed to create/update bootstrap user".to_string()))?;

    let matches = verify_password(&config.password, &stored.password_hash)?;
    tracing::info!(password_matches = matches, "Bootstrap user verification");
    if !matches {
        tracing::error!("Bootstrap user password verification failed");
        return Err(AppError::Internal(
            "Failed to verify bootstrap user password".to_string(),
        ));
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_is_created() {
        assert_eq!(plan(None), BootstrapOutcome::Created);
    }

    #[test]
    fn foreign_hash_is_recreated() {
        assert_eq!(
            plan(Some("$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy")),
            BootstrapOutcome::Recreated
        );
        assert_eq!(plan(Some("")), BootstrapOutcome::Recreated);
    }

    #[test]
    fn valid_hash_is_refreshed() {
        let hash = hash_password("swagger123").unwrap();
        assert_eq!(plan(Some(&hash)), BootstrapOutcome::PasswordRefreshed);
    }
}
