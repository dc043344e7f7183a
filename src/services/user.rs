//! User account service: create, read, partial update, delete.

use sqlx::{PgExecutor, PgPool};

use crate::errors::{on_unique_violation, AppError};
use crate::models::external_project::ExternalProject;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserDto};
use crate::services::auth::hash_password;

const EMAIL_TAKEN: &str = "Email already registered";

/// Create a new user with a hashed password.
pub async fn create_user(pool: &PgPool, input: &CreateUserRequest) -> Result<UserDto, AppError> {
    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO tb_user (email, password_hash, name)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&input.email)
    .bind(&password_hash)
    .bind(&input.name)
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, || AppError::user_already_exists(&input.email, EMAIL_TAKEN)))?;

    tracing::info!(user_id = user.id, "User created");
    Ok(UserDto::from(user))
}

/// Fetch a user together with the projects it owns.
pub async fn get_user(pool: &PgPool, id: i64) -> Result<UserDto, AppError> {
    let user = find_user(pool, id).await?;
    let projects = projects_of(pool, id).await?;
    Ok(UserDto::from_parts(user, projects))
}

/// Apply a partial update.
///
/// A non-empty email replaces the current one, a non-empty password is
/// re-hashed, and a present name (even `""`) replaces the name.
pub async fn update_user(
    pool: &PgPool,
    id: i64,
    input: &UpdateUserRequest,
) -> Result<UserDto, AppError> {
    let mut tx = pool.begin().await?;

    let mut user = sqlx::query_as::<_, User>("SELECT * FROM tb_user WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;

    if let Some(email) = input.email.as_deref().filter(|e| !e.is_empty()) {
        if email != user.email {
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tb_user WHERE email = $1)")
                    .bind(email)
                    .fetch_one(&mut *tx)
                    .await?;
            if taken {
                return Err(AppError::user_already_exists(email, EMAIL_TAKEN));
            }
        }
        user.email = email.to_string();
    }

    if let Some(password) = input.password.as_deref().filter(|p| !p.is_empty()) {
        user.password_hash = hash_password(password)?;
    }

    if let Some(name) = &input.name {
        user.name = Some(name.clone());
    }

    let updated = sqlx::query_as::<_, User>(
        r#"
        UPDATE tb_user
        SET email = $1, password_hash = $2, name = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| on_unique_violation(e, || AppError::user_already_exists(&user.email, EMAIL_TAKEN)))?;

    let projects = projects_of(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, "User updated");
    Ok(UserDto::from_parts(updated, projects))
}

/// Delete a user; owned projects go with it.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tb_user WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::user_not_found(id));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(())
}

/// Find a user row by ID.
pub async fn find_user<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM tb_user WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))
}

/// Fail with a user-not-found error unless the user exists.
pub async fn ensure_user_exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tb_user WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    if !exists {
        return Err(AppError::user_not_found(id));
    }
    Ok(())
}

async fn projects_of<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: i64,
) -> Result<Vec<ExternalProject>, AppError> {
    let projects = sqlx::query_as::<_, ExternalProject>(
        "SELECT id, name, user_id FROM tb_user_external_project WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(projects)
}
