//! External project service. Every operation is scoped to the owning user.

use sqlx::PgPool;

use crate::errors::{on_unique_violation, AppError};
use crate::models::external_project::{
    CreateExternalProjectRequest, ExternalProject, ExternalProjectDto,
    UpdateExternalProjectRequest,
};
use crate::services::user::ensure_user_exists;

/// Attach a new project to a user.
pub async fn add_project(
    pool: &PgPool,
    user_id: i64,
    input: &CreateExternalProjectRequest,
) -> Result<ExternalProjectDto, AppError> {
    let mut tx = pool.begin().await?;
    ensure_user_exists(&mut *tx, user_id).await?;

    let project = sqlx::query_as::<_, ExternalProject>(
        r#"
        INSERT INTO tb_user_external_project (id, name, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, user_id
        "#,
    )
    .bind(&input.id)
    .bind(&input.name)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| on_unique_violation(e, || AppError::project_already_exists(&input.id, user_id)))?;

    tx.commit().await?;

    tracing::info!(user_id, project_id = %project.id, "External project added");
    Ok(ExternalProjectDto::from(project))
}

/// List a user's projects ordered by project ID.
pub async fn list_projects(pool: &PgPool, user_id: i64) -> Result<Vec<ExternalProjectDto>, AppError> {
    ensure_user_exists(pool, user_id).await?;

    let projects = sqlx::query_as::<_, ExternalProject>(
        "SELECT id, name, user_id FROM tb_user_external_project WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(projects.into_iter().map(ExternalProjectDto::from).collect())
}

/// Fetch one project of a user.
pub async fn get_project(
    pool: &PgPool,
    user_id: i64,
    project_id: &str,
) -> Result<ExternalProjectDto, AppError> {
    let project = sqlx::query_as::<_, ExternalProject>(
        "SELECT id, name, user_id FROM tb_user_external_project WHERE user_id = $1 AND id = $2",
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::project_not_found(project_id, user_id))?;

    Ok(ExternalProjectDto::from(project))
}

/// Rename a project. An absent name leaves the project unchanged.
pub async fn update_project(
    pool: &PgPool,
    user_id: i64,
    project_id: &str,
    input: &UpdateExternalProjectRequest,
) -> Result<ExternalProjectDto, AppError> {
    ensure_user_exists(pool, user_id).await?;

    let Some(name) = &input.name else {
        return get_project(pool, user_id, project_id).await;
    };

    let project = sqlx::query_as::<_, ExternalProject>(
        r#"
        UPDATE tb_user_external_project
        SET name = $1
        WHERE user_id = $2 AND id = $3
        RETURNING id, name, user_id
        "#,
    )
    .bind(name)
    .bind(user_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::project_not_found(project_id, user_id))?;

    tracing::info!(user_id, project_id, "External project updated");
    Ok(ExternalProjectDto::from(project))
}

/// Remove a project from a user.
pub async fn delete_project(pool: &PgPool, user_id: i64, project_id: &str) -> Result<(), AppError> {
    ensure_user_exists(pool, user_id).await?;

    let result =
        sqlx::query("DELETE FROM tb_user_external_project WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::project_not_found(project_id, user_id));
    }

    tracing::info!(user_id, project_id, "External project deleted");
    Ok(())
}
