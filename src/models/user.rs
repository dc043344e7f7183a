//! User account model and its API DTOs.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::external_project::{ExternalProject, ExternalProjectDto};
use crate::models::validation::{email_if_present, not_blank, null_as_empty};

/// Blank and malformed addresses are reported separately.
fn required_email(value: &str) -> Result<(), ValidationError> {
    not_blank(value).map_err(|e| e.with_message(Cow::Borrowed("Email is required")))?;
    email_if_present(value).map_err(|e| e.with_message(Cow::Borrowed("Email must be valid")))
}

/// Full user row from database (includes password_hash, never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO. Excludes password_hash and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "test@example.com")]
    pub email: String,
    pub name: Option<String>,
    /// `null` when the user owns no projects.
    pub external_projects: Option<Vec<ExternalProjectDto>>,
}

impl UserDto {
    /// Combine a user row with the projects it owns.
    pub fn from_parts(user: User, projects: Vec<ExternalProject>) -> Self {
        let external_projects = if projects.is_empty() {
            None
        } else {
            Some(projects.into_iter().map(ExternalProjectDto::from).collect())
        };

        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            external_projects,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from_parts(user, Vec::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "required_email"),
        length(max = 200, message = "Email must not exceed 200 characters")
    )]
    #[schema(example = "test@example.com")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(min = 6, max = 129, message = "Password must be between 6 and 129 characters")
    )]
    #[schema(example = "password123")]
    pub password: String,

    #[validate(length(max = 120, message = "Name must not exceed 120 characters"))]
    pub name: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(
        custom(function = "email_if_present", message = "Email must be valid"),
        length(max = 200, message = "Email must not exceed 200 characters")
    )]
    pub email: Option<String>,

    #[validate(length(
        min = 6,
        max = 129,
        message = "Password must be between 6 and 129 characters"
    ))]
    pub password: Option<String>,

    #[validate(length(max = 120, message = "Name must not exceed 120 characters"))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::collect_messages;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            name: Some("Test User".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn project(id: &str, name: &str) -> ExternalProject {
        ExternalProject {
            id: id.to_string(),
            name: name.to_string(),
            user_id: 1,
        }
    }

    #[test]
    fn user_without_projects_has_null_list() {
        let dto = UserDto::from(sample_user());
        assert_eq!(dto.id, 1);
        assert_eq!(dto.email, "test@example.com");
        assert_eq!(dto.name.as_deref(), Some("Test User"));
        assert!(dto.external_projects.is_none());

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["externalProjects"].is_null());
    }

    #[test]
    fn user_with_projects_converts_each() {
        let dto = UserDto::from_parts(
            sample_user(),
            vec![project("project-1", "Project 1"), project("project-2", "Project 2")],
        );
        let projects = dto.external_projects.unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|p| p.user_id == 1));
        assert_eq!(projects[0].id, "project-1");
        assert_eq!(projects[1].name, "Project 2");
    }

    #[test]
    fn null_and_empty_names_preserved() {
        let mut user = sample_user();
        user.name = None;
        assert!(UserDto::from(user).name.is_none());

        let mut user = sample_user();
        user.name = Some(String::new());
        assert_eq!(UserDto::from(user).name.as_deref(), Some(""));
    }

    #[test]
    fn long_email_passes_through_conversion() {
        let mut user = sample_user();
        user.email = format!("{}@example.com", "a".repeat(200));
        let dto = UserDto::from(user.clone());
        assert_eq!(dto.email, user.email);
    }

    #[test]
    fn user_dto_excludes_password() {
        let json = serde_json::to_string(&UserDto::from(sample_user())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn create_request_valid() {
        let req = CreateUserRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            name: Some("Test User".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_request_missing_fields() {
        let req: CreateUserRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let messages = collect_messages(&errors);
        assert!(messages.contains(&"Email is required".to_string()));
        assert!(messages.contains(&"Password is required".to_string()));
        assert!(!messages.contains(&"Email must be valid".to_string()));
    }

    #[test]
    fn create_request_field_limits() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            name: Some("n".repeat(121)),
        };
        let messages = collect_messages(&req.validate().unwrap_err());
        assert_eq!(
            messages,
            vec![
                "Email must be valid".to_string(),
                "Name must not exceed 120 characters".to_string(),
                "Password must be between 6 and 129 characters".to_string(),
            ]
        );
    }

    #[test]
    fn create_request_email_too_long() {
        let req = CreateUserRequest {
            email: format!("{}@example.com", "a".repeat(190)),
            password: "password123".to_string(),
            name: None,
        };
        let messages = collect_messages(&req.validate().unwrap_err());
        assert!(messages.contains(&"Email must not exceed 200 characters".to_string()));
    }

    #[test]
    fn update_request_all_absent_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn update_request_empty_email_allowed() {
        let req = UpdateUserRequest {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_request_short_password_rejected() {
        let req = UpdateUserRequest {
            password: Some("abc".to_string()),
            ..Default::default()
        };
        let messages = collect_messages(&req.validate().unwrap_err());
        assert_eq!(messages, vec!["Password must be between 6 and 129 characters".to_string()]);
    }
}
