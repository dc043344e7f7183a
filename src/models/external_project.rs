//! External projects owned by a user.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::validation::{not_blank, null_as_empty};

/// Row in `tb_user_external_project`. The key is `(user_id, id)`.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct ExternalProject {
    pub id: String,
    pub name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProjectDto {
    #[schema(example = "project-123")]
    pub id: String,
    #[schema(example = "Test Project")]
    pub name: String,
    #[schema(example = 1)]
    pub user_id: i64,
}

impl From<&ExternalProject> for ExternalProjectDto {
    fn from(project: &ExternalProject) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            user_id: project.user_id,
        }
    }
}

impl From<ExternalProject> for ExternalProjectDto {
    fn from(project: ExternalProject) -> Self {
        Self {
            id: project.id,
            name: project.name,
            user_id: project.user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExternalProjectRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Project ID is required"),
        length(max = 200, message = "Project ID must not exceed 200 characters")
    )]
    #[schema(example = "project-123")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Project name is required"),
        length(max = 120, message = "Project name must not exceed 120 characters")
    )]
    #[schema(example = "Test Project")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateExternalProjectRequest {
    #[validate(length(max = 120, message = "Project name must not exceed 120 characters"))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::collect_messages;

    fn sample() -> ExternalProject {
        ExternalProject {
            id: "project-123".to_string(),
            name: "Test Project".to_string(),
            user_id: 1,
        }
    }

    #[test]
    fn converts_fields() {
        let dto = ExternalProjectDto::from(&sample());
        assert_eq!(dto.id, "project-123");
        assert_eq!(dto.name, "Test Project");
        assert_eq!(dto.user_id, 1);
    }

    #[test]
    fn empty_name_and_long_id_preserved() {
        let long_id = "a".repeat(200);
        let project = ExternalProject {
            id: long_id.clone(),
            name: String::new(),
            user_id: 999,
        };
        let dto = ExternalProjectDto::from(project);
        assert_eq!(dto.id, long_id);
        assert_eq!(dto.name, "");
        assert_eq!(dto.user_id, 999);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(ExternalProjectDto::from(sample())).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn create_request_requires_id_and_name() {
        let req: CreateExternalProjectRequest = serde_json::from_str("{}").unwrap();
        let messages = collect_messages(&req.validate().unwrap_err());
        assert_eq!(
            messages,
            vec!["Project ID is required".to_string(), "Project name is required".to_string()]
        );
    }

    #[test]
    fn null_id_and_name_are_required() {
        let req: CreateExternalProjectRequest =
            serde_json::from_str(r#"{"id":null,"name":null}"#).unwrap();
        let messages = collect_messages(&req.validate().unwrap_err());
        assert_eq!(
            messages,
            vec!["Project ID is required".to_string(), "Project name is required".to_string()]
        );
    }

    #[test]
    fn create_request_limits() {
        let req = CreateExternalProjectRequest {
            id: "p".repeat(201),
            name: "n".repeat(121),
        };
        let messages = collect_messages(&req.validate().unwrap_err());
        assert_eq!(
            messages,
            vec![
                "Project ID must not exceed 200 characters".to_string(),
                "Project name must not exceed 120 characters".to_string(),
            ]
        );
    }

    #[test]
    fn update_request_name_optional() {
        assert!(UpdateExternalProjectRequest::default().validate().is_ok());
        let req = UpdateExternalProjectRequest {
            name: Some("x".repeat(121)),
        };
        assert!(req.validate().is_err());
    }
}
