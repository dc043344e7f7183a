//! Database models and DTOs for all domain entities.

pub mod external_project;
pub mod user;
pub mod validation;
