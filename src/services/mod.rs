//! Business logic services.

pub mod auth;
pub mod bootstrap;
pub mod external_project;
pub mod user;
