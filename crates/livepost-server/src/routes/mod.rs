//! HTTP route handlers.

pub mod graphql;
pub mod health;
pub mod static_files;
