//! service-core: Shared infrastructure for the push relay service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
