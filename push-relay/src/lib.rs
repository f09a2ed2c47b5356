//! push-relay: forwards push-notification requests to the FCM gateway.
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
