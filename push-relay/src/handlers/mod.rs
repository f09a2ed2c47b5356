//! HTTP handlers for push-relay.

pub mod health;
pub mod relay;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use relay::send_fcm_notification;
