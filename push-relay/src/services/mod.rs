pub mod metrics;
pub mod providers;

pub use metrics::{get_metrics, init_metrics, record_gateway_call, record_relay_request};
pub use providers::{FcmProvider, MockPushProvider, ProviderError, PushProvider};
