pub mod push;

pub use push::{redact_token, FcmMessage, FcmNotification, SendPushRequest};
