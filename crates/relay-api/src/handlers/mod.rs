//! HTTP request handlers for the visit relay.
//!
//! - `relay` - turns an event report into one notification email
//! - `health` - liveness probe for the hosting platform

pub mod health;
pub mod relay;

pub use health::health_check;
pub use relay::relay_event;
