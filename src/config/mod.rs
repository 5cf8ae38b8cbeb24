//! Configuration for the session layer
//!
//! Everything here is fixed at construction time. The canonical radio
//! parameters are the operator-mandated envelope the enforcer re-asserts
//! against the MAC stack; the retry policy holds the recovery intervals.

/// Canonical radio parameters and retry intervals
pub mod params;

pub use params::{DataRate, RadioParameters, RetryPolicy};
