//! MAC stack boundary
//!
//! The session layer never touches the transceiver directly. It drives an
//! opaque MAC stack through the [`traits::MacStack`] trait and consumes the
//! raw events the stack emits.

/// MAC stack trait, parameter identifiers and raw events
pub mod traits;

/// Loopback MAC double for demos and examples
pub mod sim;

pub use traits::{MacStack, Param, RawMacEvent};
