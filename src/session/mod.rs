//! Session lifecycle, parameter enforcement and the transmission gate
//!
//! The three owners of mutable session-layer state live here:
//! - [`machine::SessionStateMachine`] owns the session state and the
//!   join/reset timers
//! - [`enforcer::ParamEnforcer`] owns the canonical parameter set and is the
//!   only writer of radio configuration
//! - [`gate::TransmissionGate`] owns the single pending-transmission slot
//!
//! No component reaches into another's state; everything above interacts
//! through calls and domain events.

/// Radio parameter enforcement
pub mod enforcer;

/// Single-in-flight transmission gate
pub mod gate;

/// Join/rejoin state machine and timers
pub mod machine;

pub use enforcer::{Correction, EnforcementReport, ParamEnforcer};
pub use gate::{PendingTransmission, SendError, TransmissionGate, MAX_PAYLOAD_LEN};
pub use machine::{JoinAttemptRecord, SessionState, SessionStateMachine, TickOutcome};
