//! LoRaWAN session and transmission manager
//!
//! This crate coordinates a battery-powered sensor node's long-lived
//! attachment to a LoRaWAN network on top of an opaque MAC stack. It does not
//! implement the MAC protocol itself; it supervises a stack that is known to
//! misbehave in three ways:
//! - configured radio parameters silently drift back to stack defaults on
//!   internal transitions, so the canonical set is re-asserted every tick
//! - a join accept can be lost to a MIC failure even though the over-the-air
//!   exchange succeeded, so a watchdog performs a full stack reset
//! - queuing two uplinks at once corrupts stack state, so a single pending
//!   transmission slot is the hard correctness boundary
//!
//! # Features
//! - Join/retry/reset session lifecycle that runs indefinitely and self-heals
//! - Idempotent enforcement of an operator-mandated radio parameter envelope
//! - Single-in-flight transmission gate with synchronous caller feedback
//! - Domain event stream forwarded to a display/log sink
//! - Injectable clock, so timer behavior is testable without wall time
//! - No unsafe code, no allocator
//!
//! # Example
//! ```no_run
//! use lorawan_node::{node::LoRaNode, radio::sim::SimMac};
//! # use lorawan_node::{display::DisplaySink, time::Clock};
//! # struct NoDisplay;
//! # impl DisplaySink for NoDisplay {
//! #     fn append_log_line(&mut self, _: &str) {}
//! #     fn show_status(&mut self, _: bool) {}
//! #     fn show_transmission_outcome(&mut self, _: &str, _: bool) {}
//! #     fn show_debug(&mut self, _: &str) {}
//! # }
//! # struct FixedClock;
//! # impl Clock for FixedClock { fn now_ms(&self) -> u64 { 0 } }
//! let mut node = LoRaNode::new(SimMac::new(), NoDisplay, FixedClock);
//! node.start().unwrap();
//! loop {
//!     node.tick();
//!     if node.is_joined() {
//!         node.send_message("hello");
//!         break;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Canonical radio parameters and retry policy
pub mod config;

/// Display/log sink boundary
pub mod display;

/// Domain events and the dispatcher
pub mod event;

/// Caller-facing message surface
pub mod message;

/// Composition root tying the components together
pub mod node;

/// MAC stack boundary
pub mod radio;

/// Session state machine, parameter enforcement, transmission gate
pub mod session;

/// Monotonic clock abstraction
pub mod time;
