//! Domain events and the event dispatcher
//!
//! Raw MAC events are translated exactly once, at this boundary, into a
//! closed [`DomainEvent`] set so every consumer gets exhaustiveness checking
//! instead of a catch-all over raw codes. The dispatcher routes each event to
//! the session machine and the transmission gate first, then forwards a short
//! status line to the display sink, so the line always reflects post-update
//! state.

use core::fmt::Write;

use heapless::String;

use crate::display::{DisplaySink, LOG_LINE_LEN};
use crate::radio::traits::{MacStack, RawMacEvent};
use crate::session::enforcer::ParamEnforcer;
use crate::session::gate::TransmissionGate;
use crate::session::machine::SessionStateMachine;

/// A session-layer event derived from one raw MAC event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DomainEvent {
    /// A join exchange started
    JoinStarted,
    /// The network accepted the join
    JoinSucceeded,
    /// The join exchange failed
    JoinFailed,
    /// A rejoin exchange failed
    RejoinFailed,
    /// An uplink left the radio
    TransmissionStarted,
    /// An uplink reached a terminal outcome
    TransmissionComplete {
        /// The network acknowledged a confirmed uplink
        ack: bool,
        /// Downlink payload bytes received alongside
        downlink_len: u8,
    },
    /// The stack canceled an uplink
    TransmissionCanceled,
    /// The network link is dead
    LinkDead,
    /// A receive window opened
    ReceiveWindowOpened,
    /// A raw code outside the modeled set; carried for observability
    UnrecognizedRaw(u16),
}

impl DomainEvent {
    /// Deterministic mapping from the raw MAC event space.
    pub fn from_raw(raw: RawMacEvent) -> Self {
        match raw {
            RawMacEvent::JoinStarted => DomainEvent::JoinStarted,
            RawMacEvent::Joined => DomainEvent::JoinSucceeded,
            RawMacEvent::JoinFailed => DomainEvent::JoinFailed,
            RawMacEvent::RejoinFailed => DomainEvent::RejoinFailed,
            RawMacEvent::TxStarted => DomainEvent::TransmissionStarted,
            RawMacEvent::TxComplete { ack, downlink_len } => {
                DomainEvent::TransmissionComplete { ack, downlink_len }
            }
            RawMacEvent::TxCanceled => DomainEvent::TransmissionCanceled,
            RawMacEvent::LinkDead => DomainEvent::LinkDead,
            RawMacEvent::RxWindowOpened => DomainEvent::ReceiveWindowOpened,
            RawMacEvent::Other(code) => DomainEvent::UnrecognizedRaw(code),
        }
    }

    /// Status line for the display sink, at most [`LOG_LINE_LEN`] bytes.
    pub fn log_line(&self) -> String<LOG_LINE_LEN> {
        let mut line = String::new();
        match self {
            DomainEvent::JoinStarted => {
                let _ = line.push_str("join started");
            }
            DomainEvent::JoinSucceeded => {
                let _ = line.push_str("joined");
            }
            DomainEvent::JoinFailed => {
                let _ = line.push_str("join failed");
            }
            DomainEvent::RejoinFailed => {
                let _ = line.push_str("rejoin failed");
            }
            DomainEvent::TransmissionStarted => {
                let _ = line.push_str("tx started");
            }
            DomainEvent::TransmissionComplete { ack, downlink_len } => {
                let _ = line.push_str("tx done");
                if *ack {
                    let _ = line.push_str(", ack");
                }
                if *downlink_len > 0 {
                    let _ = write!(line, ", rx {}B", downlink_len);
                }
            }
            DomainEvent::TransmissionCanceled => {
                let _ = line.push_str("tx canceled");
            }
            DomainEvent::LinkDead => {
                let _ = line.push_str("link dead");
            }
            DomainEvent::ReceiveWindowOpened => {
                let _ = line.push_str("rx window open");
            }
            DomainEvent::UnrecognizedRaw(code) => {
                let _ = write!(line, "event? {}", code);
            }
        }
        line
    }
}

/// Translates raw MAC events and routes the result.
///
/// Side effects are strictly ordered: session and gate updates happen before
/// anything is forwarded to the display, and every event - recognized or not -
/// produces one log line followed by a status refresh.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    dispatched: u32,
}

impl EventDispatcher {
    /// Create a dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total events dispatched since construction.
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Translate one raw event, update the owners, and forward status.
    pub fn dispatch<M: MacStack, D: DisplaySink>(
        &mut self,
        raw: RawMacEvent,
        session: &mut SessionStateMachine,
        gate: &mut TransmissionGate,
        enforcer: &ParamEnforcer,
        mac: &mut M,
        display: &mut D,
    ) -> DomainEvent {
        self.dispatched = self.dispatched.wrapping_add(1);
        let event = DomainEvent::from_raw(raw);

        session.on_event(&event);
        match event {
            DomainEvent::JoinSucceeded => {
                // The stack reshuffles parameters while processing the join
                // accept; re-assert the canonical set before any uplink.
                enforcer.enforce(mac);
            }
            DomainEvent::TransmissionComplete { ack: _, downlink_len } => {
                gate.on_outcome(true, downlink_len);
                display.show_transmission_outcome("uplink", true);
            }
            DomainEvent::TransmissionCanceled => {
                gate.on_outcome(false, 0);
                display.show_transmission_outcome("uplink", false);
            }
            DomainEvent::UnrecognizedRaw(code) => {
                log::debug!("unmapped MAC event code {}", code);
            }
            _ => {}
        }

        display.append_log_line(&event.log_line());
        display.show_status(session.is_joined());
        event
    }
}
