//! Single-in-flight transmission gate
//!
//! The MAC stack corrupts its own state if two uplinks are ever queued at
//! once, and it offers no readable in-flight flag this layer can trust across
//! resets. The pending-transmission slot owned here is therefore the only
//! correctness boundary: between an accepted send and the next terminal
//! outcome, every further send is rejected.

use heapless::Vec;

use crate::radio::traits::MacStack;

/// Maximum application payload length in bytes.
///
/// Conservative bound for the slow data rates this node is pinned to; the
/// stack would truncate or refuse anything longer.
pub const MAX_PAYLOAD_LEN: usize = 51;

/// The uplink currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransmission {
    /// Payload bytes handed to the stack
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Application port
    pub port: u8,
    /// Whether an acknowledgment was requested
    pub confirmed: bool,
    /// Monotonic ms timestamp when the send was accepted
    pub enqueued_at_ms: u64,
}

/// Why a send was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError<E> {
    /// The session is not joined
    NotJoined,
    /// The payload is empty
    PayloadEmpty,
    /// The payload exceeds [`MAX_PAYLOAD_LEN`]
    PayloadTooLarge,
    /// A transmission is already in flight
    Busy,
    /// The stack refused the uplink
    Radio(E),
}

impl<E> SendError<E> {
    /// Short label for the display sink.
    pub fn label(&self) -> &'static str {
        match self {
            SendError::NotJoined => "not joined",
            SendError::PayloadEmpty => "empty payload",
            SendError::PayloadTooLarge => "payload too long",
            SendError::Busy => "tx busy",
            SendError::Radio(_) => "radio fault",
        }
    }
}

/// Owns the single pending-transmission slot.
#[derive(Debug, Default)]
pub struct TransmissionGate {
    pending: Option<PendingTransmission>,
}

impl TransmissionGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Whether a transmission is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The transmission in flight, if any.
    pub fn pending(&self) -> Option<&PendingTransmission> {
        self.pending.as_ref()
    }

    /// Validate and issue one uplink.
    ///
    /// Preconditions are checked in order: session joined, payload non-empty,
    /// payload within bounds, gate free. Only when all hold is the uplink
    /// handed to the stack and the pending slot filled. A stack refusal
    /// leaves the slot empty, so the caller may retry later.
    pub fn try_send<M: MacStack>(
        &mut self,
        mac: &mut M,
        joined: bool,
        payload: &[u8],
        port: u8,
        confirmed: bool,
        now_ms: u64,
    ) -> Result<(), SendError<M::Error>> {
        if !joined {
            return Err(SendError::NotJoined);
        }
        if payload.is_empty() {
            return Err(SendError::PayloadEmpty);
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(SendError::PayloadTooLarge);
        }
        if self.pending.is_some() {
            return Err(SendError::Busy);
        }

        mac.queue_uplink(port, payload, confirmed)
            .map_err(SendError::Radio)?;

        let mut copy = Vec::new();
        // Length checked above.
        let _ = copy.extend_from_slice(payload);
        self.pending = Some(PendingTransmission {
            payload: copy,
            port,
            confirmed,
            enqueued_at_ms: now_ms,
        });
        Ok(())
    }

    /// Record a terminal outcome and free the slot.
    ///
    /// The stack occasionally emits duplicate completion events after a reset
    /// race, so clearing an already-empty slot is a no-op, not an error.
    /// Returns the transmission that completed, if one was in flight.
    pub fn on_outcome(&mut self, success: bool, downlink_len: u8) -> Option<PendingTransmission> {
        let finished = self.pending.take();
        if let Some(ref tx) = finished {
            log::debug!(
                "uplink finished: port {} success {} downlink {}B",
                tx.port,
                success,
                downlink_len
            );
        }
        finished
    }

    /// Drop the pending transmission without an outcome.
    ///
    /// Used by the full-reset path: the reset discards the stack's own notion
    /// of in-flight state, so the slot must not outlive it.
    pub fn force_clear(&mut self) -> Option<PendingTransmission> {
        self.pending.take()
    }
}
