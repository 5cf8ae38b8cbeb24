//! Caller-facing message surface
//!
//! The only way application code reaches the transmission gate. The service
//! applies payload-kind defaults - text messages go confirmed on a fixed
//! port, raw data goes unconfirmed on a caller-chosen port - and translates
//! gate results to plain booleans, so the single-in-flight invariant cannot
//! be bypassed or observed half-way.

use crate::display::DisplaySink;
use crate::radio::traits::MacStack;
use crate::session::gate::TransmissionGate;

/// Default application port for text messages.
pub const TEXT_MESSAGE_PORT: u8 = 1;

/// Lowest valid application port.
pub const MIN_APP_PORT: u8 = 1;

/// Highest valid application port; 224 and above are reserved by the
/// protocol.
pub const MAX_APP_PORT: u8 = 223;

/// Thin validation layer in front of the transmission gate.
pub struct MessageService {
    text_port: u8,
}

impl Default for MessageService {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageService {
    /// Create a service sending text on [`TEXT_MESSAGE_PORT`].
    pub fn new() -> Self {
        Self {
            text_port: TEXT_MESSAGE_PORT,
        }
    }

    /// Create a service with a custom text port.
    pub fn with_text_port(text_port: u8) -> Self {
        Self { text_port }
    }

    /// Send a UTF-8 text message, confirmed, on the text port.
    ///
    /// Returns `true` when the gate accepted the message. A rejection is
    /// final from the caller's perspective; nothing is retried internally.
    pub fn send_message<M: MacStack, D: DisplaySink>(
        &self,
        mac: &mut M,
        gate: &mut TransmissionGate,
        joined: bool,
        display: &mut D,
        text: &str,
        now_ms: u64,
    ) -> bool {
        self.submit(mac, gate, joined, display, text.as_bytes(), self.text_port, true, now_ms)
    }

    /// Send raw bytes, unconfirmed, on the given application port.
    ///
    /// Ports outside `1..=223` are refused without touching the gate.
    pub fn send_data<M: MacStack, D: DisplaySink>(
        &self,
        mac: &mut M,
        gate: &mut TransmissionGate,
        joined: bool,
        display: &mut D,
        payload: &[u8],
        port: u8,
        now_ms: u64,
    ) -> bool {
        if !(MIN_APP_PORT..=MAX_APP_PORT).contains(&port) {
            log::warn!("uplink refused: invalid port {}", port);
            display.show_transmission_outcome("bad port", false);
            return false;
        }
        self.submit(mac, gate, joined, display, payload, port, false, now_ms)
    }

    #[allow(clippy::too_many_arguments)]
    fn submit<M: MacStack, D: DisplaySink>(
        &self,
        mac: &mut M,
        gate: &mut TransmissionGate,
        joined: bool,
        display: &mut D,
        payload: &[u8],
        port: u8,
        confirmed: bool,
        now_ms: u64,
    ) -> bool {
        match gate.try_send(mac, joined, payload, port, confirmed, now_ms) {
            Ok(()) => {
                display.show_transmission_outcome("queued", true);
                true
            }
            Err(err) => {
                log::debug!("uplink rejected: {}", err.label());
                display.show_transmission_outcome(err.label(), false);
                false
            }
        }
    }
}
