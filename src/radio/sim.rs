//! Loopback MAC stack for demos
//!
//! `SimMac` stands in for real hardware: a join request is accepted on the
//! next poll, an uplink completes immediately (with an ack when confirmed),
//! and parameters are plain table entries. Useful for driving the node
//! end-to-end without a transceiver.

use heapless::Deque;

use super::traits::{MacStack, Param, RawMacEvent};

/// Error type for the loopback stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// The internal event queue overflowed
    QueueFull,
}

/// In-memory MAC stack double.
pub struct SimMac {
    params: [u32; Param::COUNT],
    events: Deque<RawMacEvent, 16>,
    joined: bool,
}

impl SimMac {
    /// Create a loopback stack with all parameters at their stack defaults.
    pub fn new() -> Self {
        Self {
            params: [0; Param::COUNT],
            events: Deque::new(),
            joined: false,
        }
    }

    /// Whether the simulated network considers the node joined.
    pub fn joined(&self) -> bool {
        self.joined
    }

    fn push(&mut self, event: RawMacEvent) -> Result<(), SimError> {
        self.events.push_back(event).map_err(|_| SimError::QueueFull)
    }
}

impl Default for SimMac {
    fn default() -> Self {
        Self::new()
    }
}

impl MacStack for SimMac {
    type Error = SimError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        // A real stack forgets everything on reset, parameters included.
        self.params = [0; Param::COUNT];
        self.events.clear();
        self.joined = false;
        Ok(())
    }

    fn start_join(&mut self) -> Result<(), Self::Error> {
        self.push(RawMacEvent::JoinStarted)?;
        self.push(RawMacEvent::Joined)?;
        self.joined = true;
        Ok(())
    }

    fn queue_uplink(
        &mut self,
        _port: u8,
        _payload: &[u8],
        confirmed: bool,
    ) -> Result<(), Self::Error> {
        self.push(RawMacEvent::TxStarted)?;
        self.push(RawMacEvent::TxComplete {
            ack: confirmed,
            downlink_len: 0,
        })?;
        Ok(())
    }

    fn param(&self, param: Param) -> u32 {
        self.params[param.index()]
    }

    fn set_param(&mut self, param: Param, value: u32) {
        self.params[param.index()] = value;
    }

    fn poll_event(&mut self) -> Option<RawMacEvent> {
        self.events.pop_front()
    }
}
