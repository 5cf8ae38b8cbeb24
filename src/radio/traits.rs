//! The boundary to the underlying LoRaWAN MAC stack
//!
//! The stack owns the transceiver, the protocol state and the session
//! credentials. This layer only asserts parameters, issues joins and uplinks,
//! and polls for events. Event delivery is polled rather than callback-based
//! so the components above can be owned explicitly instead of being routed
//! through static singletons.

/// A radio parameter the session layer asserts against the live stack.
///
/// The value domain is `u32` for every parameter; booleans are 0/1, data
/// rates are region DR indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Param {
    /// RX1 window delay in seconds
    Rx1Delay,
    /// RX1 data rate offset
    Rx1DrOffset,
    /// RX2 window data rate index
    Rx2DataRate,
    /// Receive symbol timeout, in symbols
    RxSymbolTimeout,
    /// Uplink/join data rate index
    TxDataRate,
    /// Transmit power in dBm
    TxPower,
    /// Adaptive data rate (0/1)
    AdrEnabled,
    /// Network link-check mode (0/1)
    LinkCheckEnabled,
    /// Clock error tolerance in percent
    ClockErrorPct,
}

impl Param {
    /// Number of parameter kinds.
    pub const COUNT: usize = 9;

    /// Stable index for table-backed parameter stores.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Param::Rx1Delay => "rx1_delay",
            Param::Rx1DrOffset => "rx1_dr_offset",
            Param::Rx2DataRate => "rx2_dr",
            Param::RxSymbolTimeout => "rx_syms",
            Param::TxDataRate => "tx_dr",
            Param::TxPower => "tx_power",
            Param::AdrEnabled => "adr",
            Param::LinkCheckEnabled => "link_check",
            Param::ClockErrorPct => "clock_err",
        }
    }
}

/// A raw event emitted by the MAC stack.
///
/// This mirrors the stack's own event space one-to-one. Codes the session
/// layer does not model arrive as [`RawMacEvent::Other`]; they are mapped to
/// a domain event and logged, never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawMacEvent {
    /// A join exchange has started
    JoinStarted,
    /// The network accepted the join
    Joined,
    /// The join exchange failed
    JoinFailed,
    /// A rejoin exchange failed
    RejoinFailed,
    /// An uplink transmission has started
    TxStarted,
    /// An uplink transmission finished, with ack flag and downlink length
    TxComplete {
        /// The network acknowledged a confirmed uplink
        ack: bool,
        /// Bytes of downlink payload received in the RX windows
        downlink_len: u8,
    },
    /// An uplink transmission was canceled by the stack
    TxCanceled,
    /// The network link is considered dead
    LinkDead,
    /// A receive window opened
    RxWindowOpened,
    /// Any event code outside the modeled set
    Other(u16),
}

/// Interface to the opaque MAC stack.
///
/// All methods are non-blocking. `set_param` cannot fail by design: a stack
/// without one of the modeled parameters is a configuration mismatch, not a
/// runtime condition. Join, uplink and reset requests can be refused; such
/// faults are non-fatal and are retried by the timer-driven recovery cycle.
pub trait MacStack {
    /// Error type for stack operations
    type Error;

    /// Fully reinitialize the stack, discarding all internal state.
    ///
    /// Any in-flight transmission the stack knew about is gone afterwards;
    /// the caller must drop its own pending-transmission record as well.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Start an over-the-air activation exchange.
    fn start_join(&mut self) -> Result<(), Self::Error>;

    /// Queue one application uplink.
    fn queue_uplink(&mut self, port: u8, payload: &[u8], confirmed: bool)
        -> Result<(), Self::Error>;

    /// Read a live parameter value.
    fn param(&self, param: Param) -> u32;

    /// Overwrite a live parameter value.
    fn set_param(&mut self, param: Param, value: u32);

    /// Pop the next pending event, if any.
    ///
    /// The outer loop drains this once per tick and dispatches each event
    /// synchronously.
    fn poll_event(&mut self) -> Option<RawMacEvent>;
}
