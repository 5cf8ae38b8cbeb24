//! Canonical radio parameters and recovery intervals
//!
//! The defaults reproduce the tuning a node needs to reliably complete OTAA
//! against a ChirpStack network that answers joins on SF7 with a 5 second RX1
//! delay: slow join data rate, long symbol timeout, ADR and link-check off.
//! None of the values are protocol invariants; they are configuration.

use crate::radio::traits::Param;

/// LoRa data rate, expressed as a spreading factor at 125 kHz bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// SF12 - slowest, longest range
    Sf12,
    /// SF11
    Sf11,
    /// SF10
    Sf10,
    /// SF9
    Sf9,
    /// SF8
    Sf8,
    /// SF7 - fastest
    Sf7,
}

impl DataRate {
    /// EU868 data rate index (DR0 = SF12 .. DR5 = SF7).
    pub fn dr_index(self) -> u32 {
        match self {
            DataRate::Sf12 => 0,
            DataRate::Sf11 => 1,
            DataRate::Sf10 => 2,
            DataRate::Sf9 => 3,
            DataRate::Sf8 => 4,
            DataRate::Sf7 => 5,
        }
    }

    /// Spreading factor (7-12).
    pub fn spreading_factor(self) -> u8 {
        match self {
            DataRate::Sf12 => 12,
            DataRate::Sf11 => 11,
            DataRate::Sf10 => 10,
            DataRate::Sf9 => 9,
            DataRate::Sf8 => 8,
            DataRate::Sf7 => 7,
        }
    }
}

/// The canonical radio parameter set.
///
/// The MAC stack resets individual parameters to its own defaults as a side
/// effect of internal transitions. This set is the single source of truth;
/// the enforcer overwrites any live value that diverges from it at the start
/// of every tick.
#[derive(Debug, Clone)]
pub struct RadioParameters {
    /// RX1 window delay in seconds (must match the network server)
    pub rx1_delay_s: u32,
    /// RX1 data rate offset relative to the uplink data rate
    pub rx1_dr_offset: u32,
    /// RX2 window data rate
    pub rx2_data_rate: DataRate,
    /// Receive symbol timeout, in symbols
    pub rx_symbol_timeout: u32,
    /// Data rate for join requests and uplinks
    pub tx_data_rate: DataRate,
    /// Transmit power in dBm
    pub tx_power_dbm: u32,
    /// Adaptive data rate enabled
    pub adr_enabled: bool,
    /// Network link-check mode enabled
    pub link_check_enabled: bool,
    /// Clock error tolerance in percent, widens the RX windows
    pub clock_error_pct: u32,
}

impl Default for RadioParameters {
    fn default() -> Self {
        Self {
            rx1_delay_s: 5,
            rx1_dr_offset: 0,
            rx2_data_rate: DataRate::Sf9,
            rx_symbol_timeout: 50,
            tx_data_rate: DataRate::Sf9,
            tx_power_dbm: 14,
            adr_enabled: false,
            link_check_enabled: false,
            clock_error_pct: 40,
        }
    }
}

impl RadioParameters {
    /// The set as `(parameter, value)` pairs, in enforcement order.
    pub fn entries(&self) -> [(Param, u32); Param::COUNT] {
        [
            (Param::Rx1Delay, self.rx1_delay_s),
            (Param::Rx1DrOffset, self.rx1_dr_offset),
            (Param::Rx2DataRate, self.rx2_data_rate.dr_index()),
            (Param::RxSymbolTimeout, self.rx_symbol_timeout),
            (Param::TxDataRate, self.tx_data_rate.dr_index()),
            (Param::TxPower, self.tx_power_dbm),
            (Param::AdrEnabled, self.adr_enabled as u32),
            (Param::LinkCheckEnabled, self.link_check_enabled as u32),
            (Param::ClockErrorPct, self.clock_error_pct),
        ]
    }
}

/// Recovery intervals for the session state machine.
///
/// Both timers run from the same monotonic clock and are restarted only by an
/// issued join or full reset, never by failure events. The values must only
/// satisfy "eventually forces recovery"; they are not derived from the
/// protocol.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Re-issue a join request after this long without success
    pub retry_interval_ms: u64,
    /// Fully reset the MAC stack after this long without a successful join
    pub reset_interval_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_interval_ms: 60_000,
            reset_interval_ms: 90_000,
        }
    }
}
