//! Radio parameter enforcement
//!
//! The MAC stack resets individual radio parameters to internal defaults as a
//! side effect of transitions this layer cannot observe (a full reset among
//! them). Rather than intercepting every such transition, the enforcer
//! re-asserts the whole canonical set at the start of every tick. The write
//! path is idempotent, so a clean pass costs one comparison per parameter.

use heapless::Vec;

use crate::config::RadioParameters;
use crate::radio::traits::{MacStack, Param};

/// One divergence the enforcer corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Correction {
    /// Which parameter had drifted
    pub param: Param,
    /// The live value found on the stack
    pub found: u32,
    /// The canonical value written back
    pub applied: u32,
}

/// Corrections made by one enforcement pass. Diagnostic only; control flow
/// never depends on it.
pub type EnforcementReport = Vec<Correction, { Param::COUNT }>;

/// Holds the canonical parameter set and re-asserts it on demand.
///
/// This is the single writer of radio configuration in the system. Everything
/// else reads stack state through accessors and leaves writes to the
/// enforcer.
pub struct ParamEnforcer {
    canonical: RadioParameters,
}

impl ParamEnforcer {
    /// Create an enforcer around a canonical set.
    pub fn new(canonical: RadioParameters) -> Self {
        Self { canonical }
    }

    /// The canonical set.
    pub fn canonical(&self) -> &RadioParameters {
        &self.canonical
    }

    /// Compare every canonical parameter with the live value and overwrite
    /// any divergence. Returns the corrections made, possibly none.
    pub fn enforce<M: MacStack>(&self, mac: &mut M) -> EnforcementReport {
        let mut report = EnforcementReport::new();
        for (param, want) in self.canonical.entries() {
            let found = mac.param(param);
            if found != want {
                mac.set_param(param, want);
                // Capacity equals the parameter count, the push cannot fail.
                let _ = report.push(Correction {
                    param,
                    found,
                    applied: want,
                });
            }
        }
        report
    }
}
