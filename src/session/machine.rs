//! Join/rejoin session state machine
//!
//! The machine runs indefinitely and self-heals; there is no terminal state.
//! Two timers drive recovery, both measured from the same monotonic clock and
//! both restarted only by an actually issued join or reset action:
//!
//! - the retry timer re-issues a join request while joining
//! - the reset watchdog performs a full stack reset when no join has
//!   succeeded for too long
//!
//! The watchdog exists because the stack can reach an internal state a plain
//! re-join cannot clear - a join accept received over the air but discarded
//! on a MIC failure is the known case. Only reinitializing the stack and
//! re-asserting the canonical parameters recovers from that.
//!
//! Timer actions are taken exclusively from `tick`, never from event
//! dispatch, so a retry cannot race a join-success event that is already
//! queued.

use crate::config::RetryPolicy;
use crate::event::DomainEvent;
use crate::radio::traits::MacStack;
use crate::session::enforcer::ParamEnforcer;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Not started
    Idle,
    /// Join in progress, retry/reset timers armed
    Joining,
    /// Session established
    Joined,
    /// The network declared the link dead; folds back into joining
    LinkDead,
}

/// Timestamps gating the two recovery timers.
///
/// Stamped only when a join or reset action is actually issued; failure
/// events alone never touch them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinAttemptRecord {
    /// When the last join request was issued, monotonic ms
    pub last_attempt_ms: u64,
    /// When the last full reset (or initial start) was issued, monotonic ms
    pub last_reset_ms: u64,
}

/// What a tick did, for the composition root to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timers still running, nothing issued
    Idle,
    /// A join request was re-issued
    JoinRetried,
    /// The stack was fully reset, re-configured and a join re-issued.
    /// The caller must drop any pending transmission it tracks.
    FullReset,
}

/// Owns the session state and the join/reset timers.
pub struct SessionStateMachine {
    state: SessionState,
    record: JoinAttemptRecord,
    policy: RetryPolicy,
}

impl SessionStateMachine {
    /// Create a machine in `Idle` with the given recovery policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            state: SessionState::Idle,
            record: JoinAttemptRecord::default(),
            policy,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session is established.
    pub fn is_joined(&self) -> bool {
        self.state == SessionState::Joined
    }

    /// The timer record.
    pub fn record(&self) -> &JoinAttemptRecord {
        &self.record
    }

    /// The recovery policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Issue the initial join request and arm both timers.
    pub fn start<M: MacStack>(&mut self, mac: &mut M, now_ms: u64) -> Result<(), M::Error> {
        mac.start_join()?;
        self.state = SessionState::Joining;
        self.record.last_attempt_ms = now_ms;
        self.record.last_reset_ms = now_ms;
        Ok(())
    }

    /// Apply a state-affecting domain event.
    ///
    /// Join failures carry no immediate action; recovery is owned by the
    /// timers so that a burst of failure events cannot flood the airwaves
    /// with join requests.
    pub fn on_event(&mut self, event: &DomainEvent) {
        match event {
            DomainEvent::JoinSucceeded => {
                self.state = SessionState::Joined;
            }
            DomainEvent::JoinFailed | DomainEvent::RejoinFailed => {
                // No immediate action; the retry timer owns recovery.
            }
            DomainEvent::LinkDead => {
                self.state = SessionState::LinkDead;
            }
            _ => {}
        }
    }

    /// Drive the retry and reset timers.
    ///
    /// Stack faults while issuing a join or reset are logged and the
    /// timestamps left unstamped, so the same action fires again on the next
    /// tick. Nothing here is fatal.
    pub fn tick<M: MacStack>(
        &mut self,
        mac: &mut M,
        enforcer: &ParamEnforcer,
        now_ms: u64,
    ) -> TickOutcome {
        match self.state {
            SessionState::Idle | SessionState::Joined => return TickOutcome::Idle,
            SessionState::LinkDead => {
                // Re-enter the join cycle; the timers keep their old stamps,
                // so an overdue reset fires immediately.
                self.state = SessionState::Joining;
            }
            SessionState::Joining => {}
        }

        if now_ms.saturating_sub(self.record.last_reset_ms) > self.policy.reset_interval_ms {
            return self.full_reset(mac, enforcer, now_ms);
        }

        if now_ms.saturating_sub(self.record.last_attempt_ms) > self.policy.retry_interval_ms {
            match mac.start_join() {
                Ok(()) => {
                    self.record.last_attempt_ms = now_ms;
                    return TickOutcome::JoinRetried;
                }
                Err(_) => {
                    log::warn!("join retry refused by stack");
                    return TickOutcome::Idle;
                }
            }
        }

        TickOutcome::Idle
    }

    /// Reinitialize the stack, re-assert the canonical parameters and
    /// re-issue the join.
    fn full_reset<M: MacStack>(
        &mut self,
        mac: &mut M,
        enforcer: &ParamEnforcer,
        now_ms: u64,
    ) -> TickOutcome {
        if mac.reset().is_err() {
            log::warn!("stack reset refused");
            return TickOutcome::Idle;
        }
        // The reset wiped the live configuration; rebuild it before joining.
        enforcer.enforce(mac);
        if mac.start_join().is_err() {
            log::warn!("join after reset refused by stack");
            // The reset stamp is refreshed regardless: the stack was reset,
            // and the retry timer will issue the join.
        }
        self.state = SessionState::Joining;
        self.record.last_attempt_ms = now_ms;
        self.record.last_reset_ms = now_ms;
        TickOutcome::FullReset
    }
}
