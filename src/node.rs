//! Composition root
//!
//! `LoRaNode` owns one instance of every component and wires them together
//! with plain references; no global state, no callback registration. The
//! hosting firmware provides the MAC stack, the display sink and a clock,
//! then calls [`LoRaNode::start`] once and [`LoRaNode::tick`] at least once
//! per second.
//!
//! Everything runs on one logical thread of control: `tick` enforces the
//! canonical parameters, drives the session timers, then drains the MAC
//! event queue, dispatching each event synchronously. Timer actions never
//! run from event dispatch, so a retry cannot race an already-queued join
//! accept. A port to a preemptive environment must wrap the whole node in
//! one mutex; the gate's check-then-act sequence is not safe to split.

use crate::config::{RadioParameters, RetryPolicy};
use crate::display::DisplaySink;
use crate::event::EventDispatcher;
use crate::message::MessageService;
use crate::radio::traits::MacStack;
use crate::session::enforcer::ParamEnforcer;
use crate::session::gate::{PendingTransmission, TransmissionGate};
use crate::session::machine::{SessionState, SessionStateMachine, TickOutcome};
use crate::time::Clock;

/// The assembled session and transmission manager.
pub struct LoRaNode<M: MacStack, D: DisplaySink, C: Clock> {
    mac: M,
    display: D,
    clock: C,
    enforcer: ParamEnforcer,
    session: SessionStateMachine,
    gate: TransmissionGate,
    dispatcher: EventDispatcher,
    service: MessageService,
}

impl<M: MacStack, D: DisplaySink, C: Clock> LoRaNode<M, D, C> {
    /// Create a node with the default parameter envelope and retry policy.
    pub fn new(mac: M, display: D, clock: C) -> Self {
        Self::with_config(
            mac,
            display,
            clock,
            RadioParameters::default(),
            RetryPolicy::default(),
        )
    }

    /// Create a node with explicit parameters and policy.
    pub fn with_config(
        mac: M,
        display: D,
        clock: C,
        params: RadioParameters,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            mac,
            display,
            clock,
            enforcer: ParamEnforcer::new(params),
            session: SessionStateMachine::new(policy),
            gate: TransmissionGate::new(),
            dispatcher: EventDispatcher::new(),
            service: MessageService::new(),
        }
    }

    /// Bootstrap: reset the stack, assert the canonical parameters and kick
    /// off the join.
    ///
    /// Calling this again later performs the same sequence, which is exactly
    /// the full-reset action; any pending transmission is dropped.
    pub fn start(&mut self) -> Result<(), M::Error> {
        self.gate.force_clear();
        self.mac.reset()?;
        self.enforcer.enforce(&mut self.mac);
        self.display.append_log_line("radio ready");
        self.session.start(&mut self.mac, self.clock.now_ms())?;
        self.display.show_status(false);
        Ok(())
    }

    /// One scheduler iteration: enforce parameters, drive timers, drain and
    /// dispatch MAC events. Call at least once per second.
    pub fn tick(&mut self) {
        let now_ms = self.clock.now_ms();

        let report = self.enforcer.enforce(&mut self.mac);
        for correction in &report {
            log::debug!(
                "parameter drift: {} was {}, set to {}",
                correction.param.name(),
                correction.found,
                correction.applied
            );
        }

        match self.session.tick(&mut self.mac, &self.enforcer, now_ms) {
            TickOutcome::Idle => {}
            TickOutcome::JoinRetried => {
                self.display.append_log_line("join retry");
            }
            TickOutcome::FullReset => {
                // The reset discarded the stack's in-flight state; the
                // pending slot must not survive it.
                if self.gate.force_clear().is_some() {
                    log::warn!("pending uplink dropped by stack reset");
                }
                self.display.append_log_line("stack reset, rejoining");
            }
        }

        while let Some(raw) = self.mac.poll_event() {
            self.dispatcher.dispatch(
                raw,
                &mut self.session,
                &mut self.gate,
                &self.enforcer,
                &mut self.mac,
                &mut self.display,
            );
        }
    }

    /// Send a UTF-8 text message (confirmed, fixed port).
    pub fn send_message(&mut self, text: &str) -> bool {
        let now_ms = self.clock.now_ms();
        self.service.send_message(
            &mut self.mac,
            &mut self.gate,
            self.session.is_joined(),
            &mut self.display,
            text,
            now_ms,
        )
    }

    /// Send raw bytes (unconfirmed) on an application port in `1..=223`.
    pub fn send_data(&mut self, payload: &[u8], port: u8) -> bool {
        let now_ms = self.clock.now_ms();
        self.service.send_data(
            &mut self.mac,
            &mut self.gate,
            self.session.is_joined(),
            &mut self.display,
            payload,
            port,
            now_ms,
        )
    }

    /// Whether the session is established.
    pub fn is_joined(&self) -> bool {
        self.session.is_joined()
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// The uplink currently in flight, if any.
    pub fn pending_transmission(&self) -> Option<&PendingTransmission> {
        self.gate.pending()
    }

    /// The MAC stack.
    pub fn mac(&self) -> &M {
        &self.mac
    }

    /// Mutable access to the MAC stack.
    pub fn mac_mut(&mut self) -> &mut M {
        &mut self.mac
    }

    /// The display sink.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The session state machine.
    pub fn session(&self) -> &SessionStateMachine {
        &self.session
    }
}
