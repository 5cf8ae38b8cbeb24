use lorawan_node::config::{DataRate, RadioParameters, RetryPolicy};
use lorawan_node::display::{clip_line, LogRing, LOG_LINES, LOG_LINE_LEN};
use lorawan_node::event::{DomainEvent, EventDispatcher};
use lorawan_node::radio::traits::{Param, RawMacEvent};
use lorawan_node::session::enforcer::ParamEnforcer;
use lorawan_node::session::gate::{SendError, TransmissionGate, MAX_PAYLOAD_LEN};
use lorawan_node::session::machine::SessionStateMachine;

use mock::{MockDisplay, MockError, MockMac};

#[test]
fn test_data_rate_indices() {
    assert_eq!(DataRate::Sf12.dr_index(), 0);
    assert_eq!(DataRate::Sf9.dr_index(), 3);
    assert_eq!(DataRate::Sf7.dr_index(), 5);
    assert_eq!(DataRate::Sf9.spreading_factor(), 9);
}

#[test]
fn test_enforcer_corrects_fresh_stack() {
    let enforcer = ParamEnforcer::new(RadioParameters::default());
    let mut mac = MockMac::new();

    let report = enforcer.enforce(&mut mac);
    assert!(!report.is_empty());

    // Every live value now matches the canonical set.
    for (param, want) in enforcer.canonical().entries() {
        assert_eq!(mac.params[param.index()], want, "{}", param.name());
    }
}

#[test]
fn test_enforcer_is_idempotent() {
    let enforcer = ParamEnforcer::new(RadioParameters::default());
    let mut mac = MockMac::new();

    enforcer.enforce(&mut mac);
    let second = enforcer.enforce(&mut mac);
    assert!(second.is_empty());
}

#[test]
fn test_enforcer_reports_single_drift() {
    let enforcer = ParamEnforcer::new(RadioParameters::default());
    let mut mac = MockMac::new();
    enforcer.enforce(&mut mac);

    // The stack drifts one parameter back to its own default.
    mac.params[Param::Rx1Delay.index()] = 1;

    let report = enforcer.enforce(&mut mac);
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].param, Param::Rx1Delay);
    assert_eq!(report[0].found, 1);
    assert_eq!(report[0].applied, 5);
    assert_eq!(mac.params[Param::Rx1Delay.index()], 5);
}

#[test]
fn test_gate_rejects_when_not_joined() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();

    let result = gate.try_send(&mut mac, false, b"hi", 1, false, 0);
    assert_eq!(result, Err(SendError::NotJoined));
    assert!(!gate.is_busy());
    assert!(mac.uplinks.is_empty());
}

#[test]
fn test_gate_rejects_empty_payload() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();

    let result = gate.try_send(&mut mac, true, b"", 1, false, 0);
    assert_eq!(result, Err(SendError::PayloadEmpty));
}

#[test]
fn test_gate_rejects_oversized_payload() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();

    for len in [MAX_PAYLOAD_LEN + 1, 100, 255] {
        let payload = vec![0u8; len];
        let result = gate.try_send(&mut mac, true, &payload, 1, false, 0);
        assert_eq!(result, Err(SendError::PayloadTooLarge));
    }

    // The boundary length itself is accepted.
    let payload = vec![0u8; MAX_PAYLOAD_LEN];
    assert!(gate.try_send(&mut mac, true, &payload, 1, false, 0).is_ok());
}

#[test]
fn test_gate_single_flight() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();

    assert!(gate.try_send(&mut mac, true, b"first", 1, true, 100).is_ok());
    assert!(gate.is_busy());

    // Every further send is rejected until the outcome arrives.
    for _ in 0..3 {
        let result = gate.try_send(&mut mac, true, b"second", 1, true, 200);
        assert_eq!(result, Err(SendError::Busy));
    }
    assert_eq!(mac.uplinks.len(), 1);

    let finished = gate.on_outcome(true, 0).expect("one uplink in flight");
    assert_eq!(finished.payload.as_slice(), b"first");
    assert_eq!(finished.port, 1);
    assert!(finished.confirmed);
    assert_eq!(finished.enqueued_at_ms, 100);

    assert!(gate.try_send(&mut mac, true, b"second", 1, true, 300).is_ok());
}

#[test]
fn test_gate_outcome_is_noop_when_empty() {
    let mut gate = TransmissionGate::new();
    assert!(gate.on_outcome(true, 0).is_none());
    // Duplicate completion events after a reset race must not panic.
    assert!(gate.on_outcome(false, 0).is_none());
    assert!(!gate.is_busy());
}

#[test]
fn test_gate_stack_refusal_leaves_slot_empty() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();
    mac.fail_uplink = true;

    let result = gate.try_send(&mut mac, true, b"hi", 1, false, 0);
    assert_eq!(result, Err(SendError::Radio(MockError::Refused)));
    assert!(!gate.is_busy());
}

#[test]
fn test_gate_force_clear() {
    let mut gate = TransmissionGate::new();
    let mut mac = MockMac::new();

    assert!(gate.try_send(&mut mac, true, b"hi", 1, false, 0).is_ok());
    assert!(gate.force_clear().is_some());
    assert!(gate.force_clear().is_none());
    assert!(!gate.is_busy());
}

#[test]
fn test_domain_event_mapping() {
    assert_eq!(
        DomainEvent::from_raw(RawMacEvent::Joined),
        DomainEvent::JoinSucceeded
    );
    assert_eq!(
        DomainEvent::from_raw(RawMacEvent::TxComplete {
            ack: true,
            downlink_len: 4
        }),
        DomainEvent::TransmissionComplete {
            ack: true,
            downlink_len: 4
        }
    );
    assert_eq!(
        DomainEvent::from_raw(RawMacEvent::Other(17)),
        DomainEvent::UnrecognizedRaw(17)
    );
}

#[test]
fn test_log_lines_fit_display_width() {
    let events = [
        DomainEvent::JoinStarted,
        DomainEvent::JoinSucceeded,
        DomainEvent::JoinFailed,
        DomainEvent::RejoinFailed,
        DomainEvent::TransmissionStarted,
        DomainEvent::TransmissionComplete {
            ack: true,
            downlink_len: 255,
        },
        DomainEvent::TransmissionCanceled,
        DomainEvent::LinkDead,
        DomainEvent::ReceiveWindowOpened,
        DomainEvent::UnrecognizedRaw(u16::MAX),
    ];
    for event in events {
        let line = event.log_line();
        assert!(!line.is_empty());
        assert!(line.len() <= LOG_LINE_LEN);
    }
}

#[test]
fn test_tx_complete_line_mentions_downlink() {
    let line = DomainEvent::TransmissionComplete {
        ack: true,
        downlink_len: 12,
    }
    .log_line();
    assert_eq!(line.as_str(), "tx done, ack, rx 12B");

    let line = DomainEvent::TransmissionComplete {
        ack: false,
        downlink_len: 0,
    }
    .log_line();
    assert_eq!(line.as_str(), "tx done");
}

#[test]
fn test_clip_line() {
    assert_eq!(clip_line("short"), "short");

    let long = "x".repeat(40);
    assert_eq!(clip_line(&long).len(), LOG_LINE_LEN);

    // Clipping never splits a multi-byte character.
    let wide = "é".repeat(16); // 32 bytes
    let clipped = clip_line(&wide);
    assert_eq!(clipped.len(), 30);
    assert!(clipped.chars().all(|c| c == 'é'));
}

#[test]
fn test_dispatcher_reasserts_parameters_after_join() {
    let mut dispatcher = EventDispatcher::new();
    let mut machine = SessionStateMachine::new(RetryPolicy::default());
    let mut gate = TransmissionGate::new();
    let enforcer = ParamEnforcer::new(RadioParameters::default());
    let mut mac = MockMac::new();
    let mut display = MockDisplay::new();

    machine.start(&mut mac, 0).unwrap();
    enforcer.enforce(&mut mac);

    // The stack reshuffles parameters while processing the join accept.
    mac.params[Param::AdrEnabled.index()] = 1;
    mac.params[Param::LinkCheckEnabled.index()] = 1;

    let event = dispatcher.dispatch(
        RawMacEvent::Joined,
        &mut machine,
        &mut gate,
        &enforcer,
        &mut mac,
        &mut display,
    );

    assert_eq!(event, DomainEvent::JoinSucceeded);
    assert!(machine.is_joined());
    assert_eq!(mac.params[Param::AdrEnabled.index()], 0);
    assert_eq!(mac.params[Param::LinkCheckEnabled.index()], 0);
    // Log line reflects post-update state, then the status refresh.
    assert_eq!(display.log_lines.last().map(String::as_str), Some("joined"));
    assert_eq!(display.status_calls.last(), Some(&true));
    assert_eq!(dispatcher.dispatched(), 1);
}

#[test]
fn test_log_ring_overwrites_oldest() {
    let mut ring = LogRing::new();
    assert!(ring.is_empty());

    for i in 0..6 {
        ring.push(&format!("line {}", i));
    }
    assert_eq!(ring.len(), LOG_LINES);
    let lines: Vec<&str> = ring.iter().collect();
    assert_eq!(lines, ["line 2", "line 3", "line 4", "line 5"]);
    assert_eq!(ring.latest(), Some("line 5"));
}
