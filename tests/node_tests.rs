use lorawan_node::config::{RadioParameters, RetryPolicy};
use lorawan_node::node::LoRaNode;
use lorawan_node::radio::traits::RawMacEvent;
use lorawan_node::session::machine::SessionState;

use mock::{MockDisplay, MockMac, TestClock};

type TestNode = LoRaNode<MockMac, MockDisplay, TestClock>;

fn started_node() -> (TestNode, TestClock) {
    let clock = TestClock::new();
    let mut node = LoRaNode::with_config(
        MockMac::new(),
        MockDisplay::new(),
        clock.clone(),
        RadioParameters::default(),
        RetryPolicy::default(),
    );
    node.start().unwrap();
    (node, clock)
}

fn joined_node() -> (TestNode, TestClock) {
    let (mut node, clock) = started_node();
    node.mac_mut().emit(RawMacEvent::Joined);
    node.tick();
    assert!(node.is_joined());
    (node, clock)
}

#[test]
fn test_start_bootstraps_and_joins() {
    let (node, _clock) = started_node();

    assert_eq!(node.session_state(), SessionState::Joining);
    assert_eq!(node.mac().resets, 1);
    assert_eq!(node.mac().join_requests, 1);
    assert_eq!(node.session().record().last_attempt_ms, 0);
    assert!(!node.is_joined());

    // The canonical parameters are live before the join goes out.
    for (param, want) in RadioParameters::default().entries() {
        assert_eq!(node.mac().params[param.index()], want);
    }
}

#[test]
fn test_join_event_establishes_session() {
    let (mut node, _clock) = started_node();

    node.mac_mut().emit(RawMacEvent::JoinStarted);
    node.mac_mut().emit(RawMacEvent::Joined);
    node.tick();

    assert!(node.is_joined());
    let display = node.display();
    assert!(display.log_lines.iter().any(|l| l == "join started"));
    assert!(display.log_lines.iter().any(|l| l == "joined"));
    assert_eq!(display.status_calls.last(), Some(&true));
}

#[test]
fn test_send_message_then_busy() {
    let (mut node, _clock) = joined_node();

    assert!(node.send_message("hello"));
    assert_eq!(
        node.mac().uplinks.last(),
        Some(&(1, b"hello".to_vec(), true))
    );
    assert!(node.pending_transmission().is_some());

    // Second send before any outcome: the gate is busy.
    assert!(!node.send_message("world"));
    assert_eq!(node.mac().uplinks.len(), 1);

    let outcomes = &node.display().outcomes;
    assert!(outcomes.contains(&("queued".into(), true)));
    assert!(outcomes.contains(&("tx busy".into(), false)));
}

#[test]
fn test_transmission_complete_releases_gate() {
    let (mut node, _clock) = joined_node();
    assert!(node.send_message("hello"));

    node.mac_mut().emit(RawMacEvent::TxStarted);
    node.mac_mut().emit(RawMacEvent::TxComplete {
        ack: true,
        downlink_len: 0,
    });
    node.tick();

    assert!(node.pending_transmission().is_none());
    assert!(node.is_joined());
    let success_calls = node
        .display()
        .outcomes
        .iter()
        .filter(|(label, success)| label == "uplink" && *success)
        .count();
    assert_eq!(success_calls, 1);

    // The gate is free again.
    assert!(node.send_message("world"));
}

#[test]
fn test_send_rejections() {
    let (mut node, _clock) = started_node();

    // Not joined yet: everything is rejected regardless of payload.
    assert!(!node.send_message("hello"));
    assert!(!node.send_data(&[1, 2, 3], 10));

    let (mut node, _clock) = joined_node();
    assert!(!node.send_data(&[], 10));
    assert!(!node.send_data(&[0u8; 52], 10));
    assert!(!node.send_data(&[1], 0));
    assert!(!node.send_data(&[1], 224));
    assert!(node.mac().uplinks.is_empty());

    // Boundary port and payload are accepted.
    assert!(node.send_data(&[0u8; 51], 223));
    assert_eq!(node.mac().uplinks.len(), 1);
    let (port, payload, confirmed) = &node.mac().uplinks[0];
    assert_eq!(*port, 223);
    assert_eq!(payload.len(), 51);
    assert!(!*confirmed);
}

#[test]
fn test_unrecognized_event_is_logged_not_dropped() {
    let (mut node, _clock) = started_node();

    node.mac_mut().emit(RawMacEvent::Other(42));
    node.tick();

    assert!(node.display().log_lines.iter().any(|l| l == "event? 42"));
    // The status refresh still follows the log line.
    assert!(!node.display().status_calls.is_empty());
}

#[test]
fn test_link_dead_then_reset_clears_pending() {
    let (mut node, clock) = joined_node();
    assert!(node.send_message("hello"));
    assert!(node.pending_transmission().is_some());

    node.mac_mut().emit(RawMacEvent::LinkDead);
    node.tick();
    assert!(!node.is_joined());

    // Past the reset watchdog: the stack is reinitialized and the stale
    // pending slot dropped with it.
    clock.set(200_000);
    node.tick();

    assert_eq!(node.mac().resets, 2);
    assert!(node.pending_transmission().is_none());
    assert_eq!(node.session_state(), SessionState::Joining);
    assert!(node
        .display()
        .log_lines
        .iter()
        .any(|l| l == "stack reset, rejoining"));
}

#[test]
fn test_retry_logs_to_display() {
    let (mut node, clock) = started_node();

    clock.set(61_000);
    node.tick();

    assert_eq!(node.mac().join_requests, 2);
    assert!(node.display().log_lines.iter().any(|l| l == "join retry"));
}

#[test]
fn test_tick_corrects_parameter_drift() {
    let (mut node, _clock) = joined_node();

    // The stack drifts the RX1 delay back to its own default.
    use lorawan_node::radio::traits::Param;
    node.mac_mut().params[Param::Rx1Delay.index()] = 1;

    node.tick();
    assert_eq!(node.mac().params[Param::Rx1Delay.index()], 5);
}

#[test]
fn test_transmission_canceled_releases_gate() {
    let (mut node, _clock) = joined_node();
    assert!(node.send_message("hello"));

    node.mac_mut().emit(RawMacEvent::TxCanceled);
    node.tick();

    assert!(node.pending_transmission().is_none());
    assert!(node
        .display()
        .outcomes
        .contains(&("uplink".into(), false)));
}
