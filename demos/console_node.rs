//! Console walkthrough of the session manager
//!
//! Drives a node end-to-end against the loopback MAC double:
//! - bootstrap and OTAA join
//! - a confirmed text uplink, with the busy rejection on a second send
//! - the transmission outcome releasing the gate
//!
//! The display sink renders the four-line log ring to stdout the way the
//! OLED sink on the device would. Run with:
//!
//! ```sh
//! cargo run --example console_node --features std
//! ```

use lorawan_node::display::{DisplaySink, LogRing};
use lorawan_node::node::LoRaNode;
use lorawan_node::radio::sim::SimMac;
use lorawan_node::time::StdClock;

/// Display sink printing the ring to stdout.
struct ConsoleDisplay {
    ring: LogRing,
}

impl ConsoleDisplay {
    fn new() -> Self {
        Self {
            ring: LogRing::new(),
        }
    }
}

impl DisplaySink for ConsoleDisplay {
    fn append_log_line(&mut self, line: &str) {
        self.ring.push(line);
        println!("--- log ---");
        for line in self.ring.iter() {
            println!("| {}", line);
        }
    }

    fn show_status(&mut self, joined: bool) {
        println!("status: {}", if joined { "joined" } else { "joining..." });
    }

    fn show_transmission_outcome(&mut self, label: &str, success: bool) {
        println!("outcome: {} ({})", label, if success { "ok" } else { "rejected" });
    }

    fn show_debug(&mut self, text: &str) {
        println!("debug: {}", text);
    }
}

fn main() {
    let mut node = LoRaNode::new(SimMac::new(), ConsoleDisplay::new(), StdClock::new());

    node.start().expect("loopback stack never refuses");
    node.tick();
    assert!(node.is_joined());

    // First send is accepted, second bounces off the gate.
    println!("send #1 accepted: {}", node.send_message("hello"));
    println!("send #2 accepted: {}", node.send_message("world"));

    // The completion event releases the gate.
    node.tick();
    println!("send #3 accepted: {}", node.send_message("world"));
    node.tick();

    println!("joined at exit: {}", node.is_joined());
}
