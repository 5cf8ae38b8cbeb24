//! Monotonic clock abstraction
//!
//! Timer behavior must be testable without real elapsed wall time, so the
//! session layer reads time through this trait instead of a platform
//! `millis()`. Embedded integrations wrap their timer peripheral; tests
//! inject a hand-advanced clock.

/// Source of monotonic milliseconds since boot.
pub trait Clock {
    /// Current monotonic time in milliseconds.
    fn now_ms(&self) -> u64;
}

#[cfg(feature = "std")]
pub use hosted::StdClock;

#[cfg(feature = "std")]
mod hosted {
    use super::Clock;
    use std::time::Instant;

    /// Clock backed by `std::time::Instant`, counting from construction.
    pub struct StdClock {
        epoch: Instant,
    }

    impl StdClock {
        /// Create a clock starting at zero.
        pub fn new() -> Self {
            Self {
                epoch: Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now_ms(&self) -> u64 {
            self.epoch.elapsed().as_millis() as u64
        }
    }
}
