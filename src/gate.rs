// Named delay gates driven by the control loop's elapsed time
//
// Lets teleop code wait on something without blocking the loop: call the gate
// every tick with the current runtime and act once it opens.

use std::collections::HashMap;

use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct GateState {
    armed: bool,
    armed_at: f64,
}

/// Name-keyed delay gates; unknown names are created on first use
#[derive(Debug, Clone, Default)]
pub struct DelayGates {
    gates: HashMap<String, GateState>,
}

impl DelayGates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `name` if needed, then report whether `delay` seconds have passed
    ///
    /// The first call arms the gate and returns false. Once open the gate stays
    /// open on every call until [`close`](Self::close) is called.
    pub fn open_after_delay(&mut self, name: &str, now: f64, delay: f64) -> bool {
        let gate = self.gates.entry(name.to_string()).or_default();
        if !gate.armed {
            debug!("Gate '{}' armed at {:.3}s", name, now);
            gate.armed = true;
            gate.armed_at = now;
            return false;
        }
        now - gate.armed_at >= delay
    }

    /// Disarm `name`; the next call re-arms it
    pub fn close(&mut self, name: &str) {
        self.gates.entry(name.to_string()).or_default().armed = false;
    }

    /// Periodic pulse: true once every `delay` seconds after arming
    ///
    /// A firing call moves the baseline to `now`, so the next pulse comes a full
    /// `delay` later.
    pub fn complete_once_after_delay(&mut self, name: &str, now: f64, delay: f64) -> bool {
        let gate = self.gates.entry(name.to_string()).or_default();
        if !gate.armed {
            debug!("Gate '{}' armed at {:.3}s", name, now);
            gate.armed = true;
            gate.armed_at = now;
            return false;
        }
        if now - gate.armed_at >= delay {
            debug!("Gate '{}' fired at {:.3}s", name, now);
            gate.armed_at = now;
            return true;
        }
        false
    }

    pub fn is_armed(&self, name: &str) -> bool {
        self.gates.get(name).is_some_and(|g| g.armed)
    }

    /// Number of distinct gate names seen so far
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_after_delay_stays_open_until_closed() {
        let mut gates = DelayGates::new();
        assert!(!gates.open_after_delay("g", 0.0, 1.0));
        assert!(!gates.open_after_delay("g", 0.5, 1.0));
        assert!(gates.open_after_delay("g", 1.1, 1.0));
        assert!(gates.open_after_delay("g", 2.0, 1.0));

        gates.close("g");
        assert!(!gates.is_armed("g"));
        assert!(!gates.open_after_delay("g", 2.1, 1.0), "close should re-arm");
        assert!(gates.is_armed("g"));
        assert!(gates.open_after_delay("g", 3.1, 1.0));
    }

    #[test]
    fn test_complete_once_pulses() {
        let mut gates = DelayGates::new();
        assert!(!gates.complete_once_after_delay("p", 0.0, 1.0));
        assert!(!gates.complete_once_after_delay("p", 0.9, 1.0));
        assert!(gates.complete_once_after_delay("p", 1.0, 1.0));
        assert!(!gates.complete_once_after_delay("p", 1.5, 1.0));
        assert!(gates.complete_once_after_delay("p", 2.0, 1.0));
    }

    #[test]
    fn test_gates_are_independent() {
        let mut gates = DelayGates::new();
        assert!(!gates.open_after_delay("a", 0.0, 0.5));
        assert!(!gates.open_after_delay("b", 0.4, 0.5));
        assert!(gates.open_after_delay("a", 0.6, 0.5));
        assert!(!gates.open_after_delay("b", 0.6, 0.5));
        assert_eq!(gates.len(), 2);
    }

    #[test]
    fn test_close_unknown_gate() {
        let mut gates = DelayGates::new();
        gates.close("never-used");
        assert!(!gates.open_after_delay("never-used", 5.0, 0.0));
        assert!(gates.open_after_delay("never-used", 5.0, 0.0));
    }
}
