// controller.rs - Stopped/Running state machine gating steps and edits

use std::time::{Duration, Instant};

use tracing::info;

use crate::schedule::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Stopped,
    Running,
}

/// Owns the periodic step schedule. Steps are only due while Running,
/// and direct edits are only allowed while Stopped.
#[derive(Debug, Clone)]
pub struct SimulationController {
    state: SimulationState,
    ticker: Ticker,
}

impl SimulationController {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: SimulationState::Stopped,
            ticker: Ticker::new(interval.max(Duration::from_millis(1))),
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn can_edit(&self) -> bool {
        self.state == SimulationState::Stopped
    }

    pub fn interval(&self) -> Duration {
        self.ticker.period()
    }

    pub fn next_step_at(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Returns false when already Running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = SimulationState::Running;
        self.ticker.start(now);
        info!("Simulation started ({}ms interval)", self.interval().as_millis());
        true
    }

    /// Returns false when already Stopped. No step is due after this returns.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.ticker.cancel();
        self.state = SimulationState::Stopped;
        info!("Simulation stopped");
        true
    }

    /// New step interval in milliseconds (at least 1). A running schedule
    /// is re-armed without leaving Running.
    pub fn set_interval_ms(&mut self, ms: u64, now: Instant) {
        let interval = Duration::from_millis(ms.max(1));
        self.ticker.set_period(interval, now);
        info!("Step interval set to {}ms", interval.as_millis());
    }

    /// True when a periodic step should run now.
    pub fn step_due(&mut self, now: Instant) -> bool {
        self.is_running() && self.ticker.poll(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_starts_stopped() {
        let controller = SimulationController::new(500 * MS);
        assert_eq!(controller.state(), SimulationState::Stopped);
        assert!(controller.can_edit());
        assert_eq!(controller.next_step_at(), None);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let t0 = Instant::now();
        let mut controller = SimulationController::new(500 * MS);
        assert!(controller.start(t0));
        assert!(!controller.start(t0 + 100 * MS));
        assert_eq!(controller.next_step_at(), Some(t0 + 500 * MS));
        assert!(!controller.can_edit());
        assert!(controller.stop());
        assert!(!controller.stop());
    }

    #[test]
    fn test_no_step_after_stop() {
        let t0 = Instant::now();
        let mut controller = SimulationController::new(100 * MS);
        controller.start(t0);
        controller.stop();
        assert!(!controller.step_due(t0 + 10_000 * MS));
    }

    #[test]
    fn test_interval_change_keeps_running() {
        let t0 = Instant::now();
        let mut controller = SimulationController::new(500 * MS);
        controller.start(t0);
        controller.set_interval_ms(100, t0 + 50 * MS);
        assert!(controller.is_running());
        assert!(!controller.step_due(t0 + 149 * MS));
        assert!(controller.step_due(t0 + 150 * MS));
    }

    #[test]
    fn test_interval_floor_is_one_ms() {
        let mut controller = SimulationController::new(Duration::ZERO);
        assert_eq!(controller.interval(), MS);
        controller.set_interval_ms(0, Instant::now());
        assert_eq!(controller.interval(), MS);
    }
}
