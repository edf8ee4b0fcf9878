//! Simulation clock: tick counting and pause state.
//!
//! Pause lives here, on the simulation that owns it, not in the scene graph
//! and not in a global. Paused steps still refresh transforms downstream;
//! only integration stops.

/// Tick counter and pause flag for one simulation.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    /// Whether integration is paused. Position edits still land while
    /// paused.
    pub paused: bool,
    ticks: u64,
}

impl SimClock {
    pub fn new(start_paused: bool) -> Self {
        Self {
            paused: start_paused,
            ticks: 0,
        }
    }

    /// Number of integration ticks executed. Paused steps do not count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_honors_start_paused() {
        assert!(SimClock::new(true).paused);
        assert!(!SimClock::new(false).paused);
        assert_eq!(SimClock::new(true).ticks(), 0);
    }

    #[test]
    fn test_toggle_flips_pause() {
        let mut clock = SimClock::new(false);
        clock.toggle();
        assert!(clock.paused);
        clock.toggle();
        assert!(!clock.paused);
    }

    #[test]
    fn test_record_tick_counts() {
        let mut clock = SimClock::default();
        for _ in 0..5 {
            clock.record_tick();
        }
        assert_eq!(clock.ticks(), 5);
    }
}
