use std::time::Duration;

/// Periodic pulse that drives explosion animation, independent of the
/// simulation tick rate.  Stopped until armed; the owner stops it again once
/// there is nothing left to animate.
#[derive(Clone, Debug)]
pub struct ExplosionTimer {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl ExplosionTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start pulsing.  Re-arming a running timer restarts its period.
    pub fn arm(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Let `dt` of wall time pass and return how many pulses fell due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += dt;
        let mut pulses = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            pulses += 1;
        }
        pulses
    }
}
