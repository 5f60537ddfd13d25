use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// What a call to [`Countdown::advance`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// The clock is not running; elapsed time was ignored.
    Inactive,
    /// Still counting down.
    Running { time_left: u32 },
    /// The clock just reached zero. Reported once per start.
    Expired,
}

/// Whole-second countdown bound to a configured duration.
///
/// The countdown owns no callbacks: whoever owns it feeds elapsed time in via
/// [`Countdown::advance`] and reacts to the returned signal. Once stopped it
/// ignores time until it is started again, so a cancelled run can never
/// report a late tick or a second expiry.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_secs: u32,
    time_left: u32,
    running: bool,
    carry: Duration,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            time_left: duration_secs,
            running: false,
            carry: Duration::ZERO,
        }
    }

    /// Start counting from the full duration.
    pub fn start(&mut self) {
        self.time_left = self.duration_secs;
        self.carry = Duration::ZERO;
        self.running = true;
    }

    /// Cancel the clock. Remaining time is kept for display.
    pub fn stop(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    /// Stop and restore the full duration.
    pub fn reset(&mut self) {
        self.stop();
        self.time_left = self.duration_secs;
    }

    /// Switch to a new duration. The clock is stopped and shows the new
    /// duration without starting.
    pub fn set_duration(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
        self.reset();
    }

    pub fn advance(&mut self, elapsed: Duration) -> TimerSignal {
        if !self.running {
            return TimerSignal::Inactive;
        }

        self.carry += elapsed;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.stop();
                return TimerSignal::Expired;
            }
        }

        TimerSignal::Running {
            time_left: self.time_left,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.running
    }
}
