use std::time::Duration;

use tracing::{debug, info};

use crate::language::WordSource;
use crate::metrics::Metrics;
use crate::timer::{Countdown, TimerSignal};
use crate::{KeysmashError, Result};

/// Words sampled for a fresh session.
pub const INITIAL_POOL: usize = 180;
/// Minimum number of words kept ahead of the cursor while running.
pub const LOOKAHEAD_MARGIN: usize = 50;
/// Words appended whenever the lookahead margin is breached.
pub const GROWTH_BATCH: usize = 120;
/// Beginning a run resamples when the pool is shorter than this.
pub const MIN_START_POOL: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// One timed typing trial.
///
/// Every operation is defined for every phase: calls that do not apply to
/// the current phase are no-ops. Reading is done through the accessors; the
/// only way to change a session is through its operations.
#[derive(Debug)]
pub struct Session<W: WordSource> {
    source: W,
    phase: Phase,
    target_words: Vec<String>,
    word_index: usize,
    committed_words: Vec<String>,
    current_buffer: String,
    countdown: Countdown,
}

impl<W: WordSource> Session<W> {
    pub fn new(mut source: W, duration_secs: u32) -> Result<Self> {
        if duration_secs == 0 {
            return Err(KeysmashError::InvalidDuration(duration_secs));
        }

        let target_words = source.sample(INITIAL_POOL);
        Ok(Self {
            source,
            phase: Phase::Idle,
            target_words,
            word_index: 0,
            committed_words: Vec::new(),
            current_buffer: String::new(),
            countdown: Countdown::new(duration_secs),
        })
    }

    /// Back to `Idle` with a brand-new word pool, from any phase.
    pub fn reset(&mut self) {
        let previous = self.phase;
        self.countdown.reset();
        self.phase = Phase::Idle;
        self.clear_progress();
        self.source.rewind();
        self.target_words = self.source.sample(INITIAL_POOL);
        debug!(
            from = %previous,
            duration_secs = self.duration_secs(),
            pool = self.target_words.len(),
            "session reset"
        );
    }

    /// Start the trial. Only valid from `Idle`.
    pub fn begin_run(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }

        self.clear_progress();
        if self.target_words.len() < MIN_START_POOL {
            self.target_words = self.source.sample(INITIAL_POOL);
        }
        self.phase = Phase::Running;
        self.countdown.start();
        debug!(duration_secs = self.duration_secs(), "trial started");
    }

    /// Type one character. The first keystroke of an idle session starts it.
    /// Whitespace is a word separator and is never part of the buffer.
    pub fn append_char(&mut self, c: char) {
        if c.is_whitespace() || self.phase == Phase::Finished {
            return;
        }
        if self.phase == Phase::Idle {
            self.begin_run();
        }
        self.current_buffer.push(c);
    }

    pub fn erase_char(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.current_buffer.pop();
    }

    /// Submit the buffer exactly as typed, even when empty.
    pub fn commit_word(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let submitted = std::mem::take(&mut self.current_buffer);
        self.committed_words.push(submitted);
        self.word_index += 1;

        while self.word_index + LOOKAHEAD_MARGIN > self.target_words.len() {
            let batch = self.source.sample(GROWTH_BATCH);
            if batch.is_empty() {
                break;
            }
            self.target_words.extend(batch);
            debug!(pool = self.target_words.len(), "word pool extended");
        }
    }

    /// End the trial and freeze its state. Repeated calls change nothing.
    pub fn finish(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.countdown.stop();
        self.phase = Phase::Finished;

        let metrics = self.metrics();
        info!(
            duration_secs = self.duration_secs(),
            wpm = metrics.wpm,
            accuracy = metrics.accuracy,
            correct = metrics.correct,
            incorrect = metrics.incorrect,
            "trial finished"
        );
    }

    /// Feed elapsed wall time to the countdown. Returns `true` on the tick
    /// that finished the trial.
    pub fn on_tick(&mut self, elapsed: Duration) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        match self.countdown.advance(elapsed) {
            TimerSignal::Expired => {
                self.finish();
                true
            }
            TimerSignal::Running { .. } | TimerSignal::Inactive => false,
        }
    }

    /// Switch the trial length. The running clock is stopped and the session
    /// starts over in `Idle` with fresh words.
    pub fn set_duration(&mut self, duration_secs: u32) -> Result<()> {
        if duration_secs == 0 {
            return Err(KeysmashError::InvalidDuration(duration_secs));
        }

        self.countdown.set_duration(duration_secs);
        self.reset();
        Ok(())
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::compute(
            &self.committed_words,
            &self.target_words,
            &self.current_buffer,
            self.word_index,
            self.phase,
            self.duration_secs(),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration_secs(&self) -> u32 {
        self.countdown.duration_secs()
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn committed_words(&self) -> &[String] {
        &self.committed_words
    }

    pub fn current_buffer(&self) -> &str {
        &self.current_buffer
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.time_left()
    }

    /// The word currently being typed.
    pub fn current_target(&self) -> Option<&str> {
        self.target_words.get(self.word_index).map(String::as_str)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn clear_progress(&mut self) {
        self.current_buffer.clear();
        self.committed_words.clear();
        self.word_index = 0;
    }
}
