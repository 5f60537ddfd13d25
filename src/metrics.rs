use crate::session::Phase;

/// Scores for a trial. All values are whole numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub total_typed: usize,
}

impl Metrics {
    /// Score the committed history against the target words.
    ///
    /// Once the trial is finished a non-empty in-progress word counts as one
    /// more typed word, correct only if it matches its target exactly.
    /// Safe to call at any time; nothing is cached or mutated.
    pub fn compute(
        committed: &[String],
        target: &[String],
        buffer: &str,
        word_index: usize,
        phase: Phase,
        duration_secs: u32,
    ) -> Self {
        let counts_partial = phase == Phase::Finished && !buffer.is_empty();

        let committed_correct = committed
            .iter()
            .zip(target)
            .filter(|(typed, expected)| typed == expected)
            .count();
        let partial_correct =
            counts_partial && target.get(word_index).is_some_and(|expected| expected == buffer);

        let total_typed = committed.len() + usize::from(counts_partial);
        let correct = committed_correct + usize::from(partial_correct);

        Self {
            wpm: words_per_minute(correct, duration_secs),
            accuracy: percentage(correct, total_typed),
            correct,
            incorrect: total_typed - correct,
            total_typed,
        }
    }
}

fn words_per_minute(correct: usize, duration_secs: u32) -> u32 {
    if duration_secs == 0 {
        return 0;
    }
    let minutes = f64::from(duration_secs) / 60.0;
    (correct as f64 / minutes).round() as u32
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u32
}
