/// Supplies words for a trial on demand.
///
/// `sample` must return exactly `count` words. Order is the presentation
/// order; duplicates are allowed.
pub trait WordSource {
    fn sample(&mut self, count: usize) -> Vec<String>;

    /// Called when a session starts over, before its new pool is sampled.
    fn rewind(&mut self) {}
}

impl<W: WordSource + ?Sized> WordSource for Box<W> {
    fn sample(&mut self, count: usize) -> Vec<String> {
        (**self).sample(count)
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }
}

/// Replays a fixed passage in order, wrapping around at the end.
///
/// Each request continues where the previous one stopped, so a growing pool
/// reads as one continuous passage.
#[derive(Debug, Clone)]
pub struct CyclingWords {
    words: Vec<String>,
    next: usize,
}

impl CyclingWords {
    /// Split `passage` on whitespace. Returns `None` when there are no words.
    pub fn from_passage(passage: &str) -> Option<Self> {
        Self::new(passage.split_whitespace().map(str::to_string).collect())
    }

    pub fn new(words: Vec<String>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        Some(Self { words, next: 0 })
    }
}

impl WordSource for CyclingWords {
    fn sample(&mut self, count: usize) -> Vec<String> {
        let out: Vec<String> = self
            .words
            .iter()
            .cycle()
            .skip(self.next)
            .take(count)
            .cloned()
            .collect();
        self.next = (self.next + count) % self.words.len();
        out
    }

    /// Start the passage over from its first word.
    fn rewind(&mut self) {
        self.next = 0;
    }
}
