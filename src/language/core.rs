use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;

use super::source::WordSource;
use crate::{KeysmashError, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_LANGUAGE: &str = "english";

/// A word list embedded in the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load an embedded word list by file stem, e.g. `english` or `english200`.
    pub fn new(file_name: &str) -> Result<Self> {
        let lang = read_language_from_file(&format!("{file_name}.json"))
            .ok_or_else(|| KeysmashError::UnknownLanguage(file_name.to_string()))??;

        if lang.words.is_empty() {
            return Err(KeysmashError::EmptyCorpus(file_name.to_string()));
        }
        Ok(lang)
    }

    /// File stems of every embedded word list, sorted.
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = LANG_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .filter_map(|stem| stem.to_str())
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

impl WordSource for Language {
    /// Uniform sampling with replacement, so duplicates are expected.
    fn sample(&mut self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .filter_map(|_| self.words.choose(&mut rng).cloned())
            .collect()
    }
}

fn read_language_from_file(file_name: &str) -> Option<Result<Language>> {
    let file = LANG_DIR.get_file(file_name)?;

    let contents = String::from_utf8_lossy(file.contents());

    Some(
        from_str::<Language>(&contents).map_err(|source| KeysmashError::Corpus {
            name: file_name.to_string(),
            source,
        }),
    )
}
