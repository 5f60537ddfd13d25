use thiserror::Error;

/// Errors surfaced at the fallible edges of keysmash: corpus loading,
/// configuration, logging and duration validation. The session itself is
/// total and never fails.
#[derive(Debug, Error)]
pub enum KeysmashError {
    #[error("trial duration must be a positive number of seconds, got {0}")]
    InvalidDuration(u32),

    #[error("unknown word list `{0}`")]
    UnknownLanguage(String),

    #[error("word list `{0}` contains no words")]
    EmptyCorpus(String),

    #[error("unable to read word list `{name}`: {source}")]
    Corpus {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, KeysmashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_message() {
        let err = KeysmashError::InvalidDuration(0);
        assert_eq!(
            err.to_string(),
            "trial duration must be a positive number of seconds, got 0"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KeysmashError = io.into();
        assert!(matches!(err, KeysmashError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
