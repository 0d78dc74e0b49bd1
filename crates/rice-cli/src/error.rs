use ricepp::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    RiceCore(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write file '{path}': {source}", path = path.display())]
    FileWriting {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::RiceCore(err) => match err {
                EngineError::MalformedInput(_) => 2,
                EngineError::MissingReference { .. } => 3,
                EngineError::AmbiguousOrInsufficientAlignment { .. } => 4,
                EngineError::StructureMismatch { .. } => 6,
                EngineError::ParentMismatch { .. } => 7,
                EngineError::Config(_) => 8,
                EngineError::InsufficientLength { .. } => 9,
            },
            CliError::FileParsing { .. } => 2,
            CliError::Config(_) | CliError::Argument(_) => 8,
            CliError::FileWriting { .. } | CliError::Io(_) | CliError::Other(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricepp::engine::config::ConfigError;

    #[test]
    fn engine_errors_map_to_distinct_exit_codes() {
        let cases = [
            (EngineError::MalformedInput("x".into()), 2),
            (
                EngineError::MissingReference {
                    id: "1ABC".into(),
                    location: "multiple sequence alignment",
                },
                3,
            ),
            (
                EngineError::AmbiguousOrInsufficientAlignment { found: 1 },
                4,
            ),
            (
                EngineError::StructureMismatch {
                    id: "1ABC".into(),
                    chains: vec!['A'],
                },
                6,
            ),
            (EngineError::ParentMismatch { id: "p".into() }, 7),
            (
                EngineError::Config(ConfigError::MissingParameter("num_crossovers")),
                8,
            ),
            (
                EngineError::InsufficientLength {
                    collapsed_len: 3,
                    num_fragments: 4,
                    min_fragment_length: 4,
                },
                9,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn unreadable_input_is_reported_as_malformed() {
        let err = CliError::FileParsing {
            path: PathBuf::from("missing.aln"),
            source: anyhow::anyhow!("not found"),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("missing.aln"));
        assert_eq!(CliError::Config("bad".into()).exit_code(), 8);
        assert_eq!(
            CliError::Io(std::io::Error::other("disk full")).exit_code(),
            1
        );
    }
}
