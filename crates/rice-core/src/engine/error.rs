use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::aln::AlnError;
use crate::core::io::contacts::ContactFileError;
use crate::core::io::pdb::PdbError;
use crate::core::models::parent::ParentSetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Parent '{id}' in the structure alignment does not match its row in the multiple sequence alignment")]
    ParentMismatch { id: String },

    #[error("Structure sequence for chains {chains:?} does not match aligned sequence '{id}'")]
    StructureMismatch { id: String, chains: Vec<char> },

    #[error("Reference '{id}' not found in {location}")]
    MissingReference { id: String, location: &'static str },

    #[error("Structure alignment must contain at least two distinct sequences, found {found}")]
    AmbiguousOrInsufficientAlignment { found: usize },

    #[error(
        "Collapsed sequence length {collapsed_len} is too short for {num_fragments} fragments of at least {min_fragment_length} residues"
    )]
    InsufficientLength {
        collapsed_len: usize,
        num_fragments: usize,
        min_fragment_length: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<ParentSetError> for EngineError {
    fn from(err: ParentSetError) -> Self {
        EngineError::MalformedInput(err.to_string())
    }
}

impl From<PdbError> for EngineError {
    fn from(err: PdbError) -> Self {
        EngineError::MalformedInput(format!("structure file: {}", err))
    }
}

impl From<AlnError> for EngineError {
    fn from(err: AlnError) -> Self {
        EngineError::MalformedInput(format!("alignment file: {}", err))
    }
}

impl From<ContactFileError> for EngineError {
    fn from(err: ContactFileError) -> Self {
        EngineError::MalformedInput(format!("contact file: {}", err))
    }
}
