use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No sequences were found in the input")]
    EmptyInput,

    #[error("Input contains an odd number of lines ({line_count}) indicating an unpaired line")]
    UnpairedLine { line_count: usize },

    #[error(
        "Line {line_number} breaks the header/sequence pairing: '{line}'. Each '>' header must be followed by exactly one sequence line"
    )]
    MisalignedRecord { line_number: usize, line: String },

    #[error(
        "Chain '{chain}' contains characters outside the allowed alphabet: '{}'",
        render_chars(.offending)
    )]
    InvalidAlphabet {
        chain: String,
        offending: BTreeSet<char>,
    },

    #[error("Chain '{chain}' has {length} residue(s), at least {minimum} are required")]
    ChainTooShort {
        chain: String,
        length: usize,
        minimum: usize,
    },

    #[error(
        "Line {line_number} contains spaces, which are not allowed in sequences. Format multimers using colon separation: '{line}'"
    )]
    AmbiguousSpacing { line_number: usize, line: String },

    #[error("Protein {index} has no chains")]
    EmptyProtein { index: usize },
}

impl ValidationError {
    /// Short title used for caller-facing notices.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Empty Input",
            _ => "Invalid Input",
        }
    }
}

fn render_chars(chars: &BTreeSet<char>) -> String {
    chars.iter().collect()
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Failed to access sequence file '{path}': {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl NormalizeError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            NormalizeError::Validation(e) => Some(e),
            NormalizeError::Io { .. } => None,
        }
    }
}
