use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_MIN_CHAIN_LENGTH: usize = 16;

const STANDARD_RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";

/// The set of one-letter codes a chain may contain. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alphabet {
    /// All 26 Latin letters, which covers ambiguity codes such as `X`, `B` and `Z`.
    #[default]
    Latin,
    /// The 20 canonical amino acids only.
    Standard,
}

impl Alphabet {
    #[inline]
    pub fn contains(self, c: char) -> bool {
        match self {
            Alphabet::Latin => c.is_ascii_alphabetic(),
            Alphabet::Standard => STANDARD_RESIDUES.contains(c.to_ascii_uppercase()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown alphabet '{0}'. Expected 'latin' or 'standard'.")]
pub struct ParseAlphabetError(String);

impl FromStr for Alphabet {
    type Err = ParseAlphabetError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latin" => Ok(Alphabet::Latin),
            "standard" => Ok(Alphabet::Standard),
            other => Err(ParseAlphabetError(other.to_string())),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alphabet::Latin => "latin",
            Alphabet::Standard => "standard",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationPolicy {
    pub alphabet: Alphabet,
    pub min_chain_length: usize,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Latin,
            min_chain_length: DEFAULT_MIN_CHAIN_LENGTH,
        }
    }
}
