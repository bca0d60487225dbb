use serde::{Deserialize, Serialize};

/// Separator between chain residues on a canonical sequence line.
pub const CHAIN_SEPARATOR: &str = ":";

/// Separator between chain names in a multimer header.
pub const NAME_SEPARATOR: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    #[serde(default)]
    pub name: Option<String>, // Display name, `Chain_{i}` is derived when absent
    pub residues: String,     // One-letter residue codes, whitespace is stripped on normalization
}

impl Chain {
    pub fn new(name: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            residues: residues.into(),
        }
    }

    pub fn unnamed(residues: impl Into<String>) -> Self {
        Self {
            name: None,
            residues: residues.into(),
        }
    }

    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("Chain_{}", index),
        }
    }
}

/// An ordered list of chains folded together.
///
/// One chain is folded as a monomer, two or more as a multimer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Protein {
    #[serde(rename = "chain", default)]
    pub chains: Vec<Chain>,
}

impl Protein {
    pub fn new(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    pub fn monomer(chain: Chain) -> Self {
        Self {
            chains: vec![chain],
        }
    }

    pub fn is_multimer(&self) -> bool {
        self.chains.len() > 1
    }
}
