use super::chain::Protein;
use std::path::PathBuf;

/// The raw sequence input of one request.
///
/// Exactly one shape is supplied per request; the enum makes "none" and "several" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// A FASTA-like file on disk.
    File(PathBuf),
    /// Free text, either `>header` tagged or one untagged protein per line.
    Text(String),
    /// A structured list of proteins with (optionally named) chains.
    Proteins(Vec<Protein>),
}

impl RawInput {
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::File(_) => "file",
            RawInput::Text(_) => "text",
            RawInput::Proteins(_) => "proteins",
        }
    }
}
