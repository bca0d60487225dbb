use super::chain::CHAIN_SEPARATOR;
use crate::core::sequence::error::ValidationError;
use std::fmt;

pub const HEADER_PREFIX: char = '>';

/// The engine-ready request: alternating `>header` and sequence lines.
///
/// Invariant: the line count is strictly positive and even, every even-indexed line is a `>`
/// header and no odd-indexed line is. The only way to obtain a value is through
/// [`CanonicalRequest::from_lines`], which enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    lines: Vec<String>,
}

/// A borrowed header/sequence pair of a [`CanonicalRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub header: &'a str,
    pub sequence: &'a str,
}

impl Record<'_> {
    /// The header without its leading `>`.
    pub fn name(&self) -> &str {
        self.header.strip_prefix(HEADER_PREFIX).unwrap_or(self.header)
    }

    pub fn is_multimer(&self) -> bool {
        self.sequence.contains(CHAIN_SEPARATOR)
    }
}

impl CanonicalRequest {
    pub fn from_lines(lines: Vec<String>) -> Result<Self, ValidationError> {
        if lines.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if lines.len() % 2 != 0 {
            return Err(ValidationError::UnpairedLine {
                line_count: lines.len(),
            });
        }
        for (i, line) in lines.iter().enumerate() {
            let is_header = line.starts_with(HEADER_PREFIX);
            if is_header != (i % 2 == 0) {
                return Err(ValidationError::MisalignedRecord {
                    line_number: i + 1,
                    line: line.clone(),
                });
            }
        }
        Ok(Self { lines })
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.lines.chunks_exact(2).map(|pair| Record {
            header: &pair[0],
            sequence: &pair[1],
        })
    }

    pub fn record_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn multimer_count(&self) -> usize {
        self.records().filter(Record::is_multimer).count()
    }

    /// Renders the newline-terminated on-disk form.
    pub fn to_fasta(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fasta())
    }
}
