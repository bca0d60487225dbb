use std::fmt;

/// A fatal condition recognized in the engine's streamed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The accelerator ran out of memory.
    ResourceExhausted,
    /// The remote sequence-search service is misbehaving.
    UpstreamSearchServiceError,
    /// Search results could not be parsed into usable features.
    SearchResultParseError,
    /// Feature generation produced nothing usable.
    NoCandidatesFound,
}

impl FailureKind {
    pub fn title(self) -> &'static str {
        match self {
            FailureKind::ResourceExhausted => "Resource Exhausted",
            FailureKind::UpstreamSearchServiceError => "MMseqs2 API Error",
            FailureKind::SearchResultParseError => "MMseqs2 Results Parsing Error",
            FailureKind::NoCandidatesFound => "No candidates found for sequence.",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            FailureKind::ResourceExhausted => {
                "The GPU ran out of memory. Please try again with a smaller input."
            }
            FailureKind::UpstreamSearchServiceError => "The MMseqs2 API is giving errors.",
            FailureKind::SearchResultParseError => "Failed to parse results from MMseqs2.",
            FailureKind::NoCandidatesFound => "No candidates found for sequence.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub pattern: &'static str,
    pub kind: FailureKind,
}

/// Known diagnostic text emitted by the engine, in evaluation order.
pub const SIGNATURES: &[Signature] = &[
    Signature {
        pattern: "RESOURCE_EXHAUSTED",
        kind: FailureKind::ResourceExhausted,
    },
    Signature {
        pattern: "MMseqs2 API is giving errors",
        kind: FailureKind::UpstreamSearchServiceError,
    },
    Signature {
        pattern: "Could not get MSA/templates",
        kind: FailureKind::SearchResultParseError,
    },
    Signature {
        pattern: "Could not generate input features",
        kind: FailureKind::NoCandidatesFound,
    },
];

/// Returns the kind of the first signature contained in `line`.
pub fn classify_with(table: &[Signature], line: &str) -> Option<FailureKind> {
    table
        .iter()
        .find(|signature| line.contains(signature.pattern))
        .map(|signature| signature.kind)
}

#[inline]
pub fn classify(line: &str) -> Option<FailureKind> {
    classify_with(SIGNATURES, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_progress_lines_are_not_classified() {
        assert_eq!(classify("2024-01-01 12:00:00 Query 1/1: test (length 31)"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn each_signature_maps_to_its_kind() {
        assert_eq!(
            classify("jaxlib.xla_extension.XlaRuntimeError: RESOURCE_EXHAUSTED: Out of memory"),
            Some(FailureKind::ResourceExhausted)
        );
        assert_eq!(
            classify("Exception: MMseqs2 API is giving errors. Please confirm your input"),
            Some(FailureKind::UpstreamSearchServiceError)
        );
        assert_eq!(
            classify("ERROR Could not get MSA/templates for sequence_0"),
            Some(FailureKind::SearchResultParseError)
        );
        assert_eq!(
            classify("ERROR Could not generate input features sequence_0"),
            Some(FailureKind::NoCandidatesFound)
        );
    }

    #[test]
    fn first_matching_signature_wins() {
        let line = "Could not generate input features: RESOURCE_EXHAUSTED";
        assert_eq!(classify(line), Some(FailureKind::ResourceExhausted));

        let reversed = [SIGNATURES[3], SIGNATURES[0]];
        assert_eq!(
            classify_with(&reversed, line),
            Some(FailureKind::NoCandidatesFound)
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("resource_exhausted"), None);
    }
}
