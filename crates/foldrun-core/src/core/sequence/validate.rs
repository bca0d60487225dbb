use super::error::ValidationError;
use super::policy::NormalizationPolicy;
use crate::core::models::chain::CHAIN_SEPARATOR;
use std::collections::BTreeSet;

pub(crate) fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Checks one cleaned chain: alphabet first, then minimum length.
pub(crate) fn validate_chain(
    residues: &str,
    chain: &str,
    policy: &NormalizationPolicy,
) -> Result<(), ValidationError> {
    let offending: BTreeSet<char> = residues
        .chars()
        .filter(|&c| !policy.alphabet.contains(c))
        .collect();
    if !offending.is_empty() {
        return Err(ValidationError::InvalidAlphabet {
            chain: chain.to_string(),
            offending,
        });
    }

    let length = residues.chars().count();
    if length < policy.min_chain_length {
        return Err(ValidationError::ChainTooShort {
            chain: chain.to_string(),
            length,
            minimum: policy.min_chain_length,
        });
    }
    Ok(())
}

/// Validates every colon-separated chain of a cleaned sequence line.
pub(crate) fn validate_sequence_line(
    line: &str,
    label: &str,
    policy: &NormalizationPolicy,
) -> Result<(), ValidationError> {
    let chains: Vec<&str> = line.split(CHAIN_SEPARATOR).collect();
    if chains.len() == 1 {
        return validate_chain(chains[0], label, policy);
    }
    for (i, residues) in chains.iter().enumerate() {
        validate_chain(residues, &format!("{} (chain {})", label, i), policy)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::policy::Alphabet;

    const VALID: &str = "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM";

    #[test]
    fn strip_whitespace_removes_internal_and_trailing_whitespace() {
        assert_eq!(strip_whitespace(" MTA NHL\tESP \r\n"), "MTANHLESP");
    }

    #[test]
    fn validate_chain_accepts_lowercase_residues() {
        let policy = NormalizationPolicy::default();
        assert!(validate_chain(&VALID.to_lowercase(), "A", &policy).is_ok());
    }

    #[test]
    fn validate_chain_reports_exactly_the_offending_characters() {
        let policy = NormalizationPolicy::default();
        let err = validate_chain("MTANHLES1PNCDW*KNN1RMA", "A", &policy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAlphabet {
                chain: "A".into(),
                offending: ['*', '1'].into_iter().collect(),
            }
        );
    }

    #[test]
    fn validate_chain_rejects_chains_below_minimum_length() {
        let policy = NormalizationPolicy::default();
        let err = validate_chain("MTANHLESPNCDWKN", "A", &policy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ChainTooShort {
                chain: "A".into(),
                length: 15,
                minimum: 16
            }
        );
        assert!(validate_chain("MTANHLESPNCDWKNN", "A", &policy).is_ok());
    }

    #[test]
    fn validate_chain_checks_alphabet_before_length() {
        let policy = NormalizationPolicy::default();
        let err = validate_chain("MT9", "A", &policy).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAlphabet { .. }));
    }

    #[test]
    fn standard_policy_rejects_x() {
        let policy = NormalizationPolicy {
            alphabet: Alphabet::Standard,
            ..Default::default()
        };
        let err = validate_chain("MTANHLESPNCDWKNNX", "A", &policy).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAlphabet { .. }));
    }

    #[test]
    fn validate_sequence_line_labels_multimer_chains_by_index() {
        let policy = NormalizationPolicy::default();
        let line = format!("{}:MTA", VALID);
        let err = validate_sequence_line(&line, "complex", &policy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ChainTooShort {
                chain: "complex (chain 1)".into(),
                length: 3,
                minimum: 16
            }
        );
    }

    #[test]
    fn validate_sequence_line_rejects_empty_chain_between_separators() {
        let policy = NormalizationPolicy::default();
        let line = format!("{}::{}", VALID, VALID);
        let err = validate_sequence_line(&line, "complex", &policy).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ChainTooShort { length: 0, .. }
        ));
    }
}
