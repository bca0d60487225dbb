use super::error::{NormalizeError, ValidationError};
use super::policy::NormalizationPolicy;
use super::validate::{strip_whitespace, validate_chain, validate_sequence_line};
use crate::core::io::fasta::FastaFile;
use crate::core::models::chain::{CHAIN_SEPARATOR, NAME_SEPARATOR, Protein};
use crate::core::models::input::RawInput;
use crate::core::models::request::{CanonicalRequest, HEADER_PREFIX};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SequenceNormalizer {
    policy: NormalizationPolicy,
}

impl SequenceNormalizer {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    /// Validates and serializes one raw input into a canonical request.
    ///
    /// Every chain is validated before the request is assembled, so a failure never leaves a
    /// partial request behind.
    pub fn normalize(&self, input: &RawInput) -> Result<CanonicalRequest, NormalizeError> {
        debug!(kind = input.kind(), "Normalizing raw sequence input.");
        let lines = match input {
            RawInput::File(path) => self.normalize_file(path)?,
            RawInput::Text(text) => self.normalize_text(text)?,
            RawInput::Proteins(proteins) => self.normalize_proteins(proteins)?,
        };
        let request = CanonicalRequest::from_lines(lines)?;
        for record in request.records() {
            debug!(
                name = record.name(),
                multimer = record.is_multimer(),
                "Accepted record."
            );
        }
        Ok(request)
    }

    fn normalize_file(&self, path: &Path) -> Result<Vec<String>, NormalizeError> {
        let raw = FastaFile::read_lines_from_path(path).map_err(|source| NormalizeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = Vec::with_capacity(raw.len());
        let mut current_name: Option<String> = None;
        for (line_num, line) in raw.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with(HEADER_PREFIX) {
                current_name = Some(trimmed[1..].to_string());
                lines.push(trimmed.to_string());
                continue;
            }

            let cleaned = strip_whitespace(trimmed);
            let label = current_name
                .clone()
                .unwrap_or_else(|| format!("line {}", line_num + 1));
            validate_sequence_line(&cleaned, &label, &self.policy)?;
            lines.push(cleaned);
        }
        Ok(lines)
    }

    fn normalize_text(&self, text: &str) -> Result<Vec<String>, ValidationError> {
        let raw: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        for (i, line) in raw.iter().enumerate() {
            if !line.starts_with(HEADER_PREFIX) && line.contains(' ') {
                return Err(ValidationError::AmbiguousSpacing {
                    line_number: i + 1,
                    line: line.to_string(),
                });
            }
        }

        let Some(first) = raw.first() else {
            return Ok(Vec::new());
        };

        if first.starts_with(HEADER_PREFIX) {
            let mut current_name = "";
            for line in &raw {
                match line.strip_prefix(HEADER_PREFIX) {
                    Some(name) => current_name = name,
                    None => validate_sequence_line(line, current_name, &self.policy)?,
                }
            }
            return Ok(raw.into_iter().map(str::to_string).collect());
        }

        let mut lines = Vec::with_capacity(raw.len() * 2);
        for (i, line) in raw.iter().enumerate() {
            let name = format!("sequence_{}", i);
            validate_sequence_line(line, &name, &self.policy)?;
            lines.push(format!("{}{}", HEADER_PREFIX, name));
            lines.push(line.to_string());
        }
        Ok(lines)
    }

    fn normalize_proteins(&self, proteins: &[Protein]) -> Result<Vec<String>, ValidationError> {
        let mut lines = Vec::with_capacity(proteins.len() * 2);
        for (index, protein) in proteins.iter().enumerate() {
            if protein.chains.is_empty() {
                return Err(ValidationError::EmptyProtein { index });
            }
            debug!(
                index,
                chains = protein.chains.len(),
                multimer = protein.is_multimer(),
                "Serializing structured protein."
            );

            let mut names = Vec::with_capacity(protein.chains.len());
            let mut sequences = Vec::with_capacity(protein.chains.len());
            for (i, chain) in protein.chains.iter().enumerate() {
                let name = chain.display_name(i);
                let residues = strip_whitespace(&chain.residues);
                validate_chain(&residues, &name, &self.policy)?;
                names.push(name);
                sequences.push(residues);
            }

            lines.push(format!("{}{}", HEADER_PREFIX, names.join(NAME_SEPARATOR)));
            lines.push(sequences.join(CHAIN_SEPARATOR));
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::chain::Chain;
    use std::fs;
    use tempfile::tempdir;

    const SEQ_A: &str = "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM";
    const SEQ_B: &str = "CDWKNNENPDEAMTANHLESPNCDWKNNRMA";

    fn normalize(input: RawInput) -> Result<CanonicalRequest, NormalizeError> {
        SequenceNormalizer::default().normalize(&input)
    }

    fn validation_error(input: RawInput) -> ValidationError {
        match normalize(input) {
            Err(NormalizeError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn single_named_chain_round_trips_to_one_record() {
        let request = normalize(RawInput::Proteins(vec![Protein::monomer(Chain::new(
            "A", SEQ_A,
        ))]))
        .unwrap();
        assert_eq!(request.to_fasta(), format!(">A\n{}\n", SEQ_A));
    }

    #[test]
    fn multimer_joins_names_and_chains() {
        let request = normalize(RawInput::Proteins(vec![Protein::new(vec![
            Chain::new("A", SEQ_A),
            Chain::new("B", SEQ_B),
        ])]))
        .unwrap();
        let record = request.records().next().unwrap();
        assert_eq!(record.header, ">A_B");
        assert_eq!(record.sequence, format!("{}:{}", SEQ_A, SEQ_B));
    }

    #[test]
    fn unnamed_chains_get_indexed_names_and_whitespace_is_stripped() {
        let spaced = format!("  {} {}\n{}", &SEQ_A[..10], &SEQ_A[10..20], &SEQ_A[20..]);
        let request = normalize(RawInput::Proteins(vec![Protein::new(vec![
            Chain::unnamed(spaced),
            Chain::new("B", SEQ_B),
        ])]))
        .unwrap();
        assert_eq!(
            request.lines(),
            &[">Chain_0_B".to_string(), format!("{}:{}", SEQ_A, SEQ_B)]
        );
    }

    #[test]
    fn protein_without_chains_is_rejected() {
        let err = validation_error(RawInput::Proteins(vec![Protein::default()]));
        assert_eq!(err, ValidationError::EmptyProtein { index: 0 });
    }

    #[test]
    fn empty_protein_list_is_empty_input() {
        let err = validation_error(RawInput::Proteins(Vec::new()));
        assert_eq!(err, ValidationError::EmptyInput);
    }

    #[test]
    fn short_chain_is_rejected_for_every_input_shape() {
        let short = "MTANHLESPN";
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.fasta");
        fs::write(&path, format!(">x\n{}\n", short)).unwrap();

        for input in [
            RawInput::File(path.clone()),
            RawInput::Text(short.to_string()),
            RawInput::Text(format!(">x\n{}", short)),
            RawInput::Proteins(vec![Protein::monomer(Chain::unnamed(short))]),
        ] {
            let err = validation_error(input);
            assert!(
                matches!(err, ValidationError::ChainTooShort { length: 10, .. }),
                "unexpected error: {:?}",
                err
            );
        }
    }

    #[test]
    fn invalid_characters_are_named_exactly() {
        let err = validation_error(RawInput::Proteins(vec![Protein::monomer(Chain::new(
            "A",
            format!("{}-{}", SEQ_A, "7"),
        ))]));
        assert_eq!(
            err,
            ValidationError::InvalidAlphabet {
                chain: "A".into(),
                offending: ['-', '7'].into_iter().collect(),
            }
        );
    }

    #[test]
    fn untagged_text_is_auto_numbered_from_zero() {
        let text = format!("\n{}\n\n{}:{}\n", SEQ_A, SEQ_A, SEQ_B);
        let request = normalize(RawInput::Text(text)).unwrap();
        assert_eq!(
            request.to_fasta(),
            format!(
                ">sequence_0\n{}\n>sequence_1\n{}:{}\n",
                SEQ_A, SEQ_A, SEQ_B
            )
        );
    }

    #[test]
    fn untagged_text_with_internal_space_is_ambiguous() {
        let text = format!("{}\n{} {}", SEQ_A, SEQ_A, SEQ_B);
        let err = validation_error(RawInput::Text(text));
        assert!(matches!(
            err,
            ValidationError::AmbiguousSpacing { line_number: 2, .. }
        ));
    }

    #[test]
    fn tagged_text_passes_through_verbatim() {
        let text = format!(">First protein\n{}\n\n>pair\n{}:{}\n", SEQ_A, SEQ_A, SEQ_B);
        let request = normalize(RawInput::Text(text)).unwrap();
        assert_eq!(
            request.lines(),
            &[
                ">First protein".to_string(),
                SEQ_A.to_string(),
                ">pair".to_string(),
                format!("{}:{}", SEQ_A, SEQ_B),
            ]
        );
    }

    #[test]
    fn tagged_text_with_odd_line_count_is_unpaired() {
        let text = format!(">a\n{}\n>b", SEQ_A);
        let err = validation_error(RawInput::Text(text));
        assert_eq!(err, ValidationError::UnpairedLine { line_count: 3 });
    }

    #[test]
    fn tagged_text_with_consecutive_headers_is_misaligned() {
        let text = format!(">a\n>b\n{}\n{}", SEQ_A, SEQ_B);
        let err = validation_error(RawInput::Text(text));
        assert_eq!(
            err,
            ValidationError::MisalignedRecord {
                line_number: 2,
                line: ">b".into()
            }
        );
    }

    #[test]
    fn blank_text_is_empty_input() {
        let err = validation_error(RawInput::Text(" \n\n\t\n".to_string()));
        assert_eq!(err, ValidationError::EmptyInput);
    }

    #[test]
    fn file_input_drops_blank_lines_and_strips_internal_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.fasta");
        fs::write(
            &path,
            format!(
                "\n>one\n{} {}\n\n>two  \n{}\t:{}\n",
                &SEQ_A[..5],
                &SEQ_A[5..],
                SEQ_A,
                SEQ_B
            ),
        )
        .unwrap();

        let request = normalize(RawInput::File(path)).unwrap();
        assert_eq!(
            request.to_fasta(),
            format!(">one\n{}\n>two\n{}:{}\n", SEQ_A, SEQ_A, SEQ_B)
        );
    }

    #[test]
    fn file_input_with_unpaired_line_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.fasta");
        fs::write(&path, format!(">one\n{}\n{}\n", SEQ_A, SEQ_B)).unwrap();

        let err = validation_error(RawInput::File(path));
        assert_eq!(err, ValidationError::UnpairedLine { line_count: 3 });
    }

    #[test]
    fn file_input_without_headers_is_misaligned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.fasta");
        fs::write(&path, format!("{}\n{}\n", SEQ_A, SEQ_B)).unwrap();

        let err = validation_error(RawInput::File(path));
        assert_eq!(
            err,
            ValidationError::MisalignedRecord {
                line_number: 1,
                line: SEQ_A.into()
            }
        );
    }

    #[test]
    fn missing_file_surfaces_io_error_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.fasta");
        let err = normalize(RawInput::File(path.clone())).unwrap_err();
        match err {
            NormalizeError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn custom_policy_minimum_length_is_honoured() {
        let normalizer = SequenceNormalizer::new(NormalizationPolicy {
            min_chain_length: 3,
            ..Default::default()
        });
        let request = normalizer
            .normalize(&RawInput::Text("MTA".to_string()))
            .unwrap();
        assert_eq!(request.to_fasta(), ">sequence_0\nMTA\n");
    }
}
