use crate::core::models::chain::Protein;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProteinFileError {
    #[error("Failed to read protein file '{path}': {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse protein file '{path}': {source}", path = .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk layout of a structured protein list:
///
/// ```toml
/// [[protein]]
/// [[protein.chain]]
/// name = "A"
/// residues = "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM"
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ProteinSet {
    #[serde(rename = "protein", default)]
    proteins: Vec<Protein>,
}

pub fn from_toml_str(content: &str) -> Result<Vec<Protein>, toml::de::Error> {
    let set: ProteinSet = toml::from_str(content)?;
    Ok(set.proteins)
}

pub fn load(path: &Path) -> Result<Vec<Protein>, ProteinFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProteinFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml_str(&content).map_err(|source| ProteinFileError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::chain::Chain;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_parses_named_and_unnamed_chains() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proteins.toml");
        fs::write(
            &path,
            r#"
            [[protein]]
            [[protein.chain]]
            name = "A"
            residues = "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM"

            [[protein]]
            [[protein.chain]]
            residues = "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM"
            [[protein.chain]]
            residues = "CDWKNNENPDEAMTANHLESPNCDWKNNRMA"
            "#,
        )
        .unwrap();

        let proteins = load(&path).unwrap();
        assert_eq!(proteins.len(), 2);
        assert_eq!(
            proteins[0],
            Protein::monomer(Chain::new("A", "MTANHLESPNCDWKNNRMAIVHMVNVTPLRM"))
        );
        assert!(proteins[1].is_multimer());
        assert_eq!(proteins[1].chains[1].name, None);
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(load(&path), Err(ProteinFileError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ProteinFileError::Io { .. })));
    }

    #[test]
    fn empty_document_yields_no_proteins() {
        assert!(from_toml_str("").unwrap().is_empty());
    }
}
