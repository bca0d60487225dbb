pub mod data;
pub mod normalize;
pub mod predict;

use crate::cli::InputSource;
use crate::error::{CliError, Result};
use foldrun::core::io::proteins;
use foldrun::core::models::input::RawInput;
use tracing::info;

/// Converts the single selected input source into the library's raw input.
pub(crate) fn load_input(source: &InputSource) -> Result<RawInput> {
    if let Some(path) = &source.fasta {
        if !path.is_file() {
            return Err(CliError::Argument(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }
        info!("Reading sequences from {:?}", path);
        return Ok(RawInput::File(path.clone()));
    }
    if let Some(text) = &source.sequence {
        return Ok(RawInput::Text(text.clone()));
    }
    if let Some(path) = &source.proteins {
        info!("Loading protein definitions from {:?}", path);
        let proteins = proteins::load(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        return Ok(RawInput::Proteins(proteins));
    }
    Err(CliError::Argument(
        "One of --fasta, --sequence or --proteins is required.".to_string(),
    ))
}
