use crate::cli::NormalizeArgs;
use crate::config;
use crate::error::Result;
use foldrun::core::io::fasta::FastaFile;
use foldrun::core::sequence::normalizer::SequenceNormalizer;
use foldrun::workflows::fold::WorkflowError;
use tracing::info;

pub async fn run(args: NormalizeArgs) -> Result<()> {
    let policy = config::build_policy(args.config.as_deref(), &args.set_values)?;
    let input = super::load_input(&args.input)?;

    info!(kind = input.kind(), "Normalizing input with {:?}", &policy);
    let request = SequenceNormalizer::new(policy)
        .normalize(&input)
        .map_err(WorkflowError::from)?;

    FastaFile::write_to_path(&request, &args.output)?;
    println!(
        "✓ Wrote {} record(s) ({} multimer) to {}",
        request.record_count(),
        request.multimer_count(),
        args.output.display()
    );
    Ok(())
}
