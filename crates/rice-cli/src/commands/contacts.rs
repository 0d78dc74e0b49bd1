use crate::cli::ContactsArgs;
use crate::commands::{compute_contacts, read_records, write_records};
use crate::config::PartialDesignConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ricepp::{
    core::io::{aln::AlnFile, contacts::ContactFile},
    engine::progress::ProgressReporter,
};
use tracing::info;

pub fn run(args: ContactsArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialDesignConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_contacts(&args.structure)?;

    let master = read_records::<AlnFile>(&args.msa)?;

    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = compute_contacts(&args.pdb, &master, &args.structure, &config, &reporter)?;
    write_records::<ContactFile>(&result.contacts, args.output.as_deref())?;

    if let Some(path) = &args.output {
        info!(
            "{} contacts of '{}' written to {:?}",
            result.contacts.len(),
            result.reference_id,
            path
        );
    }
    Ok(())
}
