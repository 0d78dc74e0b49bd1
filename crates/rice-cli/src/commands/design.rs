use crate::cli::DesignArgs;
use crate::commands::{compute_contacts, read_records, write_records};
use crate::config::PartialDesignConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ricepp::{
    core::io::{
        aln::AlnFile,
        contacts::ContactFile,
        report::{CurveReport, ReportFile},
    },
    core::models::parent::ParentSet,
    engine::{error::EngineError, progress::ProgressReporter},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: DesignArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialDesignConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let raspp_config = partial_config.merge_raspp(&args)?;

    let master = read_records::<AlnFile>(&args.msa)?;
    let parents = ParentSet::from_alignment(&master).map_err(EngineError::from)?;
    info!(
        "Loaded {} parents over {} alignment columns.",
        parents.len(),
        parents.sequence_length()
    );

    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let contacts = match (&args.contacts, &args.pdb) {
        (Some(path), _) => read_records::<ContactFile>(path)?,
        (None, Some(pdb)) => {
            let contact_config = partial_config.merge_contacts(&args.structure)?;
            let result =
                compute_contacts(pdb, &master, &args.structure, &contact_config, &reporter)?;
            if let Some(path) = &args.contacts_out {
                write_records::<ContactFile>(&result.contacts, Some(path))?;
            }
            result.contacts
        }
        (None, None) => {
            return Err(CliError::Argument(
                "either --pdb or --contacts must be given".to_string(),
            ));
        }
    };
    if contacts.is_empty() {
        warn!("No contacts available; every crossover placement will score zero.");
    }

    let design = workflows::design::run(&parents, &contacts, &raspp_config, &reporter)?;
    info!(
        "Design finished: {} placements over {} variable columns, {} curve points.",
        design.results.len(),
        design.collapsed_len,
        design.curve.len()
    );

    let points = if args.frontier {
        design.frontier()
    } else {
        design.curve.clone()
    };
    let report = CurveReport {
        min_fragment_length: raspp_config.min_fragment_length,
        bin_width: raspp_config.bin_width,
        num_crossovers: raspp_config.num_crossovers,
        num_results: design.results.len(),
        enumeration_time: design.enumeration_time,
        curve_time: design.curve_time,
        points,
    };
    write_records::<ReportFile>(&report, args.output.as_deref())
}
