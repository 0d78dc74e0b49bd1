pub mod contacts;
pub mod design;

use crate::cli::StructureArgs;
use crate::error::{CliError, Result};
use ricepp::{
    core::io::{
        aln::AlnFile,
        pdb::PdbFile,
        traits::{RecordReader, RecordWriter},
    },
    core::models::parent::AlignedSequence,
    engine::{config::ContactConfig, progress::ProgressReporter},
    workflows::{self, contacts::ContactMapResult},
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads `path` with the given format, reporting failures against the file.
pub(crate) fn read_records<R>(path: &Path) -> Result<R::Output>
where
    R: RecordReader,
    R::Error: Send + Sync + 'static,
{
    info!("Reading {:?}", path);
    R::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Writes `input` to `path`, or to standard output when no path is given.
pub(crate) fn write_records<W>(input: &W::Input, path: Option<&Path>) -> Result<()>
where
    W: RecordWriter,
    W::Error: Send + Sync + 'static,
{
    match path {
        Some(path) => {
            info!("Writing {:?}", path);
            W::write_to_path(input, path).map_err(|e| CliError::FileWriting {
                path: path.to_path_buf(),
                source: e.into(),
            })
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let stdout_path = || PathBuf::from("<stdout>");
            W::write_to(input, &mut lock).map_err(|e| CliError::FileWriting {
                path: stdout_path(),
                source: e.into(),
            })?;
            lock.flush().map_err(|e| CliError::FileWriting {
                path: stdout_path(),
                source: e.into(),
            })
        }
    }
}

/// Loads the reference structure (and optional pairwise alignment) and maps its
/// contacts onto the columns of `master`.
pub(crate) fn compute_contacts(
    pdb: &Path,
    master: &[AlignedSequence],
    structure: &StructureArgs,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ContactMapResult> {
    let model = read_records::<PdbFile>(pdb)?;
    let pairwise = match &structure.pdbal {
        Some(path) => Some(read_records::<AlnFile>(path)?),
        None => None,
    };

    let result =
        workflows::contacts::run(&model, master, pairwise.as_deref(), config, reporter)?;
    info!(
        "Reference '{}': {} of {} structure residues aligned, {} contacts.",
        result.reference_id,
        result.mapped_residues,
        result.structure_residues,
        result.contacts.len()
    );
    Ok(result)
}
