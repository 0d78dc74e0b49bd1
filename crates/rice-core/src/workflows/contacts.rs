use crate::core::models::contact::ContactSet;
use crate::core::models::parent::AlignedSequence;
use crate::core::models::structure::{Structure, StructureResidue};
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{contact_map, residue_alignment};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMapResult {
    pub reference_id: String,
    pub contacts: ContactSet,
    pub structure_residues: usize,
    pub mapped_residues: usize,
}

/// Builds the alignment-column contact map of the reference parent from its structure.
///
/// The reference is taken from `structure_alignment` when given, otherwise from
/// the structure's id code. Sequence checks run before any geometry is examined.
#[instrument(skip_all, name = "contacts_workflow")]
pub fn run(
    structure: &Structure,
    master: &[AlignedSequence],
    structure_alignment: Option<&[AlignedSequence]>,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ContactMapResult, EngineError> {
    // === Phase 1: Resolve the reference parent and align residues ===
    reporter.report(Progress::PhaseStart {
        name: "Aligning Structure",
    });
    let reference =
        residue_alignment::resolve_reference(master, structure_alignment, structure.id_code.as_deref())?;
    let residues: Vec<&StructureResidue> = structure.select_chains(&config.chains);
    if residues.is_empty() {
        warn!(
            requested = ?config.chains,
            available = ?structure.chain_ids(),
            "No residues on the requested chains."
        );
        return Err(EngineError::StructureMismatch {
            id: reference.reference_id.clone(),
            chains: config.chains.clone(),
        });
    }
    let sequence = structure.sequence(&config.chains);
    let mapping = residue_alignment::run(&sequence, &reference, &config.chains)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Spatial contact search ===
    reporter.report(Progress::PhaseStart {
        name: "Building Contact Map",
    });
    let contacts = contact_map::run(&residues, &mapping, config, reporter);
    reporter.report(Progress::PhaseFinish);

    info!(
        reference = %reference.reference_id,
        contacts = contacts.len(),
        "Contact workflow complete."
    );
    Ok(ContactMapResult {
        reference_id: reference.reference_id,
        contacts,
        structure_residues: residues.len(),
        mapped_residues: mapping.mapped_count(),
    })
}
