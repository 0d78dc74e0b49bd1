use super::residue_alignment::ResidueMapping;
use crate::core::models::contact::{Contact, ContactSet};
use crate::core::models::structure::StructureResidue;
use crate::engine::config::ContactConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use tracing::{debug, info, instrument};

/// Finds residue pairs whose closest heavy atoms lie strictly within the
/// configured cutoff and reports them as alignment-column contacts.
///
/// `residues` are the selected chains in file order; their positions in the
/// slice are the physical indices used by `mapping`. Physically adjacent
/// residues never form a contact.
#[instrument(skip_all, name = "contact_map_task")]
pub fn run(
    residues: &[&StructureResidue],
    mapping: &ResidueMapping,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> ContactSet {
    info!(
        residues = residues.len(),
        cutoff = config.distance_cutoff,
        "Building contact map."
    );

    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut owners: Vec<usize> = Vec::new();
    let mut unresolved = 0usize;
    for (index, residue) in residues.iter().enumerate() {
        if mapping.column(index).is_none() {
            continue;
        }
        if !residue.has_coordinates() {
            unresolved += 1;
            continue;
        }
        for atom in residue.heavy_atoms() {
            positions.push([atom.position.x, atom.position.y, atom.position.z]);
            owners.push(index);
        }
    }

    if unresolved > 0 {
        debug!(unresolved, "Skipping residues without heavy-atom coordinates.");
        reporter.report(Progress::Message(format!(
            "{} aligned residue(s) have no heavy-atom coordinates and were skipped",
            unresolved
        )));
    }

    let mut contacts = ContactSet::new();
    if positions.is_empty() {
        debug!("No residues with heavy-atom coordinates; contact map is empty.");
        return contacts;
    }

    // Coincident and coplanar atoms are common (placeholder coordinates, flat models).
    let kdtree: ImmutableKdTree<f64, 3> = ImmutableKdTree::new_from_slice(&positions);
    let cutoff_sq = config.distance_cutoff * config.distance_cutoff;

    reporter.report(Progress::TaskStart {
        total_steps: positions.len() as u64,
    });
    for (query, &owner) in positions.iter().zip(&owners) {
        for neighbour in kdtree.within_unsorted::<SquaredEuclidean>(query, cutoff_sq) {
            if neighbour.distance >= cutoff_sq {
                continue;
            }
            let other = owners[neighbour.item as usize];
            if other <= owner + 1 {
                continue;
            }
            let (Some(a), Some(b)) = (mapping.column(owner), mapping.column(other)) else {
                continue;
            };
            if let Some(contact) = Contact::new(a, b) {
                contacts.insert(contact);
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    info!(contacts = contacts.len(), "Contact map complete.");
    contacts
}
