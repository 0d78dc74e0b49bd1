use crate::core::models::parent::{AlignedSequence, is_gap, strip_gaps};
use crate::engine::error::EngineError;
use tracing::{debug, info, instrument};

/// Rows needed to place structure residues on master-alignment columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRows {
    pub reference_id: String,
    /// The reference parent's row in the master alignment.
    pub master_row: String,
    /// `(reference row, structure row)` of the structure/parent alignment, when one was given.
    pub pairwise: Option<(String, String)>,
}

/// Physical residue index (selected chains, file order) to master-alignment column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueMapping {
    columns: Vec<Option<usize>>,
}

impl ResidueMapping {
    pub fn column(&self, residue_index: usize) -> Option<usize> {
        self.columns.get(residue_index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.columns.iter().copied()
    }

    pub fn mapped_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }
}

/// Picks the reference parent and the rows that align it to the structure.
///
/// Without a structure alignment the structure's own id code names the
/// reference. With one, its rows are de-duplicated by id, the reference is the
/// last master id it contains and the structure row is the first other row.
pub fn resolve_reference(
    master: &[AlignedSequence],
    structure_alignment: Option<&[AlignedSequence]>,
    structure_id: Option<&str>,
) -> Result<ReferenceRows, EngineError> {
    let Some(rows) = structure_alignment else {
        let id = structure_id.ok_or_else(|| EngineError::MissingReference {
            id: "(no HEADER id code)".to_string(),
            location: "structure file",
        })?;
        let master_row = master.iter().find(|r| r.id == id).ok_or_else(|| {
            EngineError::MissingReference {
                id: id.to_string(),
                location: "multiple sequence alignment",
            }
        })?;
        return Ok(ReferenceRows {
            reference_id: id.to_string(),
            master_row: master_row.sequence.clone(),
            pairwise: None,
        });
    };

    let mut distinct: Vec<(&str, &str)> = Vec::new();
    for row in rows {
        match distinct.iter_mut().find(|(id, _)| *id == row.id) {
            Some(entry) => entry.1 = row.sequence.as_str(),
            None => distinct.push((row.id.as_str(), row.sequence.as_str())),
        }
    }
    if distinct.len() < 2 {
        return Err(EngineError::AmbiguousOrInsufficientAlignment {
            found: distinct.len(),
        });
    }

    let master_row = master
        .iter()
        .rev()
        .find(|m| distinct.iter().any(|(id, _)| *id == m.id))
        .ok_or_else(|| EngineError::MissingReference {
            id: distinct.iter().map(|(id, _)| *id).collect::<Vec<_>>().join(", "),
            location: "multiple sequence alignment",
        })?;

    let reference_row = distinct
        .iter()
        .find(|(id, _)| *id == master_row.id)
        .map(|(_, seq)| seq.to_string())
        .unwrap_or_default();
    let structure_row = distinct
        .iter()
        .find(|(id, _)| *id != master_row.id)
        .map(|(_, seq)| seq.to_string())
        .unwrap_or_default();

    Ok(ReferenceRows {
        reference_id: master_row.id.clone(),
        master_row: master_row.sequence.clone(),
        pairwise: Some((reference_row, structure_row)),
    })
}

/// Maps every residue of `structure_sequence` onto a master-alignment column.
///
/// Residues aligned against a gap in the reference parent get no column.
#[instrument(skip_all, name = "residue_alignment_task")]
pub fn run(
    structure_sequence: &str,
    reference: &ReferenceRows,
    chains: &[char],
) -> Result<ResidueMapping, EngineError> {
    let (parent_row, structure_row) = match &reference.pairwise {
        Some((parent_row, structure_row)) => (parent_row.as_str(), structure_row.as_str()),
        None => (reference.master_row.as_str(), reference.master_row.as_str()),
    };
    info!(
        reference = %reference.reference_id,
        residues = structure_sequence.len(),
        pairwise = reference.pairwise.is_some(),
        "Aligning structure residues to alignment columns."
    );

    if parent_row.len() != structure_row.len() {
        return Err(EngineError::MalformedInput(format!(
            "structure alignment rows differ in length ({} vs {})",
            parent_row.len(),
            structure_row.len()
        )));
    }
    if strip_gaps(parent_row) != strip_gaps(&reference.master_row) {
        return Err(EngineError::ParentMismatch {
            id: reference.reference_id.clone(),
        });
    }
    if strip_gaps(structure_row) != structure_sequence.to_ascii_uppercase() {
        return Err(EngineError::StructureMismatch {
            id: reference.reference_id.clone(),
            chains: chains.to_vec(),
        });
    }

    let master_columns: Vec<usize> = reference
        .master_row
        .bytes()
        .enumerate()
        .filter(|&(_, b)| !is_gap(b))
        .map(|(column, _)| column)
        .collect();

    let mut columns = Vec::with_capacity(structure_sequence.len());
    let mut parent_residue = 0usize;
    for (p, s) in parent_row.bytes().zip(structure_row.bytes()) {
        match (is_gap(p), is_gap(s)) {
            (false, false) => columns.push(master_columns.get(parent_residue).copied()),
            (true, false) => columns.push(None),
            _ => {}
        }
        if !is_gap(p) {
            parent_residue += 1;
        }
    }

    let mapping = ResidueMapping { columns };
    debug!(
        mapped = mapping.mapped_count(),
        unmapped = mapping.len() - mapping.mapped_count(),
        "Residue mapping complete."
    );
    Ok(mapping)
}
