use crate::core::models::contact::{Contact, ContactSet};
use crate::core::models::parent::{Parent, ParentSet};
use crate::engine::config::RasppConfig;
use crate::engine::error::EngineError;
use tracing::{debug, info, instrument};

/// A contact expressed in collapsed coordinates.
///
/// Collapsing can make `i` and `j` neighbours; `original` keeps the alignment
/// columns used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemappedContact {
    pub i: usize,
    pub j: usize,
    pub original: Contact,
}

/// Parents restricted to the columns where they differ.
#[derive(Debug, Clone)]
pub struct CollapsedParents {
    parents: ParentSet,
    index_map: Vec<usize>,          // collapsed index -> original column
    column_map: Vec<Option<usize>>, // original column -> collapsed index
}

impl CollapsedParents {
    pub fn parents(&self) -> &ParentSet {
        &self.parents
    }

    pub fn collapsed_len(&self) -> usize {
        self.index_map.len()
    }

    pub fn original_len(&self) -> usize {
        self.column_map.len()
    }

    pub fn original_column(&self, collapsed: usize) -> Option<usize> {
        self.index_map.get(collapsed).copied()
    }

    pub fn collapsed_index(&self, column: usize) -> Option<usize> {
        self.column_map.get(column).copied().flatten()
    }

    /// Translates contacts into collapsed coordinates, dropping those that
    /// touch an invariant column.
    pub fn remap_contacts(&self, contacts: &ContactSet) -> Result<Vec<RemappedContact>, EngineError> {
        if let Some(max) = contacts.max_column() {
            if max >= self.original_len() {
                return Err(EngineError::MalformedInput(format!(
                    "contact column {} lies outside the {}-column alignment",
                    max,
                    self.original_len()
                )));
            }
        }

        let remapped: Vec<RemappedContact> = contacts
            .iter()
            .filter_map(|&contact| {
                let i = self.collapsed_index(contact.i())?;
                let j = self.collapsed_index(contact.j())?;
                Some(RemappedContact {
                    i,
                    j,
                    original: contact,
                })
            })
            .collect();
        debug!(
            kept = remapped.len(),
            dropped = contacts.len() - remapped.len(),
            "Remapped contacts to collapsed coordinates."
        );
        Ok(remapped)
    }

    /// Maps collapsed crossover positions to the original columns that start each fragment.
    pub fn to_original_breakpoints(&self, breakpoints: &[usize]) -> Vec<usize> {
        breakpoints
            .iter()
            .map(|&b| self.index_map.get(b).copied().unwrap_or(self.original_len()))
            .collect()
    }
}

/// Removes every column at which all parents agree.
///
/// Fails before any energy work when the remaining columns cannot hold the
/// requested fragments.
#[instrument(skip_all, name = "collapse_task")]
pub fn run(parents: &ParentSet, config: &RasppConfig) -> Result<CollapsedParents, EngineError> {
    let length = parents.sequence_length();
    let index_map: Vec<usize> = (0..length).filter(|&c| !parents.is_invariant(c)).collect();
    let collapsed_len = index_map.len();
    info!(
        original = length,
        collapsed = collapsed_len,
        "Collapsed invariant alignment columns."
    );

    let num_fragments = config.num_fragments();
    let min_fragment_length = config.min_fragment_length.max(1);
    if collapsed_len < num_fragments.saturating_mul(min_fragment_length) {
        return Err(EngineError::InsufficientLength {
            collapsed_len,
            num_fragments,
            min_fragment_length: config.min_fragment_length,
        });
    }

    let mut column_map = vec![None; length];
    for (collapsed, &column) in index_map.iter().enumerate() {
        column_map[column] = Some(collapsed);
    }

    let reduced: Vec<Parent> = parents
        .iter()
        .map(|p| {
            Parent::from_symbols(
                p.id.clone(),
                index_map.iter().map(|&c| p.residue(c)).collect(),
            )
        })
        .collect();

    Ok(CollapsedParents {
        parents: ParentSet::new(reduced)?,
        index_map,
        column_map,
    })
}
