use std::fmt;
use thiserror::Error;

/// Canonical gap symbol used after normalization.
pub const GAP: u8 = b'-';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParentSetError {
    #[error("At least two parents are required, found {0}")]
    TooFewParents(usize),
    #[error("Parent '{id}' has length {found}, expected {expected}")]
    LengthMismatch {
        id: String,
        expected: usize,
        found: usize,
    },
    #[error("Parent '{0}' is empty")]
    EmptySequence(String),
}

/// Maps every gap representation to [`GAP`] and upper-cases residue letters.
#[inline]
pub fn normalize_symbol(symbol: u8) -> u8 {
    match symbol {
        b'-' | b'.' | b'~' => GAP,
        other => other.to_ascii_uppercase(),
    }
}

#[inline]
pub fn is_gap(symbol: u8) -> bool {
    normalize_symbol(symbol) == GAP
}

/// Returns the residues of an aligned sequence with every gap removed.
pub fn strip_gaps(aligned: &str) -> String {
    aligned
        .bytes()
        .filter(|&b| !is_gap(b))
        .map(|b| b.to_ascii_uppercase() as char)
        .collect()
}

/// A single row of a sequence alignment, exactly as read from file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub id: String,
    pub sequence: String,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    pub fn ungapped(&self) -> String {
        strip_gaps(&self.sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub id: String,
    sequence: Vec<u8>, // Normalized symbols, one per alignment column
}

impl Parent {
    pub fn new(id: impl Into<String>, aligned: &str) -> Self {
        Self {
            id: id.into(),
            sequence: aligned.bytes().map(normalize_symbol).collect(),
        }
    }

    pub(crate) fn from_symbols(id: String, sequence: Vec<u8>) -> Self {
        Self { id, sequence }
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[inline]
    pub fn residue(&self, column: usize) -> u8 {
        self.sequence[column]
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, String::from_utf8_lossy(&self.sequence))
    }
}

/// The aligned parents of a recombination library.
///
/// Every parent has the same length, so a column index addresses the same
/// alignment position in all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSet {
    parents: Vec<Parent>,
    length: usize,
}

impl ParentSet {
    pub fn new(parents: Vec<Parent>) -> Result<Self, ParentSetError> {
        if parents.len() < 2 {
            return Err(ParentSetError::TooFewParents(parents.len()));
        }
        let length = parents[0].len();
        if length == 0 {
            return Err(ParentSetError::EmptySequence(parents[0].id.clone()));
        }
        if let Some(bad) = parents.iter().find(|p| p.len() != length) {
            return Err(ParentSetError::LengthMismatch {
                id: bad.id.clone(),
                expected: length,
                found: bad.len(),
            });
        }
        Ok(Self { parents, length })
    }

    /// Builds the parent set from alignment rows, preserving file order.
    pub fn from_alignment(rows: &[AlignedSequence]) -> Result<Self, ParentSetError> {
        Self::new(
            rows.iter()
                .map(|row| Parent::new(row.id.clone(), &row.sequence))
                .collect(),
        )
    }

    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parent> {
        self.parents.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Parent> {
        self.parents.get(index)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Parent> {
        self.parents.iter().find(|p| p.id == id)
    }

    /// Number of parents.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Number of alignment columns shared by every parent.
    pub fn sequence_length(&self) -> usize {
        self.length
    }

    /// True when every parent carries the same symbol at `column`.
    pub fn is_invariant(&self, column: usize) -> bool {
        let first = self.parents[0].residue(column);
        self.parents[1..].iter().all(|p| p.residue(column) == first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_symbol_unifies_gap_representations() {
        assert_eq!(normalize_symbol(b'.'), GAP);
        assert_eq!(normalize_symbol(b'~'), GAP);
        assert_eq!(normalize_symbol(b'-'), GAP);
        assert_eq!(normalize_symbol(b'a'), b'A');
    }

    #[test]
    fn strip_gaps_removes_every_gap_kind() {
        assert_eq!(strip_gaps("A-c.D~"), "ACD");
    }

    #[test]
    fn parent_set_rejects_unequal_lengths() {
        let result = ParentSet::new(vec![Parent::new("p1", "ACDE"), Parent::new("p2", "ACD")]);
        assert_eq!(
            result,
            Err(ParentSetError::LengthMismatch {
                id: "p2".to_string(),
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn parent_set_requires_two_parents() {
        let result = ParentSet::new(vec![Parent::new("p1", "ACDE")]);
        assert_eq!(result, Err(ParentSetError::TooFewParents(1)));
    }

    #[test]
    fn is_invariant_treats_gap_spellings_as_equal() {
        let set = ParentSet::new(vec![Parent::new("p1", "A-C"), Parent::new("p2", "A.D")]).unwrap();
        assert!(set.is_invariant(0));
        assert!(set.is_invariant(1));
        assert!(!set.is_invariant(2));
    }

    #[test]
    fn from_alignment_preserves_order_and_ids() {
        let rows = vec![
            AlignedSequence::new("first", "AC"),
            AlignedSequence::new("second", "AD"),
        ];
        let set = ParentSet::from_alignment(&rows).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.sequence_length(), 2);
        assert_eq!(set.get(0).unwrap().id, "first");
        assert_eq!(set.get_by_id("second").unwrap().sequence(), b"AD");
    }
}
