//! Contact disruption scoring.
//!
//! A [`ContactScorer`] assigns an energy to one structural contact for an
//! ordered pair of parents. The energy tensor calls it once per contact and
//! orientation; the pure functions in [`potentials`] hold the arithmetic.

pub mod potentials;

use crate::core::models::contact::Contact;
use std::fmt;

/// Strategy for scoring the disruption of a contact in a two-parent chimera.
///
/// `p_i`/`p_j` are parent p's normalized symbols at the contact's columns and
/// `q_i`/`q_j` parent q's. Implementations must return finite, non-negative values.
pub trait ContactScorer: Send + Sync + fmt::Debug {
    fn score(&self, contact: &Contact, p_i: u8, p_j: u8, q_i: u8, q_j: u8) -> f64;

    fn name(&self) -> &'static str;
}

/// Classical SCHEMA contact breakage (1 per broken contact).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchemaScorer;

impl ContactScorer for SchemaScorer {
    #[inline]
    fn score(&self, _contact: &Contact, p_i: u8, p_j: u8, q_i: u8, q_j: u8) -> f64 {
        potentials::schema_disruption(p_i, p_j, q_i, q_j)
    }

    fn name(&self) -> &'static str {
        "schema"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MismatchScorer {
    pub weight: f64,
}

impl Default for MismatchScorer {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl ContactScorer for MismatchScorer {
    #[inline]
    fn score(&self, _contact: &Contact, p_i: u8, p_j: u8, q_i: u8, q_j: u8) -> f64 {
        potentials::pair_mismatch(p_i, p_j, q_i, q_j, self.weight)
    }

    fn name(&self) -> &'static str {
        "mismatch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::parent::GAP;

    #[test]
    fn scorers_are_zero_for_identical_parents() {
        let contact = Contact::new(0, 5).unwrap();
        let scorers: Vec<Box<dyn ContactScorer>> =
            vec![Box::new(SchemaScorer), Box::new(MismatchScorer::default())];
        for scorer in &scorers {
            assert_eq!(scorer.score(&contact, b'K', b'E', b'K', b'E'), 0.0);
        }
    }

    #[test]
    fn schema_scorer_gap_handling_depends_on_orientation() {
        let contact = Contact::new(0, 5).unwrap();
        let forward = SchemaScorer.score(&contact, b'A', GAP, b'E', b'D');
        let reverse = SchemaScorer.score(&contact, b'E', b'D', b'A', GAP);
        assert_eq!(forward, 1.0);
        assert_eq!(reverse, 0.0);
    }
}
