use super::collapse::RemappedContact;
use crate::core::models::parent::ParentSet;
use crate::core::scoring::ContactScorer;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Disruption energy per contact and ordered parent pair.
///
/// Self-pairs are never scored and read as zero.
#[derive(Debug, Clone)]
pub struct EnergyTensor {
    num_parents: usize,
    contacts: Vec<RemappedContact>,
    entries: Vec<f64>, // [contact][p][q]
}

impl EnergyTensor {
    pub fn num_parents(&self) -> usize {
        self.num_parents
    }

    pub fn contacts(&self) -> &[RemappedContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    #[inline]
    pub fn energy(&self, contact: usize, p: usize, q: usize) -> f64 {
        let n = self.num_parents;
        self.entries[contact * n * n + p * n + q]
    }

    /// Mean over unordered parent pairs of the orientation-averaged energy.
    pub fn average(&self, contact: usize) -> f64 {
        let (sum, pairs) = (0..self.num_parents)
            .tuple_combinations()
            .fold((0.0, 0usize), |(sum, pairs), (p, q)| {
                let both = (self.energy(contact, p, q) + self.energy(contact, q, p)) / 2.0;
                (sum + both, pairs + 1)
            });
        if pairs == 0 { 0.0 } else { sum / pairs as f64 }
    }

    /// `(i, j, average energy)` for every contact, in collapsed coordinates.
    pub fn averaged_contacts(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.contacts
            .iter()
            .enumerate()
            .map(|(k, c)| (c.i, c.j, self.average(k)))
    }
}

#[instrument(skip_all, name = "energy_tensor_task")]
pub fn run(
    parents: &ParentSet,
    contacts: &[RemappedContact],
    scorer: &dyn ContactScorer,
    reporter: &ProgressReporter,
) -> Result<EnergyTensor, EngineError> {
    let n = parents.len();
    info!(
        contacts = contacts.len(),
        parents = n,
        scorer = scorer.name(),
        "Building contact energy tensor."
    );

    let mut entries = vec![0.0; contacts.len() * n * n];
    reporter.report(Progress::TaskStart {
        total_steps: contacts.len() as u64,
    });
    for (k, contact) in contacts.iter().enumerate() {
        for (p, q) in (0..n).cartesian_product(0..n).filter(|(p, q)| p != q) {
            let (pp, pq) = (parents.parents()[p].sequence(), parents.parents()[q].sequence());
            let value = scorer.score(
                &contact.original,
                pp[contact.i],
                pp[contact.j],
                pq[contact.i],
                pq[contact.j],
            );
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::MalformedInput(format!(
                    "scorer '{}' returned {} for contact {} and parents ({}, {})",
                    scorer.name(),
                    value,
                    contact.original,
                    parents.parents()[p].id,
                    parents.parents()[q].id
                )));
            }
            entries[k * n * n + p * n + q] = value;
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let tensor = EnergyTensor {
        num_parents: n,
        contacts: contacts.to_vec(),
        entries,
    };
    debug!(
        total_average = tensor.averaged_contacts().map(|(_, _, e)| e).sum::<f64>(),
        "Energy tensor complete."
    );
    Ok(tensor)
}
