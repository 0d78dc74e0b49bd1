use super::energy_tensor::EnergyTensor;
use crate::core::models::library::RasppResult;
use crate::core::models::parent::ParentSet;
use crate::engine::breakpoints::Breakpoints;
use crate::engine::config::RasppConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tables::{DiversityTable, EnergyTable};
use tracing::{debug, info, instrument};

const PROGRESS_BATCH: u64 = 4096;

/// Lazily evaluates every valid crossover placement against precomputed tables.
pub struct RasppResults<'a> {
    breakpoints: Breakpoints,
    energy: &'a EnergyTable,
    diversity: &'a DiversityTable,
}

impl<'a> RasppResults<'a> {
    pub fn new(
        energy: &'a EnergyTable,
        diversity: &'a DiversityTable,
        num_crossovers: usize,
        min_fragment_length: usize,
    ) -> Self {
        Self {
            breakpoints: Breakpoints::new(energy.length(), num_crossovers, min_fragment_length),
            energy,
            diversity,
        }
    }

    pub fn candidate_count(&self) -> u128 {
        self.breakpoints.candidate_count()
    }
}

impl Iterator for RasppResults<'_> {
    type Item = RasppResult;

    fn next(&mut self) -> Option<RasppResult> {
        let crossovers = self.breakpoints.advance()?;
        Some(RasppResult {
            average_energy: self.energy.disrupted(crossovers),
            average_mutations: self.diversity.average_mutations(crossovers),
            crossovers: crossovers.to_vec(),
        })
    }
}

/// Evaluates ⟨E⟩ and ⟨m⟩ for every placement of `num_crossovers` crossovers
/// over the collapsed parents.
///
/// Crossovers in the results are collapsed indices. An empty list means no
/// placement satisfies the minimum fragment length.
#[instrument(skip_all, name = "raspp_task")]
pub fn run(
    parents: &ParentSet,
    tensor: &EnergyTensor,
    config: &RasppConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<RasppResult>, EngineError> {
    if tensor.num_parents() != parents.len() {
        return Err(EngineError::MalformedInput(format!(
            "energy tensor covers {} parents, expected {}",
            tensor.num_parents(),
            parents.len()
        )));
    }

    let length = parents.sequence_length();
    let energy = EnergyTable::new(length, tensor.averaged_contacts());
    let diversity = DiversityTable::new(parents);
    let results = RasppResults::new(
        &energy,
        &diversity,
        config.num_crossovers,
        config.min_fragment_length,
    );
    let candidates = results.candidate_count();
    info!(
        length,
        crossovers = config.num_crossovers,
        min_fragment_length = config.min_fragment_length,
        candidates = %candidates,
        total_energy = energy.total(),
        "Enumerating crossover placements."
    );

    reporter.report(Progress::TaskStart {
        total_steps: u64::try_from(candidates).unwrap_or(u64::MAX),
    });
    let mut collected = Vec::with_capacity(usize::try_from(candidates).unwrap_or(0).min(1 << 20));
    let mut pending = 0u64;
    for result in results {
        collected.push(result);
        pending += 1;
        if pending == PROGRESS_BATCH {
            reporter.report(Progress::TaskAdvance { steps: pending });
            pending = 0;
        }
    }
    if pending > 0 {
        reporter.report(Progress::TaskAdvance { steps: pending });
    }
    reporter.report(Progress::TaskFinish);

    debug!(results = collected.len(), "RASPP enumeration complete.");
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::contact::Contact;
    use crate::core::models::parent::Parent;
    use crate::core::scoring::SchemaScorer;
    use crate::engine::config::RasppConfigBuilder;
    use crate::engine::tasks::collapse::RemappedContact;
    use crate::engine::tasks::energy_tensor;
    use std::sync::Mutex;

    fn parents(rows: &[&str]) -> ParentSet {
        ParentSet::new(
            rows.iter()
                .enumerate()
                .map(|(i, row)| Parent::new(format!("p{i}"), row))
                .collect(),
        )
        .unwrap()
    }

    fn contact(i: usize, j: usize) -> RemappedContact {
        RemappedContact {
            i,
            j,
            original: Contact::new(i, j).unwrap(),
        }
    }

    #[test]
    fn every_candidate_is_evaluated_once() {
        let set = parents(&["ACDEFGHIKL", "TCNEFWHIRL", "ACDQFGYIKM"]);
        let tensor = energy_tensor::run(
            &set,
            &[contact(0, 5), contact(2, 8)],
            &SchemaScorer,
            &ProgressReporter::new(),
        )
        .unwrap();
        let config = RasppConfigBuilder::new()
            .num_crossovers(2)
            .min_fragment_length(2)
            .build()
            .unwrap();

        let advanced = Mutex::new(0u64);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskAdvance { steps } = event {
                *advanced.lock().unwrap() += steps;
            }
        }));
        let results = run(&set, &tensor, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(results.len(), 15);
        assert_eq!(advanced.into_inner().unwrap(), 15);
        for result in &results {
            assert!(result.average_energy >= 0.0);
            assert!(result.average_mutations >= 0.0);
            assert_eq!(result.crossovers.len(), 2);
        }
    }

    #[test]
    fn energy_counts_contacts_split_by_crossovers() {
        let set = parents(&["AAAAAA", "CCCCCC"]);
        let tensor = energy_tensor::run(
            &set,
            &[contact(0, 5)],
            &SchemaScorer,
            &ProgressReporter::new(),
        )
        .unwrap();
        let config = RasppConfigBuilder::new()
            .num_crossovers(1)
            .min_fragment_length(3)
            .build()
            .unwrap();

        let results = run(&set, &tensor, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].crossovers, vec![3]);
        assert!((results[0].average_energy - 1.0).abs() < 1e-12);
        // Half the chimeras are a parent; the others sit 3 mutations from the nearest one.
        assert!((results[0].average_mutations - 1.5).abs() < 1e-12);
    }

    #[test]
    fn impossible_placement_yields_empty_results() {
        let set = parents(&["ACDE", "TCNQ"]);
        let tensor =
            energy_tensor::run(&set, &[], &SchemaScorer, &ProgressReporter::new()).unwrap();
        let config = RasppConfigBuilder::new()
            .num_crossovers(3)
            .min_fragment_length(2)
            .build()
            .unwrap();
        let results = run(&set, &tensor, &config, &ProgressReporter::new()).unwrap();
        assert!(results.is_empty());
    }
}
