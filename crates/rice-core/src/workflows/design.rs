use crate::core::models::contact::ContactSet;
use crate::core::models::library::{CurvePoint, RasppResult};
use crate::core::models::parent::ParentSet;
use crate::core::scoring::ContactScorer;
use crate::engine::config::RasppConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{collapse, curve, energy_tensor, raspp};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct DesignResult {
    /// Every evaluated placement, with crossovers in collapsed coordinates.
    pub results: Vec<RasppResult>,
    /// Best placement per diversity bin, with crossovers in alignment columns.
    pub curve: Vec<CurvePoint>,
    pub original_len: usize,
    pub collapsed_len: usize,
    pub scored_contacts: usize,
    pub enumeration_time: Duration,
    pub curve_time: Duration,
}

impl DesignResult {
    pub fn frontier(&self) -> Vec<CurvePoint> {
        curve::pareto_frontier(&self.curve)
    }
}

/// Runs SCHEMA-RASPP with the scoring method named in `config`.
pub fn run(
    parents: &ParentSet,
    contacts: &ContactSet,
    config: &RasppConfig,
    reporter: &ProgressReporter,
) -> Result<DesignResult, EngineError> {
    let scorer = config.scoring.scorer();
    run_with_scorer(parents, contacts, config, scorer.as_ref(), reporter)
}

/// Runs SCHEMA-RASPP with a caller-supplied contact scorer.
///
/// The length check on the collapsed parents happens before any energy is computed.
#[instrument(skip_all, name = "design_workflow")]
pub fn run_with_scorer(
    parents: &ParentSet,
    contacts: &ContactSet,
    config: &RasppConfig,
    scorer: &dyn ContactScorer,
    reporter: &ProgressReporter,
) -> Result<DesignResult, EngineError> {
    info!(
        parents = parents.len(),
        columns = parents.sequence_length(),
        contacts = contacts.len(),
        crossovers = config.num_crossovers,
        "Starting library design."
    );

    // === Phase 1: Collapse invariant columns ===
    reporter.report(Progress::PhaseStart {
        name: "Collapsing Parents",
    });
    let collapsed = collapse::run(parents, config)?;
    let remapped = collapsed.remap_contacts(contacts)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Contact energies ===
    reporter.report(Progress::PhaseStart {
        name: "Scoring Contacts",
    });
    let tensor = energy_tensor::run(collapsed.parents(), &remapped, scorer, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Enumerate crossover placements ===
    reporter.report(Progress::PhaseStart {
        name: "Enumerating Crossovers",
    });
    let started = Instant::now();
    let results = raspp::run(collapsed.parents(), &tensor, config, reporter)?;
    let enumeration_time = started.elapsed();
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Bin results into the curve ===
    reporter.report(Progress::PhaseStart {
        name: "Extracting Curve",
    });
    let started = Instant::now();
    let curve = curve::extract(&results, config.bin_width)?
        .into_iter()
        .map(|point| CurvePoint {
            crossovers: collapsed.to_original_breakpoints(&point.crossovers),
            ..point
        })
        .collect::<Vec<_>>();
    let curve_time = started.elapsed();
    reporter.report(Progress::PhaseFinish);

    info!(
        results = results.len(),
        points = curve.len(),
        "Library design complete."
    );
    Ok(DesignResult {
        results,
        curve,
        original_len: collapsed.original_len(),
        collapsed_len: collapsed.collapsed_len(),
        scored_contacts: tensor.len(),
        enumeration_time,
        curve_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::contact::Contact;
    use crate::core::models::parent::Parent;
    use crate::engine::config::RasppConfigBuilder;
    use std::sync::Mutex;

    fn scenario_parents() -> ParentSet {
        ParentSet::new(vec![
            Parent::new("p1", "ACDEFGHIKL"),
            Parent::new("p2", "ACNEFWHIRL"),
            Parent::new("p3", "TCDQFGYIKM"),
        ])
        .unwrap()
    }

    fn scenario_contacts() -> ContactSet {
        [(1, 8), (3, 6)]
            .into_iter()
            .filter_map(|(i, j)| Contact::new(i, j))
            .collect()
    }

    fn config(k: usize, min: usize) -> RasppConfig {
        RasppConfigBuilder::new()
            .num_crossovers(k)
            .min_fragment_length(min)
            .bin_width(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn three_parent_library_yields_monotone_frontier() {
        let parents = scenario_parents();
        let result = run(
            &parents,
            &scenario_contacts(),
            &config(2, 2),
            &ProgressReporter::new(),
        )
        .unwrap();

        // Variable columns: 0, 2, 3, 5, 6, 8, 9.
        assert_eq!(result.collapsed_len, 7);
        assert_eq!(result.original_len, 10);
        // (1, 8) touches an invariant column; (3, 6) survives.
        assert_eq!(result.scored_contacts, 1);
        assert_eq!(result.results.len(), 3);
        assert!(!result.curve.is_empty());

        let frontier = result.frontier();
        assert!(!frontier.is_empty());
        assert!(frontier
            .windows(2)
            .all(|w| w[0].average_energy <= w[1].average_energy
                && w[0].average_mutations < w[1].average_mutations));
        assert!(result.curve.windows(2).all(|w| w[0].bin < w[1].bin));
    }

    #[test]
    fn fully_variable_library_enumerates_every_placement() {
        // Every column carries three distinct residues, so nothing collapses and
        // each contact scores 1 for every parent pair.
        let parents = ParentSet::new(vec![
            Parent::new("p1", "ACDEFGHIKL"),
            Parent::new("p2", "MNPQRSTVWY"),
            Parent::new("p3", "CDEFGHIKLA"),
        ])
        .unwrap();
        let result = run(
            &parents,
            &scenario_contacts(),
            &config(2, 2),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.original_len, 10);
        assert_eq!(result.collapsed_len, 10);
        assert_eq!(result.scored_contacts, 2);
        assert_eq!(result.results.len(), 15);

        for r in &result.results {
            let (b1, b2) = (r.crossovers[0], r.crossovers[1]);
            assert!(b1 >= 2 && b2 - b1 >= 2 && 10 - b2 >= 2);
            // (1, 8) always spans a crossover; (3, 6) stays whole only in the middle fragment.
            let expected_energy = if b1 <= 3 && b2 >= 7 { 1.0 } else { 2.0 };
            assert!(
                (r.average_energy - expected_energy).abs() < 1e-12,
                "{:?}: {}",
                r.crossovers,
                r.average_energy
            );
            let longest = b1.max(b2 - b1).max(10 - b2);
            let expected_mutations = (10 - longest) as f64 * 6.0 / 9.0;
            assert!((r.average_mutations - expected_mutations).abs() < 1e-12);
        }

        let frontier = result.frontier();
        assert!(!frontier.is_empty());
        assert!(frontier
            .windows(2)
            .all(|w| w[0].average_energy <= w[1].average_energy));
    }

    #[test]
    fn curve_crossovers_are_alignment_columns() {
        let parents = scenario_parents();
        let result = run(
            &parents,
            &scenario_contacts(),
            &config(2, 2),
            &ProgressReporter::new(),
        )
        .unwrap();
        let variable = [0usize, 2, 3, 5, 6, 8, 9];
        for point in &result.curve {
            assert_eq!(point.crossovers.len(), 2);
            assert!(point.crossovers.iter().all(|c| variable.contains(c)));
        }
        for r in &result.results {
            assert!(r.crossovers.iter().all(|&c| c < result.collapsed_len));
        }
    }

    #[test]
    fn insufficient_length_fails_before_scoring() {
        let parents = ParentSet::new(vec![
            Parent::new("p1", "ACDEFGHIKL"),
            Parent::new("p2", "ACDEFGHIKM"),
        ])
        .unwrap();
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));

        let result = run(&parents, &scenario_contacts(), &config(1, 2), &reporter);
        drop(reporter);

        assert!(matches!(
            result,
            Err(EngineError::InsufficientLength {
                collapsed_len: 1,
                num_fragments: 2,
                min_fragment_length: 2
            })
        ));
        assert_eq!(phases.into_inner().unwrap(), vec!["Collapsing Parents"]);
    }
}
