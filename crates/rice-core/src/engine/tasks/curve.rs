use crate::core::models::library::{CurvePoint, RasppResult};
use crate::engine::error::EngineError;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

fn better(candidate: &RasppResult, current: &RasppResult) -> bool {
    match candidate.average_energy.total_cmp(&current.average_energy) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => candidate.crossovers < current.crossovers,
    }
}

/// Keeps the lowest-energy result in every `bin_width`-wide diversity bin.
///
/// Ties on energy go to the lexicographically smallest crossover tuple. Bins
/// are returned in ascending order.
#[instrument(skip_all, name = "curve_task")]
pub fn extract(results: &[RasppResult], bin_width: f64) -> Result<Vec<CurvePoint>, EngineError> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        return Err(EngineError::MalformedInput(format!(
            "bin width must be a positive number, got {}",
            bin_width
        )));
    }

    let mut best: BTreeMap<i64, &RasppResult> = BTreeMap::new();
    for result in results {
        if !result.average_mutations.is_finite() || !result.average_energy.is_finite() {
            return Err(EngineError::MalformedInput(format!(
                "non-finite result for crossovers {:?}",
                result.crossovers
            )));
        }
        let key = (result.average_mutations / bin_width).floor() as i64;
        best.entry(key)
            .and_modify(|current| {
                if better(result, current) {
                    *current = result;
                }
            })
            .or_insert(result);
    }

    let curve: Vec<CurvePoint> = best
        .into_iter()
        .map(|(key, result)| CurvePoint::from((key as f64 * bin_width, result.clone())))
        .collect();
    debug!(
        results = results.len(),
        points = curve.len(),
        "Extracted RASPP curve."
    );
    Ok(curve)
}

/// Drops every point matched or beaten in energy by a point of higher diversity.
///
/// The remaining points have strictly increasing energy along increasing diversity.
pub fn pareto_frontier(curve: &[CurvePoint]) -> Vec<CurvePoint> {
    let mut ordered: Vec<&CurvePoint> = curve.iter().collect();
    ordered.sort_by(|a, b| b.average_mutations.total_cmp(&a.average_mutations));

    let mut frontier = Vec::new();
    let mut lowest = f64::INFINITY;
    for point in ordered {
        if point.average_energy < lowest {
            lowest = point.average_energy;
            frontier.push(point.clone());
        }
    }
    frontier.reverse();
    frontier
}
