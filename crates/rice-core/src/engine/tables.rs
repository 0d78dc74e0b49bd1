use super::breakpoints::fragments;
use crate::core::models::parent::ParentSet;
use std::collections::HashMap;

/// Cumulative contact energies over a collapsed sequence.
///
/// `within(s, e)` is the summed energy of every contact `(i, j)` with
/// `s <= i` and `j < e`, so the energy a crossover placement breaks is the
/// total minus the energy kept inside each fragment.
#[derive(Debug, Clone)]
pub struct EnergyTable {
    length: usize,
    within: Vec<f64>, // (length + 1)^2, row = start, column = end
    total: f64,
}

impl EnergyTable {
    /// Builds the table from `(i, j, energy)` triples with `i < j < length`.
    pub fn new(length: usize, contacts: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let width = length + 1;
        let mut by_end: Vec<Vec<(usize, f64)>> = vec![Vec::new(); length];
        for (i, j, energy) in contacts {
            debug_assert!(i < j && j < length);
            by_end[j].push((i, energy));
        }

        let mut within = vec![0.0; width * width];
        let mut ending_here = vec![0.0; length];
        for end in 1..=length {
            let last = end - 1;
            for &(i, energy) in &by_end[last] {
                ending_here[i] += energy;
            }
            let mut running = 0.0;
            for start in (0..end).rev() {
                running += ending_here[start];
                within[start * width + end] = within[start * width + end - 1] + running;
            }
            for &(i, _) in &by_end[last] {
                ending_here[i] = 0.0;
            }
        }

        let total = within[length];
        Self {
            length,
            within,
            total,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn within(&self, start: usize, end: usize) -> f64 {
        self.within[start * (self.length + 1) + end]
    }

    /// Energy of the contacts whose endpoints fall in different fragments.
    pub fn disrupted(&self, breakpoints: &[usize]) -> f64 {
        let kept: f64 = fragments(breakpoints, self.length)
            .map(|(start, end)| self.within(start, end))
            .sum();
        (self.total - kept).max(0.0)
    }
}

/// Prefix sums of parent disagreement over a collapsed sequence.
///
/// Column `x` contributes the number of ordered parent pairs `(a, b)` whose
/// residues differ there, so a span's sum divided by `n^2` is the expected
/// number of positions at which two independently drawn parents differ.
#[derive(Debug, Clone)]
pub struct DiversityTable {
    num_parents: usize,
    length: usize,
    prefix: Vec<u64>,
}

impl DiversityTable {
    pub fn new(parents: &ParentSet) -> Self {
        let num_parents = parents.len();
        let length = parents.sequence_length();
        let mut prefix = Vec::with_capacity(length + 1);
        prefix.push(0u64);

        let mut counts: HashMap<u8, u64> = HashMap::new();
        for x in 0..length {
            counts.clear();
            for parent in parents.iter() {
                *counts.entry(parent.residue(x)).or_insert(0) += 1;
            }
            let n = num_parents as u64;
            let agreeing: u64 = counts.values().map(|c| c * c).sum();
            prefix.push(prefix[x] + (n * n - agreeing));
        }

        Self {
            num_parents,
            length,
            prefix,
        }
    }

    /// Ordered parent pairs times positions that disagree within `[start, end)`.
    #[inline]
    pub fn disagreements(&self, start: usize, end: usize) -> u64 {
        self.prefix[end] - self.prefix[start]
    }

    /// Average mutations of the library cut at `breakpoints`.
    ///
    /// Measured against the parent drawn for one fragment, a random chimera
    /// differs in every other fragment by the expected pairwise distance of that
    /// span. The reported value is the smallest such expectation over the
    /// fragments, which is zero without crossovers. Costs `O(num_fragments)`.
    pub fn average_mutations(&self, breakpoints: &[usize]) -> f64 {
        let pairs = (self.num_parents * self.num_parents) as f64;
        if pairs == 0.0 {
            return 0.0;
        }
        let widest = fragments(breakpoints, self.length)
            .map(|(start, end)| self.disagreements(start, end))
            .max()
            .unwrap_or(0);
        (self.disagreements(0, self.length) - widest) as f64 / pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::parent::Parent;
    use itertools::Itertools;

    fn parents(rows: &[&str]) -> ParentSet {
        ParentSet::new(
            rows.iter()
                .enumerate()
                .map(|(i, row)| Parent::new(format!("p{i}"), row))
                .collect(),
        )
        .unwrap()
    }

    /// Mean over every parent assignment of the distance to the nearest parent.
    fn nearest_parent_average(set: &ParentSet, breakpoints: &[usize]) -> f64 {
        let length = set.sequence_length();
        let spans: Vec<(usize, usize)> = fragments(breakpoints, length).collect();
        let mut total = 0usize;
        let mut count = 0usize;
        for assignment in (0..spans.len()).map(|_| 0..set.len()).multi_cartesian_product() {
            let chimera: Vec<u8> = spans
                .iter()
                .zip(&assignment)
                .flat_map(|(&(s, e), &p)| set.get(p).unwrap().sequence()[s..e].to_vec())
                .collect();
            let nearest = set
                .iter()
                .map(|p| chimera.iter().zip(p.sequence()).filter(|(a, b)| a != b).count())
                .min()
                .unwrap();
            total += nearest;
            count += 1;
        }
        total as f64 / count as f64
    }

    #[test]
    fn within_matches_direct_sum() {
        let contacts = vec![(0, 3, 1.0), (1, 5, 0.5), (2, 4, 2.0), (3, 5, 0.25)];
        let table = EnergyTable::new(6, contacts.clone());
        for start in 0..=6 {
            for end in start..=6 {
                let expected: f64 = contacts
                    .iter()
                    .filter(|&&(i, j, _)| start <= i && j < end)
                    .map(|&(_, _, e)| e)
                    .sum();
                assert!((table.within(start, end) - expected).abs() < 1e-12);
            }
        }
        assert!((table.total() - 3.75).abs() < 1e-12);
    }

    #[test]
    fn disrupted_counts_only_contacts_crossing_fragments() {
        let table = EnergyTable::new(6, vec![(0, 3, 1.0), (1, 2, 0.5), (4, 5, 2.0)]);
        assert!((table.disrupted(&[3]) - 1.0).abs() < 1e-12);
        assert!((table.disrupted(&[2, 4]) - 1.5).abs() < 1e-12);
        assert_eq!(table.disrupted(&[]), 0.0);
    }

    #[test]
    fn disagreements_count_ordered_parent_pairs() {
        let set = parents(&["ACDEF", "ACDEG", "TCDQF"]);
        let table = DiversityTable::new(&set);
        // Columns 0, 3 and 4 each have one odd parent out: 2 * 1 * 2 ordered pairs.
        assert_eq!(table.disagreements(0, 5), 12);
        assert_eq!(table.disagreements(1, 3), 0);
        assert_eq!(table.disagreements(4, 5), 4);
    }

    #[test]
    fn average_mutations_is_exact_for_two_parents_and_two_fragments() {
        let set = parents(&["ACDEFG", "TCNEFW"]);
        let table = DiversityTable::new(&set);
        for breakpoints in [vec![2], vec![3], vec![4]] {
            let fast = table.average_mutations(&breakpoints);
            let exact = nearest_parent_average(&set, &breakpoints);
            assert!((fast - exact).abs() < 1e-12, "{breakpoints:?}: {fast} vs {exact}");
        }
    }

    #[test]
    fn average_mutations_bounds_the_nearest_parent_average() {
        let set = parents(&["ACDEFGHIKL", "ACNEFWHIRL", "TCDQFGYIKM"]);
        let table = DiversityTable::new(&set);
        for breakpoints in [vec![5], vec![3, 7], vec![2, 4, 8]] {
            let fast = table.average_mutations(&breakpoints);
            let exact = nearest_parent_average(&set, &breakpoints);
            assert!(fast + 1e-12 >= exact, "{breakpoints:?}: {fast} < {exact}");
            assert!(fast > 0.0);
        }
    }

    #[test]
    fn average_mutations_hand_computed() {
        let set = parents(&["ACDEFGHIKL", "ACNEFWHIRL", "TCDQFGYIKM"]);
        let table = DiversityTable::new(&set);
        // Seven variable columns, each with one odd parent out: 4 of 9 ordered pairs.
        // Fragments [0,3) [3,7) [7,10) hold 2, 3 and 2 of them.
        let expected = (7.0 - 3.0) * 4.0 / 9.0;
        assert!((table.average_mutations(&[3, 7]) - expected).abs() < 1e-12);
    }

    #[test]
    fn average_mutations_is_zero_without_crossovers() {
        let set = parents(&["ACDE", "TCDQ"]);
        let table = DiversityTable::new(&set);
        assert_eq!(table.average_mutations(&[]), 0.0);
    }

    #[test]
    fn average_mutations_grows_with_more_crossovers() {
        let set = parents(&["ACDEFGHIKL", "TCNQFWYIRM", "SCDEAGHVKL"]);
        let table = DiversityTable::new(&set);
        let one = table.average_mutations(&[5]);
        let three = table.average_mutations(&[2, 5, 8]);
        assert!(three >= one);
    }
}
