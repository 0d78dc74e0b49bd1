/// Number of valid crossover placements: `C(length - min*(k+1) + k, k)`.
///
/// Saturates at `u128::MAX`; returns 0 when no placement satisfies the
/// minimum fragment length.
pub fn candidate_count(length: usize, num_crossovers: usize, min_fragment_length: usize) -> u128 {
    let step = min_fragment_length.max(1);
    let required = step.saturating_mul(num_crossovers + 1);
    if length < required {
        return 0;
    }
    let n = (length - required + num_crossovers) as u128;
    let r = num_crossovers as u128;
    let mut count: u128 = 1;
    for i in 1..=r {
        count = match count.checked_mul(n - r + i) {
            Some(product) => product / i,
            None => return u128::MAX,
        };
    }
    count
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Fresh,
    Active,
    Exhausted,
}

/// Lazy enumeration of every strictly increasing crossover tuple `b_1 < ... < b_k`
/// over a sequence of `length` positions in which every fragment
/// (`[0, b_1)`, `[b_1, b_2)`, ..., `[b_k, length)`) spans at least
/// `min_fragment_length` positions.
///
/// Tuples are produced in lexicographic order. [`Breakpoints::reset`] restarts
/// the enumeration.
#[derive(Debug, Clone)]
pub struct Breakpoints {
    length: usize,
    num_crossovers: usize,
    step: usize,
    positions: Vec<usize>,
    cursor: Cursor,
}

impl Breakpoints {
    pub fn new(length: usize, num_crossovers: usize, min_fragment_length: usize) -> Self {
        Self {
            length,
            num_crossovers,
            step: min_fragment_length.max(1),
            positions: Vec::with_capacity(num_crossovers),
            cursor: Cursor::Fresh,
        }
    }

    pub fn reset(&mut self) {
        self.positions.clear();
        self.cursor = Cursor::Fresh;
    }

    pub fn candidate_count(&self) -> u128 {
        candidate_count(self.length, self.num_crossovers, self.step)
    }

    /// Largest value crossover `t` (0-based) may take.
    #[inline]
    fn max_position(&self, t: usize) -> usize {
        self.length - self.step * (self.num_crossovers - t)
    }

    /// Moves to the next tuple and borrows it, without allocating.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.cursor {
            Cursor::Exhausted => return None,
            Cursor::Fresh => {
                if self.length < self.step.saturating_mul(self.num_crossovers + 1) {
                    self.cursor = Cursor::Exhausted;
                    return None;
                }
                self.positions.clear();
                self.positions
                    .extend((1..=self.num_crossovers).map(|t| t * self.step));
                self.cursor = Cursor::Active;
            }
            Cursor::Active => {
                let pivot = (0..self.num_crossovers)
                    .rev()
                    .find(|&t| self.positions[t] < self.max_position(t));
                match pivot {
                    Some(t) => {
                        self.positions[t] += 1;
                        let base = self.positions[t];
                        for u in (t + 1)..self.num_crossovers {
                            self.positions[u] = base + self.step * (u - t);
                        }
                    }
                    None => {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }
                }
            }
        }
        Some(&self.positions)
    }
}

impl Iterator for Breakpoints {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Fragment spans `[start, end)` delimited by `breakpoints` over `length` positions.
pub fn fragments(breakpoints: &[usize], length: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
    std::iter::once(0)
        .chain(breakpoints.iter().copied())
        .zip(breakpoints.iter().copied().chain(std::iter::once(length)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn brute_force(length: usize, k: usize, min: usize) -> Vec<Vec<usize>> {
        (1..length)
            .combinations(k)
            .filter(|tuple| fragments(tuple, length).all(|(s, e)| e - s >= min))
            .collect()
    }

    #[test]
    fn enumerates_exactly_the_valid_tuples_in_order() {
        for (length, k, min) in [(10, 2, 2), (12, 3, 3), (9, 1, 4), (7, 2, 1)] {
            let produced: Vec<Vec<usize>> = Breakpoints::new(length, k, min).collect();
            assert_eq!(produced, brute_force(length, k, min), "L={length} k={k} min={min}");
        }
    }

    #[test]
    fn count_matches_closed_form() {
        for (length, k, min) in [(10, 2, 2), (20, 3, 4), (15, 4, 1), (8, 3, 2), (30, 0, 5)] {
            let breakpoints = Breakpoints::new(length, k, min);
            let expected = breakpoints.candidate_count();
            assert_eq!(breakpoints.count() as u128, expected);
        }
    }

    #[test]
    fn count_never_grows_with_min_fragment_length() {
        for k in 0..4 {
            let counts: Vec<u128> = (1..12).map(|min| candidate_count(40, k, min)).collect();
            assert!(counts.windows(2).all(|w| w[0] >= w[1]), "k={k}: {counts:?}");
        }
    }

    #[test]
    fn zero_crossovers_yield_one_empty_tuple() {
        assert_eq!(Breakpoints::new(5, 0, 3).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Breakpoints::new(2, 0, 3).count(), 0);
    }

    #[test]
    fn too_short_sequence_yields_nothing() {
        let mut breakpoints = Breakpoints::new(5, 2, 2);
        assert!(breakpoints.advance().is_none());
        assert!(breakpoints.advance().is_none());
        assert_eq!(candidate_count(5, 2, 2), 0);
    }

    #[test]
    fn reset_restarts_enumeration() {
        let mut breakpoints = Breakpoints::new(10, 2, 2);
        let first: Vec<Vec<usize>> = breakpoints.by_ref().collect();
        breakpoints.reset();
        let second: Vec<Vec<usize>> = breakpoints.collect();
        assert_eq!(first, second);
        assert_eq!(first[0], vec![2, 4]);
        assert_eq!(first.last().unwrap(), &vec![6, 8]);
    }

    #[test]
    fn fragments_cover_the_sequence() {
        let spans: Vec<(usize, usize)> = fragments(&[3, 7], 10).collect();
        assert_eq!(spans, vec![(0, 3), (3, 7), (7, 10)]);
        let whole: Vec<(usize, usize)> = fragments(&[], 4).collect();
        assert_eq!(whole, vec![(0, 4)]);
    }
}
