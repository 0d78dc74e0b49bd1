/// One evaluated crossover placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RasppResult {
    pub average_energy: f64,     // <E>: expected broken-contact energy of a random chimera
    pub average_mutations: f64,  // <m>: expected mutations from the nearest parent
    pub crossovers: Vec<usize>,  // First position of every fragment after the first
}

/// The best result retained for one diversity bin.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    pub bin: f64,
    pub average_energy: f64,
    pub average_mutations: f64,
    pub crossovers: Vec<usize>,
}

impl From<(f64, RasppResult)> for CurvePoint {
    fn from((bin, result): (f64, RasppResult)) -> Self {
        Self {
            bin,
            average_energy: result.average_energy,
            average_mutations: result.average_mutations,
            crossovers: result.crossovers,
        }
    }
}
