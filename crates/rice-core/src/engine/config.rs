use crate::core::scoring::{ContactScorer, MismatchScorer, SchemaScorer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Heavy-atom distance (Angstroms) below which two residues are in contact.
pub const DEFAULT_CONTACT_DISTANCE: f64 = 4.5;
/// Chains read from the reference structure when none are requested.
pub const DEFAULT_CHAINS: [char; 2] = ['A', ' '];
pub const DEFAULT_MIN_FRAGMENT_LENGTH: usize = 4;
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;
pub const DEFAULT_MISMATCH_WEIGHT: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    pub distance_cutoff: f64,
    pub chains: Vec<char>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            distance_cutoff: DEFAULT_CONTACT_DISTANCE,
            chains: DEFAULT_CHAINS.to_vec(),
        }
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    distance_cutoff: Option<f64>,
    chains: Option<Vec<char>>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = Some(cutoff);
        self
    }

    /// Chains to read. The blank chain is always added, since many files leave
    /// the chain column empty.
    pub fn chains(mut self, chains: Vec<char>) -> Self {
        self.chains = Some(chains);
        self
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let distance_cutoff = self.distance_cutoff.unwrap_or(DEFAULT_CONTACT_DISTANCE);
        if !distance_cutoff.is_finite() || distance_cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance_cutoff",
                reason: format!("must be a positive distance, got {}", distance_cutoff),
            });
        }

        let chains = match self.chains {
            Some(mut chains) if !chains.is_empty() => {
                if !chains.contains(&' ') {
                    chains.push(' ');
                }
                chains
            }
            _ => DEFAULT_CHAINS.to_vec(),
        };

        Ok(ContactConfig {
            distance_cutoff,
            chains,
        })
    }
}

/// Contact scoring policy. The default, `Mismatch`, is positive whenever the
/// two parents differ at either contact position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringMethod {
    Schema,
    Mismatch { weight: f64 },
}

impl Default for ScoringMethod {
    fn default() -> Self {
        ScoringMethod::Mismatch {
            weight: DEFAULT_MISMATCH_WEIGHT,
        }
    }
}

impl ScoringMethod {
    pub fn scorer(&self) -> Box<dyn ContactScorer> {
        match *self {
            ScoringMethod::Schema => Box::new(SchemaScorer),
            ScoringMethod::Mismatch { weight } => Box::new(MismatchScorer { weight }),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMethod::Schema => write!(f, "schema"),
            ScoringMethod::Mismatch { .. } => write!(f, "mismatch"),
        }
    }
}

impl FromStr for ScoringMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "schema" => Ok(ScoringMethod::Schema),
            "mismatch" => Ok(ScoringMethod::default()),
            other => Err(ConfigError::InvalidParameter {
                name: "scorer",
                reason: format!("unknown scoring method '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasppConfig {
    pub num_crossovers: usize,
    pub min_fragment_length: usize,
    pub bin_width: f64,
    pub scoring: ScoringMethod,
}

impl RasppConfig {
    pub fn num_fragments(&self) -> usize {
        self.num_crossovers + 1
    }
}

#[derive(Default)]
pub struct RasppConfigBuilder {
    num_crossovers: Option<usize>,
    min_fragment_length: Option<usize>,
    bin_width: Option<f64>,
    scoring: Option<ScoringMethod>,
}

impl RasppConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_crossovers(mut self, n: usize) -> Self {
        self.num_crossovers = Some(n);
        self
    }
    pub fn min_fragment_length(mut self, length: usize) -> Self {
        self.min_fragment_length = Some(length);
        self
    }
    pub fn bin_width(mut self, width: f64) -> Self {
        self.bin_width = Some(width);
        self
    }
    pub fn scoring(mut self, method: ScoringMethod) -> Self {
        self.scoring = Some(method);
        self
    }

    pub fn build(self) -> Result<RasppConfig, ConfigError> {
        let num_crossovers = self
            .num_crossovers
            .ok_or(ConfigError::MissingParameter("num_crossovers"))?;
        let min_fragment_length = self
            .min_fragment_length
            .unwrap_or(DEFAULT_MIN_FRAGMENT_LENGTH);
        if min_fragment_length == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "min_fragment_length",
                reason: "must be at least 1".to_string(),
            });
        }
        let bin_width = self.bin_width.unwrap_or(DEFAULT_BIN_WIDTH);
        if !bin_width.is_finite() || bin_width <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "bin_width",
                reason: format!("must be a positive number, got {}", bin_width),
            });
        }
        let scoring = self.scoring.unwrap_or_default();
        if let ScoringMethod::Mismatch { weight } = scoring {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "mismatch_weight",
                    reason: format!("must be a non-negative number, got {}", weight),
                });
            }
        }

        Ok(RasppConfig {
            num_crossovers,
            min_fragment_length,
            bin_width,
            scoring,
        })
    }
}
