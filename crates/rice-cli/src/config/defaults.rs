use ricepp::engine::config::{
    DEFAULT_BIN_WIDTH, DEFAULT_CHAINS, DEFAULT_CONTACT_DISTANCE, DEFAULT_MIN_FRAGMENT_LENGTH,
    DEFAULT_MISMATCH_WEIGHT,
};

/// Values used when neither the command line nor the configuration file sets them.
pub struct DefaultsConfig {
    pub distance_cutoff: f64,
    pub chains: Vec<char>,
    pub min_fragment_length: usize,
    pub bin_width: f64,
    pub scorer: String,
    pub mismatch_weight: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            distance_cutoff: DEFAULT_CONTACT_DISTANCE,
            chains: DEFAULT_CHAINS.to_vec(),
            min_fragment_length: DEFAULT_MIN_FRAGMENT_LENGTH,
            bin_width: DEFAULT_BIN_WIDTH,
            scorer: "mismatch".to_string(),
            mismatch_weight: DEFAULT_MISMATCH_WEIGHT,
        }
    }
}
