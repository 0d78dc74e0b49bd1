mod defaults;

use crate::cli::{DesignArgs, ScorerChoice, StructureArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use ricepp::engine::config::{
    self as core_config, ContactConfig, ContactConfigBuilder, RasppConfig, RasppConfigBuilder,
    ScoringMethod,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactsConfig {
    #[serde(rename = "distance-cutoff")]
    distance_cutoff: Option<f64>,
    chains: Option<Vec<char>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRasppConfig {
    crossovers: Option<usize>,
    #[serde(rename = "min-fragment-length")]
    min_fragment_length: Option<usize>,
    #[serde(rename = "bin-width")]
    bin_width: Option<f64>,
    scorer: Option<String>,
    #[serde(rename = "mismatch-weight")]
    mismatch_weight: Option<f64>,
}

/// Settings read from a TOML configuration file; every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialDesignConfig {
    contacts: Option<PartialContactsConfig>,
    raspp: Option<PartialRasppConfig>,
}

impl PartialDesignConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_contacts(&self, args: &StructureArgs) -> Result<ContactConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.contacts.as_ref();

        let cutoff = args
            .cutoff
            .or(file.and_then(|c| c.distance_cutoff))
            .unwrap_or(defaults.distance_cutoff);
        let chains = if !args.chains.is_empty() {
            args.chains.clone()
        } else {
            file.and_then(|c| c.chains.clone())
                .unwrap_or(defaults.chains)
        };

        ContactConfigBuilder::new()
            .distance_cutoff(cutoff)
            .chains(chains)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_raspp(&self, args: &DesignArgs) -> Result<RasppConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.raspp.as_ref();

        let mut builder = RasppConfigBuilder::new()
            .min_fragment_length(
                args.min_fragment
                    .or(file.and_then(|r| r.min_fragment_length))
                    .unwrap_or(defaults.min_fragment_length),
            )
            .bin_width(
                args.bin_width
                    .or(file.and_then(|r| r.bin_width))
                    .unwrap_or(defaults.bin_width),
            )
            .scoring(Self::merge_scoring(args.scorer, file, &defaults)?);
        if let Some(n) = args.crossovers.or(file.and_then(|r| r.crossovers)) {
            builder = builder.num_crossovers(n);
        }

        builder.build().map_err(|e| match e {
            core_config::ConfigError::MissingParameter("num_crossovers") => CliError::Config(
                "The number of crossovers is required (`--crossovers` or `raspp.crossovers`)."
                    .to_string(),
            ),
            other => CliError::Config(other.to_string()),
        })
    }

    fn merge_scoring(
        cli_choice: Option<ScorerChoice>,
        file: Option<&PartialRasppConfig>,
        defaults: &DefaultsConfig,
    ) -> Result<ScoringMethod> {
        let name = match cli_choice {
            Some(ScorerChoice::Schema) => "schema".to_string(),
            Some(ScorerChoice::Mismatch) => "mismatch".to_string(),
            None => file
                .and_then(|r| r.scorer.clone())
                .unwrap_or_else(|| defaults.scorer.clone()),
        };
        let method: ScoringMethod = name
            .parse()
            .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?;
        Ok(match method {
            ScoringMethod::Mismatch { .. } => ScoringMethod::Mismatch {
                weight: file
                    .and_then(|r| r.mismatch_weight)
                    .unwrap_or(defaults.mismatch_weight),
            },
            schema => schema,
        })
    }
}
