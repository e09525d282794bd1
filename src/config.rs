//! Planner configuration
//!
//! Every section has defaults, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! seed = 4
//!
//! [roadmap]
//! sample_count = 300
//! neighbor_radius = 1.5
//! neighbor_search = "grid"
//!
//! [smoothing]
//! trials = 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::PlannerResult;
use crate::path_planning::a_star::SearchConfig;
use crate::path_planning::prm::RoadmapConfig;
use crate::path_planning::shortcut::ShortcutConfig;

/// Configuration for the full build, search and smoothing pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Random seed, drawn from OS entropy when unset
    pub seed: Option<u64>,
    pub roadmap: RoadmapConfig,
    pub search: SearchConfig,
    pub smoothing: ShortcutConfig,
}

impl PlannerConfig {
    pub fn from_toml_str(s: &str) -> PlannerResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        self.roadmap.validate()?;
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PlannerError;
    use crate::path_planning::spatial_index::NeighborSearch;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = PlannerConfig::from_toml_str(
            r#"
            seed = 4

            [roadmap]
            sample_count = 300
            neighbor_search = "grid"

            [search]
            max_expansions = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(4));
        assert_eq!(config.roadmap.sample_count, 300);
        assert_eq!(config.roadmap.neighbor_search, NeighborSearch::Grid);
        assert_eq!(config.roadmap.neighbor_radius, RoadmapConfig::default().neighbor_radius);
        assert_eq!(config.search.max_expansions, Some(5000));
        assert_eq!(config.smoothing, ShortcutConfig::default());
    }

    #[test]
    fn test_defaults_survive_serialization() {
        let config = PlannerConfig {
            seed: Some(1),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(PlannerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = PlannerConfig::from_toml_str("[roadmap]\nneighbor_radius = -1.0\n");
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));

        let result = PlannerConfig::from_toml_str("[roadmap]\nsample_count = \"many\"\n");
        assert!(matches!(result, Err(PlannerError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = PlannerConfig::load("/nonexistent/prm_planner.toml");
        assert!(matches!(result, Err(PlannerError::Io(_))));
    }
}
