use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings for graph construction.
///
/// The evaluation engine itself is pure policy and takes no configuration;
/// only the graph builder needs to know which slice of the catalog to draw
/// and whether to declutter transitively-implied edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The department whose courses are in scope for the prerequisite graph.
    pub department: String,

    /// Whether to suppress an edge when a directed path between its endpoints
    /// already exists in the graph-so-far.
    ///
    /// With nodes and prerequisite entries processed in canonical (sorted)
    /// order the suppression is deterministic; turning it off hands full
    /// transitive reduction to the rendering layer instead.
    pub suppress_redundant_edges: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            department: "CSC".to_string(),
            suppress_redundant_edges: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.toml");

        let config = Config {
            department: "MAT".to_string(),
            suppress_redundant_edges: false,
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.department, "CSC");
        assert!(config.suppress_redundant_edges);
    }
}
