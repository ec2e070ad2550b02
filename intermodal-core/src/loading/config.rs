use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DbId, Error};

/// What to do with a row that cannot be imported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorPolicy {
    /// Abort the import on the first bad row
    #[default]
    Fail,
    /// Log the bad row, count it and continue with the next one
    Skip,
}

/// How parent station references between stops are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentStationResolution {
    /// A parent is linked only if it appears before its child in the stop stream
    #[default]
    SinglePass,
    /// All stops of a network are created first, parents are linked afterwards
    TwoPass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub on_row_error: RowErrorPolicy,
    pub parent_station: ParentStationResolution,
}

/// Location of the records of one public transport network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtNetworkConfig {
    pub id: DbId,
    pub name: String,
    /// Directory containing `pt_stop.csv` and `pt_section.csv`
    pub dir: PathBuf,
}

/// Configuration for building a multimodal graph from CSV exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Directory containing `road_node.csv` and `road_section.csv`
    pub road_dir: PathBuf,
    #[serde(default)]
    pub public_transport: Vec<PtNetworkConfig>,
    #[serde(default)]
    pub import: ImportOptions,
}

impl NetworkConfig {
    pub fn new(road_dir: impl Into<PathBuf>) -> Self {
        Self {
            road_dir: road_dir.into(),
            public_transport: Vec::new(),
            import: ImportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_public_transport(
        mut self,
        id: DbId,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
    ) -> Self {
        self.public_transport.push(PtNetworkConfig {
            id,
            name: name.into(),
            dir: dir.into(),
        });
        self
    }

    #[must_use]
    pub fn with_options(mut self, import: ImportOptions) -> Self {
        self.import = import;
        self
    }

    /// # Errors
    ///
    /// Returns an error if the document is not a valid configuration
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration
    pub fn from_toml_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read config '{}': {}", path.display(), e),
            )
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = NetworkConfig::from_toml_str(
            r#"
            road_dir = "data/road"

            [import]
            on_row_error = "skip"
            parent_station = "two_pass"

            [[public_transport]]
            id = 1
            name = "bus"
            dir = "data/bus"

            [[public_transport]]
            id = 2
            name = "metro"
            dir = "data/metro"
            "#,
        )
        .unwrap();

        assert_eq!(config.road_dir, PathBuf::from("data/road"));
        assert_eq!(config.public_transport.len(), 2);
        assert_eq!(config.public_transport[1].name, "metro");
        assert_eq!(config.import.on_row_error, RowErrorPolicy::Skip);
        assert_eq!(
            config.import.parent_station,
            ParentStationResolution::TwoPass
        );
    }

    #[test]
    fn options_default_to_strict_single_pass() {
        let config = NetworkConfig::from_toml_str(r#"road_dir = "road""#).unwrap();
        assert!(config.public_transport.is_empty());
        assert_eq!(config.import, ImportOptions::default());
        assert_eq!(config.import.on_row_error, RowErrorPolicy::Fail);
        assert_eq!(
            config.import.parent_station,
            ParentStationResolution::SinglePass
        );
    }

    #[test]
    fn invalid_policy_is_a_config_error() {
        let err = NetworkConfig::from_toml_str(
            r#"
            road_dir = "road"
            [import]
            on_row_error = "ignore"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
