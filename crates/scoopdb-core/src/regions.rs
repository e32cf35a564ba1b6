use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A named geographic scope for one search-and-import sweep, e.g. a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

/// Load and validate the regions configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile = serde_yaml::from_str(&content)?;

    validate_regions(&regions_file)?;

    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    if regions_file.regions.is_empty() {
        return Err(ConfigError::Validation(
            "regions file contains no regions".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for region in &regions_file.regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(region.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name: '{}'",
                region.name
            )));
        }
    }

    Ok(())
}
