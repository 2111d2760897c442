use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::confidence::ConfidenceConfig;
use super::scoring::DimensionWeights;
use super::thresholds::ThresholdsConfig;
use super::RatingConfig;

/// Name of the config file searched for in the working directory and
/// its ancestors
pub const CONFIG_FILE_NAME: &str = "carescore.toml";

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
///
/// Invalid sections fall back to their defaults with a warning rather
/// than failing the run; published ratings should never be blocked by
/// a malformed tuning file.
pub fn parse_and_validate_config(contents: &str) -> Result<RatingConfig, String> {
    let mut config = toml::from_str::<RatingConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.weights.validate() {
        log::warn!("Invalid dimension weights: {}. Using defaults.", e);
        config.weights = DimensionWeights::default();
    } else {
        config.weights.normalize(); // Ensure exact sum of 1.0
    }

    if let Err(e) = config.thresholds.validate() {
        log::warn!("Invalid banding thresholds: {}. Using defaults.", e);
        config.thresholds = ThresholdsConfig::default();
    }

    if let Err(e) = config.confidence.validate() {
        log::warn!("Invalid confidence settings: {}. Using defaults.", e);
        config.confidence = ConfidenceConfig::default();
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<RatingConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from an explicit path, falling back to defaults
/// when the file is missing or malformed.
pub fn load_config_from_path(path: &Path) -> RatingConfig {
    try_load_config_from_path(path).unwrap_or_default()
}

/// Load configuration from carescore.toml, searching the current
/// directory and its ancestors.
pub fn load_config() -> RatingConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RatingConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RatingConfig::default()
        })
}
