use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"# Carescore Configuration

# Dimension weights for the overall rating. Must sum to 1.0.
[weights]
health_safety = 0.40
structural = 0.25
process = 0.20
management = 0.15

[thresholds]
# Primary banding strategy: "percentile" or "z_score"
banding = "percentile"

[confidence]
# Interval half-width before widening, in star units
base = 0.5
# Hard cap on any interval
cap = 2.0

[ceilings]
# Overall rating caps, applied after banding
inactive = 2.0
elevated_risk = 4.0
recent_window_months = 12
critical_risk_score = 90.0
critical_risk = 2.5

[parallel]
enabled = true
batch_size = 256
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_CONFIG;
    use crate::config::parse_and_validate_config;

    #[test]
    fn template_parses_as_valid_config() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.health_safety, 0.40);
        assert_eq!(config.ceilings.recent_window_months, 12);
    }
}
