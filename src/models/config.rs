use crate::assets::AssetLoader;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How the classification ruleset is chosen for an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    /// Pick from the image's average channel spread.
    Auto,
    /// Force the fixed-threshold ruleset.
    High,
    /// Force the nearest-reference ruleset.
    Low,
}

impl FromStr for ProfileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ProfileMode::Auto),
            "high" => Ok(ProfileMode::High),
            "low" => Ok(ProfileMode::Low),
            other => Err(format!(
                "unknown profile '{other}' (expected auto, high or low)"
            )),
        }
    }
}

impl fmt::Display for ProfileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileMode::Auto => write!(f, "auto"),
            ProfileMode::High => write!(f, "high"),
            ProfileMode::Low => write!(f, "low"),
        }
    }
}

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Maximum RGB distance for the nearest-reference ruleset.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,

    /// Default profile selection, overridable per request.
    #[serde(default = "default_profile")]
    pub profile: ProfileMode,

    /// Where user calibration is persisted; None disables persistence.
    #[serde(default = "default_calibration_file")]
    pub calibration_file: Option<PathBuf>,
}

fn default_tolerance() -> f32 {
    20.0
}

fn default_profile() -> ProfileMode {
    ProfileMode::Auto
}

fn default_calibration_file() -> Option<PathBuf> {
    Some(PathBuf::from("calibration.json"))
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        tolerance = config.tolerance,
                        profile = %config.profile,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            profile: default_profile(),
            calibration_file: default_calibration_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tolerance, 20.0);
        assert_eq!(config.profile, ProfileMode::Auto);
        assert_eq!(
            config.calibration_file,
            Some(PathBuf::from("calibration.json"))
        );
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
tolerance: 35
profile: low
calibration_file: /var/lib/ytandel/calibration.json
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tolerance, 35.0);
        assert_eq!(config.profile, ProfileMode::Low);
        assert_eq!(
            config.calibration_file,
            Some(PathBuf::from("/var/lib/ytandel/calibration.json"))
        );
    }

    #[test]
    fn test_deserialize_partial_config_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("tolerance: 12").unwrap();
        assert_eq!(config.tolerance, 12.0);
        assert_eq!(config.profile, ProfileMode::Auto);
    }

    #[test]
    fn test_profile_mode_from_str() {
        assert_eq!("auto".parse::<ProfileMode>().unwrap(), ProfileMode::Auto);
        assert_eq!("HIGH".parse::<ProfileMode>().unwrap(), ProfileMode::High);
        assert_eq!("low".parse::<ProfileMode>().unwrap(), ProfileMode::Low);
        assert!("medium".parse::<ProfileMode>().is_err());
    }

    #[test]
    fn test_embedded_config_parses() {
        let loader = AssetLoader::new(None);
        let config = AppConfig::load_from_assets(&loader);
        assert_eq!(config.tolerance, 20.0);
        assert_eq!(config.profile, ProfileMode::Auto);
    }
}
