// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::SceneConfig;
use crate::scenes::{preset, PRESET_NAMES};

#[derive(Parser, Debug, Clone)]
#[command(name = "bedroom-viewer")]
#[command(about = "Renders a static bedroom scene", long_about = None)]
pub struct Cli {
    /// Built-in scene layout
    #[arg(long, default_value = "classic", value_parser = clap::builder::PossibleValuesParser::new(PRESET_NAMES))]
    pub preset: String,

    /// JSON scene file; takes precedence over --preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Force orbit camera control on
    #[arg(long)]
    pub orbit: bool,

    /// Disable the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Log filter in env_logger syntax, e.g. "debug" or "bedroom_viewer=debug"
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Scene config selected by the flags
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => preset(&self.preset)?,
        };
        if self.orbit {
            config.enable_orbit();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bedroom-viewer"]).unwrap();
        assert_eq!(cli.preset, "classic");
        assert!(cli.config.is_none());
        assert!(!cli.orbit);
        assert!(!cli.no_ui);
        assert!(cli.log.is_none());
    }

    #[test]
    fn test_orbit_flag_enables_orbit_on_any_preset() {
        let cli = Cli::try_parse_from(["bedroom-viewer", "--preset", "loft", "--orbit"]).unwrap();
        let config = cli.scene_config().unwrap();
        assert_eq!(config.name, "loft");
        assert!(config.orbit.is_some());
    }

    #[test]
    fn test_unknown_preset_rejected_by_parser() {
        assert!(Cli::try_parse_from(["bedroom-viewer", "--preset", "attic"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["bedroom-viewer", "--config", "/nonexistent/scene.json"]).unwrap();
        let err = cli.scene_config().unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/scene.json"));
    }
}
