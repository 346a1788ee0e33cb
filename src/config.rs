use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{FormState, UnitScale};
use crate::error::AppError;
use crate::pricing::{BillingMode, Model, UnitKind};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// Default display scale per kind; only kinds with a scale choice
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigUnits {
    #[serde(default)]
    pub(crate) text: Option<UnitScale>,
    #[serde(default)]
    pub(crate) output: Option<UnitScale>,
    #[serde(default)]
    pub(crate) training: Option<UnitScale>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) model: Option<Model>,
    #[serde(default)]
    pub(crate) batch: bool,
    #[serde(default)]
    pub(crate) requests: Option<u32>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) share_base_url: Option<String>,
    #[serde(default)]
    pub(crate) units: ConfigUnits,
}

impl Config {
    /// Load the first discovered config file that parses; fall back to defaults.
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Load an explicitly named config file. Unlike discovery, a missing or
    /// malformed file is an error.
    pub(crate) fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/gemcost/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("gemcost").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("gemcost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.gemcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gemcost.toml"));
        }

        paths
    }

    /// Seed the form with configured defaults
    pub(crate) fn apply_to(&self, state: &mut FormState) {
        if let Some(model) = self.model {
            state.select_model(model);
        }
        if self.batch && !state.set_billing(BillingMode::Batch) {
            tracing::warn!(
                "config sets batch = true but {} has no batch tier, using regular billing",
                state.model().display_name()
            );
        }
        if let Some(requests) = self.requests {
            state.set_requests(requests);
        }
        let units = [
            (UnitKind::Text, self.units.text),
            (UnitKind::Output, self.units.output),
            (UnitKind::Training, self.units.training),
        ];
        for (kind, scale) in units {
            if let Some(scale) = scale {
                state.set_scale(kind, scale);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("gemcost")));
    }

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            model = "gemini-2-flash-lite"
            batch = true
            requests = 10
            color = "never"
            share_base_url = "https://calc.example.com/"

            [units]
            text = "million"
            output = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.model, Some(Model::Gemini20FlashLite));
        assert!(config.batch);
        assert_eq!(config.requests, Some(10));
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert_eq!(config.units.text, Some(UnitScale::Million));
        assert_eq!(config.units.output, Some(UnitScale::Thousand));
        assert_eq!(config.units.training, None);
    }

    #[test]
    fn config_accepts_model_and_scale_aliases() {
        let config: Config = toml::from_str(
            "model = \"gemini-2.0-flash\"\n[units]\ntext = \"Million\"\ntraining = \"K\"\n",
        )
        .unwrap();
        assert_eq!(config.model, Some(Model::Gemini20Flash));
        assert_eq!(config.units.text, Some(UnitScale::Million));
        assert_eq!(config.units.training, Some(UnitScale::Thousand));
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.model.is_none());
        assert!(!config.batch);
    }

    #[test]
    fn units_reject_media_kinds() {
        let result = toml::from_str::<Config>("[units]\nvideo = \"m\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn apply_sets_form_defaults() {
        let config: Config = toml::from_str(
            "model = \"gemini-2-flash-lite\"\nbatch = true\nrequests = 4\n[units]\ntraining = \"k\"\n",
        )
        .unwrap();
        let mut state = FormState::default();
        config.apply_to(&mut state);
        assert_eq!(state.model(), Model::Gemini20FlashLite);
        assert_eq!(state.billing(), BillingMode::Batch);
        assert_eq!(state.requests(), 4);
        assert_eq!(state.scale(UnitKind::Training), UnitScale::Thousand);
    }

    #[test]
    fn apply_batch_ignored_for_model_without_batch() {
        let config: Config =
            toml::from_str("model = \"gemini-1-5-pro\"\nbatch = true\n").unwrap();
        let mut state = FormState::default();
        config.apply_to(&mut state);
        assert_eq!(state.billing(), BillingMode::Regular);
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-1-5-flash\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.model, Some(Model::Gemini15Flash));
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-9\"").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
