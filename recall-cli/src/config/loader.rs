use super::types::{
    InputConfig, OutputConfig, RawInputConfig, RawOutputConfig, RawRecallConfig,
    RawScoringConfig, RecallConfig, ScoringConfig,
};
use anyhow::{Result, bail};
use recall_scoring::LoaderOptions;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<RecallConfig> {
        let mut raw = RawRecallConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path
    pub fn user_config_path() -> PathBuf {
        recall_paths::user_config_file()
    }

    /// Get project config path
    /// Can be overridden with RECALL_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("RECALL_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".recall/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawRecallConfig> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawRecallConfig, overlay: RawRecallConfig) -> RawRecallConfig {
        RawRecallConfig {
            scoring: RawScoringConfig {
                z: overlay.scoring.z.or(base.scoring.z),
            },
            input: RawInputConfig {
                extension: overlay.input.extension.or(base.input.extension),
                sniff_bytes: overlay.input.sniff_bytes.or(base.input.sniff_bytes),
                fallback_delimiter: overlay
                    .input
                    .fallback_delimiter
                    .or(base.input.fallback_delimiter),
            },
            output: RawOutputConfig {
                directory: overlay.output.directory.or(base.output.directory),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawRecallConfig) -> RecallConfig {
        let scoring = ScoringConfig::default();
        let input = InputConfig::default();
        let output = OutputConfig::default();
        RecallConfig {
            scoring: ScoringConfig {
                z: raw.scoring.z.unwrap_or(scoring.z),
            },
            input: InputConfig {
                extension: raw.input.extension.unwrap_or(input.extension),
                sniff_bytes: raw.input.sniff_bytes.unwrap_or(input.sniff_bytes),
                fallback_delimiter: raw
                    .input
                    .fallback_delimiter
                    .unwrap_or(input.fallback_delimiter),
            },
            output: OutputConfig {
                directory: raw.output.directory.unwrap_or(output.directory),
            },
        }
    }

    /// Save config to a specific path
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to_path(config: &RecallConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        std::fs::write(path, toml)?;

        Ok(())
    }

    /// Load config from a specific path (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<RecallConfig> {
        if path.exists() {
            Ok(Self::finalize(Self::read_raw(path)?))
        } else {
            Ok(RecallConfig::default())
        }
    }
}

impl RecallConfig {
    /// Check values that TOML alone cannot constrain
    pub fn validate(&self) -> Result<()> {
        if !self.scoring.z.is_finite() || self.scoring.z <= 0.0 {
            bail!("scoring.z must be a positive number, got {}", self.scoring.z);
        }
        if !self.input.fallback_delimiter.is_ascii() {
            bail!(
                "input.fallback_delimiter must be a single ASCII character, got {:?}",
                self.input.fallback_delimiter
            );
        }
        if self.input.sniff_bytes == 0 {
            bail!("input.sniff_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Loader options derived from the `[input]` section
    pub fn loader_options(&self) -> Result<LoaderOptions> {
        self.validate()?;
        Ok(LoaderOptions {
            sniff_chars: self.input.sniff_bytes,
            fallback_delimiter: self.input.fallback_delimiter as u8,
        })
    }
}
