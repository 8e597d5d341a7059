//! Configuration settings for the simulation driver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub height: usize,
    pub width: usize,
    /// `None` runs until stopped
    pub generations: Option<usize>,
    pub interval_ms: u64,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub stop_when_extinct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
    pub pattern_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print every n-th generation
    pub show_every: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Pattern,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                height: 30,
                width: 60,
                generations: Some(100),
                interval_ms: 100,
                seed: None,
                parallel: false,
                stop_when_extinct: true,
            },
            input: InputConfig {
                pattern_file: None,
                pattern_directory: PathBuf::from("patterns"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_every: 1,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from a YAML file, falling back to defaults if it is absent
    pub fn from_file_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Pattern file path, looked up in `pattern_directory` when not found as given
    pub fn resolved_pattern_file(&self) -> Option<PathBuf> {
        self.input.pattern_file.as_ref().map(|path| {
            if path.exists() || path.is_absolute() {
                return path.clone();
            }
            let candidate = self.input.pattern_directory.join(path);
            if candidate.exists() {
                candidate
            } else {
                path.clone()
            }
        })
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.output.show_every == 0 {
            anyhow::bail!("show_every must be positive");
        }

        if let Some(ref pattern) = self.resolved_pattern_file() {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
            if self.simulation.height == 0 || self.simulation.width == 0 {
                anyhow::bail!(
                    "A pattern file needs a non-empty grid, got {}x{}",
                    self.simulation.height,
                    self.simulation.width
                );
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(height) = cli_overrides.height {
            self.simulation.height = height;
        }
        if let Some(width) = cli_overrides.width {
            self.simulation.width = width;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = Some(generations);
        }
        if cli_overrides.forever {
            self.simulation.generations = None;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.simulation.interval_ms = interval_ms;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if let Some(ref pattern) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(show_every) = cli_overrides.show_every {
            self.output.show_every = show_every;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub generations: Option<usize>,
    pub forever: bool,
    pub interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub pattern_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub show_every: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.seed = Some(42);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.seed, Some(42));
        assert_eq!(loaded.simulation.height, 30);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_handwritten_yaml() {
        let yaml = r#"
simulation:
  height: 10
  width: 20
  generations: null
  interval_ms: 0
  seed: 7
  parallel: true
  stop_when_extinct: false
input:
  pattern_file: null
  pattern_directory: pats
output:
  format: pattern
  show_every: 5
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.simulation.generations, None);
        assert!(settings.simulation.parallel);
        assert_eq!(settings.output.format, OutputFormat::Pattern);
        assert_eq!(settings.input.pattern_directory, PathBuf::from("pats"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let temp_dir = tempdir().unwrap();
        let settings =
            Settings::from_file_or_default(&temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings.simulation.generations, Some(100));
    }

    #[test]
    fn test_validate() {
        assert!(Settings::default().validate().is_ok());

        let mut settings = Settings::default();
        settings.output.show_every = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(PathBuf::from("/definitely/not/here.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_pattern_needs_non_empty_grid() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("p.txt");
        std::fs::write(&pattern, "1\n").unwrap();

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(pattern);
        assert!(settings.validate().is_ok());

        settings.simulation.width = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_pattern_resolved_from_directory() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("glider.txt"), "010\n001\n111\n").unwrap();

        let mut settings = Settings::default();
        settings.input.pattern_directory = temp_dir.path().to_path_buf();
        settings.input.pattern_file = Some(PathBuf::from("glider.txt"));

        assert_eq!(
            settings.resolved_pattern_file(),
            Some(temp_dir.path().join("glider.txt"))
        );
        assert!(settings.validate().is_ok());

        settings.input.pattern_file = Some(PathBuf::from("missing.txt"));
        assert_eq!(settings.resolved_pattern_file(), Some(PathBuf::from("missing.txt")));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            height: Some(5),
            generations: Some(3),
            seed: Some(1),
            format: Some(OutputFormat::Pattern),
            ..Default::default()
        });
        assert_eq!(settings.simulation.height, 5);
        assert_eq!(settings.simulation.width, 60);
        assert_eq!(settings.simulation.generations, Some(3));
        assert_eq!(settings.simulation.seed, Some(1));
        assert_eq!(settings.output.format, OutputFormat::Pattern);

        settings.merge_with_cli(&CliOverrides {
            forever: true,
            ..Default::default()
        });
        assert_eq!(settings.simulation.generations, None);
    }
}
