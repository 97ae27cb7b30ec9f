//! Configuration loading from rollcheck.toml
//!
//! Analysis defaults can be pinned in a `rollcheck.toml` next to the roll logs.
//! The file is discovered by walking up from the current directory; command-line
//! flags always win over file values.

use anyhow::{Context, bail};
use rollcheck_stats::{
    Categories, DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_CONFIDENCE_LEVEL,
    DEFAULT_SIGNIFICANCE_LEVEL, DIE_FACES,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "rollcheck.toml";

/// rollcheck configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RollcheckConfig {
    /// Hypothesis-test settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Bootstrap settings
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Hypothesis-test settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Significance level for both tests
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Number of faces on the die
    #[serde(default = "default_faces")]
    pub faces: usize,
    /// Label of the lowest face
    #[serde(default = "default_lowest_face")]
    pub lowest_face: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            faces: default_faces(),
            lowest_face: default_lowest_face(),
        }
    }
}

fn default_alpha() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}
fn default_faces() -> usize {
    DIE_FACES
}
fn default_lowest_face() -> i64 {
    1
}

/// Bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootstrapSettings {
    /// Number of resampling iterations
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Confidence level (e.g., 0.95 for 95%)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
    /// Spread iterations across the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            confidence_level: default_confidence_level(),
            seed: None,
            parallel: default_parallel(),
        }
    }
}

fn default_iterations() -> usize {
    DEFAULT_BOOTSTRAP_ITERATIONS
}
fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}
fn default_parallel() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl RollcheckConfig {
    /// Load configuration from a TOML file
    ///
    /// Only parses; call [`RollcheckConfig::validate`] once command-line
    /// overrides have been applied.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Locate `rollcheck.toml` by walking up from `start`
    pub fn find_from(start: impl AsRef<Path>) -> Option<PathBuf> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory
    ///
    /// A file that exists but fails to parse is an error rather than silently ignored.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        match Self::find_from(&cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Reject values the statistics engine would refuse anyway, with a config-level message
    pub fn validate(&self) -> anyhow::Result<()> {
        let alpha = self.analysis.alpha;
        if !(alpha > 0.0 && alpha < 1.0) {
            bail!("analysis.alpha must be in (0, 1), got {}", alpha);
        }
        Categories::new(self.analysis.lowest_face, self.analysis.faces)
            .map_err(|e| anyhow::anyhow!("analysis.faces/lowest_face: {}", e))?;
        let level = self.bootstrap.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            bail!("bootstrap.confidence_level must be in (0, 1), got {}", level);
        }
        if self.bootstrap.iterations < 1 {
            bail!("bootstrap.iterations must be at least 1");
        }
        self.output
            .format
            .parse::<rollcheck_report::OutputFormat>()
            .map_err(|e| anyhow::anyhow!("output.format: {}", e))?;
        Ok(())
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# rollcheck configuration

[analysis]
# Significance level for the chi-squared and Kolmogorov-Smirnov tests
alpha = 0.05
# Number of faces on the die and the label of the lowest one
faces = 10
lowest_face = 1

[bootstrap]
# Resampling iterations for the difference of means
iterations = 10000
# Confidence level (0.0 to 1.0)
confidence_level = 0.95
# Fixed seed for reproducible intervals (uncomment to enable)
# seed = 42
# Spread iterations across all cores
parallel = true

[output]
# Default output format: human, json
format = "human"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RollcheckConfig::default();
        assert_eq!(config.analysis.alpha, 0.05);
        assert_eq!(config.analysis.faces, 10);
        assert_eq!(config.analysis.lowest_face, 1);
        assert_eq!(config.bootstrap.iterations, 10_000);
        assert_eq!(config.bootstrap.seed, None);
        assert!(config.bootstrap.parallel);
        assert_eq!(config.output.format, "human");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [bootstrap]
            iterations = 2000
            seed = 7

            [output]
            format = "json"
        "#;

        let config: RollcheckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bootstrap.iterations, 2000);
        assert_eq!(config.bootstrap.seed, Some(7));
        assert_eq!(config.output.format, "json");
        // Defaults should still apply
        assert_eq!(config.bootstrap.confidence_level, 0.95);
        assert_eq!(config.analysis.faces, 10);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: RollcheckConfig = toml::from_str(&RollcheckConfig::default_toml()).unwrap();
        assert_eq!(config, RollcheckConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RollcheckConfig::default();
        config.analysis.alpha = 1.0;
        assert!(config.validate().is_err());

        let mut config = RollcheckConfig::default();
        config.bootstrap.confidence_level = 0.0;
        assert!(config.validate().is_err());

        let mut config = RollcheckConfig::default();
        config.bootstrap.iterations = 0;
        assert!(config.validate().is_err());

        let mut config = RollcheckConfig::default();
        config.analysis.faces = 1;
        assert!(config.validate().is_err());

        let mut config = RollcheckConfig::default();
        config.output.format = "html".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_faces() {
        let mut config = RollcheckConfig::default();
        config.analysis.faces = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.faces"));

        let mut config = RollcheckConfig::default();
        config.analysis.lowest_face = i64::MAX - 2;
        assert!(config.validate().is_err());

        let mut config = RollcheckConfig::default();
        config.analysis.lowest_face = 0;
        config.analysis.faces = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_find_from_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("2024");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\nalpha = 0.01\n",
        )
        .unwrap();

        let found = RollcheckConfig::find_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));

        let config = RollcheckConfig::load(&found).unwrap();
        assert_eq!(config.analysis.alpha, 0.01);
    }

    #[test]
    fn test_load_parses_without_validating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[bootstrap]\nconfidence_level = 1.5\n").unwrap();

        let config = RollcheckConfig::load(&path).unwrap();
        assert_eq!(config.bootstrap.confidence_level, 1.5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("confidence_level"));

        std::fs::write(&path, "[bootstrap]\niterations = \"many\"\n").unwrap();
        assert!(RollcheckConfig::load(&path).is_err());
    }
}
