//! CLI configuration, loadable from TOML.

use serde::Deserialize;

use oz_log_analyzer::AnalyzerConfig;

/// Top-level configuration for `oz-logs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CliConfig {
    /// Analyzer tunables (`[analyzer]` table).
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Poll interval for `tail --follow`, in milliseconds.
    #[serde(default = "default_follow_interval")]
    pub follow_interval_ms: u64,
}

fn default_follow_interval() -> u64 {
    1000
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            follow_interval_ms: default_follow_interval(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {path}: {e}"))?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.analyzer.validate()?;
        if self.follow_interval_ms == 0 {
            anyhow::bail!("follow_interval_ms must be at least 1");
        }
        Ok(())
    }
}
