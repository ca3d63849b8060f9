use super::types::{ProbeKind, ProbeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl ProbeSet {
    /// Read and parse the YAML configuration at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Non-fatal observations about the configuration.
    ///
    /// Nothing here blocks startup: unsupported kinds and broken patterns are
    /// reported by the evaluator on every hit. `--check` surfaces them early.
    pub fn check(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (name, spec) in [("liveness", &self.liveness), ("readiness", &self.readiness)] {
            if let ProbeKind::Unsupported(kind) = &spec.kind {
                warnings.push(format!("{}: unsupported probe type '{}'", name, kind));
            }
            if spec.has_body_regex() {
                if let Err(e) = regex::Regex::new(&spec.expected_body_regex) {
                    warnings.push(format!("{}: invalid regex: {}", name, e));
                }
            }
        }
        warnings
    }
}
