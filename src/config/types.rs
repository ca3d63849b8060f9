use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Probe protocol named by the `type` field.
///
/// Only HTTP is implemented. Any other value is kept verbatim so that the
/// evaluator can report it; loading never rejects an unknown kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProbeKind {
    Http,
    Unsupported(String),
}

impl Default for ProbeKind {
    fn default() -> Self {
        ProbeKind::Unsupported(String::new())
    }
}

impl From<String> for ProbeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "http" => ProbeKind::Http,
            _ => ProbeKind::Unsupported(value),
        }
    }
}

impl From<&str> for ProbeKind {
    fn from(value: &str) -> Self {
        ProbeKind::from(value.to_string())
    }
}

impl From<ProbeKind> for String {
    fn from(kind: ProbeKind) -> Self {
        match kind {
            ProbeKind::Http => "http".to_string(),
            ProbeKind::Unsupported(raw) => raw,
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Http => write!(f, "http"),
            ProbeKind::Unsupported(raw) => write!(f, "{}", raw),
        }
    }
}

/// Explicit nulls (`~`, `null`, or a bare `key:`) load as the field's
/// default, the same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One declarative check against the target service
///
/// `port` and `expected_status` are signed and unvalidated: nonsensical
/// values make the probe fail at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSpec {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ProbeKind,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub expected_status: i64,
    #[serde(rename = "target_service_address", deserialize_with = "null_as_default")]
    pub target_address: String,
    /// Empty string disables the body check
    #[serde(deserialize_with = "null_as_default")]
    pub expected_body_regex: String,
    #[serde(rename = "negate_expected_body_regex", deserialize_with = "null_as_default")]
    pub negate_body_regex: bool,
}

impl ProbeSpec {
    pub fn has_body_regex(&self) -> bool {
        !self.expected_body_regex.is_empty()
    }
}

/// Which of the two configured probes a request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProbeName {
    Liveness,
    Readiness,
}

impl ProbeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeName::Liveness => "liveness",
            ProbeName::Readiness => "readiness",
        }
    }
}

impl fmt::Display for ProbeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full probe configuration, loaded once at startup and shared read-only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSet {
    #[serde(deserialize_with = "null_as_default")]
    pub liveness: ProbeSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub readiness: ProbeSpec,
}

impl ProbeSet {
    pub fn get(&self, name: ProbeName) -> &ProbeSpec {
        match name {
            ProbeName::Liveness => &self.liveness,
            ProbeName::Readiness => &self.readiness,
        }
    }
}
