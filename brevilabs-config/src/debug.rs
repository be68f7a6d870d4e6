//! Debug and tracing configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::Level;

/// Level for the `[debug]` filter. Unknown names fall back to `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLevel(Level);

impl TraceLevel {
    pub fn level(self) -> Level {
        self.0
    }

    fn from_config(raw: &str) -> Self {
        raw.trim().parse::<Level>().map(Self).unwrap_or_default()
    }
}

impl Default for TraceLevel {
    fn default() -> Self {
        Self(Level::INFO)
    }
}

impl From<Level> for TraceLevel {
    fn from(level: Level) -> Self {
        Self(level)
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.as_str().to_ascii_lowercase())
    }
}

impl Serialize for TraceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TraceLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_config(&raw))
    }
}

/// Debug and tracing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DebugConfig {
    /// Install a tracing subscriber even when `RUST_LOG` is unset
    #[serde(default)]
    pub enable_tracing: bool,

    /// Trace level (error, warn, info, debug, trace)
    #[serde(default)]
    pub trace_level: TraceLevel,

    /// Tracing targets to enable, e.g. "brevilabs_client"
    #[serde(default)]
    pub trace_targets: Vec<String>,
}

impl DebugConfig {
    /// Build an `EnvFilter`-compatible directive from the configured targets.
    pub fn filter_directive(&self) -> String {
        let targets = if self.trace_targets.is_empty() {
            vec![
                "brevilabs".to_string(),
                "brevilabs_client".to_string(),
                "brevilabs_config".to_string(),
            ]
        } else {
            self.trace_targets.clone()
        };

        targets
            .iter()
            .map(|target| format!("{}={}", target, self.trace_level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_level_reads_any_case() {
        assert_eq!(TraceLevel::from_config("WARN").level(), Level::WARN);
        assert_eq!(TraceLevel::from_config(" debug ").level(), Level::DEBUG);
        assert_eq!(TraceLevel::from(Level::ERROR).to_string(), "error");
    }

    #[test]
    fn trace_level_round_trips_through_toml() {
        let cfg = DebugConfig {
            trace_level: Level::TRACE.into(),
            ..DebugConfig::default()
        };
        let text = toml::to_string(&cfg).unwrap();
        assert!(text.contains("trace_level = \"trace\""));
        assert_eq!(toml::from_str::<DebugConfig>(&text).unwrap(), cfg);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let cfg: DebugConfig = toml::from_str("trace_level = \"loud\"").unwrap();
        assert_eq!(cfg.trace_level, TraceLevel::default());
    }

    #[test]
    fn filter_directive_uses_default_targets() {
        let cfg = DebugConfig {
            trace_level: Level::DEBUG.into(),
            ..DebugConfig::default()
        };
        assert_eq!(
            cfg.filter_directive(),
            "brevilabs=debug,brevilabs_client=debug,brevilabs_config=debug"
        );
    }

    #[test]
    fn filter_directive_uses_custom_targets() {
        let cfg = DebugConfig {
            enable_tracing: true,
            trace_level: Level::TRACE.into(),
            trace_targets: vec!["brevilabs_client::client".to_string()],
        };
        assert_eq!(cfg.filter_directive(), "brevilabs_client::client=trace");
    }
}
