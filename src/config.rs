//! Engine configuration
//!
//! Every field defaults to the crate constants and built-in catalogs, so an
//! empty JSON object is a valid config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Prompt, DEFAULT_VOCABULARY};
use crate::{
    ADVANCE_DELAY_MS, CONFIDENCE_THRESHOLD, ROUND_DURATION_SECS, TICK_INTERVAL_MS,
    TILT_THRESHOLD,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub detection: DetectionConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Strict lower bound on detection confidence
    pub confidence_threshold: f64,
    /// Category substrings, matched against lowercased labels
    pub vocabulary: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_secs: u32,
    pub tick_ms: u64,
    pub advance_delay_ms: u64,
    pub tilt_threshold: f64,
    /// Fixed shuffle seed; random per process when absent
    pub seed: Option<u64>,
    pub prompts: Vec<Prompt>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_secs: ROUND_DURATION_SECS,
            tick_ms: TICK_INTERVAL_MS,
            advance_delay_ms: ADVANCE_DELAY_MS,
            tilt_threshold: TILT_THRESHOLD,
            seed: None,
            prompts: Prompt::default_catalog(),
        }
    }
}

impl EngineConfig {
    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.validate()?;
        self.game.validate()
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.confidence_threshold;
        if !(0.0..1.0).contains(&t) {
            return Err(ConfigError::InvalidConfidenceThreshold(t));
        }
        if self.vocabulary.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        if let Some(index) = self.vocabulary.iter().position(|v| v.trim().is_empty()) {
            return Err(ConfigError::BlankVocabularyEntry { index });
        }
        Ok(())
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_secs == 0 {
            return Err(ConfigError::ZeroRoundLength);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !self.tilt_threshold.is_finite() || self.tilt_threshold <= 0.0 {
            return Err(ConfigError::InvalidTiltThreshold(self.tilt_threshold));
        }
        validate_catalog(&self.prompts)
    }
}

/// Reject empty catalogs and nameless prompts
pub(crate) fn validate_catalog(prompts: &[Prompt]) -> Result<(), ConfigError> {
    if prompts.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    if let Some(index) = prompts.iter().position(|p| p.name.trim().is_empty()) {
        return Err(ConfigError::BlankPromptName { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detection.confidence_threshold, 0.2);
        assert_eq!(config.game.round_secs, 60);
        assert_eq!(config.game.advance_delay_ms, 800);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_json(
            r#"{"game": {"round_secs": 30, "seed": 7}, "detection": {"vocabulary": ["can"]}}"#,
        )
        .unwrap();
        assert_eq!(config.game.round_secs, 30);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.tick_ms, 1000);
        assert_eq!(config.detection.vocabulary, vec!["can".to_string()]);
    }

    #[test]
    fn test_rejects_empty_vocabulary() {
        let err = EngineConfig::from_json(r#"{"detection": {"vocabulary": []}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVocabulary));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err =
            EngineConfig::from_json(r#"{"detection": {"confidence_threshold": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfidenceThreshold(_)));
    }

    #[test]
    fn test_rejects_malformed_catalog() {
        let err = EngineConfig::from_json(r#"{"game": {"prompts": []}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));

        let err = EngineConfig::from_json(
            r#"{"game": {"prompts": [{"name": "CAN", "hint": "x"}, {"name": " ", "hint": "y"}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BlankPromptName { index: 1 }));
    }

    #[test]
    fn test_rejects_zero_round_and_tilt() {
        let mut game = GameConfig::default();
        game.round_secs = 0;
        assert!(matches!(game.validate(), Err(ConfigError::ZeroRoundLength)));

        let mut game = GameConfig::default();
        game.tilt_threshold = 0.0;
        assert!(matches!(game.validate(), Err(ConfigError::InvalidTiltThreshold(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"game": {{"advance_delay_ms": 500}}}}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.game.advance_delay_ms, 500);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load("/nonexistent/ecorangers.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
