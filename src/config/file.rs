//! TOML configuration file loading
//!
//! Supports `~/.config/ask-skill/config.toml` as a persistent config source.
//! All fields are optional, the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct SkillConfigFile {
    /// OpenRouter connection settings
    #[serde(default)]
    pub openrouter: OpenRouterFileConfig,

    /// Model discovery settings
    #[serde(default)]
    pub model: ModelFileConfig,

    /// Spoken output settings
    #[serde(default)]
    pub speech: SpeechFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// OpenRouter connection configuration
#[derive(Debug, Default, Deserialize)]
pub struct OpenRouterFileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub referer: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Model discovery configuration
#[derive(Debug, Default, Deserialize)]
pub struct ModelFileConfig {
    /// Vendor namespace a model id must start with (e.g. "openai/")
    pub prefix: Option<String>,
    /// Model used when live discovery fails
    pub fallback: Option<String>,
    /// How long a discovered model id stays fresh, in seconds
    pub cache_secs: Option<u64>,
}

/// Spoken output configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// SSML voice name used for model answers
    pub voice: Option<String>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,
    /// Only envelopes addressed to this skill application are answered
    pub application_id: Option<String>,
}

/// Load the TOML config file from `ASK_SKILL_CONFIG` or the standard path
///
/// Returns `SkillConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> SkillConfigFile {
    let path = std::env::var("ASK_SKILL_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(config_file_path);

    let Some(path) = path else {
        return SkillConfigFile::default();
    };

    if !path.exists() {
        return SkillConfigFile::default();
    }

    load_from(&path)
}

/// Parse a config file at `path`, logging and defaulting on failure
pub fn load_from(path: &Path) -> SkillConfigFile {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                SkillConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            SkillConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/ask-skill/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("ask-skill").join("config.toml"))
}
