//! Configuration management for the ask skill
//!
//! Precedence is env > TOML file > default. A missing API key is a valid
//! configuration: the skill still answers, it just apologises.

pub mod file;

use std::time::Duration;

use secrecy::SecretString;

use self::file::SkillConfigFile;

/// Default OpenRouter API base (paths are appended as `/v1/...`)
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api";

/// Model used whenever live discovery fails
pub const DEFAULT_FALLBACK_MODEL: &str = "openai/gpt-4-1106-preview";

/// Vendor namespace discovered models must belong to
pub const DEFAULT_MODEL_PREFIX: &str = "openai/";

/// Voice used to read model answers
pub const DEFAULT_VOICE: &str = "Ivy";

/// Skill configuration
#[derive(Debug)]
pub struct Config {
    /// OpenRouter API key (from `OPENROUTER_API_KEY`)
    pub api_key: Option<SecretString>,

    /// OpenRouter connection settings
    pub openrouter: OpenRouterConfig,

    /// Model discovery settings
    pub model: ModelConfig,

    /// Spoken output settings
    pub speech: SpeechConfig,

    /// HTTP API server configuration
    pub api_server: ApiServerConfig,
}

/// OpenRouter connection configuration
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API base URL without the `/v1` suffix
    pub base_url: String,

    /// Value sent as `HTTP-Referer` on completion requests
    pub referer: String,

    /// Timeout applied to every outbound request
    pub timeout: Duration,
}

/// Model discovery configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Vendor namespace a model id must start with
    pub prefix: String,

    /// Model returned when discovery fails
    pub fallback: String,

    /// Freshness window for a discovered model id
    pub cache_ttl: Duration,
}

/// Spoken output configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// SSML voice name for model answers
    pub voice: String,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Expected `applicationId`; unset accepts every envelope
    pub application_id: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MODEL_PREFIX.to_string(),
            fallback: DEFAULT_FALLBACK_MODEL.to_string(),
            cache_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(8),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment and the config file
    #[must_use]
    pub fn load() -> Self {
        let fc = file::load_config_file();
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    ///
    /// Unparseable numeric values fall through to the next source.
    #[must_use]
    pub fn from_sources(fc: SkillConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = env("OPENROUTER_API_KEY")
            .or(fc.openrouter.api_key)
            .filter(|k| !k.trim().is_empty())
            .map(|k| SecretString::new(k.into()));

        let or_default = OpenRouterConfig::default();
        let openrouter = OpenRouterConfig {
            base_url: env("OPENROUTER_BASE_URL")
                .or(fc.openrouter.base_url)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(or_default.base_url),
            referer: env("OPENROUTER_REFERER")
                .or(fc.openrouter.referer)
                .unwrap_or(or_default.referer),
            timeout: env("ASK_SKILL_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .or(fc.openrouter.timeout_secs)
                .map_or(or_default.timeout, Duration::from_secs),
        };

        let model_default = ModelConfig::default();
        let model = ModelConfig {
            prefix: env("ASK_SKILL_MODEL_PREFIX")
                .or(fc.model.prefix)
                .unwrap_or(model_default.prefix),
            fallback: env("ASK_SKILL_FALLBACK_MODEL")
                .or(fc.model.fallback)
                .unwrap_or(model_default.fallback),
            cache_ttl: env("ASK_SKILL_MODEL_CACHE_SECS")
                .and_then(|s| s.parse().ok())
                .or(fc.model.cache_secs)
                .map_or(model_default.cache_ttl, Duration::from_secs),
        };

        let speech = SpeechConfig {
            voice: env("ASK_SKILL_VOICE")
                .or(fc.speech.voice)
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
        };

        let api_server = ApiServerConfig {
            port: env("ASK_SKILL_PORT")
                .or_else(|| env("PORT"))
                .and_then(|s| s.parse().ok())
                .or(fc.server.port)
                .unwrap_or(3000),
            application_id: env("ASK_SKILL_APPLICATION_ID")
                .or(fc.server.application_id)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
        };

        Self {
            api_key,
            openrouter,
            model,
            speech,
            api_server,
        }
    }

    /// Whether an API credential is configured
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::from_sources(SkillConfigFile::default(), |_| None);

        assert!(!config.has_api_key());
        assert_eq!(config.openrouter.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.openrouter.timeout, Duration::from_secs(8));
        assert_eq!(config.model.fallback, DEFAULT_FALLBACK_MODEL);
        assert_eq!(config.model.prefix, "openai/");
        assert_eq!(config.model.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.speech.voice, "Ivy");
        assert_eq!(config.api_server.port, 3000);
        assert!(config.api_server.application_id.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut fc = SkillConfigFile::default();
        fc.openrouter.api_key = Some("from-file".to_string());
        fc.model.fallback = Some("openai/file-model".to_string());
        fc.server.port = Some(4000);

        let config = Config::from_sources(
            fc,
            env_from(&[
                ("OPENROUTER_API_KEY", "from-env"),
                ("PORT", "5000"),
                ("OPENROUTER_BASE_URL", "http://127.0.0.1:9000/"),
            ]),
        );

        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("from-env".to_string())
        );
        assert_eq!(config.model.fallback, "openai/file-model");
        assert_eq!(config.api_server.port, 5000);
        assert_eq!(config.openrouter.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::from_sources(
            SkillConfigFile::default(),
            env_from(&[("OPENROUTER_API_KEY", "  ")]),
        );
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_invalid_number_falls_through() {
        let mut fc = SkillConfigFile::default();
        fc.model.cache_secs = Some(120);

        let config =
            Config::from_sources(fc, env_from(&[("ASK_SKILL_MODEL_CACHE_SECS", "soon")]));
        assert_eq!(config.model.cache_ttl, Duration::from_secs(120));
    }

    #[test]
    fn test_application_id_layering() {
        let mut fc = SkillConfigFile::default();
        fc.server.application_id = Some("amzn1.ask.skill.file".to_string());

        let from_file = Config::from_sources(fc, |_| None);
        assert_eq!(
            from_file.api_server.application_id.as_deref(),
            Some("amzn1.ask.skill.file")
        );

        let blank = Config::from_sources(
            SkillConfigFile::default(),
            env_from(&[("ASK_SKILL_APPLICATION_ID", " ")]),
        );
        assert!(blank.api_server.application_id.is_none());
    }
}
