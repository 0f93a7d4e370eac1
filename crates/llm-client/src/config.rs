//! Generator configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::TierModels;

/// Default commentator instructions (plain text, suitable for Telegram).
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI commentator for public channel posts. \
Comment on each post precisely and in depth: point out factual or logical mistakes, suggest \
improvements, and interpret any media from its description. Do not use Markdown or formatting \
symbols; reply in plain text only.";

/// Closing line appended to every comment unless SIGNATURE overrides it.
pub const DEFAULT_SIGNATURE: &str =
    "If you have questions about my work, contact my creator @menanshin";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub models: TierModels,
    pub system_prompt: Option<String>,
    /// Line every comment must end with. `None` drops the instruction.
    pub signature: Option<String>,
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Load from environment variables. `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let defaults = TierModels::default();
        let models = TierModels {
            standard: env::var("STANDARD_MODEL").unwrap_or(defaults.standard),
            premium: env::var("PREMIUM_MODEL").unwrap_or(defaults.premium),
        };

        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());

        // Set but blank disables the signature.
        let signature = match env::var("SIGNATURE") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(raw.trim().to_string()),
            Err(_) => Some(DEFAULT_SIGNATURE.to_string()),
        };

        let timeout_secs = match env::var("GENERATION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| format!("GENERATION_TIMEOUT_SECS is not a positive integer: {}", raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key,
            openai_base_url,
            models,
            system_prompt,
            signature,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Instructions sent with every post: the base prompt plus the signature rule, if any.
    pub fn system_prompt(&self) -> String {
        let base = self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);
        match &self.signature {
            Some(signature) => format!("{} End every comment with the line: '{}'", base, signature),
            None => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "OPENAI_API_KEY",
            "OPENAI_BASE_URL",
            "STANDARD_MODEL",
            "PREMIUM_MODEL",
            "SYSTEM_PROMPT",
            "SIGNATURE",
            "GENERATION_TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "test_key");

        let config = GeneratorConfig::from_env().unwrap();

        assert_eq!(config.openai_api_key, "test_key");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.models, TierModels::default());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.signature.as_deref(), Some(DEFAULT_SIGNATURE));
        let prompt = config.system_prompt();
        assert!(prompt.starts_with(DEFAULT_SYSTEM_PROMPT));
        assert!(prompt.ends_with(&format!("'{}'", DEFAULT_SIGNATURE)));
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "custom_key");
        env::set_var("OPENAI_BASE_URL", "https://proxy.example.com/v1");
        env::set_var("STANDARD_MODEL", "gpt-4o-mini");
        env::set_var("PREMIUM_MODEL", "gpt-4o");
        env::set_var("SYSTEM_PROMPT", "Be brief.");
        env::set_var("SIGNATURE", "Written by @desk_bot");
        env::set_var("GENERATION_TIMEOUT_SECS", "15");

        let config = GeneratorConfig::from_env().unwrap();

        assert_eq!(config.openai_base_url, "https://proxy.example.com/v1");
        assert_eq!(config.models.standard, "gpt-4o-mini");
        assert_eq!(config.models.premium, "gpt-4o");
        assert_eq!(
            config.system_prompt(),
            "Be brief. End every comment with the line: 'Written by @desk_bot'"
        );
        assert_eq!(config.timeout, Duration::from_secs(15));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_signature_disables_it() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "k");
        env::set_var("SYSTEM_PROMPT", "Be brief.");
        env::set_var("SIGNATURE", "  ");

        let config = GeneratorConfig::from_env().unwrap();

        assert_eq!(config.signature, None);
        assert_eq!(config.system_prompt(), "Be brief.");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key_fails() {
        clear_env();
        assert!(GeneratorConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_bad_timeout_fails() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "k");
        env::set_var("GENERATION_TIMEOUT_SECS", "soon");
        assert!(GeneratorConfig::from_env().is_err());
        env::set_var("GENERATION_TIMEOUT_SECS", "0");
        assert!(GeneratorConfig::from_env().is_err());
        clear_env();
    }
}
