use crate::core::flow::ConfirmationPolicy;
use crate::core::form::FormVariant;
use crate::core::page::PageSettings;
use crate::core::reveal::RevealPolicy;
use crate::core::video::VideoSource;
use crate::utils::error::{FunnelError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_table() -> String {
    "leads".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelConfig {
    pub store: StoreConfig,
    pub video: VideoSource,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub reveal: RevealPolicy,
    #[serde(default = "default_confirmation")]
    pub confirmation: ConfirmationPolicy,
}

fn default_confirmation() -> ConfirmationPolicy {
    ConfirmationPolicy::Static
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub variant: FormVariant,
}

impl FunnelConfig {
    /// Loads and parses a funnel TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FunnelError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FunnelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left in place so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FunnelError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("store.url", &self.store.url)?;
        validation::validate_no_placeholder("store.anon_key", &self.store.anon_key)?;
        validation::validate_non_empty_string("store.anon_key", &self.store.anon_key)?;
        validation::validate_non_empty_string("store.table", &self.store.table)?;
        validation::validate_range("store.timeout_seconds", self.store.timeout_seconds, 1, 120)?;

        validation::validate_non_empty_string("video.id", self.video.id())?;

        if let RevealPolicy::DelayAfterLoad {
            fallback_seconds,
            after_play_seconds,
        } = self.reveal
        {
            if after_play_seconds > fallback_seconds {
                return Err(FunnelError::InvalidConfigValueError {
                    field: "reveal.after_play_seconds".to_string(),
                    value: after_play_seconds.to_string(),
                    reason: format!(
                        "Must not exceed reveal.fallback_seconds ({})",
                        fallback_seconds
                    ),
                });
            }
        }

        if let ConfirmationPolicy::Redirect { url, delay_ms } = &self.confirmation {
            validation::validate_url("confirmation.url", url)?;
            validation::validate_range("confirmation.delay_ms", *delay_ms, 0, 60_000)?;
        }

        Ok(())
    }

    pub fn page_settings(&self, thumbnail_url: Option<String>) -> PageSettings {
        PageSettings {
            video: self.video.clone(),
            thumbnail_url,
            form_variant: self.form.variant,
            reveal: self.reveal,
            confirmation: self.confirmation.clone(),
        }
    }
}

impl Validate for FunnelConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
