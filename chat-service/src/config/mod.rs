use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Public OpenAI endpoint used when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub auth: AuthConfig,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for credentials. Empty means issuance always fails.
    pub jwt_secret: Secret<String>,
    /// Whether `/api/chat` sits behind the cookie gate.
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(ChatConfig {
            common,
            auth: AuthConfig {
                jwt_secret: Secret::new(get_env("JWT_SECRET", Some(""))?),
                required: parse_bool("AUTH_REQUIRED", &get_env("AUTH_REQUIRED", Some("true"))?)?,
            },
            openai: OpenAiConfig {
                api_key: Secret::new(get_env("OPENAI_API_KEY", None)?),
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL))?,
            },
        })
    }
}

/// Read `key`, treating an empty value the same as an unset one.
fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} environment variable is not set",
                key
            ))),
        },
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got {:?}",
            key,
            other
        ))),
    }
}
