use config::ConfigError;
use domain::RemoteFailurePolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const ENV_PREFIX: &str = "GBAIRAI_";

// 兼容旧部署的环境变量名
const LEGACY_KEY_VARS: &[&str] = &["OPENROUTER_CHECK_WORD", "OPENAI_API_KEY"];

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub llm: LlmSettings,
    #[serde(default)]
    pub moderation: ModerationSettings,
    pub security: SecuritySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub referer: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Default)]
pub struct ModerationSettings {
    #[serde(default)]
    pub custom_banned_words: Vec<String>,
    // 非空时替换内置的拒绝文案
    #[serde(default)]
    pub rejection_messages: Vec<String>,
    #[serde(default)]
    pub on_remote_failure: RemoteFailurePolicy,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    pub admin_token: String,
}

impl LlmSettings {
    pub fn to_openrouter(&self) -> adapter::OpenRouterConfig {
        adapter::OpenRouterConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone(),
            referer: self.referer.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();
        let env_json =
            serde_json::to_string(&env_map).map_err(|e| ConfigError::Foreign(Box::new(e)))?;

        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/gbairai.db")?
            .set_default("llm.base_url", "https://openrouter.ai/api/v1")?
            .set_default("llm.model", "openai/gpt-4o-mini")?
            .set_default("llm.referer", "https://gbairai.app")?
            .set_default("llm.timeout_secs", 15)?
            .set_default("security.admin_token", "admin_secret_change_me")?;

        if let Some(key) = legacy_api_key() {
            builder = builder.set_default("llm.api_key", key)?;
        }

        let s = builder
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }
}

fn legacy_api_key() -> Option<String> {
    LEGACY_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let settings = Settings::new().unwrap();
        assert!(!settings.llm.base_url.is_empty());
        assert!(settings.llm.timeout_secs > 0);
        assert_eq!(
            settings.llm.to_openrouter().timeout,
            Duration::from_secs(settings.llm.timeout_secs)
        );
    }
}
