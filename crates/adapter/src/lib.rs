mod common;
mod drivers;
mod emotion;
mod moderation;
mod traits;

pub use drivers::openrouter::{OpenRouterConfig, OpenRouterDriver};
pub use emotion::{EmotionAnalysisService, DEFAULT_LANGUAGE};
pub use moderation::ContentModerator;
pub use traits::{ChatCompletion, ChatRequest};

use std::sync::Arc;
use tracing::info;

// API key 为空则不创建客户端，远程审核和分析都会跳过
pub fn build_provider(config: OpenRouterConfig) -> anyhow::Result<Option<Arc<dyn ChatCompletion>>> {
    if config.api_key.trim().is_empty() {
        info!("No LLM API key configured, remote moderation and analysis are disabled");
        return Ok(None);
    }

    info!("Initializing LLM provider {} ({})", config.base_url, config.model);
    let driver = OpenRouterDriver::new(config)?;
    Ok(Some(Arc::new(driver)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(api_key: &str) -> OpenRouterConfig {
        OpenRouterConfig {
            base_url: "https://openrouter.ai/api/v1".into(),
            api_key: api_key.into(),
            model: "openai/gpt-4o-mini".into(),
            referer: "https://gbairai.app".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn blank_key_disables_provider() {
        assert!(build_provider(config("  ")).unwrap().is_none());
    }

    #[test]
    fn key_enables_provider() {
        assert!(build_provider(config("sk-or-test")).unwrap().is_some());
    }
}
