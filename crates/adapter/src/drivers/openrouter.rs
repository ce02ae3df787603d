use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::traits::{ChatCompletion, ChatRequest};

#[derive(Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub referer: String,
    pub timeout: Duration,
}

pub struct OpenRouterDriver {
    client: Client,
    config: OpenRouterConfig,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterDriver {
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

fn build_body<'a>(model: &'a str, request: &'a ChatRequest) -> CompletionBody<'a> {
    CompletionBody {
        model,
        messages: vec![
            Message {
                role: "system",
                content: &request.system,
            },
            Message {
                role: "user",
                content: &request.user,
            },
        ],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterDriver {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = build_body(&self.config.model, &request);

        debug!("Calling {} with model {}", self.endpoint(), self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &request.title)
            .json(&body)
            .send()
            .await
            .context("Completion request failed")?
            .error_for_status()
            .context("Completion endpoint returned an error status")?;

        let parsed: CompletionResponse = response
            .json()
            .await
            .context("Completion response was not valid JSON")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Completion response had no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_both_prompts() {
        let request = ChatRequest {
            title: "Gbairai".into(),
            system: "sys".into(),
            user: "usr".into(),
            max_tokens: 200,
            temperature: 0.1,
        };
        let json = serde_json::to_value(build_body("openai/gpt-4o-mini", &request)).unwrap();

        assert_eq!(json["model"], "openai/gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["max_tokens"], 200);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let driver = OpenRouterDriver::new(OpenRouterConfig {
            base_url: "https://openrouter.ai/api/v1/".into(),
            api_key: "k".into(),
            model: "m".into(),
            referer: "https://gbairai.app".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(driver.endpoint(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn response_without_choices_parses() {
        let parsed: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
