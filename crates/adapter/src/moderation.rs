use std::sync::Arc;

use anyhow::Result;
use domain::blacklist::{censor_text, matching_categories};
use domain::moderation::REMOTE_FALLBACK_SUGGESTION;
use domain::{LocalModerator, ModerationResult, RemoteFailurePolicy};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::common::json::parse_model_json;
use crate::traits::{ChatCompletion, ChatRequest};

const MODERATION_TITLE: &str = "Gbairai Content Moderation";

const MODERATION_PROMPT: &str = r#"Tu es une IA de modération pour Gbairai, un réseau social ivoirien. Ta mission est d'analyser le contenu des messages et de déterminer s'ils respectent les règles de bonne conduite.

RÈGLES DE MODÉRATION:
- Bloque tout contenu offensant, vulgaire, haineux ou irrespectueux
- Bloque les contenus sexuels explicites, violents ou liés aux drogues
- Bloque les discriminations, le harcèlement et les menaces
- Respecte la culture ivoirienne et l'usage du nouchi/argot local quand c'est respectueux
- Sois tolérant avec l'humour ivoirien tant qu'il reste respectueux

RÉPONSE ATTENDUE:
Réponds UNIQUEMENT par un JSON avec cette structure:
{
  "approved": boolean,
  "toxicity_score": number (0-1),
  "reason": "explication courte si refusé",
  "category": "type de problème si refusé"
}

Si le message est acceptable, réponds: {"approved": true, "toxicity_score": 0.1}
Si le message est problématique, donne une raison claire et un score de toxicité."#;

const UNAVAILABLE_SUGGESTION: &str = "La modération est indisponible, réessaie dans un instant";

#[derive(Debug, Deserialize)]
struct RemoteVerdict {
    approved: bool,
    #[serde(default)]
    toxicity_score: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

pub struct ContentModerator {
    local: LocalModerator,
    provider: Option<Arc<dyn ChatCompletion>>,
    on_remote_failure: RemoteFailurePolicy,
}

impl ContentModerator {
    pub fn new(
        local: LocalModerator,
        provider: Option<Arc<dyn ChatCompletion>>,
        on_remote_failure: RemoteFailurePolicy,
    ) -> Self {
        Self {
            local,
            provider,
            on_remote_failure,
        }
    }

    pub fn check_local(&self, content: &str) -> ModerationResult {
        self.local.check(content)
    }

    // 本地拦截后直接返回，不再请求模型
    pub async fn moderate(&self, content: &str) -> ModerationResult {
        let local = self.check_local(content);
        if !local.approved {
            // 日志里只留遮蔽后的文本
            info!(
                "Local moderation blocked \"{}\" ({} banned word(s), categories: {:?})",
                censor_text(content, "***"),
                local.found_words.as_ref().map_or(0, Vec::len),
                matching_categories(content)
            );
            return local;
        }

        self.check_remote(content).await
    }

    // 没有配置模型时直接放行
    pub async fn check_remote(&self, content: &str) -> ModerationResult {
        let Some(provider) = &self.provider else {
            debug!("No LLM provider configured, skipping remote moderation");
            return ModerationResult::approved();
        };

        match ask_provider(provider.as_ref(), content).await {
            Ok(verdict) if verdict.approved => ModerationResult::approved(),
            Ok(verdict) => {
                info!(
                    "Remote moderation rejected content: category={:?} toxicity={:?}",
                    verdict.category, verdict.toxicity_score
                );
                ModerationResult {
                    approved: false,
                    reason: Some(self.local.policy().pick_message()),
                    found_words: None,
                    suggestion: Some(
                        verdict
                            .reason
                            .filter(|r| !r.trim().is_empty())
                            .unwrap_or_else(|| REMOTE_FALLBACK_SUGGESTION.to_string()),
                    ),
                }
            }
            Err(e) => {
                warn!("Remote moderation unavailable: {:#}", e);
                self.on_failure()
            }
        }
    }

    fn on_failure(&self) -> ModerationResult {
        match self.on_remote_failure {
            RemoteFailurePolicy::FailOpen => ModerationResult::approved(),
            RemoteFailurePolicy::FailClosed => ModerationResult {
                approved: false,
                reason: Some(self.local.policy().pick_message()),
                found_words: None,
                suggestion: Some(UNAVAILABLE_SUGGESTION.to_string()),
            },
        }
    }
}

async fn ask_provider(provider: &dyn ChatCompletion, content: &str) -> Result<RemoteVerdict> {
    let request = ChatRequest {
        title: MODERATION_TITLE.to_string(),
        system: MODERATION_PROMPT.to_string(),
        user: format!("Analyse ce message: \"{}\"", content),
        max_tokens: 200,
        temperature: 0.1,
    };

    let raw = provider.complete(request).await?;
    parse_model_json(&raw)
}
