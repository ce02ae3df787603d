use std::sync::Arc;

use anyhow::Result;
use domain::{EmotionAnalysisResult, EmotionSuggestion, IvoirianDictionary};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::common::json::parse_model_json;
use crate::traits::{ChatCompletion, ChatRequest};

pub const DEFAULT_LANGUAGE: &str = "fr-ci";

// 低于等于该值的模型结果不采用
const REMOTE_CONFIDENCE_THRESHOLD: f64 = 0.6;

const LOCAL_SUGGESTION_LIMIT: usize = 3;

const ANALYSIS_TITLE: &str = "Gbairai App";

const ANALYSIS_SYSTEM_PROMPT: &str = "Tu es un expert en analyse d'émotions pour le contexte ivoirien. Analyse les textes en français et en nouchi (argot ivoirien).";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteAnalysis {
    emotion: String,
    confidence: f64,
    #[serde(default)]
    local_terms: Vec<String>,
    #[serde(default)]
    suggestions: Vec<serde_json::Value>,
}

fn in_unit_range(confidence: f64) -> bool {
    (0.0..=1.0).contains(&confidence)
}

pub struct EmotionAnalysisService {
    dictionary: IvoirianDictionary,
    provider: Option<Arc<dyn ChatCompletion>>,
}

impl EmotionAnalysisService {
    pub fn new(dictionary: IvoirianDictionary, provider: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self {
            dictionary,
            provider,
        }
    }

    pub fn dictionary(&self) -> &IvoirianDictionary {
        &self.dictionary
    }

    // 不会失败：模型出任何问题都退回本地字典
    pub async fn analyze(&self, text: &str, language: &str) -> EmotionAnalysisResult {
        if let Some(provider) = &self.provider {
            match analyze_remotely(provider.as_ref(), text, language).await {
                Ok(result) if result.confidence > REMOTE_CONFIDENCE_THRESHOLD => return result,
                Ok(result) => debug!(
                    "Remote analysis too unsure ({:.2} for {}), using dictionary",
                    result.confidence, result.emotion
                ),
                Err(e) => warn!("Remote emotion analysis failed: {:#}", e),
            }
        }

        self.analyze_locally(text)
    }

    pub fn analyze_locally(&self, text: &str) -> EmotionAnalysisResult {
        let ranked = self.dictionary.rank(text);
        let best = self.dictionary.analyze_text(text);

        let suggestions = ranked
            .into_iter()
            .take(LOCAL_SUGGESTION_LIMIT)
            .map(|score| EmotionSuggestion {
                reasoning: format!("Mots détectés: {}", score.matched_terms.join(", ")),
                emotion: score.emotion,
                confidence: score.confidence,
            })
            .collect();

        EmotionAnalysisResult {
            emotion: best.emotion,
            confidence: best.confidence,
            local_terms: best.matched_terms,
            suggestions,
        }
    }
}

async fn analyze_remotely(
    provider: &dyn ChatCompletion,
    text: &str,
    language: &str,
) -> Result<EmotionAnalysisResult> {
    let request = ChatRequest {
        title: ANALYSIS_TITLE.to_string(),
        system: ANALYSIS_SYSTEM_PROMPT.to_string(),
        user: build_analysis_prompt(text, language),
        max_tokens: 300,
        temperature: 0.1,
    };

    let raw = provider.complete(request).await?;
    let parsed: RemoteAnalysis = parse_model_json(&raw)?;
    if !in_unit_range(parsed.confidence) {
        anyhow::bail!("Model confidence out of range: {}", parsed.confidence);
    }

    // 单条建议格式不对就丢掉，不影响主结果
    let mut suggestions: Vec<EmotionSuggestion> = parsed
        .suggestions
        .into_iter()
        .filter_map(|v| serde_json::from_value::<EmotionSuggestion>(v).ok())
        .filter(|s| in_unit_range(s.confidence))
        .collect();
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    Ok(EmotionAnalysisResult {
        emotion: parsed.emotion,
        confidence: parsed.confidence,
        local_terms: parsed.local_terms,
        suggestions,
    })
}

fn build_analysis_prompt(text: &str, language: &str) -> String {
    format!(
        r#"Analyse l'émotion principale de ce texte (langue: {language}) en tenant compte du contexte ivoirien et des expressions nouchi :

"{text}"

Émotions possibles : enjaillé, nerveux, goumin, trop fan, Mais Ahy?, Légé, inclassable

Réponds au format JSON :
{{
  "emotion": "emotion_detectee",
  "confidence": 0.85,
  "reasoning": "explication courte",
  "localTerms": ["termes", "nouchi", "detectes"],
  "suggestions": [
    {{ "emotion": "enjaillé", "confidence": 0.85, "reasoning": "Présence de termes positifs" }},
    {{ "emotion": "Légé", "confidence": 0.3, "reasoning": "Ton posé du message" }}
  ]
}}

Prends en compte les expressions ivoiriennes typiques :
- "Même pas fatigue" = confiance, joie (enjaillé)
- "Ça va aller" = espoir, calme
- "Ça me chauffe" = colère, énervement (nerveux)
- "J'ai le cœur serré" = tristesse (goumin)
- "Mon dja" = amour, affection (trop fan)
- "Gbagba" = problème, suspens (Mais Ahy?)
"#
    )
}
