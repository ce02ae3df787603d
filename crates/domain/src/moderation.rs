use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::blacklist::Blacklist;
use crate::models::ModerationResult;

pub const DEFAULT_REJECTION_MESSAGES: &[&str] = &[
    "Yako, ce message est trop chaud pour Gbairai 😅 !",
    "Gbairai c'est pas pour les palabres ! Reviens quand t'es calmé 😎",
    "Eh non ami, on dit pas ça sur Gbairai ! Change ton message 🙏",
    "Frère, ce gbairai là est pas bon ! Trouve autre chose à dire 💭",
    "Ton message est trop fort ! Gbairai c'est pour les bonnes vibes seulement ✨",
    "Ça va pas marcher comme ça ! Écris quelque chose de bien 📝",
    "On peut pas publier ça sur Gbairai ! Essaie avec des mots plus doux 🌸",
];

pub const LOCAL_SUGGESTION: &str = "Utilise des mots plus respectueux pour exprimer ton gbairai";
pub const REMOTE_FALLBACK_SUGGESTION: &str = "Contenu inapproprié détecté par l'IA";

pub trait MessageSelector: Send + Sync {
    // len 不会为 0
    fn pick(&self, len: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl MessageSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

// 测试用：固定下标
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl MessageSelector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

#[derive(Clone)]
pub struct RejectionPolicy {
    messages: Vec<String>,
    selector: Arc<dyn MessageSelector>,
}

impl RejectionPolicy {
    // 传入空列表时使用内置文案
    pub fn new(messages: Vec<String>, selector: Arc<dyn MessageSelector>) -> Self {
        let messages = if messages.is_empty() {
            DEFAULT_REJECTION_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            messages
        };
        Self { messages, selector }
    }

    pub fn with_selector(selector: Arc<dyn MessageSelector>) -> Self {
        Self::new(Vec::new(), selector)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn pick_message(&self) -> String {
        let index = self.selector.pick(self.messages.len()).min(self.messages.len() - 1);
        self.messages[index].clone()
    }
}

impl Default for RejectionPolicy {
    fn default() -> Self {
        Self::with_selector(Arc::new(RandomSelector))
    }
}

impl fmt::Debug for RejectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RejectionPolicy")
            .field("messages", &self.messages.len())
            .finish_non_exhaustive()
    }
}

// 模型审核不可用时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailurePolicy {
    #[default]
    FailOpen,
    FailClosed,
}

#[derive(Debug, Clone, Default)]
pub struct LocalModerator {
    blacklist: Blacklist,
    policy: RejectionPolicy,
}

impl LocalModerator {
    pub fn new(blacklist: Blacklist, policy: RejectionPolicy) -> Self {
        Self { blacklist, policy }
    }

    pub fn policy(&self) -> &RejectionPolicy {
        &self.policy
    }

    pub fn check(&self, content: &str) -> ModerationResult {
        let found = self.blacklist.found_banned_words(content);
        if found.is_empty() {
            return ModerationResult::approved();
        }

        ModerationResult {
            approved: false,
            reason: Some(self.policy.pick_message()),
            found_words: Some(found),
            suggestion: Some(LOCAL_SUGGESTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(index: usize) -> LocalModerator {
        LocalModerator::new(
            Blacklist::new(),
            RejectionPolicy::with_selector(Arc::new(FixedSelector(index))),
        )
    }

    #[test]
    fn blocks_banned_content_with_details() {
        let result = fixed(0).check("je vais te tuer");
        assert!(!result.approved);
        assert_eq!(result.reason.as_deref(), Some(DEFAULT_REJECTION_MESSAGES[0]));
        assert!(result.found_words.unwrap().contains(&"tuer".to_string()));
        assert_eq!(result.suggestion.as_deref(), Some(LOCAL_SUGGESTION));
    }

    #[test]
    fn approves_clean_content() {
        let result = fixed(0).check("Salut, comment ça va aujourd'hui ?");
        assert_eq!(result, ModerationResult::approved());
    }

    #[test]
    fn fixed_selector_wraps() {
        let policy = RejectionPolicy::with_selector(Arc::new(FixedSelector(9)));
        assert_eq!(policy.pick_message(), DEFAULT_REJECTION_MESSAGES[2]);
    }

    #[test]
    fn random_selector_stays_in_range() {
        let policy = RejectionPolicy::default();
        for _ in 0..50 {
            assert!(policy.messages().contains(&policy.pick_message()));
        }
    }

    #[test]
    fn custom_messages_replace_defaults() {
        let policy = RejectionPolicy::new(vec!["Non!".into()], Arc::new(RandomSelector));
        assert_eq!(policy.pick_message(), "Non!");
    }

    #[test]
    fn check_is_idempotent() {
        let moderator = fixed(3);
        assert_eq!(moderator.check("espèce de connard"), moderator.check("espèce de connard"));
    }
}
