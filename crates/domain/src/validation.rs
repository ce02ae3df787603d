use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_LENGTH: usize = 5;
pub const MAX_LENGTH: usize = 280;

pub const ISSUE_TOO_SHORT: &str = "Contenu trop court";
pub const ISSUE_TOO_LONG: &str = "Contenu trop long (max 280 caractères)";
pub const ISSUE_SPAM: &str = "Contenu potentiellement spam";
pub const ISSUE_INAPPROPRIATE: &str = "Contenu potentiellement inapproprié";
pub const ISSUE_REPETITION: &str = "Répétition excessive de caractères";

const SPAM_KEYWORDS: &[&str] = &[
    "viagra", "casino", "promo", "gratuit", "urgent", "cliquez",
    "gagner", "argent facile", "opportunité", "business", "mlm",
];

const INAPPROPRIATE_KEYWORDS: &[&str] = &[
    "connard", "salope", "putain", "merde", "bordel",
    "violence", "tuer", "mort", "suicide", "haine",
];

lazy_static! {
    static ref HATE_PATTERNS: Vec<Regex> = [
        r"(?i)je déteste",
        r"(?i)je hais",
        r"(?i)crève",
        r"(?i)va mourir",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hate pattern is a valid regex"))
    .collect();
    static ref WORD_RUN: Regex = Regex::new(r"\w+").expect("word pattern is a valid regex");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub confidence: f64,
    pub suggested_changes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentValidator;

impl ContentValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, content: &str) -> ValidationResult {
        let mut issues: Vec<String> = Vec::new();
        let mut confidence = 1.0_f64;
        let length = content.chars().count();

        if length < MIN_LENGTH {
            issues.push(ISSUE_TOO_SHORT.to_string());
            confidence -= 0.3;
        }

        if length > MAX_LENGTH {
            issues.push(ISSUE_TOO_LONG.to_string());
            confidence -= 0.5;
        }

        if spam_score(content) > 0.7 {
            issues.push(ISSUE_SPAM.to_string());
            confidence -= 0.4;
        }

        if inappropriate_score(content) > 0.6 {
            issues.push(ISSUE_INAPPROPRIATE.to_string());
            confidence -= 0.6;
        }

        if has_excessive_repetition(content) {
            issues.push(ISSUE_REPETITION.to_string());
            confidence -= 0.2;
        }

        let suggested_changes = suggestions_for(&issues);

        ValidationResult {
            is_valid: issues.is_empty() && confidence > 0.5,
            issues,
            confidence: confidence.max(0.0),
            suggested_changes,
        }
    }
}

pub fn spam_score(content: &str) -> f64 {
    let lower = content.to_lowercase();
    let mut score = 0.0;

    for keyword in SPAM_KEYWORDS {
        if lower.contains(keyword) {
            score += 0.2;
        }
    }

    if longest_char_run(content) >= 5 {
        score += 0.3;
    }

    let length = content.chars().count();
    if length > 0 {
        let upper = content.chars().filter(|c| c.is_ascii_uppercase()).count();
        if upper as f64 / length as f64 > 0.5 {
            score += 0.2;
        }
    }

    if content.contains("http") || content.contains("www.") {
        score += 0.1;
    }

    f64::min(score, 1.0)
}

pub fn inappropriate_score(content: &str) -> f64 {
    let lower = content.to_lowercase();
    let mut score = 0.0;

    for keyword in INAPPROPRIATE_KEYWORDS {
        if lower.contains(keyword) {
            score += 0.3;
        }
    }

    for pattern in HATE_PATTERNS.iter() {
        if pattern.is_match(content) {
            score += 0.2;
        }
    }

    f64::min(score, 1.0)
}

// 连续 4 个相同字符，或同一个词连续出现三次（只隔空白）
pub fn has_excessive_repetition(content: &str) -> bool {
    if longest_char_run(content) >= 4 {
        return true;
    }

    let runs: Vec<_> = WORD_RUN.find_iter(content).collect();
    runs.windows(3).any(|w| {
        let word = w[1].as_str();
        only_whitespace_between(content, w[0].end(), w[1].start())
            && only_whitespace_between(content, w[1].end(), w[2].start())
            && w[0].as_str().ends_with(word)
            && w[2].as_str().starts_with(word)
    })
}

fn only_whitespace_between(content: &str, from: usize, to: usize) -> bool {
    let gap = &content[from..to];
    !gap.is_empty() && gap.chars().all(char::is_whitespace)
}

fn longest_char_run(content: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;

    for ch in content.chars() {
        if ch == '\n' {
            previous = None;
            current = 0;
            continue;
        }
        if Some(ch) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(ch);
        }
        longest = longest.max(current);
    }

    longest
}

fn suggestions_for(issues: &[String]) -> Vec<String> {
    let has = |issue: &str| issues.iter().any(|i| i == issue);
    let mut suggestions = Vec::new();

    if has(ISSUE_TOO_SHORT) {
        suggestions.push("Ajoutez plus de détails à votre message".to_string());
    }
    if has(ISSUE_TOO_LONG) {
        suggestions.push("Raccourcissez votre message".to_string());
    }
    if has(ISSUE_REPETITION) {
        suggestions.push("Évitez de répéter les mêmes caractères".to_string());
    }
    if has(ISSUE_SPAM) {
        suggestions.push("Évitez les termes promotionnels".to_string());
    }
    if has(ISSUE_INAPPROPRIATE) {
        suggestions.push("Utilisez un langage plus respectueux".to_string());
    }

    suggestions
}
