use serde::{Deserialize, Serialize};

pub const UNCLASSIFIED: &str = "inclassable";

// 命中 nouchi 表达时的加成
const NOUCHI_BONUS: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDefinition {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub nouch_expressions: &'static [&'static str],
    pub weight: f64,
}

const EMOTIONS: &[EmotionDefinition] = &[
    EmotionDefinition {
        name: "enjaillé",
        triggers: &[
            "content", "heureux", "joie", "bonheur", "réussi", "gagné", "fête", "bien", "super",
            "génial",
        ],
        nouch_expressions: &[
            "même pas fatigue",
            "c'est chaud",
            "ça gâte pas",
            "on est ensemble",
            "ça va aller",
            "c'est bon",
            "top niveau",
            "ça me fait plaisir",
            "c'est sweet",
            "ça déchire",
            "on est là",
        ],
        weight: 0.8,
    },
    EmotionDefinition {
        name: "nerveux",
        triggers: &[
            "énervé", "furieux", "colère", "marre", "agacé", "insulte", "chauffe", "énerve",
        ],
        nouch_expressions: &[
            "ça me chauffe",
            "j'ai chaud",
            "ça m'énerve",
            "c'est fort",
            "tu me cherches",
            "ça gâte",
            "je suis vexé",
            "ça me saoule",
            "c'est trop là",
            "ça va chauffer",
            "je suis hot",
        ],
        weight: 0.9,
    },
    EmotionDefinition {
        name: "goumin",
        triggers: &[
            "triste", "pleure", "déprimé", "malheureux", "difficile", "problème", "mort", "serré",
        ],
        nouch_expressions: &[
            "j'ai le cœur serré",
            "c'est dur",
            "ça fait mal",
            "je pleure",
            "c'est difficile",
            "ça me touche",
            "je suis down",
            "c'est triste",
            "ça me fait mal",
            "je suis pas bien",
            "c'est compliqué",
        ],
        weight: 0.8,
    },
    EmotionDefinition {
        name: "trop fan",
        triggers: &["amour", "aime", "chéri", "cœur", "romantique", "couple", "manque"],
        nouch_expressions: &[
            "mon dja",
            "ma go",
            "mon bébé",
            "je t'aime",
            "mon cœur",
            "ma chérie",
            "mon amour",
            "tu me manques",
            "ma doudou",
            "on est ensemble",
            "je suis gâté",
            "tu me fais craquer",
        ],
        weight: 0.7,
    },
    EmotionDefinition {
        name: "Mais Ahy?",
        triggers: &[
            "étrange", "bizarre", "suspens", "mystère", "comprends pas", "quoi", "comment",
            "pourquoi",
        ],
        nouch_expressions: &[
            "mais ahy?",
            "c'est comment?",
            "je comprends pas",
            "c'est bizarre",
            "qu'est-ce qui se passe?",
            "c'est quoi ça?",
            "j'ai pas compris",
            "c'est étrange",
            "mais comment?",
            "qu'est-ce que c'est?",
        ],
        weight: 0.6,
    },
    EmotionDefinition {
        name: "Légé",
        triggers: &["calme", "tranquille", "serein", "paisible", "cool", "relax", "zen", "posé"],
        nouch_expressions: &[
            "légé légé",
            "c'est cool",
            "on est tranquille",
            "pas de stress",
            "c'est posé",
            "on gère",
            "c'est zen",
            "tout va bien",
            "on est relax",
            "c'est soft",
        ],
        weight: 0.5,
    },
    EmotionDefinition {
        name: UNCLASSIFIED,
        triggers: &["autre", "différent", "spécial", "unique", "personnalisé"],
        nouch_expressions: &[
            "c'est spécial",
            "c'est unique",
            "c'est différent",
            "c'est particulier",
            "c'est mon truc",
            "c'est personnel",
        ],
        weight: 0.3,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionScore {
    pub emotion: String,
    pub confidence: f64,
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IvoirianDictionary;

impl IvoirianDictionary {
    pub fn new() -> Self {
        Self
    }

    pub fn emotions(&self) -> &'static [EmotionDefinition] {
        EMOTIONS
    }

    pub fn emotion_by_name(&self, name: &str) -> Option<&'static EmotionDefinition> {
        EMOTIONS.iter().find(|e| e.name == name)
    }

    pub fn nouchi_terms(&self) -> Vec<&'static str> {
        let mut terms: Vec<&'static str> = EMOTIONS
            .iter()
            .flat_map(|e| e.nouch_expressions.iter().copied())
            .collect();
        terms.sort_unstable();
        terms.dedup();
        terms
    }

    // 只返回有命中的情绪，分数高的在前；同分保持字典顺序
    pub fn rank(&self, text: &str) -> Vec<EmotionScore> {
        let lower = text.to_lowercase();
        let mut scores: Vec<EmotionScore> = EMOTIONS
            .iter()
            .map(|def| score_emotion(&lower, def))
            .filter(|s| !s.matched_terms.is_empty())
            .collect();
        scores.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scores
    }

    // 没有命中时返回 inclassable / 0.5
    pub fn analyze_text(&self, text: &str) -> EmotionScore {
        self.rank(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| EmotionScore {
                emotion: UNCLASSIFIED.to_string(),
                confidence: 0.5,
                matched_terms: Vec::new(),
            })
    }
}

fn score_emotion(lower_text: &str, def: &EmotionDefinition) -> EmotionScore {
    let mut score = 0.0;
    let mut count = 0usize;
    let mut matched_terms = Vec::new();

    for trigger in def.triggers {
        if lower_text.contains(trigger) {
            score += def.weight;
            count += 1;
            matched_terms.push(trigger.to_string());
        }
    }

    for expr in def.nouch_expressions {
        if lower_text.contains(&expr.to_lowercase()) {
            score += def.weight * NOUCHI_BONUS;
            count += 1;
            matched_terms.push(expr.to_string());
        }
    }

    let confidence = if count > 0 {
        f64::min(score / (count as f64 * 2.0), 1.0)
    } else {
        0.0
    };

    EmotionScore {
        emotion: def.name.to_string(),
        confidence,
        matched_terms,
    }
}
