use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

const BANNED_WORDS: &[&str] = &[
    // 法语脏话
    "merde", "putain", "connard", "connasse", "salope", "pute", "enculé", "enculée",
    "con", "conne", "batard", "batarde", "fdp", "ntm", "ta mère", "tamère",
    "nique", "niquer", "baise", "baiser", "suce", "sucer", "chatte", "bite",
    "couille", "couilles", "cul", "chier", "chiasse", "salaud",
    "bordel", "salopard", "saloparde", "encule", "niquez",
    "catin", "trainée", "garce", "ordure", "fumier", "raclure", "vermine",
    // 带重音的变体
    "pétasse", "pédale", "tapette", "enfoiré", "enfoirée", "crétin", "crétine",
    "débile", "abruti", "abrutie", "dégueulasse", "dégueu",
    // 色情
    "porn", "porno", "xxx", "nichons", "tétons", "vagin", "pénis", "phallus",
    "masturbation", "masturber", "orgasme", "éjaculation", "sodomie", "fellation",
    "cunnilingus", "coït", "fornication",
    // 种族与歧视
    "nègre", "négro", "bamboula", "bounty", "bougnoule", "bicot", "raton",
    "youpin", "youpine", "feuj", "ritale", "macaroni", "polak", "schleu",
    "rosbif", "ricain", "amerlock", "métèque", "pédé", "gouine",
    // 暴力
    "tuer", "crever", "buter", "flinguer", "descendre", "assassiner",
    "violer", "viol", "tabasser", "défonce", "défoncer",
    "massacre", "massacrer", "torturer", "torture", "mutiler", "mutilation",
    // 毒品
    "drogue", "cannabis", "haschisch", "marijuana", "cocaïne", "héroïne",
    "ecstasy", "lsd", "speed", "amphétamine", "crack", "méthamphétamine",
    "dealer", "dealeuse", "pusher", "came", "shit", "beuh", "weed",
    // 极端主义
    "terroriste", "attentat", "bombe", "explosif", "kamikaze", "djihad",
    "nazi", "fasciste", "antisémite", "raciste", "xénophobe", "homophobe",
    // 倒读俚语
    "tepu", "teub", "tebé",
    // 英语
    "fuck", "fucking", "shit", "bitch", "asshole", "bastard",
    "dickhead", "motherfucker", "cocksucker", "whore", "slut", "cunt",
    "pussy", "dick", "cock", "balls", "tits", "boobs", "ass", "butt",
    // 打码写法
    "f*ck", "f**k", "sh*t", "sh**", "b*tch", "a**hole",
    "m*rde", "p*tain", "c*n", "s*lope", "enc*lé", "b*tard",
    // 数字替换写法
    "m3rd3", "put41n", "c0n", "s4l0p3", "3nculé", "b4t4rd",
    "fck", "sht", "btch", "4ssh0l3",
    // 被滥用的医学词
    "mongol", "attardé", "autiste", "psychopathe",
    // 政治
    "facho", "facha",
];

const ALLOWED_WORDS: &[&str] = &[
    "bête", "moche", "fou", "folle", "dingue", "malade", "idiot", "idiote",
    "stupide", "imbécile", "affreux", "hideux", "crade", "cracra",
    "porc", "cochon", "chienne", "damn", "hell", "frapper", "cogner",
    "sexe", "seins", "wesh", "wallah", "zarma", "chelou", "relou", "ouf",
    "meuf", "keuf", "keum", "reuf", "reubeu", "rebeu", "feumeu", "tipar",
    "tise", "picole", "cuite", "bourré", "pété", "défoncé", "pourri", "pourrie",
    "pathologie", "maladie", "infection", "virus", "cancer", "sida",
    "handicapé", "handicapée", "invalide", "gaucho", "gauchiste", "droitard",
    "communiste", "capitaliste", "bourgeois", "prolétaire", "révolution", "anarchiste",
    "charogne", "beurk", "pouah", "berk", "répugnant", "écœurant", "nauséabond",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WordCategory {
    Profanity,
    Sexual,
    Violence,
    Drugs,
    Discrimination,
    Mild,
}

impl WordCategory {
    pub const ALL: [WordCategory; 6] = [
        Self::Profanity,
        Self::Sexual,
        Self::Violence,
        Self::Drugs,
        Self::Discrimination,
        Self::Mild,
    ];

    pub fn words(self) -> &'static [&'static str] {
        match self {
            Self::Profanity => &["merde", "putain", "connard", "salope", "pute", "enculé"],
            Self::Sexual => &["sexe", "porn", "porno", "xxx", "masturbation", "orgasme"],
            Self::Violence => &["tuer", "crever", "buter", "violer", "tabasser", "massacre"],
            Self::Drugs => &["drogue", "cannabis", "cocaïne", "héroïne", "dealer", "came"],
            Self::Discrimination => &["nègre", "bougnoule", "youpin", "pédé", "gouine"],
            Self::Mild => &["débile", "idiot", "stupide", "crétin", "imbécile"],
        }
    }
}

impl FromStr for WordCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PROFANITY" => Ok(Self::Profanity),
            "SEXUAL" => Ok(Self::Sexual),
            "VIOLENCE" => Ok(Self::Violence),
            "DRUGS" => Ok(Self::Drugs),
            "DISCRIMINATION" => Ok(Self::Discrimination),
            "MILD" => Ok(Self::Mild),
            other => Err(format!("Unknown word category: {}", other)),
        }
    }
}

// 内置禁词 + 运维配置的自定义词
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    custom: Vec<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let custom = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { custom }
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        BANNED_WORDS
            .iter()
            .copied()
            .chain(self.custom.iter().map(String::as_str))
    }

    pub fn contains_banned_words(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.candidates().any(|word| is_blocked_hit(&lower, word))
    }

    // 子串匹配，不看词边界；白名单只豁免完全相同的词
    pub fn found_banned_words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut found: Vec<String> = Vec::new();
        for word in self.candidates() {
            if is_blocked_hit(&lower, word) && !found.iter().any(|f| f == word) {
                found.push(word.to_string());
            }
        }
        found
    }
}

fn is_blocked_hit(lower_text: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    lower_text.contains(&word) && !is_allowed(&word)
}

fn is_allowed(word: &str) -> bool {
    ALLOWED_WORDS.iter().any(|allowed| allowed.to_lowercase() == word)
}

pub fn contains_banned_words(text: &str, custom_words: &[String]) -> bool {
    Blacklist::with_custom_words(custom_words).contains_banned_words(text)
}

pub fn found_banned_words(text: &str) -> Vec<String> {
    Blacklist::new().found_banned_words(text)
}

lazy_static! {
    // 按列表顺序依次替换，前面的词先被遮住
    static ref CENSOR_PATTERNS: Vec<Regex> = BANNED_WORDS
        .iter()
        .map(|word| {
            Regex::new(&format!("(?i){}", regex::escape(word)))
                .expect("escaped banned word is a valid regex")
        })
        .collect();
}

pub fn censor_text(text: &str, replacement: &str) -> String {
    CENSOR_PATTERNS
        .iter()
        .fold(text.to_string(), |censored, re| {
            re.replace_all(&censored, replacement).into_owned()
        })
}

pub fn check_by_category(text: &str, category: WordCategory) -> bool {
    let lower = text.to_lowercase();
    category
        .words()
        .iter()
        .any(|word| lower.contains(&word.to_lowercase()))
}

pub fn matching_categories(text: &str) -> Vec<WordCategory> {
    WordCategory::ALL
        .into_iter()
        .filter(|c| check_by_category(text, *c))
        .collect()
}
