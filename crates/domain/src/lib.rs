pub mod blacklist;
mod emotion;
mod error;
mod models;
pub mod moderation;
pub mod threading;
pub mod validation;

pub use blacklist::{Blacklist, WordCategory};
pub use emotion::{EmotionDefinition, EmotionScore, IvoirianDictionary, UNCLASSIFIED};
pub use error::CommentError;
pub use models::{
    Comment, EmotionAnalysisResult, EmotionSuggestion, Gbairai, ModerationResult, NewComment,
    NewGbairai, GBAIRAI_ACTIVE,
};
pub use moderation::{LocalModerator, RejectionPolicy, RemoteFailurePolicy};
pub use threading::{organize_replies, place_reply, ReplyPlacement, ThreadedReply};
pub use validation::{ContentValidator, ValidationResult};
