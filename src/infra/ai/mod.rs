pub mod advisory_classifier;
pub mod openai_client;

pub use advisory_classifier::{AiModerationClassifier, MODERATION_SYSTEM_PROMPT};
pub use openai_client::OpenAiClient;
