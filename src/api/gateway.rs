// Shared application state handed to every handler.
//
// Services are wired once in the composition root and cloned cheaply via
// Arc; absent collaborators stay None and each endpoint decides what that
// means (fallback, rules-only, or 503).

use crate::core::moderation::ModerationService;
use crate::core::reply::ReplyService;
use crate::core::verification::VerificationService;
use crate::infra::ai::{AiModerationClassifier, OpenAiClient};
use crate::infra::notify::PlatformNotifier;
use std::sync::Arc;

pub type Moderation = ModerationService<AiModerationClassifier<OpenAiClient>>;
pub type Verification = VerificationService<OpenAiClient>;
pub type Reply = ReplyService<OpenAiClient>;

#[derive(Clone)]
pub struct Gateway {
    pub moderation: Arc<Moderation>,
    pub verification: Arc<Verification>,
    pub reply: Option<Arc<Reply>>,
    pub notifier: Option<Arc<PlatformNotifier>>,
    pub advisory_configured: bool,
    pub platform_configured: bool,
}
