// Peer reply generation - builds the room-aware persona prompt and runs it
// through the reasoning collaborator.
//
// This is the one operation with no local fallback: without a configured
// collaborator the api layer answers with an explicit service-unavailable
// error instead.

use crate::core::ai::{AiProvider, AiService};
use crate::core::moderation::ContentItem;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// System prompt for the AI peer persona (the composition root passes it
/// to `AiService::new`).
pub const REPLY_SYSTEM_PROMPT: &str =
    "You are Peer AI #0000, a strategic advisor and peer in an executive forum.";

/// A generated peer response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerReply {
    pub content: String,
    pub context_aware: bool,
    pub response_type: String,
}

/// Discussion-room context injected into the reply prompt.
fn room_context(room_id: Option<u64>) -> &'static str {
    match room_id {
        Some(1) => "HR & People - Leadership, talent management, organizational culture",
        Some(2) => "Finance & Capital - Financial strategy, fundraising, M&A",
        Some(3) => "Corporate Strategy - Growth planning, competitive dynamics, transformation",
        Some(4) => "Sales & GTM - Go-to-market strategy, customer acquisition",
        Some(5) => "Mergers & Acquisitions - Due diligence, integration, deal strategy",
        Some(6) => "Leadership & Mental Load - Executive challenges, work-life balance",
        _ => "General executive discussion",
    }
}

pub struct ReplyService<P: AiProvider> {
    ai: AiService<P>,
}

impl<P: AiProvider> ReplyService<P> {
    pub fn new(ai: AiService<P>) -> Self {
        Self { ai }
    }

    /// Generate a contextual peer reply for the given post.
    pub async fn generate(
        &self,
        item: &ContentItem,
    ) -> Result<PeerReply, Box<dyn Error + Send + Sync>> {
        let prompt = build_reply_prompt(&item.content, item.room_id);
        let content = self.ai.complete(&prompt).await?;

        Ok(PeerReply {
            content,
            context_aware: true,
            response_type: "peer_insight".to_string(),
        })
    }
}

fn build_reply_prompt(content: &str, room_id: Option<u64>) -> String {
    format!(
        "You are Peer AI #0000, an AI participant in a private C-level executive forum.\n\
         Provide a thoughtful, strategic response that adds value to this discussion.\n\
         Keep it professional, constructive, and focused on leadership and strategy.\n\n\
         Room context: {}\n\
         Discussion: \"{}\"\n\n\
         Respond as a helpful peer, not as an AI.",
        room_context(room_id),
        content
    )
}
