//! Moderation endpoints: synchronous moderation, the deferred webhook
//! entry point, and user-flag creation.

use super::error::ApiError;
use super::gateway::Gateway;
use crate::core::moderation::{ContentItem, ModerationVerdict, ViolationType};
use actix_web::{post, web, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Inbound platform event. Carries the same post fields as `ContentItem`
/// plus the event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// "post_created", "post_edited", "user_flagged"
    pub event_type: String,
    pub post_id: u64,
    pub user_id: u64,
    pub peer_id: String,
    pub content: String,
    #[serde(default)]
    pub room_id: Option<u64>,
    #[serde(default)]
    pub thread_id: Option<u64>,
    #[serde(default)]
    pub flag_reason: Option<String>,
}

impl WebhookPayload {
    fn into_content_item(self) -> ContentItem {
        ContentItem {
            post_id: self.post_id,
            user_id: self.user_id,
            peer_id: self.peer_id,
            content: self.content,
            room_id: self.room_id,
            thread_id: self.thread_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub post: ContentItem,
    pub violation_type: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct FlagResponse {
    pub success: bool,
    pub flag_id: String,
    pub violation_type: ViolationType,
    pub reason: String,
}

/// Synchronous moderation. The verdict comes back to the caller directly;
/// this is the entry point for callers that need the outcome now.
#[post("/moderate")]
pub async fn moderate(
    gateway: web::Data<Gateway>,
    item: web::Json<ContentItem>,
) -> impl Responder {
    let verdict = gateway.moderation.moderate(&item).await;
    web::Json(verdict)
}

/// Deferred moderation for inbound platform events.
///
/// Acknowledges immediately with a not-flagged verdict and runs the real
/// moderation after this request completes; a flagged outcome is only
/// observable through the notifier side-channel.
#[post("/webhook")]
pub async fn webhook(
    gateway: web::Data<Gateway>,
    payload: web::Json<WebhookPayload>,
) -> impl Responder {
    let payload = payload.into_inner();
    tracing::info!(
        event_type = %payload.event_type,
        post_id = payload.post_id,
        flag_reason = ?payload.flag_reason,
        "Received webhook"
    );

    let gateway = gateway.get_ref().clone();
    tokio::spawn(async move {
        process_deferred_moderation(gateway, payload.into_content_item()).await;
    });

    web::Json(ModerationVerdict::not_flagged())
}

/// The background half of the webhook flow: moderate, then report a
/// flagged verdict back to the platform. Notifier failures are logged,
/// never propagated - the flag still exists in our logs.
async fn process_deferred_moderation(gateway: Gateway, item: ContentItem) {
    let verdict = gateway.moderation.moderate(&item).await;

    if !verdict.flagged {
        return;
    }

    tracing::info!(
        post_id = item.post_id,
        peer_id = %item.peer_id,
        violation_type = ?verdict.violation_type,
        "Deferred moderation flagged post"
    );

    if let Some(notifier) = &gateway.notifier {
        use crate::core::moderation::FlagNotifier;
        if let Err(e) = notifier.notify_flag(item.post_id, &verdict).await {
            tracing::warn!(post_id = item.post_id, error = %e, "Flag notification failed");
        }
    }
}

/// Record a user-raised flag. Validates the violation type against the
/// closed taxonomy and returns a timestamped flag id.
#[post("/flag")]
pub async fn flag(payload: web::Json<FlagRequest>) -> Result<web::Json<FlagResponse>, ApiError> {
    let payload = payload.into_inner();

    let violation_type = ViolationType::parse(&payload.violation_type).ok_or_else(|| {
        ApiError::BadRequest(format!("Invalid violation type: {}", payload.violation_type))
    })?;

    tracing::info!(
        post_id = payload.post.post_id,
        user_id = payload.post.user_id,
        violation_type = %violation_type,
        reason = %payload.reason,
        "User flag created"
    );

    Ok(web::Json(FlagResponse {
        success: true,
        flag_id: format!("flag_{}_{}", payload.post.post_id, Utc::now().timestamp()),
        violation_type,
        reason: payload.reason,
    }))
}

/// Configure moderation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(moderate).service(webhook).service(flag);
}
