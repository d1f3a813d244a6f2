//! Peer reply endpoint - the one operation without a fallback path.

use super::error::ApiError;
use super::gateway::Gateway;
use crate::core::moderation::ContentItem;
use crate::core::reply::PeerReply;
use actix_web::{post, web};

/// Generate a contextual peer reply for a thread.
///
/// Unlike moderation and verification there is nothing sensible to fall
/// back to here, so a missing reasoning collaborator is an explicit 503
/// and a failed generation is a 502.
#[post("/reply")]
pub async fn reply(
    gateway: web::Data<Gateway>,
    item: web::Json<ContentItem>,
) -> Result<web::Json<PeerReply>, ApiError> {
    let reply_service = gateway.reply.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("reply generation requires a reasoning collaborator".into())
    })?;

    let reply = reply_service
        .generate(&item)
        .await
        .map_err(|e| ApiError::Upstream(format!("reply generation failed: {}", e)))?;

    Ok(web::Json(reply))
}

/// Configure reply routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(reply);
}
