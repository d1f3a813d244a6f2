//! Applicant verification endpoint.

use super::gateway::Gateway;
use crate::core::verification::{UserInfo, VerificationCriterion};
use actix_web::{post, web, Responder};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    pub user_info: UserInfo,
    #[serde(default)]
    pub application_data: Value,
    #[serde(default)]
    pub criteria: Vec<VerificationCriterion>,
}

/// Assess a membership application. Always answers 200 with a complete
/// verdict - collaborator trouble degrades to the fallback path, never to
/// an error response.
#[post("/verify")]
pub async fn verify(
    gateway: web::Data<Gateway>,
    request: web::Json<VerificationRequest>,
) -> impl Responder {
    let request = request.into_inner();

    let verdict = gateway
        .verification
        .verify(&request.user_info, &request.application_data, &request.criteria)
        .await;

    tracing::info!(
        recommendation = %verdict.recommendation,
        confidence_score = verdict.confidence_score,
        risk_factors = verdict.risk_factors.len(),
        "Verification verdict issued"
    );

    web::Json(verdict)
}

/// Configure verification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(verify);
}
