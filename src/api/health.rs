//! Health check endpoints

use super::gateway::Gateway;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct ServiceBanner {
    pub service: String,
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub openai_configured: bool,
    pub platform_configured: bool,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub openai: String,
    pub platform: String,
}

/// Service banner / liveness check.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceBanner {
        service: "Peer AI Gateway".to_string(),
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Detailed health check reporting collaborator configuration.
#[get("/health")]
pub async fn health(gateway: web::Data<Gateway>) -> impl Responder {
    fn configured(yes: bool) -> String {
        if yes { "configured" } else { "missing" }.to_string()
    }

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        openai_configured: gateway.advisory_configured,
        platform_configured: gateway.platform_configured,
        services: ServiceHealth {
            openai: configured(gateway.advisory_configured),
            platform: configured(gateway.platform_configured),
        },
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root).service(health);
}
