// This is the entry point of the moderation and response gateway.
//
// **Architecture Overview:**
// - `core/` = Business logic (transport-agnostic)
// - `infra/` = Implementations of core traits (external APIs)
// - `api/` = HTTP-specific adapters (routes, error mapping)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Start the HTTP server

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "api/api_layer.rs"]
mod api;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::api::Gateway;
use crate::config::GatewayConfig;
use crate::core::ai::{AiConfig, AiService};
use crate::core::moderation::{ModerationService, RuleClassifier};
use crate::core::reply::{ReplyService, REPLY_SYSTEM_PROMPT};
use crate::core::verification::{VerificationService, VERIFICATION_SYSTEM_PROMPT};
use crate::infra::ai::{AiModerationClassifier, OpenAiClient, MODERATION_SYSTEM_PROMPT};
use crate::infra::notify::PlatformNotifier;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = GatewayConfig::from_env();
    let bind_addr = config.bind_addr();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.
    // A missing OpenAI key is not fatal: moderation degrades to rules-only,
    // verification to the fallback scorer, and reply generation to a 503.

    let advisory_configured = config.openai_api_key.is_some();
    if !advisory_configured {
        tracing::warn!(
            "OPENAI_API_KEY not set - running with deterministic rules and fallbacks only"
        );
    }

    let advisory_classifier = config.openai_api_key.clone().map(|key| {
        AiModerationClassifier::new(AiService::new(
            OpenAiClient::new(key),
            MODERATION_SYSTEM_PROMPT.to_string(),
            AiConfig {
                model: config.openai_model.clone(),
                temperature: 0.1,
                max_tokens: None,
            },
        ))
    });
    let moderation = Arc::new(ModerationService::new(
        RuleClassifier::new(),
        advisory_classifier,
    ));

    let verification_ai = config.openai_api_key.clone().map(|key| {
        AiService::new(
            OpenAiClient::new(key),
            VERIFICATION_SYSTEM_PROMPT.to_string(),
            AiConfig {
                model: config.openai_model.clone(),
                temperature: 0.1,
                max_tokens: Some(1000),
            },
        )
    });
    let verification = Arc::new(VerificationService::new(verification_ai));

    let reply = config.openai_api_key.clone().map(|key| {
        Arc::new(ReplyService::new(AiService::new(
            OpenAiClient::new(key),
            REPLY_SYSTEM_PROMPT.to_string(),
            AiConfig {
                model: config.reply_model.clone(),
                temperature: 0.7,
                max_tokens: Some(300),
            },
        )))
    });

    // Flag notifications back to the platform need credentials; without
    // them flagged webhook posts are only visible in our logs.
    let notifier = match &config.platform_api_key {
        Some(key) => match PlatformNotifier::new(
            config.platform_base_url.clone(),
            key,
            &config.platform_api_username,
        ) {
            Ok(notifier) => Some(Arc::new(notifier)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build platform notifier, disabling");
                None
            }
        },
        None => {
            tracing::warn!("PLATFORM_API_KEY not set - flag notifications disabled");
            None
        }
    };
    let platform_configured = notifier.is_some();

    let gateway = web::Data::new(Gateway {
        moderation,
        verification,
        reply,
        notifier,
        advisory_configured,
        platform_configured,
    });

    tracing::info!("Starting Peer AI Gateway on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .configure(api::health::configure)
            .configure(api::moderation::configure)
            .configure(api::verification::configure)
            .configure(api::reply::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
