// Core moderation module - rule classifier and orchestrator.

pub mod moderation_models;
pub mod moderation_service;
pub mod rule_classifier;

pub use moderation_models::*;
pub use moderation_service::*;
pub use rule_classifier::*;
