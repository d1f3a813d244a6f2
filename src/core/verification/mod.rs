// Core verification module - verdict synthesizer and orchestrator.
// Following the same pattern as the moderation module.

pub mod verdict_synthesizer;
pub mod verification_models;
pub mod verification_service;

pub use verdict_synthesizer::*;
pub use verification_models::*;
pub use verification_service::*;
