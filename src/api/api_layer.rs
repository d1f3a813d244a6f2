// HTTP adapter layer - thin routing around the core services.
// Nothing in here makes moderation or verification decisions.

#[path = "error.rs"]
pub mod error;

#[path = "gateway.rs"]
pub mod gateway;

#[path = "health.rs"]
pub mod health;

#[path = "moderation.rs"]
pub mod moderation;

#[path = "reply.rs"]
pub mod reply;

#[path = "verification.rs"]
pub mod verification;

pub use gateway::Gateway;
