pub mod reply_service;

pub use reply_service::{PeerReply, ReplyService, REPLY_SYSTEM_PROMPT};
