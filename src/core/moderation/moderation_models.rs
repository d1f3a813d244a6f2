// Moderation domain models - data structures for content moderation.
//
// These are pure domain types with no HTTP dependencies.
// The api layer converts these to and from wire payloads.

use serde::{Deserialize, Serialize};

/// A post submitted for moderation. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub post_id: u64,
    pub user_id: u64,
    /// Platform pseudonym of the author (e.g. "Peer #0042").
    pub peer_id: String,
    pub content: String,
    #[serde(default)]
    pub room_id: Option<u64>,
    #[serde(default)]
    pub thread_id: Option<u64>,
}

/// The closed violation taxonomy exposed to callers.
///
/// The rule classifier only ever produces the first four; the remaining
/// four are reachable through the advisory classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    Solicitation,
    Pii,
    Harassment,
    Confidential,
    OffTopic,
    Spam,
    IdentityLeak,
    Inappropriate,
}

impl ViolationType {
    /// All taxonomy members, in wire order.
    pub const ALL: [ViolationType; 8] = [
        ViolationType::Solicitation,
        ViolationType::Pii,
        ViolationType::Harassment,
        ViolationType::Confidential,
        ViolationType::OffTopic,
        ViolationType::Spam,
        ViolationType::IdentityLeak,
        ViolationType::Inappropriate,
    ];

    /// Human-readable description shown to moderators.
    pub fn description(&self) -> &'static str {
        match self {
            ViolationType::Solicitation => "Promotion or sales content",
            ViolationType::Pii => "Personal identifiable information",
            ViolationType::Harassment => "Hostile or inappropriate tone",
            ViolationType::Confidential => "Company confidential information",
            ViolationType::OffTopic => "Content unrelated to discussion",
            ViolationType::Spam => "Repeated or automated content",
            ViolationType::IdentityLeak => "Revealing personal identity",
            ViolationType::Inappropriate => "Inappropriate content for professional forum",
        }
    }

    /// Parse the snake_case wire form (used by the user-flag endpoint).
    pub fn parse(value: &str) -> Option<ViolationType> {
        Self::ALL.iter().copied().find(|v| v.to_string() == value)
    }
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViolationType::Solicitation => "solicitation",
            ViolationType::Pii => "pii",
            ViolationType::Harassment => "harassment",
            ViolationType::Confidential => "confidential",
            ViolationType::OffTopic => "off_topic",
            ViolationType::Spam => "spam",
            ViolationType::IdentityLeak => "identity_leak",
            ViolationType::Inappropriate => "inappropriate",
        };
        write!(f, "{}", name)
    }
}

/// A rule-classifier hit: which group matched and its fixed metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationMatch {
    pub violation_type: ViolationType,
    pub severity: u8,
    pub reason: &'static str,
}

/// The verdict returned for every moderation request.
///
/// Invariant: `severity` and `reason` are populated if and only if
/// `flagged` is true. Use the constructors to keep it that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_type: Option<ViolationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ModerationVerdict {
    /// Create a "not flagged" verdict.
    pub fn not_flagged() -> Self {
        Self {
            flagged: false,
            violation_type: None,
            severity: None,
            reason: None,
            confidence: None,
        }
    }

    /// Create a flagged verdict.
    pub fn flagged(
        violation_type: ViolationType,
        severity: u8,
        reason: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            flagged: true,
            violation_type: Some(violation_type),
            severity: Some(severity),
            reason: Some(reason.into()),
            confidence: Some(confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_type_wire_form() {
        assert_eq!(ViolationType::IdentityLeak.to_string(), "identity_leak");
        assert_eq!(
            serde_json::to_string(&ViolationType::OffTopic).unwrap(),
            "\"off_topic\""
        );
    }

    #[test]
    fn test_violation_type_parse_round_trip() {
        for v in ViolationType::ALL {
            assert_eq!(ViolationType::parse(&v.to_string()), Some(v));
        }
        assert_eq!(ViolationType::parse("not_a_violation"), None);
    }

    #[test]
    fn test_verdict_constructors_uphold_invariant() {
        let clean = ModerationVerdict::not_flagged();
        assert!(!clean.flagged);
        assert!(clean.severity.is_none());
        assert!(clean.reason.is_none());

        let hit = ModerationVerdict::flagged(ViolationType::Pii, 4, "pii found", 0.9);
        assert!(hit.flagged);
        assert_eq!(hit.severity, Some(4));
        assert_eq!(hit.reason.as_deref(), Some("pii found"));
    }

    #[test]
    fn test_not_flagged_serializes_without_optional_fields() {
        let json = serde_json::to_string(&ModerationVerdict::not_flagged()).unwrap();
        assert_eq!(json, "{\"flagged\":false}");
    }
}
