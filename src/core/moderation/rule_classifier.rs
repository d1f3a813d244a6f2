// Deterministic rule classifier - the pre-filter that runs before any
// advisory call.
//
// Precedence is encoded as an ordered sequence of rule groups, each a set
// of probes plus fixed metadata, evaluated until the first match. The
// order is policy: solicitation first (the platform's most common unwanted
// content), then PII (privacy leaks must flag even inside hostile text),
// then harassment, then confidential.

use super::moderation_models::{ViolationMatch, ViolationType};
use regex::Regex;

/// Fixed confidence attached to a verdict when a deterministic rule is the
/// deciding source.
pub const RULE_CONFIDENCE: f64 = 0.9;

/// How a group's probes are matched against the text.
enum Probes {
    /// Lowercase phrase probes, matched against the lowercased text.
    Phrases(&'static [&'static str]),
    /// Structural patterns matched case-sensitively against the raw text.
    Patterns(Vec<Regex>),
}

/// One named checker: probes plus the fixed verdict metadata for a hit.
struct RuleGroup {
    violation_type: ViolationType,
    severity: u8,
    reason: &'static str,
    probes: Probes,
}

impl RuleGroup {
    fn matches(&self, raw: &str, lowered: &str) -> bool {
        match &self.probes {
            Probes::Phrases(phrases) => phrases.iter().any(|p| lowered.contains(p)),
            Probes::Patterns(patterns) => patterns.iter().any(|p| p.is_match(raw)),
        }
    }
}

const SOLICITATION_PHRASES: &[&str] = &[
    "connect you with",
    "business opportunity",
    "let me introduce you to",
    "sales pitch",
    "promotional offer",
    "investment opportunity",
    "get rich quick",
    "make money fast",
];

const HARASSMENT_PHRASES: &[&str] = &[
    "you're an idiot",
    "you're all stupid",
    "this is worthless",
    "shut up",
    "you're incompetent",
    "this is garbage",
];

const CONFIDENTIAL_PHRASES: &[&str] = &[
    "confidential",
    "internal only",
    "not for public",
    "company secret",
    "proprietary information",
];

// Email, phone (dashed/dotted separators optional), US SSN, ZIP+4.
const PII_PATTERNS: &[&str] = &[
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
    r"\b\d{3}-\d{2}-\d{4}\b",
    r"\b\d{5}[-.]?\d{4}\b",
];

/// Ordered pattern-based classifier over the deterministic taxonomy subset.
pub struct RuleClassifier {
    groups: Vec<RuleGroup>,
}

impl RuleClassifier {
    pub fn new() -> Self {
        let pii_patterns = PII_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("built-in PII pattern must compile"))
            .collect();

        // Evaluation order is fixed policy - do not reorder.
        let groups = vec![
            RuleGroup {
                violation_type: ViolationType::Solicitation,
                severity: 3,
                reason: "Contains promotional or sales content",
                probes: Probes::Phrases(SOLICITATION_PHRASES),
            },
            RuleGroup {
                violation_type: ViolationType::Pii,
                severity: 4,
                reason: "Contains personal identifiable information",
                probes: Probes::Patterns(pii_patterns),
            },
            RuleGroup {
                violation_type: ViolationType::Harassment,
                severity: 5,
                reason: "Contains hostile or inappropriate language",
                probes: Probes::Phrases(HARASSMENT_PHRASES),
            },
            RuleGroup {
                violation_type: ViolationType::Confidential,
                severity: 4,
                reason: "Contains confidential or proprietary information",
                probes: Probes::Phrases(CONFIDENTIAL_PHRASES),
            },
        ];

        Self { groups }
    }

    /// Evaluate the text against every group in order and return the first
    /// match, or `None` when nothing matches.
    ///
    /// `None` means "no rule fired", not "not flagged" - the caller decides
    /// whether to delegate to an advisory classifier or return a benign
    /// verdict. Empty or whitespace-only text short-circuits before any
    /// probe runs.
    pub fn classify(&self, text: &str) -> Option<ViolationMatch> {
        if text.trim().is_empty() {
            return None;
        }

        let lowered = text.to_lowercase();

        self.groups
            .iter()
            .find(|g| g.matches(text, &lowered))
            .map(|g| ViolationMatch {
                violation_type: g.violation_type,
                severity: g.severity,
                reason: g.reason,
            })
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}
