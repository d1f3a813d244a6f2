// Moderation orchestrator - core business logic for content moderation.
//
// Sequencing is fixed: empty-content short circuit, then the deterministic
// rule classifier, then (optionally) the advisory classifier. Deterministic
// rules are authoritative and are never overridden by an advisory opinion.
//
// NO HTTP dependencies here - just pure domain logic plus collaborator
// ports.

use super::moderation_models::{ContentItem, ModerationVerdict};
use super::rule_classifier::{RuleClassifier, RULE_CONFIDENCE};
use async_trait::async_trait;
use std::error::Error;

// ============================================================================
// COLLABORATOR PORTS
// ============================================================================

/// External advisory classification collaborator.
///
/// A failure here must be distinguishable from a legitimate not-flagged
/// verdict, so the orchestrator can fail open instead of trusting noise.
#[async_trait]
pub trait AdvisoryClassifier: Send + Sync {
    async fn classify_advisory(
        &self,
        text: &str,
    ) -> Result<ModerationVerdict, Box<dyn Error + Send + Sync>>;
}

/// Side-channel notifier for flagged content (webhook back to the
/// platform). Best-effort: callers log failures and move on.
#[async_trait]
pub trait FlagNotifier: Send + Sync {
    async fn notify_flag(&self, post_id: u64, verdict: &ModerationVerdict) -> anyhow::Result<()>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service sequencing the rule classifier and the optional
/// advisory collaborator.
pub struct ModerationService<A: AdvisoryClassifier> {
    classifier: RuleClassifier,
    advisory: Option<A>,
}

impl<A: AdvisoryClassifier> ModerationService<A> {
    pub fn new(classifier: RuleClassifier, advisory: Option<A>) -> Self {
        Self {
            classifier,
            advisory,
        }
    }

    /// Moderate a post. Always returns a complete verdict, never an error.
    ///
    /// Advisory failures are caught here and converted to a not-flagged
    /// verdict: availability over precision. The failure is logged, never
    /// raised to the caller.
    pub async fn moderate(&self, item: &ContentItem) -> ModerationVerdict {
        if item.content.trim().is_empty() {
            return ModerationVerdict::not_flagged();
        }

        if let Some(hit) = self.classifier.classify(&item.content) {
            tracing::info!(
                post_id = item.post_id,
                violation_type = %hit.violation_type,
                severity = hit.severity,
                "Rule classifier flagged post"
            );
            return ModerationVerdict::flagged(
                hit.violation_type,
                hit.severity,
                hit.reason,
                RULE_CONFIDENCE,
            );
        }

        let advisory = match &self.advisory {
            Some(advisory) => advisory,
            None => return ModerationVerdict::not_flagged(),
        };

        // The advisory verdict is returned as-is; its internal consistency
        // is the collaborator's problem, not ours.
        match advisory.classify_advisory(&item.content).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(
                    post_id = item.post_id,
                    error = %e,
                    "Advisory classification failed, failing open"
                );
                ModerationVerdict::not_flagged()
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
