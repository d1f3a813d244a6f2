// Verification orchestrator - prompt construction, the advisory call, and
// fallback-on-failure.
//
// Callers always receive a complete VerificationVerdict; nothing in here
// raises past this boundary.

use super::verdict_synthesizer::{fallback, synthesize};
use super::verification_models::{UserInfo, VerificationCriterion, VerificationVerdict};
use crate::core::ai::{AiProvider, AiService};
use serde_json::Value;

/// System prompt installed on the reasoning collaborator for verification
/// calls (the composition root passes it to `AiService::new`).
pub const VERIFICATION_SYSTEM_PROMPT: &str = "You are a professional verification specialist \
     for a private executive forum. You provide accurate, conservative assessments with \
     detailed reasoning and confidence scores.";

pub struct VerificationService<P: AiProvider> {
    ai: Option<AiService<P>>,
}

impl<P: AiProvider> VerificationService<P> {
    pub fn new(ai: Option<AiService<P>>) -> Self {
        Self { ai }
    }

    /// Assess a membership application. Always returns a complete verdict.
    ///
    /// The advisory collaborator's raw response goes through the
    /// synthesizer's parse path; any failure (unconfigured, transport
    /// error, timeout) goes straight to the fallback path instead.
    pub async fn verify(
        &self,
        user: &UserInfo,
        application_data: &Value,
        criteria: &[VerificationCriterion],
    ) -> VerificationVerdict {
        tracing::debug!(
            application_fields = application_data.as_object().map(|o| o.len()).unwrap_or(0),
            criteria = criteria.len(),
            "Verifying applicant"
        );

        let ai = match &self.ai {
            Some(ai) => ai,
            None => {
                tracing::warn!("No reasoning collaborator configured, using fallback verification");
                return fallback(user, None);
            }
        };

        let prompt = build_verification_prompt(user, criteria);

        match ai.complete(&prompt).await {
            Ok(response) => synthesize(Some(&response), user),
            Err(e) => {
                tracing::warn!(error = %e, "Advisory verification call failed, using fallback");
                fallback(user, None)
            }
        }
    }
}

/// Build the structured verification prompt: the applicant's fields (absent
/// ones shown as "Not provided") followed by the weighted criteria list.
/// Weights are advisory context for the collaborator, nothing more.
pub fn build_verification_prompt(user: &UserInfo, criteria: &[VerificationCriterion]) -> String {
    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("Not provided")
    }

    let mut prompt = format!(
        "Analyze this membership application for a private forum of C-level executives and \
         provide a detailed assessment.\n\n\
         **User Information:**\n\
         - Name: {}\n\
         - Email: {}\n\
         - Company: {}\n\
         - Title: {}\n\
         - LinkedIn: {}\n\
         - Bio: {}\n\
         - Location: {}\n\n\
         **Verification Criteria:**\n",
        field(&user.name),
        field(&user.email),
        field(&user.company),
        field(&user.title),
        field(&user.linkedin_url),
        field(&user.bio),
        field(&user.location),
    );

    for criterion in criteria {
        prompt.push_str(&format!(
            "- {}: {} (Weight: {})\n",
            criterion.name, criterion.description, criterion.weight
        ));
    }

    prompt.push_str(ANALYSIS_INSTRUCTIONS);

    prompt
}

/// Tail of the verification prompt: instructions, response schema, and
/// approval guidelines.
const ANALYSIS_INSTRUCTIONS: &str = r#"
**Analysis Instructions:**
1. Evaluate if this person appears to be a legitimate C-level executive or equivalent senior leader
2. Check for consistency in professional information
3. Identify any risk factors or red flags
4. Assess the overall credibility and suitability for the platform

**Response Format:**
Provide your analysis in the following JSON format:
{
    "recommendation": "approve|reject|review_required",
    "confidence_score": 0.0-1.0,
    "risk_factors": [
        {
            "name": "Risk factor name",
            "description": "Description of the risk",
            "severity": "high|medium|low"
        }
    ],
    "analysis": {
        "executive_role_verified": true/false,
        "professional_credibility": "high|medium|low",
        "risk_level": "high|medium|low",
        "notes": "Additional analysis notes"
    }
}

**Important Guidelines:**
- Only approve if there's strong evidence of C-level or equivalent executive role
- Reject if there are significant red flags or inconsistencies
- Request review if the case is unclear or borderline
- Be conservative in approvals to maintain platform quality
"#;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ai::{AiConfig, AiMessage};
    use crate::core::verification::verification_models::Recommendation;
    use async_trait::async_trait;
    use std::error::Error;

    struct MockProvider {
        result: Result<String, String>,
    }

    #[async_trait]
    impl AiProvider for MockProvider {
        async fn chat_complete(
            &self,
            _messages: &[AiMessage],
            _config: &AiConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(msg.clone().into()),
            }
        }
    }

    fn service_with(result: Result<String, String>) -> VerificationService<MockProvider> {
        let ai = AiService::new(
            MockProvider { result },
            VERIFICATION_SYSTEM_PROMPT.to_string(),
            AiConfig {
                model: "test-model".to_string(),
                temperature: 0.1,
                max_tokens: Some(1000),
            },
        );
        VerificationService::new(Some(ai))
    }

    fn sparse_user() -> UserInfo {
        UserInfo {
            email: Some("a@gmail.com".to_string()),
            ..UserInfo::default()
        }
    }

    fn criteria() -> Vec<VerificationCriterion> {
        vec![
            VerificationCriterion {
                name: "Executive role".to_string(),
                description: "Title indicates C-level responsibility".to_string(),
                weight: 0.6,
            },
            VerificationCriterion {
                name: "Company footprint".to_string(),
                description: "Employer is a real, operating company".to_string(),
                weight: 0.4,
            },
        ]
    }

    #[tokio::test]
    async fn test_successful_advisory_response_goes_through_parse_path() {
        let svc = service_with(Ok(
            "Assessment follows. {\"recommendation\": \"approve\", \"confidence_score\": 0.9}"
                .to_string(),
        ));

        let verdict = svc
            .verify(&sparse_user(), &serde_json::json!({}), &criteria())
            .await;

        assert_eq!(verdict.recommendation, Recommendation::Approve);
        assert_eq!(verdict.confidence_score, 0.9);
    }

    #[tokio::test]
    async fn test_advisory_failure_returns_complete_fallback_verdict() {
        let svc = service_with(Err("deadline exceeded".to_string()));

        let verdict = svc
            .verify(&sparse_user(), &serde_json::json!({}), &criteria())
            .await;

        // Sparse profile: everything but the (personal) email is missing.
        assert_eq!(verdict.confidence_score, 0.0);
        assert_eq!(verdict.recommendation, Recommendation::Reject);
        assert_eq!(verdict.risk_factors.len(), 4);
        assert!(verdict.analysis.notes.contains("Fallback analysis"));
    }

    #[tokio::test]
    async fn test_unconfigured_collaborator_uses_fallback() {
        let svc: VerificationService<MockProvider> = VerificationService::new(None);

        let verdict = svc
            .verify(&sparse_user(), &serde_json::json!({}), &criteria())
            .await;

        assert_eq!(verdict.recommendation, Recommendation::Reject);
    }

    #[test]
    fn test_prompt_enumerates_fields_and_weighted_criteria() {
        let user = UserInfo {
            name: Some("Sam Example".to_string()),
            title: Some("CTO".to_string()),
            ..UserInfo::default()
        };

        let prompt = build_verification_prompt(&user, &criteria());

        assert!(prompt.contains("- Name: Sam Example"));
        assert!(prompt.contains("- Title: CTO"));
        assert!(prompt.contains("- Company: Not provided"));
        assert!(prompt.contains("- Executive role: Title indicates C-level responsibility (Weight: 0.6)"));
        assert!(prompt.contains("- Company footprint: Employer is a real, operating company (Weight: 0.4)"));
        assert!(prompt.contains("\"recommendation\": \"approve|reject|review_required\""));
    }
}
