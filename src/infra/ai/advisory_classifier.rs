// Advisory moderation classifier - asks the reasoning collaborator for a
// structured verdict on content the rule classifier passed over.
//
// A response that fails to decode is an error, not a clean verdict; the
// moderation orchestrator owns the fail-open decision.

use crate::core::ai::{AiProvider, AiService};
use crate::core::moderation::{AdvisoryClassifier, ModerationVerdict, ViolationType};
use async_trait::async_trait;
use std::error::Error;

/// System prompt for advisory moderation calls (the composition root
/// passes it to `AiService::new`).
pub const MODERATION_SYSTEM_PROMPT: &str =
    "You are a content moderator for a professional executive forum. Be strict but fair.";

pub struct AiModerationClassifier<P: AiProvider> {
    ai: AiService<P>,
}

impl<P: AiProvider> AiModerationClassifier<P> {
    pub fn new(ai: AiService<P>) -> Self {
        Self { ai }
    }
}

fn build_moderation_prompt(content: &str) -> String {
    let mut taxonomy = String::new();
    for violation_type in ViolationType::ALL {
        taxonomy.push_str(&format!(
            "    {} ({})\n",
            violation_type,
            violation_type.description()
        ));
    }

    format!(
        "Analyze this post for violations. Return JSON with:\n\
         - flagged: boolean\n\
         - violation_type: string, one of:\n{}\
         - severity: integer (1-5, 5 being most severe)\n\
         - reason: string\n\
         - confidence: float (0-1)\n\n\
         Post content: \"{}\"",
        taxonomy, content
    )
}

#[async_trait]
impl<P: AiProvider> AdvisoryClassifier for AiModerationClassifier<P> {
    async fn classify_advisory(
        &self,
        text: &str,
    ) -> Result<ModerationVerdict, Box<dyn Error + Send + Sync>> {
        let prompt = build_moderation_prompt(text);
        let response = self.ai.complete(&prompt).await?;

        let verdict: ModerationVerdict = serde_json::from_str(response.trim()).map_err(|e| {
            format!("advisory moderation response did not decode as a verdict: {}", e)
        })?;

        tracing::debug!(
            flagged = verdict.flagged,
            violation_type = ?verdict.violation_type,
            "Advisory moderation verdict received"
        );

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ai::AiConfig;
    use crate::core::moderation::ViolationType;

    struct MockProvider {
        response: String,
    }

    #[async_trait]
    impl AiProvider for MockProvider {
        async fn chat_complete(
            &self,
            _messages: &[crate::core::ai::AiMessage],
            _config: &AiConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            Ok(self.response.clone())
        }
    }

    fn classifier(response: &str) -> AiModerationClassifier<MockProvider> {
        AiModerationClassifier::new(AiService::new(
            MockProvider {
                response: response.to_string(),
            },
            MODERATION_SYSTEM_PROMPT.to_string(),
            AiConfig {
                model: "test-model".to_string(),
                temperature: 0.1,
                max_tokens: None,
            },
        ))
    }

    #[tokio::test]
    async fn test_well_formed_json_verdict_decodes() {
        let verdict = classifier(
            r#"{"flagged": true, "violation_type": "off_topic", "severity": 2,
                "reason": "Unrelated to the discussion", "confidence": 0.7}"#,
        )
        .classify_advisory("pizza?")
        .await
        .unwrap();

        assert!(verdict.flagged);
        assert_eq!(verdict.violation_type, Some(ViolationType::OffTopic));
        assert_eq!(verdict.severity, Some(2));
    }

    #[tokio::test]
    async fn test_prose_wrapped_response_is_an_error_not_a_verdict() {
        let result = classifier("Sure! Here's my verdict: it's fine.")
            .classify_advisory("pizza?")
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_moderation_prompt_lists_full_taxonomy() {
        let prompt = build_moderation_prompt("some post");
        for name in [
            "solicitation",
            "pii",
            "harassment",
            "confidential",
            "off_topic",
            "spam",
            "identity_leak",
            "inappropriate",
        ] {
            assert!(prompt.contains(name), "taxonomy member {name} missing");
        }
        assert!(prompt.contains("solicitation (Promotion or sales content)"));
        assert!(prompt.contains("Post content: \"some post\""));
    }
}
