// Verdict synthesizer - turns an advisory response (or its absence) into a
// canonical VerificationVerdict.
//
// Two paths:
// - parse path: pull a single JSON object out of the advisory text and
//   decode it, defaulting absent fields;
// - fallback path: deterministic deduction-only scoring over the
//   applicant's profile completeness.
//
// The embedded-object extraction is fragile by nature, so it lives behind
// one narrow function with an explicit failure signal; the fallback is a
// clean branch, not an exception fallthrough.

use super::verification_models::{
    Recommendation, RiskFactor, SeverityTier, UserInfo, VerificationAnalysis, VerificationVerdict,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallback scoring starts from the midpoint and only deducts.
const BASE_SCORE: f64 = 0.5;
const MISSING_TITLE_PENALTY: f64 = 0.2;
const MISSING_COMPANY_PENALTY: f64 = 0.2;
const MISSING_LINKEDIN_PENALTY: f64 = 0.1;
const PERSONAL_EMAIL_PENALTY: f64 = 0.1;

const APPROVE_THRESHOLD: f64 = 0.7;
const REJECT_THRESHOLD: f64 = 0.3;

/// Consumer email providers that undercut a professional application.
const PERSONAL_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// How much raw advisory text a parse-failure note may carry.
const NOTE_SNIPPET_CHARS: usize = 200;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AdvisoryParseError {
    #[error("no structured object found in advisory text")]
    NoObject,

    #[error("failed to decode advisory object: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("confidence score is not numeric")]
    NonNumericConfidence,
}

// ============================================================================
// SYNTHESIS
// ============================================================================

/// Produce a verdict from the advisory text, or from profile heuristics
/// when the text is absent or unusable.
pub fn synthesize(advisory_text: Option<&str>, user: &UserInfo) -> VerificationVerdict {
    let text = match advisory_text {
        Some(text) => text,
        None => return fallback(user, None),
    };

    match parse_advisory(text) {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::warn!(error = %e, "Advisory verification response unusable, falling back");
            let note = format!(
                "Failed to parse advisory response: {}",
                truncate_chars(text, NOTE_SNIPPET_CHARS)
            );
            fallback(user, Some(note))
        }
    }
}

/// Raw shape of the advisory's embedded verdict. Absent fields default;
/// the confidence score stays a raw value until coercion.
#[derive(Deserialize)]
struct RawAdvisoryVerdict {
    #[serde(default = "default_recommendation")]
    recommendation: Recommendation,
    #[serde(default)]
    confidence_score: Option<Value>,
    #[serde(default)]
    risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    analysis: VerificationAnalysis,
}

fn default_recommendation() -> Recommendation {
    Recommendation::ReviewRequired
}

/// Parse path: locate and decode the single JSON object embedded in the
/// advisory text (the collaborator may wrap it in prose).
///
/// The recommendation is accepted verbatim, even where the confidence
/// score would imply a different one; only the fallback path enforces
/// score-recommendation monotonicity.
pub fn parse_advisory(text: &str) -> Result<VerificationVerdict, AdvisoryParseError> {
    let object = extract_object(text).ok_or(AdvisoryParseError::NoObject)?;
    let raw: RawAdvisoryVerdict = serde_json::from_str(object)?;
    let confidence_score = coerce_confidence(raw.confidence_score.as_ref())?;

    Ok(VerificationVerdict {
        recommendation: raw.recommendation,
        confidence_score: confidence_score.clamp(0.0, 1.0),
        risk_factors: raw.risk_factors,
        analysis: raw.analysis,
    })
}

/// The one narrow, fragile function: first `{` to last `}`.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Numbers and numeric strings coerce; anything else is a failure that
/// routes the whole response to the fallback path.
fn coerce_confidence(value: Option<&Value>) -> Result<f64, AdvisoryParseError> {
    match value {
        None | Some(Value::Null) => Ok(0.5),
        Some(Value::Number(n)) => n.as_f64().ok_or(AdvisoryParseError::NonNumericConfidence),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| AdvisoryParseError::NonNumericConfidence),
        Some(_) => Err(AdvisoryParseError::NonNumericConfidence),
    }
}

// ============================================================================
// FALLBACK PATH
// ============================================================================

/// Deterministic verdict from profile completeness alone.
///
/// Checks run in a fixed order (title, company, network profile, email
/// domain) and risk factors append in that order. Scoring is
/// deduction-only from 0.5, clamped at 0.0, so the derived recommendation
/// always agrees with the score.
pub fn fallback(user: &UserInfo, parse_failure_note: Option<String>) -> VerificationVerdict {
    let mut risk_factors = Vec::new();
    let mut score = BASE_SCORE;

    if !present(&user.title) {
        risk_factors.push(RiskFactor {
            name: "Missing Job Title".to_string(),
            description: "No job title provided".to_string(),
            severity: SeverityTier::High,
        });
        score -= MISSING_TITLE_PENALTY;
    }

    if !present(&user.company) {
        risk_factors.push(RiskFactor {
            name: "Missing Company".to_string(),
            description: "No company information provided".to_string(),
            severity: SeverityTier::High,
        });
        score -= MISSING_COMPANY_PENALTY;
    }

    if !present(&user.linkedin_url) {
        risk_factors.push(RiskFactor {
            name: "Missing LinkedIn".to_string(),
            description: "No LinkedIn profile provided".to_string(),
            severity: SeverityTier::Medium,
        });
        score -= MISSING_LINKEDIN_PENALTY;
    }

    if let Some(domain) = personal_email_domain(&user.email) {
        risk_factors.push(RiskFactor {
            name: "Personal Email".to_string(),
            description: format!("Using personal email domain: {}", domain),
            severity: SeverityTier::Medium,
        });
        score -= PERSONAL_EMAIL_PENALTY;
    }

    let score = score.max(0.0);

    let recommendation = if score >= APPROVE_THRESHOLD {
        Recommendation::Approve
    } else if score <= REJECT_THRESHOLD {
        Recommendation::Reject
    } else {
        Recommendation::ReviewRequired
    };

    let high_count = risk_factors
        .iter()
        .filter(|rf| rf.severity == SeverityTier::High)
        .count();

    let analysis = VerificationAnalysis {
        executive_role_verified: score >= 0.6,
        professional_credibility: if score >= 0.5 {
            SeverityTier::Medium
        } else {
            SeverityTier::Low
        },
        risk_level: if high_count >= 2 {
            SeverityTier::High
        } else {
            SeverityTier::Medium
        },
        notes: parse_failure_note.unwrap_or_else(|| {
            "Fallback analysis performed while the advisory service was unavailable".to_string()
        }),
    };

    VerificationVerdict {
        recommendation,
        confidence_score: score,
        risk_factors,
        analysis,
    }
}

/// A field is present only if it holds a non-empty value.
fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// The consumer domain of the applicant's email, if it has one.
fn personal_email_domain(email: &Option<String>) -> Option<String> {
    let email = email.as_deref().filter(|e| !e.is_empty())?;
    let domain = email.split('@').nth(1)?.to_lowercase();
    PERSONAL_EMAIL_DOMAINS
        .contains(&domain.as_str())
        .then_some(domain)
}

/// Truncate on a character boundary, not a byte offset.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_user() -> UserInfo {
        UserInfo {
            name: Some("Jordan Example".to_string()),
            email: Some("jordan@acme-corp.com".to_string()),
            company: Some("Acme Corp".to_string()),
            title: Some("Chief Operating Officer".to_string()),
            linkedin_url: Some("https://linkedin.com/in/jordanexample".to_string()),
            bio: Some("20 years in operations".to_string()),
            location: Some("Chicago".to_string()),
        }
    }

    fn empty_user_with_email(email: &str) -> UserInfo {
        UserInfo {
            email: Some(email.to_string()),
            ..UserInfo::default()
        }
    }

    // ---- fallback path -----------------------------------------------------

    #[test]
    fn test_fallback_with_complete_profile_scores_exactly_half() {
        let verdict = fallback(&complete_user(), None);

        assert_eq!(verdict.confidence_score, 0.5);
        assert_eq!(verdict.recommendation, Recommendation::ReviewRequired);
        assert!(verdict.risk_factors.is_empty());
        assert!(!verdict.analysis.executive_role_verified);
        assert_eq!(verdict.analysis.professional_credibility, SeverityTier::Medium);
        assert_eq!(verdict.analysis.risk_level, SeverityTier::Medium);
    }

    #[test]
    fn test_fallback_with_nothing_provided_rejects_at_zero() {
        let verdict = fallback(&empty_user_with_email("a@gmail.com"), None);

        assert_eq!(verdict.confidence_score, 0.0);
        assert_eq!(verdict.recommendation, Recommendation::Reject);
        assert_eq!(verdict.analysis.risk_level, SeverityTier::High);
        assert_eq!(verdict.analysis.professional_credibility, SeverityTier::Low);

        // Factors appear in check order: title, company, network profile,
        // email domain.
        let names: Vec<&str> = verdict
            .risk_factors
            .iter()
            .map(|rf| rf.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Missing Job Title",
                "Missing Company",
                "Missing LinkedIn",
                "Personal Email"
            ]
        );
        assert_eq!(verdict.risk_factors[0].severity, SeverityTier::High);
        assert_eq!(verdict.risk_factors[1].severity, SeverityTier::High);
        assert_eq!(verdict.risk_factors[2].severity, SeverityTier::Medium);
        assert_eq!(verdict.risk_factors[3].severity, SeverityTier::Medium);
    }

    #[test]
    fn test_fallback_personal_email_domain_is_named_in_factor() {
        let mut user = complete_user();
        user.email = Some("ceo@YAHOO.com".to_string());

        let verdict = fallback(&user, None);

        assert_eq!(verdict.confidence_score, 0.4);
        assert_eq!(verdict.risk_factors.len(), 1);
        assert_eq!(verdict.risk_factors[0].name, "Personal Email");
        assert!(verdict.risk_factors[0].description.contains("yahoo.com"));
    }

    #[test]
    fn test_fallback_corporate_email_is_not_penalized() {
        let mut user = complete_user();
        user.email = Some("ceo@initech.io".to_string());

        let verdict = fallback(&user, None);
        assert!(verdict.risk_factors.is_empty());
    }

    #[test]
    fn test_fallback_email_without_domain_is_not_penalized() {
        let mut user = complete_user();
        user.email = Some("not-an-address".to_string());

        let verdict = fallback(&user, None);
        assert!(verdict.risk_factors.is_empty());
    }

    #[test]
    fn test_fallback_empty_string_counts_as_missing() {
        let mut user = complete_user();
        user.title = Some(String::new());

        let verdict = fallback(&user, None);
        assert_eq!(verdict.risk_factors.len(), 1);
        assert_eq!(verdict.risk_factors[0].name, "Missing Job Title");
    }

    #[test]
    fn test_fallback_single_high_penalty_lands_on_reject_threshold() {
        let mut user = complete_user();
        user.title = None;

        let verdict = fallback(&user, None);

        assert_eq!(verdict.confidence_score, 0.3);
        assert_eq!(verdict.recommendation, Recommendation::Reject);
        // One high factor is not enough for high risk.
        assert_eq!(verdict.analysis.risk_level, SeverityTier::Medium);
    }

    #[test]
    fn test_fallback_single_medium_penalty_requires_review() {
        let mut user = complete_user();
        user.linkedin_url = None;

        let verdict = fallback(&user, None);

        assert_eq!(verdict.confidence_score, 0.4);
        assert_eq!(verdict.recommendation, Recommendation::ReviewRequired);
    }

    #[test]
    fn test_fallback_score_is_monotone_in_profile_completeness() {
        // Filling in any missing field never lowers the score and never
        // flips approve to reject (or back) in a single step.
        let fill: [fn(&mut UserInfo); 4] = [
            |u| u.title = Some("CFO".to_string()),
            |u| u.company = Some("Initech".to_string()),
            |u| u.linkedin_url = Some("https://linkedin.com/in/x".to_string()),
            |u| u.email = Some("cfo@initech.io".to_string()),
        ];

        for step in fill {
            let sparse = empty_user_with_email("a@gmail.com");
            let before = fallback(&sparse, None);

            let mut improved = sparse.clone();
            step(&mut improved);
            let after = fallback(&improved, None);

            assert!(after.confidence_score >= before.confidence_score);
            let flipped = (before.recommendation == Recommendation::Approve
                && after.recommendation == Recommendation::Reject)
                || (before.recommendation == Recommendation::Reject
                    && after.recommendation == Recommendation::Approve);
            assert!(!flipped);
        }
    }

    #[test]
    fn test_fallback_score_never_leaves_lower_half() {
        for user in [
            complete_user(),
            empty_user_with_email("a@gmail.com"),
            UserInfo::default(),
        ] {
            let verdict = fallback(&user, None);
            assert!(verdict.confidence_score >= 0.0);
            assert!(verdict.confidence_score <= 0.5);
        }
    }

    // ---- parse path --------------------------------------------------------

    #[test]
    fn test_parse_round_trip_preserves_every_field() {
        let advisory = r#"{
            "recommendation": "approve",
            "confidence_score": 0.85,
            "risk_factors": [
                {
                    "name": "Short Tenure",
                    "description": "Less than a year in current role",
                    "severity": "low"
                }
            ],
            "analysis": {
                "executive_role_verified": true,
                "professional_credibility": "high",
                "risk_level": "low",
                "notes": "Strong public footprint"
            }
        }"#;

        let verdict = parse_advisory(advisory).unwrap();

        assert_eq!(verdict.recommendation, Recommendation::Approve);
        assert_eq!(verdict.confidence_score, 0.85);
        assert_eq!(verdict.risk_factors.len(), 1);
        assert_eq!(verdict.risk_factors[0].name, "Short Tenure");
        assert_eq!(verdict.risk_factors[0].severity, SeverityTier::Low);
        assert!(verdict.analysis.executive_role_verified);
        assert_eq!(verdict.analysis.professional_credibility, SeverityTier::High);
        assert_eq!(verdict.analysis.risk_level, SeverityTier::Low);
        assert_eq!(verdict.analysis.notes, "Strong public footprint");
    }

    #[test]
    fn test_parse_finds_object_wrapped_in_prose() {
        let advisory = "Here is my assessment:\n\n\
                        {\"recommendation\": \"reject\", \"confidence_score\": 0.2}\n\n\
                        Let me know if you need more detail.";

        let verdict = parse_advisory(advisory).unwrap();
        assert_eq!(verdict.recommendation, Recommendation::Reject);
        assert_eq!(verdict.confidence_score, 0.2);
    }

    #[test]
    fn test_parse_defaults_absent_fields() {
        let verdict = parse_advisory("{}").unwrap();

        assert_eq!(verdict.recommendation, Recommendation::ReviewRequired);
        assert_eq!(verdict.confidence_score, 0.5);
        assert!(verdict.risk_factors.is_empty());
        assert_eq!(verdict.analysis, VerificationAnalysis::default());
    }

    #[test]
    fn test_parse_coerces_numeric_string_confidence() {
        let verdict = parse_advisory(r#"{"confidence_score": "0.75"}"#).unwrap();
        assert_eq!(verdict.confidence_score, 0.75);
    }

    #[test]
    fn test_parse_clamps_confidence_into_unit_interval() {
        let verdict = parse_advisory(r#"{"confidence_score": 3.5}"#).unwrap();
        assert_eq!(verdict.confidence_score, 1.0);

        let verdict = parse_advisory(r#"{"confidence_score": -0.5}"#).unwrap();
        assert_eq!(verdict.confidence_score, 0.0);
    }

    #[test]
    fn test_parse_accepts_recommendation_verbatim_against_score() {
        // An external verdict keeps its recommendation even when the score
        // would imply a different one; only fallback re-derives.
        let verdict = parse_advisory(r#"{"recommendation": "approve", "confidence_score": 0.1}"#)
            .unwrap();
        assert_eq!(verdict.recommendation, Recommendation::Approve);
        assert_eq!(verdict.confidence_score, 0.1);
    }

    #[test]
    fn test_parse_rejects_non_numeric_confidence() {
        assert!(matches!(
            parse_advisory(r#"{"confidence_score": true}"#),
            Err(AdvisoryParseError::NonNumericConfidence)
        ));
        assert!(matches!(
            parse_advisory(r#"{"confidence_score": "very sure"}"#),
            Err(AdvisoryParseError::NonNumericConfidence)
        ));
    }

    #[test]
    fn test_parse_without_object_fails() {
        assert!(matches!(
            parse_advisory("I could not produce an assessment."),
            Err(AdvisoryParseError::NoObject)
        ));
    }

    // ---- synthesize --------------------------------------------------------

    #[test]
    fn test_synthesize_without_advisory_uses_fallback_notes() {
        let verdict = synthesize(None, &complete_user());

        assert_eq!(verdict.confidence_score, 0.5);
        assert!(verdict.analysis.notes.contains("Fallback analysis"));
    }

    #[test]
    fn test_synthesize_with_unparsable_text_falls_back_with_snippet() {
        let garbage = "x".repeat(500);
        let verdict = synthesize(Some(&garbage), &complete_user());

        // Fallback scoring applied...
        assert_eq!(verdict.confidence_score, 0.5);
        // ...and the note carries at most 200 characters of raw text.
        assert!(verdict.analysis.notes.starts_with("Failed to parse advisory response: "));
        assert!(verdict.analysis.notes.contains(&"x".repeat(200)));
        assert!(!verdict.analysis.notes.contains(&"x".repeat(201)));
    }

    #[test]
    fn test_synthesize_with_parsable_text_uses_parse_path() {
        let verdict = synthesize(
            Some(r#"{"recommendation": "approve", "confidence_score": 0.9}"#),
            &empty_user_with_email("a@gmail.com"),
        );

        // The sparse profile is irrelevant once the advisory verdict parses.
        assert_eq!(verdict.recommendation, Recommendation::Approve);
        assert_eq!(verdict.confidence_score, 0.9);
        assert!(verdict.risk_factors.is_empty());
    }

    #[test]
    fn test_truncate_chars_respects_utf8_boundaries() {
        let text = "é".repeat(300);
        assert_eq!(truncate_chars(&text, 200).chars().count(), 200);
    }
}
