// Verification domain models - applicant data and verdict structures.
//
// Pure domain types; the api layer moves them across the wire unchanged.

use serde::{Deserialize, Serialize};

/// Applicant profile fields as submitted at registration. Everything is
/// optional; the fallback scorer penalizes what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A named verification criterion with a relative weight.
///
/// Weights are advisory context for the external collaborator; they are
/// not normalized or validated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCriterion {
    pub name: String,
    pub description: String,
    pub weight: f64,
}

/// Severity tier shared by risk factors and the analysis bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityTier::High => write!(f, "high"),
            SeverityTier::Medium => write!(f, "medium"),
            SeverityTier::Low => write!(f, "low"),
        }
    }
}

/// One identified risk. Factors are emitted in check evaluation order, not
/// importance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub description: String,
    pub severity: SeverityTier,
}

/// Final verdict recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    Reject,
    ReviewRequired,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Approve => write!(f, "approve"),
            Recommendation::Reject => write!(f, "reject"),
            Recommendation::ReviewRequired => write!(f, "review_required"),
        }
    }
}

/// Free-form analysis attached to a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationAnalysis {
    pub executive_role_verified: bool,
    pub professional_credibility: SeverityTier,
    pub risk_level: SeverityTier,
    pub notes: String,
}

impl Default for VerificationAnalysis {
    fn default() -> Self {
        // The empty bundle: nothing verified, no credibility evidence, and
        // risk at the fallback scorer's floor (it never reports below
        // medium).
        Self {
            executive_role_verified: false,
            professional_credibility: SeverityTier::Low,
            risk_level: SeverityTier::Medium,
            notes: String::new(),
        }
    }
}

/// Complete applicant-verification verdict. Every verification request
/// receives one of these, whatever happens upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub recommendation: Recommendation,
    pub confidence_score: f64,
    pub risk_factors: Vec<RiskFactor>,
    pub analysis: VerificationAnalysis,
}
