//! Recommender: pluggable backends behind one trait.
//!
//! Default: `RuleBasedRecommender` (the deterministic scoring engine).
//! Optional: `LlmRecommender`, which asks the model first and falls back to the
//! rule engine whenever the model is unreachable or answers with a bad shape.
//!
//! `AppState` holds an `Arc<dyn Recommender>`, chosen at startup via config.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::careers::questionnaire::TOTAL_QUESTIONS;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::profile::models::CareerProfile;
use crate::recommendation::engine::{self, AnswerSet, ScoringConfig};
use crate::recommendation::prompts::{build_recommendation_prompt, recommendation_system_prompt};
use crate::recommendation::report::{
    parse_llm_report, Insights, RecommendationReport, ReportParseError,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub profile: Option<CareerProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Rules,
    Llm,
}

/// A report plus the backend that actually produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub report: RecommendationReport,
    pub backend: Backend,
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("recommendation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("invalid recommendation response: {0}")]
    InvalidResponse(#[from] ReportParseError),
}

impl From<LlmError> for RecommendError {
    fn from(e: LlmError) -> Self {
        if e.is_unavailable() {
            RecommendError::ServiceUnavailable(e.to_string())
        } else {
            RecommendError::InvalidResponse(ReportParseError::MissingField("content"))
        }
    }
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        AppError::Llm(e.to_string())
    }
}

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationOutcome, RecommendError>;

    /// Backend that serves requests when nothing goes wrong.
    fn backend(&self) -> Backend;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedRecommender
// ────────────────────────────────────────────────────────────────────────────

pub struct RuleBasedRecommender {
    pub config: ScoringConfig,
}

impl RuleBasedRecommender {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, answers: &AnswerSet) -> RecommendationOutcome {
        RecommendationOutcome {
            report: engine::score(answers, &self.config),
            backend: Backend::Rules,
        }
    }
}

#[async_trait]
impl Recommender for RuleBasedRecommender {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationOutcome, RecommendError> {
        Ok(self.score(&request.answers))
    }

    fn backend(&self) -> Backend {
        Backend::Rules
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRecommender
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRecommender {
    llm: LlmClient,
    fallback: RuleBasedRecommender,
}

impl LlmRecommender {
    pub fn new(llm: LlmClient, config: ScoringConfig) -> Self {
        Self {
            llm,
            fallback: RuleBasedRecommender::new(config),
        }
    }

    async fn ask_model(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationReport, RecommendError> {
        let prompt = build_recommendation_prompt(request.profile.as_ref(), &request.answers);
        let text = self
            .llm
            .call_text(&prompt, &recommendation_system_prompt())
            .await?;
        Ok(parse_llm_report(&text, self.insights())?)
    }

    fn insights(&self) -> Insights {
        Insights {
            market_demand: self.fallback.config.market_demand,
            total_questions: TOTAL_QUESTIONS as u32,
            analysis_timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Keeps a model report, or falls back to the rule engine on any failure.
fn settle(
    attempt: Result<RecommendationReport, RecommendError>,
    fallback: &RuleBasedRecommender,
    answers: &AnswerSet,
) -> RecommendationOutcome {
    match attempt {
        Ok(report) => {
            info!(primary = %report.primary.id, "LLM recommendation accepted");
            RecommendationOutcome {
                report,
                backend: Backend::Llm,
            }
        }
        Err(e) => {
            warn!("LLM recommendation failed, using rule engine: {e}");
            fallback.score(answers)
        }
    }
}

#[async_trait]
impl Recommender for LlmRecommender {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationOutcome, RecommendError> {
        let attempt = self.ask_model(request).await;
        Ok(settle(attempt, &self.fallback, &request.answers))
    }

    fn backend(&self) -> Backend {
        Backend::Llm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::report::RecommendedPath;

    fn eng_js() -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.insert("basics_1".to_string(), "eng".to_string());
        answers.insert("tech_1".to_string(), "js".to_string());
        answers
    }

    #[tokio::test]
    async fn test_rule_based_recommender_scores_answers() {
        let recommender = RuleBasedRecommender::new(ScoringConfig::default());
        let request = RecommendationRequest {
            answers: eng_js(),
            profile: None,
        };

        let outcome = recommender.recommend(&request).await.unwrap();
        assert_eq!(outcome.backend, Backend::Rules);
        assert_eq!(outcome.report.primary.id, "software_dev");
        assert_eq!(outcome.report.primary.compatibility, 85);
    }

    #[test]
    fn test_settle_falls_back_on_unavailable() {
        let fallback = RuleBasedRecommender::new(ScoringConfig::default());
        let attempt = Err(RecommendError::ServiceUnavailable("timeout".to_string()));

        let outcome = settle(attempt, &fallback, &eng_js());
        assert_eq!(outcome.backend, Backend::Rules);
        assert_eq!(outcome.report.primary.id, "software_dev");
    }

    #[test]
    fn test_settle_falls_back_on_invalid_response() {
        let fallback = RuleBasedRecommender::new(ScoringConfig::default());
        let attempt = Err(RecommendError::InvalidResponse(
            ReportParseError::TooFewAlternatives(0),
        ));

        let outcome = settle(attempt, &fallback, &AnswerSet::new());
        assert_eq!(outcome.backend, Backend::Rules);
        assert_eq!(outcome.report.alternatives.len(), 2);
    }

    #[test]
    fn test_settle_keeps_model_report() {
        let fallback = RuleBasedRecommender::new(ScoringConfig::default());
        let path = RecommendedPath {
            id: "data_engineer".to_string(),
            title: "Data Engineer".to_string(),
            description: String::new(),
            skills: vec![],
            certs: vec![],
            salary: String::new(),
            growth: String::new(),
            compatibility: 88,
        };
        let report = RecommendationReport {
            primary: path.clone(),
            alternatives: vec![path.clone(), path],
            insights: Insights {
                market_demand: 85,
                total_questions: 15,
                analysis_timestamp: 0,
            },
            learning_path: vec!["Learn SQL".to_string()],
        };

        let outcome = settle(Ok(report), &fallback, &AnswerSet::new());
        assert_eq!(outcome.backend, Backend::Llm);
        assert_eq!(outcome.report.primary.id, "data_engineer");
    }

    #[test]
    fn test_llm_error_mapping() {
        let unavailable: RecommendError = LlmError::Exhausted { attempts: 3 }.into();
        assert!(matches!(unavailable, RecommendError::ServiceUnavailable(_)));

        let invalid: RecommendError = LlmError::EmptyContent.into();
        assert!(matches!(invalid, RecommendError::InvalidResponse(_)));
    }

    #[test]
    fn test_request_defaults_missing_fields() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.answers.is_empty());
        assert!(request.profile.is_none());
    }
}
