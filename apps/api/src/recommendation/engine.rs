//! Deterministic scoring engine.
//!
//! 1. Every career path starts at 0.
//! 2. Each answered `(question, value)` adds the increments from `SCORING_RULES`.
//! 3. compatibility = clamp(raw + 40, 30, 100)
//! 4. Stable sort by raw score descending; ties keep `CAREER_PATHS` order.
//! 5. Rank 1 is the primary recommendation, ranks 2 and 3 the alternatives.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use crate::careers::paths::{CareerPath, CAREER_PATHS};
use crate::careers::questionnaire::TOTAL_QUESTIONS;
use crate::recommendation::report::{
    Insights, RecommendationReport, RecommendedPath, ALTERNATIVES_COUNT,
};
use crate::recommendation::rules::increments_for;

/// Question id → selected option value.
pub type AnswerSet = BTreeMap<String, String>;

pub const BASE_OFFSET: i32 = 40;
pub const MIN_COMPATIBILITY: i32 = 30;
pub const MAX_COMPATIBILITY: i32 = 100;

/// Placeholder shown in `insights.marketDemand` until a real market signal exists.
pub const DEFAULT_MARKET_DEMAND: u32 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub market_demand: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            market_demand: DEFAULT_MARKET_DEMAND,
        }
    }
}

/// Raw per-path scores, in career table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector(Vec<(&'static CareerPath, i32)>);

impl ScoreVector {
    pub fn zeroed() -> Self {
        Self(CAREER_PATHS.iter().map(|p| (p, 0)).collect())
    }

    pub fn add(&mut self, path_id: &str, increment: i32) {
        if let Some((_, score)) = self.0.iter_mut().find(|(p, _)| p.id == path_id) {
            *score += increment;
        }
    }

    pub fn get(&self, path_id: &str) -> Option<i32> {
        self.0.iter().find(|(p, _)| p.id == path_id).map(|(_, s)| *s)
    }

    /// Paths ordered by raw score, highest first. Ties keep table order.
    pub fn ranked(&self) -> Vec<(&'static CareerPath, i32)> {
        let mut ranked = self.0.clone();
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked
    }
}

pub fn compute_scores(answers: &AnswerSet) -> ScoreVector {
    let mut scores = ScoreVector::zeroed();
    for (question_id, value) in answers {
        for (path_id, inc) in increments_for(question_id, value) {
            scores.add(path_id, *inc);
        }
    }
    scores
}

pub fn compatibility(raw_score: i32) -> u32 {
    (raw_score + BASE_OFFSET).clamp(MIN_COMPATIBILITY, MAX_COMPATIBILITY) as u32
}

/// Scores `answers` with the current wall-clock time as the analysis timestamp.
pub fn score(answers: &AnswerSet, config: &ScoringConfig) -> RecommendationReport {
    score_at(answers, config, Utc::now().timestamp_millis())
}

pub fn score_at(
    answers: &AnswerSet,
    config: &ScoringConfig,
    analysis_timestamp: i64,
) -> RecommendationReport {
    let scores = compute_scores(answers);
    let mut ranked = scores
        .ranked()
        .into_iter()
        .map(|(path, raw)| RecommendedPath::from_career_path(path, compatibility(raw)));

    debug!(
        answered = answers.len(),
        scores = ?scores,
        "scored answer set"
    );

    // The career table always holds more than ALTERNATIVES_COUNT + 1 paths.
    let primary = ranked
        .next()
        .unwrap_or_else(|| RecommendedPath::from_career_path(&CAREER_PATHS[0], compatibility(0)));
    let alternatives: Vec<_> = ranked.take(ALTERNATIVES_COUNT).collect();

    RecommendationReport {
        primary,
        alternatives,
        insights: Insights {
            market_demand: config.market_demand,
            total_questions: TOTAL_QUESTIONS as u32,
            analysis_timestamp,
        },
        learning_path: Vec::new(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::careers::questionnaire::QUESTIONS;
    use proptest::prelude::*;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_answer() -> impl Strategy<Value = (String, String)> {
        (0..QUESTIONS.len(), 0..4usize).prop_map(|(qi, oi)| {
            let q = &QUESTIONS[qi];
            let o = &q.options[oi % q.options.len()];
            (q.id.to_string(), o.value.to_string())
        })
    }

    fn arb_answer_set() -> impl Strategy<Value = AnswerSet> {
        prop::collection::vec(arb_answer(), 0..15).prop_map(|v| v.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_compatibility_within_bounds(a in arb_answer_set()) {
            let report = score_at(&a, &ScoringConfig::default(), 0);
            for p in std::iter::once(&report.primary).chain(report.alternatives.iter()) {
                prop_assert!((30..=100).contains(&p.compatibility), "got {}", p.compatibility);
            }
        }

        #[test]
        fn prop_always_two_alternatives(a in arb_answer_set()) {
            let report = score_at(&a, &ScoringConfig::default(), 0);
            prop_assert_eq!(report.alternatives.len(), 2);
        }

        #[test]
        fn prop_ranking_is_descending_and_stable(a in arb_answer_set()) {
            let ranked = compute_scores(&a).ranked();
            for pair in ranked.windows(2) {
                let (pa, sa) = pair[0];
                let (pb, sb) = pair[1];
                prop_assert!(sa >= sb);
                if sa == sb {
                    let ia = CAREER_PATHS.iter().position(|p| p.id == pa.id).unwrap();
                    let ib = CAREER_PATHS.iter().position(|p| p.id == pb.id).unwrap();
                    prop_assert!(ia < ib, "tie between {} and {} out of table order", pa.id, pb.id);
                }
            }
        }

        #[test]
        fn prop_primary_is_distinct_from_alternatives(a in arb_answer_set()) {
            let report = score_at(&a, &ScoringConfig::default(), 0);
            prop_assert!(report.alternatives.iter().all(|p| p.id != report.primary.id));
            prop_assert_ne!(&report.alternatives[0].id, &report.alternatives[1].id);
        }
    }
}
