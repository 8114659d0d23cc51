use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gamification::badges::{BadgeId, ProgressionSnapshot};
use crate::profile::models::CareerProfile;
use crate::recommendation::engine::AnswerSet;
use crate::recommendation::report::RecommendationReport;

/// Newest-first timeline entries kept per session.
pub const TIMELINE_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// The single entry written when a session is created.
    Start,
    Assessment,
    Skill,
    Project,
    Course,
    Level,
    Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: Uuid,
    pub kind: TimelineKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything the controller knows about one user session.
///
/// `points` never decreases. `awarded_events` holds the identity keys of
/// point-granting events that must only pay out once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub id: Uuid,
    pub answers: AnswerSet,
    pub profile: CareerProfile,
    pub points: u32,
    pub badges_unlocked: BTreeSet<BadgeId>,
    pub market_visits: u32,
    pub ai_interactions: u32,
    pub awarded_events: BTreeSet<String>,
    pub timeline: Vec<TimelineEvent>,
    pub saved_report: Option<RecommendationReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut state = Self {
            id: Uuid::new_v4(),
            answers: AnswerSet::new(),
            profile: CareerProfile::default(),
            points: 0,
            badges_unlocked: BTreeSet::new(),
            market_visits: 0,
            ai_interactions: 0,
            awarded_events: BTreeSet::new(),
            timeline: Vec::new(),
            saved_report: None,
            created_at: now,
            updated_at: now,
        };
        state.log(
            TimelineKind::Start,
            "Journey started",
            "Joined Masar and started planning your career.",
            now,
        );
        state
    }

    pub fn progression_snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            points: self.points,
            answers_count: self.answers.len(),
            skills_count: self.profile.skills.len(),
            courses_count: self.profile.courses.len(),
            projects_count: self.profile.projects.len(),
            market_visits: self.market_visits,
            ai_interactions: self.ai_interactions,
        }
    }

    pub fn log(
        &mut self,
        kind: TimelineKind,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.timeline.insert(
            0,
            TimelineEvent {
                id: Uuid::new_v4(),
                kind,
                title: title.into(),
                description: description.into(),
                timestamp: now,
            },
        );
        self.timeline.truncate(TIMELINE_CAPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_empty_with_one_event() {
        let state = SessionState::new(Utc::now());
        assert_eq!(state.points, 0);
        assert!(state.badges_unlocked.is_empty());
        assert_eq!(state.timeline.len(), 1);
        assert_eq!(state.timeline[0].kind, TimelineKind::Start);
        assert!(state.timeline.iter().all(|e| e.kind != TimelineKind::Level));
        assert_eq!(state.progression_snapshot(), ProgressionSnapshot::default());
    }

    #[test]
    fn test_timeline_is_newest_first_and_capped() {
        let now = Utc::now();
        let mut state = SessionState::new(now);
        for i in 0..60 {
            state.log(TimelineKind::Skill, format!("skill {i}"), "", now);
        }
        assert_eq!(state.timeline.len(), TIMELINE_CAPACITY);
        assert_eq!(state.timeline[0].title, "skill 59");
    }

    #[test]
    fn test_state_round_trips_camel_case() {
        let state = SessionState::new(Utc::now());
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("badgesUnlocked").is_some());
        assert!(json.get("savedReport").is_some());
        let back: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
