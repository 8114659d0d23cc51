//! Session controller, the only code that mutates a `SessionState`.
//!
//! Every event goes through `apply_event`:
//! 1. validate and apply the event to the state
//! 2. award its points, at most once per event identity where required
//! 3. re-evaluate badge eligibility and unlock `eligible − unlocked`
//! 4. log level changes and unlocks on the timeline
//!
//! `SessionController` wraps that pure transition with load/save against the
//! session store and serializes concurrent events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::careers::questionnaire::{is_assessment_complete, next_step, QuestionnaireError};
use crate::errors::AppError;
use crate::gamification::badges::{check_badge_eligibility, find_badge, BadgeId};
use crate::gamification::points::{calculate_level, ActionKind, LevelSummary};
use crate::profile::models::{Course, ExperienceLevel, Project};
use crate::profile::validation::{is_not_empty, sanitize, validate_email, validate_full_name};
use crate::recommendation::report::RecommendationReport;
use crate::session::models::{SessionState, TimelineKind};
use crate::session::store::SessionStore;

// ────────────────────────────────────────────────────────────────────────────
// Events and results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub summary: Option<String>,
    pub current_role: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    #[serde(rename_all = "camelCase")]
    AnswerQuestion { question_id: String, value: String },
    CompleteQuestionnaire,
    AddProject { project: Project },
    RemoveProject { id: String },
    AddCourse { course: Course },
    RemoveCourse { id: String },
    AddSkill { skill: String },
    UpdateProfile(ProfileUpdate),
    DailyVisit,
    VisitMarket,
    AiInteraction,
    SaveReport { report: RecommendationReport },
    ShareReport,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),

    #[error("the questionnaire is not finished yet")]
    QuestionnaireIncomplete,

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("there is no saved report to share")]
    NoSavedReport,
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::QuestionnaireIncomplete | SessionError::NoSavedReport => {
                AppError::UnprocessableEntity(e.to_string())
            }
            _ => AppError::Validation(e.to_string()),
        }
    }
}

/// What a single event changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub points_awarded: u32,
    pub summary: LevelSummary,
    pub leveled_up: bool,
    pub newly_unlocked: Vec<BadgeId>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pure transition
// ────────────────────────────────────────────────────────────────────────────

pub fn apply_event(
    state: &mut SessionState,
    event: SessionEvent,
    now: DateTime<Utc>,
) -> Result<Transition, SessionError> {
    let level_before = calculate_level(state.points);
    let today = now.date_naive();

    let points_awarded = match event {
        SessionEvent::AnswerQuestion { question_id, value } => {
            next_step(&question_id, &value)?;
            state.answers.insert(question_id, value);
            0
        }
        SessionEvent::CompleteQuestionnaire => {
            if !is_assessment_complete(&state.answers) {
                return Err(SessionError::QuestionnaireIncomplete);
            }
            derive_profile_from_answers(state);
            let points = award_once(
                state,
                "complete_questionnaire".to_string(),
                ActionKind::CompleteQuestionnaire,
            );
            if points > 0 {
                state.log(
                    TimelineKind::Assessment,
                    "Assessment completed",
                    "Finished the in-depth career questionnaire and received tailored recommendations.",
                    now,
                );
            }
            points
        }
        SessionEvent::AddProject { project } => {
            require_non_empty("project id", &project.id)?;
            require_non_empty("project title", &project.title)?;
            if state.profile.projects.iter().any(|p| p.id == project.id) {
                0
            } else {
                let key = format!("add_project:{}", project.id);
                state.log(TimelineKind::Project, "Project added", project.title.clone(), now);
                state.profile.projects.push(project);
                award_once(state, key, ActionKind::AddProject)
            }
        }
        SessionEvent::RemoveProject { id } => {
            state.profile.projects.retain(|p| p.id != id);
            0
        }
        SessionEvent::AddCourse { course } => {
            require_non_empty("course id", &course.id)?;
            require_non_empty("course name", &course.name)?;
            if state.profile.courses.iter().any(|c| c.id == course.id) {
                0
            } else {
                let key = format!("add_course:{}", course.id);
                state.log(TimelineKind::Course, "Course added", course.name.clone(), now);
                state.profile.courses.push(course);
                award_once(state, key, ActionKind::AddCourse)
            }
        }
        SessionEvent::RemoveCourse { id } => {
            state.profile.courses.retain(|c| c.id != id);
            0
        }
        SessionEvent::AddSkill { skill } => {
            let skill = sanitize(&skill);
            require_non_empty("skill", &skill)?;
            if !state.profile.skills.contains(&skill) {
                state.log(TimelineKind::Skill, "Skill added", skill.clone(), now);
                state.profile.skills.push(skill);
            }
            0
        }
        SessionEvent::UpdateProfile(update) => {
            apply_profile_update(state, update)?;
            0
        }
        SessionEvent::DailyVisit => {
            award_once(state, format!("daily_visit:{today}"), ActionKind::DailyVisit)
        }
        SessionEvent::VisitMarket => {
            state.market_visits += 1;
            award_once(state, format!("visit_market:{today}"), ActionKind::VisitMarket)
        }
        SessionEvent::AiInteraction => {
            state.ai_interactions += 1;
            ActionKind::AiUsage.points()
        }
        SessionEvent::SaveReport { report } => {
            state.saved_report = Some(report);
            0
        }
        SessionEvent::ShareReport => {
            let stamp = state
                .saved_report
                .as_ref()
                .map(|r| r.insights.analysis_timestamp)
                .ok_or(SessionError::NoSavedReport)?;
            award_once(state, format!("share_report:{stamp}"), ActionKind::ShareReport)
        }
    };

    state.points = state.points.saturating_add(points_awarded);
    let newly_unlocked = unlock_new_badges(state, now);

    let level_after = calculate_level(state.points);
    let leveled_up = level_after > level_before;
    if leveled_up {
        state.log(
            TimelineKind::Level,
            format!("Reached level {level_after}"),
            format!("{} experience points earned so far.", state.points),
            now,
        );
    }
    state.updated_at = now;

    Ok(Transition {
        points_awarded,
        summary: LevelSummary::for_points(state.points),
        leveled_up,
        newly_unlocked,
    })
}

/// Returns the action's points the first time `key` is seen, 0 afterwards.
fn award_once(state: &mut SessionState, key: String, kind: ActionKind) -> u32 {
    if state.awarded_events.insert(key) {
        kind.points()
    } else {
        0
    }
}

fn unlock_new_badges(state: &mut SessionState, now: DateTime<Utc>) -> Vec<BadgeId> {
    let eligible = check_badge_eligibility(&state.progression_snapshot());
    let newly: Vec<BadgeId> = eligible
        .difference(&state.badges_unlocked)
        .copied()
        .collect();

    for id in &newly {
        state.badges_unlocked.insert(*id);
        let (title, description) = find_badge(*id)
            .map(|b| (b.name, b.description))
            .unwrap_or(("Badge unlocked", ""));
        state.log(TimelineKind::Badge, title, description, now);
    }
    newly
}

/// Copies questionnaire answers into the profile: tool answers become skills,
/// goal answers become interests and the field-of-study answer sets education.
fn derive_profile_from_answers(state: &mut SessionState) {
    for (question_id, value) in &state.answers {
        if question_id.starts_with("tech_") {
            if !state.profile.skills.contains(value) {
                state.profile.skills.push(value.clone());
            }
        } else if question_id.starts_with("goal_") {
            if !state.profile.interests.contains(value) {
                state.profile.interests.push(value.clone());
            }
        } else if question_id.starts_with("basics_") {
            state.profile.education = value.clone();
        }
    }
}

/// Validates every supplied field before touching the profile, so a rejected
/// update leaves it unchanged.
fn apply_profile_update(
    state: &mut SessionState,
    update: ProfileUpdate,
) -> Result<(), SessionError> {
    if let Some(name) = &update.full_name {
        if !validate_full_name(name) {
            return Err(SessionError::InvalidField {
                field: "fullName",
                reason: "3-50 letters, spaces or dots".to_string(),
            });
        }
    }
    let email = update.email.map(|e| e.trim().to_string());
    if let Some(email) = &email {
        if !validate_email(email) {
            return Err(SessionError::InvalidField {
                field: "email",
                reason: "not a valid address".to_string(),
            });
        }
    }
    if let Some(education) = &update.education {
        require_non_empty("education", education)?;
    }

    let profile = &mut state.profile;
    if let Some(name) = update.full_name {
        profile.full_name = sanitize(&name);
    }
    if let Some(email) = email {
        profile.email = email;
    }
    if let Some(education) = update.education {
        profile.education = sanitize(&education);
    }
    if let Some(summary) = update.summary {
        profile.summary = sanitize(&summary);
    }
    if let Some(role) = update.current_role {
        profile.current_role = sanitize(&role);
    }
    if let Some(level) = update.experience_level {
        profile.experience_level = level;
    }
    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), SessionError> {
    if is_not_empty(value) {
        Ok(())
    } else {
        Err(SessionError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stateful shell
// ────────────────────────────────────────────────────────────────────────────

pub struct SessionController {
    store: Arc<dyn SessionStore>,
    // Held across load → apply → save so two events never interleave.
    write_lock: Mutex<()>,
}

impl SessionController {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn create(&self) -> Result<SessionState, AppError> {
        let state = SessionState::new(Utc::now());
        self.store.save(&state).await?;
        info!(session_id = %state.id, "session created");
        Ok(state)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionState, AppError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn dispatch(
        &self,
        id: Uuid,
        event: SessionEvent,
    ) -> Result<(SessionState, Transition), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut state = self.get(id).await?;
        let transition = apply_event(&mut state, event, Utc::now())?;
        self.store.save(&state).await?;

        if transition.leveled_up || !transition.newly_unlocked.is_empty() {
            info!(
                session_id = %id,
                level = transition.summary.level,
                unlocked = ?transition.newly_unlocked,
                "session progressed"
            );
        }
        Ok((state, transition))
    }
}
