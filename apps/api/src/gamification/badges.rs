//! Badge table and eligibility predicates.
//!
//! `check_badge_eligibility` has no memory of past awards. It reports every badge
//! whose predicate holds right now; deciding what is *new* is the session
//! controller's job.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    Analyzer,
    SkillBuilder,
    ProjectMaker,
    MarketExplorer,
    Persistent,
    AiEnthusiast,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    /// Display only; unlocking a badge does not add points.
    pub points: u32,
    pub requirement: &'static str,
}

pub const BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::Analyzer,
        name: "Path Analyzer",
        description: "Awarded for completing the in-depth career assessment.",
        points: 50,
        requirement: "complete_questionnaire",
    },
    Badge {
        id: BadgeId::SkillBuilder,
        name: "Skill Builder",
        description: "Awarded for adding a first course or five skills.",
        points: 30,
        requirement: "add_course_or_skills",
    },
    Badge {
        id: BadgeId::ProjectMaker,
        name: "Project Maker",
        description: "Awarded for documenting a first hands-on project.",
        points: 40,
        requirement: "add_project",
    },
    Badge {
        id: BadgeId::MarketExplorer,
        name: "Market Explorer",
        description: "Awarded for exploring the market trends page.",
        points: 20,
        requirement: "visit_market",
    },
    Badge {
        id: BadgeId::Persistent,
        name: "Persistent Professional",
        description: "Awarded for reaching 500 experience points.",
        points: 100,
        requirement: "reach_500_points",
    },
    Badge {
        id: BadgeId::AiEnthusiast,
        name: "AI Enthusiast",
        description: "Awarded for using the AI tools five times.",
        points: 60,
        requirement: "use_ai_features_5_times",
    },
];

pub fn find_badge(id: BadgeId) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

/// The activity counters the predicates look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionSnapshot {
    pub points: u32,
    pub answers_count: usize,
    pub skills_count: usize,
    pub courses_count: usize,
    pub projects_count: usize,
    pub market_visits: u32,
    pub ai_interactions: u32,
}

pub fn check_badge_eligibility(s: &ProgressionSnapshot) -> BTreeSet<BadgeId> {
    let rules = [
        (BadgeId::Analyzer, s.answers_count >= 10),
        (BadgeId::SkillBuilder, s.courses_count >= 1 || s.skills_count >= 5),
        (BadgeId::ProjectMaker, s.projects_count >= 1),
        (BadgeId::MarketExplorer, s.market_visits >= 3),
        (BadgeId::Persistent, s.points >= 500),
        (BadgeId::AiEnthusiast, s.ai_interactions >= 5),
    ];

    rules
        .into_iter()
        .filter_map(|(id, holds)| holds.then_some(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_badges_one_per_id() {
        assert_eq!(BADGES.len(), 6);
        let ids: BTreeSet<_> = BADGES.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(find_badge(BadgeId::Persistent).unwrap().points, 100);
    }

    #[test]
    fn test_badge_ids_serialize_kebab_case() {
        assert_eq!(serde_json::to_string(&BadgeId::SkillBuilder).unwrap(), "\"skill-builder\"");
        assert_eq!(serde_json::to_string(&BadgeId::AiEnthusiast).unwrap(), "\"ai-enthusiast\"");
    }

    #[test]
    fn test_fresh_user_has_no_badges() {
        let s = ProgressionSnapshot {
            answers_count: 5,
            skills_count: 2,
            ..Default::default()
        };
        assert!(check_badge_eligibility(&s).is_empty());
    }

    #[test]
    fn test_each_threshold() {
        let base = ProgressionSnapshot::default();
        let cases = [
            (ProgressionSnapshot { answers_count: 10, ..base }, BadgeId::Analyzer),
            (ProgressionSnapshot { skills_count: 5, ..base }, BadgeId::SkillBuilder),
            (ProgressionSnapshot { courses_count: 1, ..base }, BadgeId::SkillBuilder),
            (ProgressionSnapshot { projects_count: 1, ..base }, BadgeId::ProjectMaker),
            (ProgressionSnapshot { market_visits: 3, ..base }, BadgeId::MarketExplorer),
            (ProgressionSnapshot { points: 500, ..base }, BadgeId::Persistent),
            (ProgressionSnapshot { ai_interactions: 5, ..base }, BadgeId::AiEnthusiast),
        ];
        for (snapshot, expected) in cases {
            let eligible = check_badge_eligibility(&snapshot);
            assert_eq!(eligible, BTreeSet::from([expected]), "{snapshot:?}");
        }
    }

    #[test]
    fn test_just_below_thresholds() {
        let s = ProgressionSnapshot {
            points: 499,
            answers_count: 9,
            skills_count: 4,
            courses_count: 0,
            projects_count: 0,
            market_visits: 2,
            ai_interactions: 4,
        };
        assert!(check_badge_eligibility(&s).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_snapshot() -> impl Strategy<Value = ProgressionSnapshot> {
        (
            0u32..1000,
            0usize..20,
            0usize..10,
            0usize..3,
            0usize..3,
            0u32..10,
            0u32..10,
        )
            .prop_map(|(points, answers, skills, courses, projects, visits, ai)| {
                ProgressionSnapshot {
                    points,
                    answers_count: answers,
                    skills_count: skills,
                    courses_count: courses,
                    projects_count: projects,
                    market_visits: visits,
                    ai_interactions: ai,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_eligibility_is_idempotent(s in arb_snapshot()) {
            prop_assert_eq!(check_badge_eligibility(&s), check_badge_eligibility(&s));
        }

        #[test]
        fn prop_eligibility_is_monotonic(s in arb_snapshot(), bump in 0u32..50) {
            let b = bump as usize;
            let grown = ProgressionSnapshot {
                points: s.points + bump,
                answers_count: s.answers_count + b,
                skills_count: s.skills_count + b,
                courses_count: s.courses_count + b,
                projects_count: s.projects_count + b,
                market_visits: s.market_visits + bump,
                ai_interactions: s.ai_interactions + bump,
            };
            let before = check_badge_eligibility(&s);
            let after = check_badge_eligibility(&grown);
            prop_assert!(before.is_subset(&after), "{:?} ⊄ {:?}", before, after);
        }
    }
}
