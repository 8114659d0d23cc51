//! Points, levels and the action reward table.

use serde::{Deserialize, Serialize};

pub const POINTS_PER_LEVEL: u32 = 100;

/// Level 1 covers 0–99 points, level 2 covers 100–199, and so on.
pub fn calculate_level(total_points: u32) -> u32 {
    total_points / POINTS_PER_LEVEL + 1
}

/// Points earned inside the current level band, 0–99.
pub fn calculate_progress_to_next_level(total_points: u32) -> u32 {
    total_points % POINTS_PER_LEVEL
}

/// User actions that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CompleteQuestionnaire,
    AddProject,
    AddCourse,
    DailyVisit,
    VisitMarket,
    ShareReport,
    AiUsage,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::CompleteQuestionnaire,
        ActionKind::AddProject,
        ActionKind::AddCourse,
        ActionKind::DailyVisit,
        ActionKind::VisitMarket,
        ActionKind::ShareReport,
        ActionKind::AiUsage,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::CompleteQuestionnaire => "complete_questionnaire",
            ActionKind::AddProject => "add_project",
            ActionKind::AddCourse => "add_course",
            ActionKind::DailyVisit => "daily_visit",
            ActionKind::VisitMarket => "visit_market",
            ActionKind::ShareReport => "share_report",
            ActionKind::AiUsage => "ai_usage",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn points(self) -> u32 {
        match self {
            ActionKind::CompleteQuestionnaire => 50,
            ActionKind::AddProject => 20,
            ActionKind::AddCourse => 15,
            ActionKind::DailyVisit => 10,
            ActionKind::VisitMarket => 5,
            ActionKind::ShareReport => 15,
            ActionKind::AiUsage => 10,
        }
    }
}

/// Points granted for an action tag. Unknown tags grant nothing.
pub fn action_points(tag: &str) -> u32 {
    ActionKind::from_tag(tag).map(ActionKind::points).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub points: u32,
    pub level: u32,
    pub progress: u32,
    pub points_per_level: u32,
}

impl LevelSummary {
    pub fn for_points(points: u32) -> Self {
        Self {
            points,
            level: calculate_level(points),
            progress: calculate_progress_to_next_level(points),
            points_per_level: POINTS_PER_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bands() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(250), 3);
        assert_eq!(calculate_level(550), 6);
    }

    #[test]
    fn test_progress_is_remainder() {
        assert_eq!(calculate_progress_to_next_level(50), 50);
        assert_eq!(calculate_progress_to_next_level(120), 20);
        assert_eq!(calculate_progress_to_next_level(300), 0);
    }

    #[test]
    fn test_action_points_table() {
        assert_eq!(action_points("complete_questionnaire"), 50);
        assert_eq!(action_points("add_project"), 20);
        assert_eq!(action_points("add_course"), 15);
        assert_eq!(action_points("daily_visit"), 10);
        assert_eq!(action_points("visit_market"), 5);
        assert_eq!(action_points("share_report"), 15);
        assert_eq!(action_points("ai_usage"), 10);
    }

    #[test]
    fn test_unknown_action_earns_nothing() {
        assert_eq!(action_points("unknown_action"), 0);
        assert_eq!(action_points(""), 0);
        assert_eq!(action_points("ADD_PROJECT"), 0);
    }

    #[test]
    fn test_tags_round_trip_through_serde_names() {
        for kind in ActionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
            assert_eq!(ActionKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_level_summary() {
        let s = LevelSummary::for_points(275);
        assert_eq!((s.level, s.progress, s.points_per_level), (3, 75, 100));
    }
}
