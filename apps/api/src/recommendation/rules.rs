//! Additive point-assignment rules.
//!
//! Each `(question, value)` pair votes for one or more career paths. Pairs not
//! listed here contribute nothing.

pub struct ScoringRule {
    pub question_id: &'static str,
    pub value: &'static str,
    pub increments: &'static [(&'static str, i32)],
}

pub const SCORING_RULES: &[ScoringRule] = &[
    // Field of study
    ScoringRule {
        question_id: "basics_1",
        value: "eng",
        increments: &[
            ("software_dev", 20),
            ("cloud_architect", 20),
            ("cybersecurity", 15),
            ("ai_data", 15),
        ],
    },
    ScoringRule {
        question_id: "basics_1",
        value: "bus",
        increments: &[
            ("project_management", 20),
            ("finance_analyst", 20),
            ("digital_marketing", 15),
        ],
    },
    ScoringRule {
        question_id: "basics_1",
        value: "art",
        increments: &[("uiux_design", 25), ("digital_marketing", 15)],
    },
    // Tools
    ScoringRule {
        question_id: "tech_1",
        value: "js",
        increments: &[("software_dev", 25)],
    },
    ScoringRule {
        question_id: "tech_1",
        value: "py",
        increments: &[("ai_data", 25)],
    },
    ScoringRule {
        question_id: "tech_1",
        value: "cloud",
        increments: &[("cloud_architect", 25)],
    },
    ScoringRule {
        question_id: "art_1",
        value: "uiux",
        increments: &[("uiux_design", 25)],
    },
    ScoringRule {
        question_id: "bus_1",
        value: "fin",
        increments: &[("finance_analyst", 25)],
    },
    ScoringRule {
        question_id: "bus_1",
        value: "mkt",
        increments: &[("digital_marketing", 25)],
    },
    // Soft skills
    ScoringRule {
        question_id: "soft_1",
        value: "analysis",
        increments: &[("ai_data", 10), ("cybersecurity", 10), ("finance_analyst", 10)],
    },
    ScoringRule {
        question_id: "soft_1",
        value: "collab",
        increments: &[("project_management", 15), ("uiux_design", 10)],
    },
    // Goals
    ScoringRule {
        question_id: "goal_1",
        value: "expert",
        increments: &[("software_dev", 10), ("ai_data", 10), ("cloud_architect", 10)],
    },
    ScoringRule {
        question_id: "goal_1",
        value: "manager",
        increments: &[("project_management", 20)],
    },
    // Attitude towards AI
    ScoringRule {
        question_id: "final_5",
        value: "excited",
        increments: &[("ai_data", 15), ("software_dev", 10)],
    },
];

/// Returns the increments for one answer, or an empty slice when no rule matches.
pub fn increments_for(question_id: &str, value: &str) -> &'static [(&'static str, i32)] {
    SCORING_RULES
        .iter()
        .find(|r| r.question_id == question_id && r.value == value)
        .map(|r| r.increments)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::careers::paths::find_career_path;
    use crate::careers::questionnaire::next_step;

    #[test]
    fn test_rules_reference_known_paths() {
        for rule in SCORING_RULES {
            for (path_id, inc) in rule.increments {
                assert!(find_career_path(path_id).is_some(), "unknown path {path_id}");
                assert!(*inc > 0);
            }
        }
    }

    #[test]
    fn test_rules_reference_real_question_options() {
        for rule in SCORING_RULES {
            assert!(
                next_step(rule.question_id, rule.value).is_ok(),
                "{}:{} is not a questionnaire option",
                rule.question_id,
                rule.value
            );
        }
    }

    #[test]
    fn test_unmatched_answer_has_no_increments() {
        assert!(increments_for("tech_1", "none").is_empty());
        assert!(increments_for("unknown", "x").is_empty());
        assert_eq!(increments_for("goal_1", "manager"), &[("project_management", 20)]);
    }
}
