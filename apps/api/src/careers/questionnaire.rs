//! Branching questionnaire definition.
//!
//! Each option either points at the next question or ends the flow. The scoring
//! engine never walks this graph; it only consumes the flattened answer map.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::recommendation::engine::AnswerSet;

pub const ENTRY_QUESTION_ID: &str = "basics_1";

/// Answering this question finishes the assessment.
pub const FINAL_QUESTION_ID: &str = "final_5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Question(&'static str),
    End,
}

impl Serialize for NextStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NextStep::Question(id) => serializer.serialize_str(id),
            NextStep::End => serializer.serialize_str("END"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub next: NextStep,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub description: &'static str,
    pub tooltip: &'static str,
    pub options: &'static [QuestionOption],
}

#[derive(Debug, Error, PartialEq)]
pub enum QuestionnaireError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("'{value}' is not an option of question '{question_id}'")]
    InvalidOption { question_id: String, value: String },
}

const fn opt(value: &'static str, label: &'static str, next: NextStep) -> QuestionOption {
    QuestionOption { value, label, next }
}

use NextStep::{End, Question as Q};

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "basics_1",
        text: "What is your main field of study?",
        description: "Your academic background sets the starting point of your path.",
        tooltip: "Your major is a cornerstone but not a barrier; it is matched against your technical interests later.",
        options: &[
            opt("eng", "Engineering and technical sciences", Q("tech_1")),
            opt("bus", "Business and economics", Q("bus_1")),
            opt("art", "Arts and design", Q("art_1")),
            opt("other", "Another field", Q("basics_2")),
        ],
    },
    Question {
        id: "tech_1",
        text: "Which programming language or technical tool do you know best?",
        description: "Hard technical skills are the foundation of the digital economy.",
        tooltip: "This decides how well you fit software development versus systems or data tracks.",
        options: &[
            opt("js", "JavaScript / TypeScript", Q("soft_1")),
            opt("py", "Python / AI tools", Q("soft_1")),
            opt("cloud", "Cloud services (AWS/Azure)", Q("soft_1")),
            opt("none", "Simple tooling only", Q("soft_1")),
        ],
    },
    Question {
        id: "bus_1",
        text: "Which side of business do you enjoy most?",
        description: "Your management interests point you towards leadership or operations.",
        tooltip: "Do you prefer the language of numbers (finance) or of persuasion (marketing)?",
        options: &[
            opt("fin", "Finance and accounting", Q("soft_1")),
            opt("mkt", "Marketing and digital creativity", Q("soft_1")),
            opt("ops", "Operations and logistics", Q("soft_1")),
        ],
    },
    Question {
        id: "art_1",
        text: "Which creative medium do you prefer?",
        description: "Visual arts need a range of skills; pick the one that represents you.",
        tooltip: "Digital design blends aesthetics and function; this decides interface design versus motion work.",
        options: &[
            opt("uiux", "UI and UX design", Q("soft_1")),
            opt("motion", "Motion graphics and video", Q("soft_1")),
            opt("3d", "3D modelling", Q("soft_1")),
        ],
    },
    Question {
        id: "basics_2",
        text: "Do you prefer working with numbers and data, or with people?",
        description: "The balance between analysis and communication shapes your ideal roles.",
        tooltip: "Analytical leanings point to data engineering; communicative ones to product or technical sales.",
        options: &[
            opt("data", "Data and logical analysis", Q("soft_1")),
            opt("people", "Communication and relationships", Q("soft_1")),
        ],
    },
    Question {
        id: "soft_1",
        text: "How do you handle unexpected problems at work?",
        description: "Problem solving is one of the key skills of the century.",
        tooltip: "This reveals your working style and how you hold up under pressure.",
        options: &[
            opt("analysis", "I analyse deeply before deciding", Q("env_1")),
            opt("action", "I act fast to find an immediate fix", Q("env_1")),
            opt("collab", "I ask for help and work with the team", Q("env_1")),
        ],
    },
    Question {
        id: "env_1",
        text: "Which work environment makes you most productive?",
        description: "Your surroundings directly affect the quality of your output.",
        tooltip: "Work culture ranges from full freedom (remote) to structured discipline (office).",
        options: &[
            opt("remote", "Fully remote", Q("env_2")),
            opt("office", "Traditional office", Q("env_2")),
            opt("hybrid", "Hybrid", Q("env_2")),
        ],
    },
    Question {
        id: "env_2",
        text: "Do you prefer a startup or a large organisation?",
        description: "Startups give speed; large organisations give stability.",
        tooltip: "Startups mean wearing many hats; large organisations offer a clear, specialised track.",
        options: &[
            opt("startup", "A fast-moving startup", Q("goal_1")),
            opt("enterprise", "Government or a large company", Q("goal_1")),
        ],
    },
    Question {
        id: "goal_1",
        text: "What is your main career goal for the next five years?",
        description: "Your ambition drives the roadmap we draw for you.",
        tooltip: "Technical depth (expert), organisational impact (manager) or independence (entrepreneur)?",
        options: &[
            opt("expert", "Become a recognised technical expert", Q("goal_2")),
            opt("manager", "Reach a management or leadership role", Q("goal_2")),
            opt("entrepreneur", "Start my own business", Q("goal_2")),
        ],
    },
    Question {
        id: "goal_2",
        text: "How many hours a week do you spend learning new skills?",
        description: "Continuous learning is how you stay relevant.",
        tooltip: "Your learning rate drives salary progression and flexibility when switching tracks.",
        options: &[
            opt("high", "More than 10 hours", Q("final_1")),
            opt("mid", "3 to 5 hours", Q("final_1")),
            opt("low", "One hour or less", Q("final_1")),
        ],
    },
    Question {
        id: "final_1",
        text: "What motivates you most at work?",
        description: "Your motivators determine how long your passion lasts.",
        tooltip: "Knowing your drivers helps us suggest environments with long-term satisfaction.",
        options: &[
            opt("money", "Pay and rewards", Q("final_2")),
            opt("impact", "Social impact", Q("final_2")),
            opt("freedom", "Freedom and autonomy", Q("final_2")),
        ],
    },
    Question {
        id: "final_2",
        text: "Is your English good enough to work in international teams?",
        description: "Language opens the door to international opportunities.",
        tooltip: "English is the language of global tech and business.",
        options: &[
            opt("fluent", "Yes, fluent", Q("final_3")),
            opt("basic", "Basic knowledge only", Q("final_3")),
            opt("none", "Not currently", Q("final_3")),
        ],
    },
    Question {
        id: "final_3",
        text: "How satisfied are you with your current career path?",
        description: "Your current satisfaction tells us how much change you need.",
        tooltip: "This decides between improving your current path and a full pivot.",
        options: &[
            opt("happy", "Very satisfied, looking to grow", Q("final_4")),
            opt("neutral", "Neutral, considering alternatives", Q("final_4")),
            opt("unhappy", "Unsatisfied, want a radical change", Q("final_4")),
        ],
    },
    Question {
        id: "final_4",
        text: "Do you hold accredited professional certificates?",
        description: "Certificates strengthen your credibility in the market.",
        tooltip: "Certificates such as PMP, AWS or Google signal seriousness to employers.",
        options: &[
            opt("yes", "Yes, several", Q("final_5")),
            opt("no", "No, but I plan to", Q("final_5")),
        ],
    },
    Question {
        id: "final_5",
        text: "How do you feel about AI in your field?",
        description: "Your view of new technology shows how ready you are for the future.",
        tooltip: "AI is an amplifier, not a threat; openness to it decides how well your skills hold up.",
        options: &[
            opt("excited", "Excited, I use it daily", End),
            opt("worried", "Worried about being replaced", End),
            opt("skeptical", "I think it is a passing trend", End),
        ],
    },
];

/// Number of questions in the definition, reported in recommendation insights.
pub const TOTAL_QUESTIONS: usize = QUESTIONS.len();

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Resolves where the flow goes after `value` is picked for `question_id`.
pub fn next_step(question_id: &str, value: &str) -> Result<NextStep, QuestionnaireError> {
    let question = find_question(question_id)
        .ok_or_else(|| QuestionnaireError::UnknownQuestion(question_id.to_string()))?;

    question
        .options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.next)
        .ok_or_else(|| QuestionnaireError::InvalidOption {
            question_id: question_id.to_string(),
            value: value.to_string(),
        })
}

pub fn is_assessment_complete(answers: &AnswerSet) -> bool {
    answers
        .get(FINAL_QUESTION_ID)
        .is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fifteen_questions_with_unique_ids() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(TOTAL_QUESTIONS, 15);
        assert_eq!(ids.len(), TOTAL_QUESTIONS);
    }

    #[test]
    fn test_every_next_pointer_resolves() {
        for q in QUESTIONS {
            for o in q.options {
                if let NextStep::Question(next) = o.next {
                    assert!(
                        find_question(next).is_some(),
                        "{}:{} points at missing {}",
                        q.id,
                        o.value,
                        next
                    );
                }
            }
        }
    }

    #[test]
    fn test_option_values_unique_per_question() {
        for q in QUESTIONS {
            let values: HashSet<_> = q.options.iter().map(|o| o.value).collect();
            assert_eq!(values.len(), q.options.len(), "duplicate option in {}", q.id);
        }
    }

    #[test]
    fn test_every_question_reachable_from_entry() {
        let mut seen = HashSet::new();
        let mut stack = vec![ENTRY_QUESTION_ID];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            for o in find_question(id).unwrap().options {
                if let NextStep::Question(next) = o.next {
                    stack.push(next);
                }
            }
        }
        assert_eq!(seen.len(), TOTAL_QUESTIONS);
    }

    #[test]
    fn test_next_step_follows_branch() {
        assert_eq!(next_step("basics_1", "bus"), Ok(NextStep::Question("bus_1")));
        assert_eq!(next_step("final_5", "worried"), Ok(NextStep::End));
    }

    #[test]
    fn test_next_step_rejects_unknown_input() {
        assert_eq!(
            next_step("nope", "eng"),
            Err(QuestionnaireError::UnknownQuestion("nope".to_string()))
        );
        assert!(matches!(
            next_step("tech_1", "rust"),
            Err(QuestionnaireError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_assessment_complete_only_with_final_answer() {
        let mut answers = AnswerSet::new();
        answers.insert("basics_1".to_string(), "eng".to_string());
        assert!(!is_assessment_complete(&answers));
        answers.insert("final_5".to_string(), "excited".to_string());
        assert!(is_assessment_complete(&answers));
    }

    #[test]
    fn test_next_step_serializes_end_sentinel() {
        assert_eq!(serde_json::to_string(&NextStep::End).unwrap(), "\"END\"");
        assert_eq!(
            serde_json::to_string(&NextStep::Question("env_1")).unwrap(),
            "\"env_1\""
        );
    }
}
