use crate::careers::questionnaire::find_question;
use crate::llm_client::prompts::{CAREER_ADVISOR_PERSONA, JSON_ONLY_SYSTEM};
use crate::profile::models::CareerProfile;
use crate::recommendation::engine::AnswerSet;

pub fn recommendation_system_prompt() -> String {
    format!("{CAREER_ADVISOR_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Builds the user prompt. Answers are rendered as "question text: option label"
/// so the model sees what the user actually picked.
pub fn build_recommendation_prompt(profile: Option<&CareerProfile>, answers: &AnswerSet) -> String {
    let mut prompt = String::from(
        "Analyse the following user and recommend career paths.\n\n",
    );

    if let Some(p) = profile {
        prompt.push_str("PROFILE:\n");
        prompt.push_str(&format!("- Education: {}\n", p.education));
        prompt.push_str(&format!("- Skills: {}\n", p.skills.join(", ")));
        prompt.push_str(&format!("- Interests: {}\n", p.interests.join(", ")));
        prompt.push_str(&format!("- Experience level: {:?}\n", p.experience_level));
        if !p.current_role.is_empty() {
            prompt.push_str(&format!("- Current role: {}\n", p.current_role));
        }
        prompt.push('\n');
    }

    if !answers.is_empty() {
        prompt.push_str("QUESTIONNAIRE ANSWERS:\n");
        for (question_id, value) in answers {
            let rendered = find_question(question_id)
                .and_then(|q| {
                    q.options
                        .iter()
                        .find(|o| o.value == value.as_str())
                        .map(|o| format!("{}: {}", q.text, o.label))
                })
                .unwrap_or_else(|| format!("{question_id}: {value}"));
            prompt.push_str(&format!("- {rendered}\n"));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        r#"Return a JSON object with exactly this shape:
{
  "primary": { "id": string, "title": string, "description": string, "skills": [string], "certs": [string], "salary": string, "growth": string, "compatibility": integer 0-100 },
  "alternatives": [ two more objects of the same shape ],
  "learningPath": [ five short sequential steps ]
}"#,
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_renders_option_labels() {
        let mut answers = AnswerSet::new();
        answers.insert("tech_1".to_string(), "py".to_string());
        answers.insert("custom".to_string(), "x".to_string());

        let prompt = build_recommendation_prompt(None, &answers);
        assert!(prompt.contains("Python / AI tools"));
        assert!(prompt.contains("custom: x"));
        assert!(!prompt.contains("PROFILE:"));
        assert!(prompt.contains("\"alternatives\""));
    }

    #[test]
    fn test_prompt_includes_profile() {
        let profile = CareerProfile {
            education: "Computer Science".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        let prompt = build_recommendation_prompt(Some(&profile), &AnswerSet::new());
        assert!(prompt.contains("Education: Computer Science"));
        assert!(prompt.contains("Skills: Rust, SQL"));
        assert!(!prompt.contains("QUESTIONNAIRE ANSWERS"));
    }
}
