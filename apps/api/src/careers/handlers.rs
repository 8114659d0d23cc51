//! Axum route handlers for the static career and questionnaire tables.

use axum::Json;
use serde::Serialize;

use crate::careers::paths::{find_career_path, CareerPath, CAREER_PATHS};
use crate::careers::questionnaire::{Question, ENTRY_QUESTION_ID, QUESTIONS};
use crate::errors::AppError;
use crate::extract::AppPath;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub entry_question_id: &'static str,
    pub total_questions: usize,
    pub questions: &'static [Question],
}

/// GET /api/v1/careers
pub async fn handle_list_careers() -> Json<&'static [CareerPath]> {
    Json(CAREER_PATHS)
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    AppPath(id): AppPath<String>,
) -> Result<Json<&'static CareerPath>, AppError> {
    find_career_path(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Career path '{id}' not found")))
}

/// GET /api/v1/questionnaire
///
/// The whole question graph. Clients walk it from `entryQuestionId` following
/// each option's `next` until they reach `"END"`.
pub async fn handle_questionnaire() -> Json<QuestionnaireResponse> {
    Json(QuestionnaireResponse {
        entry_question_id: ENTRY_QUESTION_ID,
        total_questions: QUESTIONS.len(),
        questions: QUESTIONS,
    })
}
