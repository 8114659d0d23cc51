pub mod handlers;
pub mod paths;
pub mod questionnaire;
