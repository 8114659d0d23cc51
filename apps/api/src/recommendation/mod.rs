pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod recommender;
pub mod report;
pub mod rules;
