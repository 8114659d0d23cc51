//! User profile: the data model and its input validation.

pub mod models;
pub mod validation;
