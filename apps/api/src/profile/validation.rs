use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::models::CareerProfile;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>?").expect("tag pattern is valid")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// Latin letters, Arabic block, whitespace and dots.
static FULL_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s\x{0600}-\x{06FF}.]+$").expect("name pattern is valid")
});

const FULL_NAME_MIN_CHARS: usize = 3;
const FULL_NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompleteness {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
}

/// Removes anything that looks like an HTML tag, then trims.
pub fn sanitize(value: &str) -> String {
    TAG_RE.replace_all(value, "").trim().to_string()
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_full_name(name: &str) -> bool {
    let sanitized = sanitize(name);
    let len = sanitized.chars().count();
    (FULL_NAME_MIN_CHARS..=FULL_NAME_MAX_CHARS).contains(&len) && FULL_NAME_RE.is_match(&sanitized)
}

pub fn is_not_empty(value: &str) -> bool {
    !sanitize(value).is_empty()
}

pub fn profile_completeness(profile: &CareerProfile) -> ProfileCompleteness {
    let mut missing_fields = Vec::new();
    if !validate_full_name(&profile.full_name) {
        missing_fields.push("full name (at least 3 letters, letters only)".to_string());
    }
    if !validate_email(&profile.email) {
        missing_fields.push("email (invalid format)".to_string());
    }
    if !is_not_empty(&profile.education) {
        missing_fields.push("education".to_string());
    }

    ProfileCompleteness {
        is_valid: missing_fields.is_empty(),
        missing_fields,
    }
}
