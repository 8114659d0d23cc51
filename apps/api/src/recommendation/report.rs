//! Recommendation report types and the boundary parser for LLM output.
//!
//! Model output is loosely typed. `parse_llm_report` turns it into a
//! `RecommendationReport` or a `ReportParseError`; nothing downstream ever sees
//! raw model JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::careers::paths::CareerPath;
use crate::llm_client::strip_json_fences;

/// A career path together with its compatibility percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedPath {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub certs: Vec<String>,
    pub salary: String,
    pub growth: String,
    pub compatibility: u32,
}

impl RecommendedPath {
    pub fn from_career_path(path: &CareerPath, compatibility: u32) -> Self {
        Self {
            id: path.id.to_string(),
            title: path.title.to_string(),
            description: path.description.to_string(),
            skills: path.skills.iter().map(|s| s.to_string()).collect(),
            certs: path.certs.iter().map(|s| s.to_string()).collect(),
            salary: path.salary.to_string(),
            growth: path.growth.to_string(),
            compatibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub market_demand: u32,
    pub total_questions: u32,
    /// Unix epoch milliseconds.
    pub analysis_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub primary: RecommendedPath,
    pub alternatives: Vec<RecommendedPath>,
    pub insights: Insights,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_path: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// LLM boundary parsing
// ────────────────────────────────────────────────────────────────────────────

pub const ALTERNATIVES_COUNT: usize = 2;

#[derive(Debug, Error)]
pub enum ReportParseError {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("expected at least 2 alternatives, got {0}")]
    TooFewAlternatives(usize),

    #[error("compatibility {0} is outside 0-100")]
    CompatibilityOutOfRange(i64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    primary: Option<RawPath>,
    #[serde(default)]
    alternatives: Vec<RawPath>,
    #[serde(default)]
    learning_path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawPath {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    certs: Vec<String>,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    growth: String,
    compatibility: Option<serde_json::Number>,
}

/// Parses raw model text (optionally fenced) into a report.
///
/// `insights` is not trusted from the model; the caller supplies it.
pub fn parse_llm_report(
    text: &str,
    insights: Insights,
) -> Result<RecommendationReport, ReportParseError> {
    let raw: RawReport = serde_json::from_str(strip_json_fences(text))?;

    let primary = raw
        .primary
        .ok_or(ReportParseError::MissingField("primary"))
        .and_then(into_recommended_path)?;

    if raw.alternatives.len() < ALTERNATIVES_COUNT {
        return Err(ReportParseError::TooFewAlternatives(raw.alternatives.len()));
    }
    let alternatives = raw
        .alternatives
        .into_iter()
        .take(ALTERNATIVES_COUNT)
        .map(into_recommended_path)
        .collect::<Result<Vec<_>, _>>()?;

    // Steps come back either as plain strings or as `{ "title": ... }` objects.
    let learning_path = raw
        .learning_path
        .into_iter()
        .filter_map(|step| match step {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("title")
                .and_then(|t| t.as_str())
                .map(str::to_string),
            _ => None,
        })
        .collect();

    Ok(RecommendationReport {
        primary,
        alternatives,
        insights,
        learning_path,
    })
}

fn into_recommended_path(raw: RawPath) -> Result<RecommendedPath, ReportParseError> {
    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(ReportParseError::MissingField("title"))?;

    let compatibility = raw
        .compatibility
        .ok_or(ReportParseError::MissingField("compatibility"))?;
    let compatibility = compatibility
        .as_i64()
        .or_else(|| compatibility.as_f64().map(|f| f.round() as i64))
        .ok_or(ReportParseError::MissingField("compatibility"))?;
    if !(0..=100).contains(&compatibility) {
        return Err(ReportParseError::CompatibilityOutOfRange(compatibility));
    }

    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| slugify(&title));

    Ok(RecommendedPath {
        id,
        title,
        description: raw.description,
        skills: raw.skills,
        certs: raw.certs,
        salary: raw.salary,
        growth: raw.growth,
        compatibility: compatibility as u32,
    })
}

fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
