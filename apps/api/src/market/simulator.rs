//! Simulated labour-market snapshot.
//!
//! Not backed by real data. Every call samples names without replacement from
//! fixed pools and draws figures from fixed ranges, so callers should treat the
//! output as illustrative only.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SKILLS_POOL: &[&str] = &[
    "Artificial intelligence",
    "Web development",
    "Cybersecurity",
    "Data analysis",
    "Cloud computing",
    "Project management",
    "Digital marketing",
    "User interface design",
    "Python programming",
    "Systems engineering",
];

const JOB_TITLES: &[&str] = &[
    "Software developer",
    "Data analyst",
    "Security engineer",
    "Technical project manager",
    "Interface designer",
    "Cloud engineer",
    "AI specialist",
];

const REGIONS: &[&str] = &["Riyadh", "Jeddah", "Dammam", "NEOM"];

const GROWTH_AREAS: &[&str] = &[
    "Renewable energy",
    "Financial technology",
    "Digital healthcare",
    "Smart logistics",
    "Tourism and hospitality",
    "Advanced manufacturing",
];

const TOP_SKILLS: usize = 5;
const TOP_GROWTH_AREAS: usize = 3;
const SALARY_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub name: String,
    /// 60–99
    pub demand: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthArea {
    pub name: String,
    /// Percent, 5–24
    pub growth: u32,
}

/// Monthly salary band in SAR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub name: String,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    /// Unix milliseconds.
    pub timestamp: i64,
    pub skills: Vec<SkillDemand>,
    pub growth: Vec<GrowthArea>,
    pub salaries: Vec<SalaryBand>,
    pub distribution: Vec<RegionShare>,
}

pub fn generate_market_report<R: Rng + ?Sized>(rng: &mut R) -> MarketReport {
    let skills = sample(SKILLS_POOL, TOP_SKILLS, rng)
        .into_iter()
        .map(|name| SkillDemand {
            name,
            demand: rng.gen_range(60..100),
        })
        .collect();

    let growth = sample(GROWTH_AREAS, TOP_GROWTH_AREAS, rng)
        .into_iter()
        .map(|name| GrowthArea {
            name,
            growth: rng.gen_range(5..25),
        })
        .collect();

    let salaries = sample(JOB_TITLES, SALARY_ROWS, rng)
        .into_iter()
        .map(|name| SalaryBand {
            name,
            min: rng.gen_range(8_000..13_000),
            max: rng.gen_range(15_000..22_000),
        })
        .collect();

    let distribution = REGIONS
        .iter()
        .map(|region| RegionShare {
            name: region.to_string(),
            value: rng.gen_range(10..60),
        })
        .collect();

    MarketReport {
        timestamp: Utc::now().timestamp_millis(),
        skills,
        growth,
        salaries,
        distribution,
    }
}

fn sample<R: Rng + ?Sized>(pool: &[&str], n: usize, rng: &mut R) -> Vec<String> {
    pool.choose_multiple(rng, n).map(|s| s.to_string()).collect()
}
