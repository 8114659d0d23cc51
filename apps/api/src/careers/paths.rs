//! Static career path table.
//!
//! Table order matters: the scoring engine breaks ties between equally scored
//! paths by their position here.

use serde::Serialize;

/// One career track. Entries are compiled in and never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerPath {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    pub certs: &'static [&'static str],
    pub salary: &'static str,
    pub growth: &'static str,
}

pub const CAREER_PATHS: &[CareerPath] = &[
    CareerPath {
        id: "software_dev",
        title: "Full-Stack Software Developer",
        description: "Build and maintain web and mobile applications with modern programming languages.",
        skills: &["JavaScript", "TypeScript", "Node.js", "React", "Git", "Problem solving"],
        certs: &["AWS Certified Developer", "Meta Full Stack Certificate"],
        salary: "12,000 - 25,000 SAR",
        growth: "Very high",
    },
    CareerPath {
        id: "ai_data",
        title: "AI & Data Specialist",
        description: "Analyse large datasets and build machine-learning models to forecast and solve complex problems.",
        skills: &["Python", "SQL", "TensorFlow", "Statistics", "Data visualisation"],
        certs: &["Google Data Analytics", "IBM AI Engineering"],
        salary: "15,000 - 30,000 SAR",
        growth: "Accelerating",
    },
    CareerPath {
        id: "cybersecurity",
        title: "Cybersecurity Engineer",
        description: "Protect systems and networks from breaches and digital threats.",
        skills: &["Network security", "Cryptography", "Linux", "Penetration testing", "Risk management"],
        certs: &["CompTIA Security+", "CISSP", "CEH"],
        salary: "14,000 - 28,000 SAR",
        growth: "Stable and high",
    },
    CareerPath {
        id: "uiux_design",
        title: "UI/UX Designer",
        description: "Design smooth user journeys and attractive interfaces for digital products.",
        skills: &["Figma", "User psychology", "Design thinking", "Prototyping"],
        certs: &["Google UX Design Professional", "Interaction Design Foundation"],
        salary: "10,000 - 20,000 SAR",
        growth: "High",
    },
    CareerPath {
        id: "digital_marketing",
        title: "Digital Marketing Expert",
        description: "Run advertising campaigns and analyse consumer behaviour across digital platforms.",
        skills: &["SEO", "Google Ads", "Data analysis", "Copywriting", "Platform management"],
        certs: &["Google Ads Search", "HubSpot Inbound Marketing"],
        salary: "9,000 - 18,000 SAR",
        growth: "Stable",
    },
    CareerPath {
        id: "project_management",
        title: "Technical Project Manager",
        description: "Plan and deliver software projects on time and at the expected quality.",
        skills: &["Agile", "Scrum", "Team leadership", "Conflict resolution", "Strategic planning"],
        certs: &["PMP", "Certified Scrum Master (CSM)"],
        salary: "13,000 - 25,000 SAR",
        growth: "High",
    },
    CareerPath {
        id: "finance_analyst",
        title: "Digital Financial Analyst",
        description: "Use technology and data to analyse financial performance and advise on investments.",
        skills: &["Financial planning", "Advanced Excel", "Power BI", "Asset management"],
        certs: &["CFA Level 1", "FMVA"],
        salary: "11,000 - 22,000 SAR",
        growth: "Stable",
    },
    CareerPath {
        id: "cloud_architect",
        title: "Cloud Architect",
        description: "Design and operate cloud infrastructure for efficient, highly available systems.",
        skills: &["AWS", "Azure", "Docker", "Kubernetes", "Cloud security"],
        certs: &["AWS Solutions Architect", "Google Cloud Architect"],
        salary: "16,000 - 32,000 SAR",
        growth: "Very high",
    },
];

/// Looks up a career path by id.
pub fn find_career_path(id: &str) -> Option<&'static CareerPath> {
    CAREER_PATHS.iter().find(|p| p.id == id)
}
