use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured resume content submitted for rendering.
/// Defaults mirror the placeholders shown in a blank editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    /// Category → skills, e.g. "Languages" → ["Rust", "Go"].
    pub skills: BTreeMap<String, SkillList>,
    pub projects: Vec<ProjectEntry>,
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            email: "email@example.com".to_string(),
            phone: "+1 234 567 890".to_string(),
            location: "City, Country".to_string(),
            linkedin: String::new(),
            github: String::new(),
            summary: "Professional summary...".to_string(),
            education: vec![],
            experience: vec![],
            skills: BTreeMap::new(),
            projects: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub dates: String,
    pub location: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub dates: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub technologies: String,
    pub dates: String,
    pub details: Vec<String>,
}

/// Editors send either a list of skills or a single comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillList {
    List(Vec<String>),
    Text(String),
}

impl SkillList {
    pub fn joined(&self) -> String {
        match self {
            SkillList::List(items) => items.join(", "),
            SkillList::Text(text) => text.clone(),
        }
    }
}
