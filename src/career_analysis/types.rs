use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_STYLE: &str = "Unknown";

/// Student answers submitted by the assessment form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub work_style: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

impl Profile {
    pub fn interests(&self) -> &[String] {
        self.interests.as_deref().unwrap_or_default()
    }

    pub fn strengths(&self) -> &[String] {
        self.strengths.as_deref().unwrap_or_default()
    }

    pub fn values(&self) -> &[String] {
        self.values.as_deref().unwrap_or_default()
    }

    pub fn work_style(&self) -> &str {
        self.work_style.as_deref().unwrap_or(DEFAULT_WORK_STYLE)
    }
}

/// One career recommendation as the model is asked to shape it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub title: String,
    pub match_score: String,
    pub description: String,
    pub roadmap: Vec<String>,
    pub resource_link: String,
}

pub type AnalysisResult = Vec<CareerSuggestion>;
