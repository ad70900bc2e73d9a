// src/career_analysis/mod.rs
pub mod analyzer;
pub mod error;
pub mod prompt;
pub mod types;

pub use analyzer::{strip_code_fences, CareerAnalyzer};
pub use error::{AnalysisError, ACCESS_DENIED_MESSAGE};
pub use prompt::build_prompt;
pub use types::{AnalysisResult, CareerSuggestion, Profile};
