pub mod career_analysis;
pub mod core;
pub mod environment;
pub mod web;

pub use career_analysis::{CareerAnalyzer, Profile};
pub use web::{build_rocket, start_web_server};
