// src/core/mod.rs
//! Core services shared by the web layer and the analysis pipeline

pub mod config_manager;
pub mod inference_client;

pub use config_manager::ConfigManager;
pub use inference_client::{CompletionClient, HuggingFaceClient};
