pub mod cli;
pub mod config;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod logging;
pub mod memory;
pub mod resources;
pub mod search;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use generator::types::{CompanyDescriptor, InputError, PipelineReport, StageKind};
pub use generator::workflow::{RunOutcome, launch};
