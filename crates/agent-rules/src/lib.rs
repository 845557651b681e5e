#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`frontmatter`] - Frontmatter extraction
//! - [`description`] - Trigger and example extraction
//! - [`responsibilities`] - Responsibility extraction
//! - [`agent`] - Agent definition parsing
//! - [`rule`] - Rule document rendering
//! - [`wrap`] - Wrapping markdown documents as rules
//! - [`convert`] - File-system drivers
//! - [`error`] - Error types

pub mod agent;
pub mod convert;
pub mod description;
pub mod error;
pub mod frontmatter;
pub mod responsibilities;
pub mod rule;
pub mod wrap;

pub use agent::{AgentDefinition, parse_agent, parse_tools};
pub use convert::{
    BatchReport, Outcome, SkipReason, convert_agent_file, convert_agents, markdown_files,
    mirrored_dir, wrap_markdown, wrap_markdown_file,
};
pub use description::{DescriptionAnalysis, Example, analyze_description};
pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, LineCursor, Metadata, parse_frontmatter};
pub use responsibilities::{Responsibility, extract_responsibilities, role_definition};
pub use rule::{render_rule, title_case};
pub use wrap::{derive_title, wrap_document};
