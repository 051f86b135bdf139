//! Skill matching library: gap analysis and markup-safe highlighting of a
//! user's skills in job vacancy text

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::{Config, Preferences};
pub use error::{Result, SkillMatchError};
pub use processing::{compute_match, highlight, HighlightOptions, MatchResult, VacancyText};
