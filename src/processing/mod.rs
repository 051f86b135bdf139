//! Skill matching, highlighting and vacancy list processing

pub mod vacancy;
pub mod markup;
pub mod skill_matcher;
pub mod highlighter;
pub mod board;
pub mod analyzer;

pub use highlighter::{highlight, HighlightOptions, Highlighter};
pub use skill_matcher::{compute_match, GapAnalysis, MatchResult};
pub use vacancy::{Vacancy, VacancyText};
