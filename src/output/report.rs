//! Report structures wrapping analysis results with generation metadata

use crate::processing::analyzer::VacancyAnalysis;
use crate::processing::board::{BoardEntry, Pagination};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-vacancy match report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub analysis: VacancyAnalysis,
    pub metadata: ReportMetadata,
}

/// Vacancy list report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardReport {
    pub entries: Vec<BoardEntry>,
    pub pagination: Pagination,
    /// Vacancies loaded before filtering
    pub total_loaded: usize,
    pub only_matched: bool,
    pub only_favorites: bool,
    pub skills: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub vacancy_file: String,
    pub skills_file: String,
}

impl ReportMetadata {
    pub fn new(vacancy_file: impl Into<String>, skills_file: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            vacancy_file: vacancy_file.into(),
            skills_file: skills_file.into(),
        }
    }

    pub fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl MatchReport {
    pub fn new(analysis: VacancyAnalysis, metadata: ReportMetadata) -> Self {
        Self { analysis, metadata }
    }

    /// One-line verdict for the match percentage.
    pub fn verdict(&self) -> &'static str {
        verdict(self.analysis.match_result.percent)
    }
}

pub fn verdict(percent: u8) -> &'static str {
    match percent {
        80..=100 => "Strong match",
        50..=79 => "Good match",
        20..=49 => "Partial match",
        1..=19 => "Weak match",
        _ => "No overlap",
    }
}
