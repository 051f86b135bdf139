//! Per-vacancy analysis: match, gap analysis and highlighted sections

use crate::config::{Config, Preferences};
use crate::processing::highlighter::{HighlightOptions, Highlighter};
use crate::processing::markup::{escape_text, strip_markup};
use crate::processing::skill_matcher::{compute_match, GapAnalysis, MatchResult};
use crate::processing::vacancy::{SectionKind, Vacancy};
use log::info;
use serde::{Deserialize, Serialize};

pub struct AnalysisEngine {
    highlighter: Highlighter,
    preferences: Preferences,
    gap_display_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedSection {
    pub kind: SectionKind,
    /// Highlighted markup, or the original when highlighting is off
    pub html: String,
    pub plain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyAnalysis {
    pub vacancy: Vacancy,
    pub match_result: MatchResult,
    pub gap_analysis: GapAnalysis,
    pub title_html: String,
    pub sections: Vec<HighlightedSection>,
    pub preferences: Preferences,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            highlighter: Highlighter::new(config.highlight.clone()),
            preferences: config.display,
            gap_display_limit: config.board.gap_display_limit,
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn analyze<S: AsRef<str>>(&self, vacancy: &Vacancy, skills: &[S]) -> VacancyAnalysis {
        let text = vacancy.text();
        let match_result = compute_match(skills, &text);
        let options = HighlightOptions::from(self.preferences);

        let sections = text
            .sections()
            .into_iter()
            .map(|(kind, markup)| HighlightedSection {
                kind,
                html: self
                    .highlighter
                    .highlight(markup, &match_result.matched_skills, options),
                plain: strip_markup(markup),
            })
            .collect();

        let title_html = self.highlighter.highlight(
            &escape_text(&vacancy.title),
            &match_result.matched_skills,
            HighlightOptions {
                tooltip_enabled: false,
                ..options
            },
        );

        info!(
            "Vacancy '{}': {} matched, {} missing ({}%)",
            vacancy.title,
            match_result.matched_skills.len(),
            match_result.missing_skills.len(),
            match_result.percent
        );

        VacancyAnalysis {
            vacancy: vacancy.clone(),
            gap_analysis: match_result.gap_analysis(self.gap_display_limit),
            match_result,
            title_html,
            sections,
            preferences: self.preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vacancy {
        let mut vacancy = Vacancy::new("Backend engineer (Rust)", "<p>We use <b>Rust</b> and Postgres</p>");
        vacancy.requirements = Some("<ul><li>SQL</li><li>Docker</li></ul>".to_string());
        vacancy
    }

    #[test]
    fn test_analyze_highlights_every_section() {
        let engine = AnalysisEngine::new(&Config::default());
        let analysis = engine.analyze(&sample(), &["Rust", "SQL", "Kafka"]);

        assert_eq!(analysis.match_result.matched_skills, vec!["Rust", "SQL"]);
        assert_eq!(analysis.match_result.missing_skills, vec!["Kafka"]);
        assert_eq!(analysis.match_result.percent, 67);
        assert_eq!(analysis.sections.len(), 2);
        assert_eq!(analysis.sections[0].kind, SectionKind::Description);
        assert!(analysis.sections[0].html.contains("data-skill=\"Rust\""));
        assert!(analysis.sections[1].html.contains("data-skill=\"SQL\""));
        assert_eq!(analysis.sections[1].plain, "SQLDocker");
        assert_eq!(
            analysis.title_html,
            "Backend engineer (<mark>Rust</mark>)"
        );
    }

    #[test]
    fn test_highlight_disabled_keeps_sections_verbatim() {
        let engine = AnalysisEngine::new(&Config::default()).with_preferences(Preferences {
            highlight_enabled: false,
            tooltip_enabled: true,
        });
        let vacancy = sample();
        let analysis = engine.analyze(&vacancy, &["Rust"]);

        assert_eq!(analysis.sections[0].html, vacancy.description);
        assert_eq!(analysis.title_html, "Backend engineer (Rust)");
        assert_eq!(analysis.match_result.percent, 100);
    }

    #[test]
    fn test_gap_analysis_respects_limit() {
        let mut config = Config::default();
        config.board.gap_display_limit = 1;
        let engine = AnalysisEngine::new(&config);
        let analysis = engine.analyze(&sample(), &["Go", "Java", "Rust"]);

        assert_eq!(analysis.gap_analysis.missing, vec!["Go"]);
        assert_eq!(analysis.gap_analysis.missing_total, 2);
        assert_eq!(analysis.gap_analysis.matched, vec!["Rust"]);
    }
}
