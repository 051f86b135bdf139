//! Skill matching and gap analysis against vacancy text

use crate::processing::vacancy::VacancyText;
use log::{debug, warn};
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which of a user's skills a vacancy mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0–100, rounded half up
    pub percent: u8,
}

/// Matched / missing lists trimmed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub matched_total: usize,
    pub missing_total: usize,
}

impl MatchResult {
    pub fn total_considered(&self) -> usize {
        self.matched_skills.len() + self.missing_skills.len()
    }

    pub fn has_matches(&self) -> bool {
        !self.matched_skills.is_empty()
    }

    pub fn gap_analysis(&self, limit: usize) -> GapAnalysis {
        GapAnalysis {
            matched: self.matched_skills.iter().take(limit).cloned().collect(),
            missing: self.missing_skills.iter().take(limit).cloned().collect(),
            matched_total: self.matched_skills.len(),
            missing_total: self.missing_skills.len(),
        }
    }
}

impl GapAnalysis {
    pub fn all_matched(&self) -> bool {
        self.missing_total == 0 && self.matched_total > 0
    }
}

/// Trimmed, non-blank skill names with case-sensitive duplicates removed,
/// in first-seen order.
pub fn considered_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

pub fn match_percent(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((200 * matched + total) / (2 * total)).min(100) as u8
}

/// Split `skills` into those found as case-insensitive substrings of the
/// vacancy's plain text and those that are not.
pub fn compute_match<S: AsRef<str>>(skills: &[S], text: &VacancyText) -> MatchResult {
    let considered = considered_skills(skills);
    if considered.is_empty() {
        return MatchResult::default();
    }

    let found = find_skills(&considered, &text.plain_text());

    let (matched_skills, missing_skills): (Vec<_>, Vec<_>) = considered
        .into_iter()
        .zip(found)
        .partition(|(_, hit)| *hit);

    let matched_skills: Vec<String> = matched_skills.into_iter().map(|(s, _)| s).collect();
    let missing_skills: Vec<String> = missing_skills.into_iter().map(|(s, _)| s).collect();
    let percent = match_percent(
        matched_skills.len(),
        matched_skills.len() + missing_skills.len(),
    );

    debug!(
        "Matched {}/{} skills against '{}' ({}%)",
        matched_skills.len(),
        matched_skills.len() + missing_skills.len(),
        text.title,
        percent
    );

    MatchResult {
        matched_skills,
        missing_skills,
        percent,
    }
}

/// Case-insensitive regex source for one literal skill name. Matching and
/// highlighting both build their patterns here so they agree on what counts
/// as an occurrence.
pub(crate) fn skill_pattern(skill: &str) -> String {
    format!("(?i:{})", regex::escape(skill))
}

/// One flag per skill: whether it occurs in `haystack`, ignoring case.
fn find_skills(skills: &[String], haystack: &str) -> Vec<bool> {
    let patterns: Vec<String> = skills.iter().map(|s| skill_pattern(s)).collect();

    match RegexSet::new(&patterns) {
        Ok(set) => {
            let hits = set.matches(haystack);
            (0..skills.len()).map(|i| hits.matched(i)).collect()
        }
        Err(e) => {
            warn!("Falling back to one pattern per skill: {}", e);
            patterns
                .iter()
                .map(|p| Regex::new(p).map(|re| re.is_match(haystack)).unwrap_or(false))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(description: &str) -> VacancyText {
        VacancyText {
            title: String::new(),
            description: description.to_string(),
            requirements: None,
            responsibilities: None,
        }
    }

    #[test]
    fn test_python_react_scenario() {
        let result = compute_match(
            &["Python", "React"],
            &text("We need a <b>Python</b> developer"),
        );
        assert_eq!(result.matched_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["React"]);
        assert_eq!(result.percent, 50);
    }

    #[test]
    fn test_empty_skills() {
        let skills: Vec<String> = Vec::new();
        let result = compute_match(&skills, &text("Anything at all"));
        assert_eq!(result, MatchResult::default());
        assert_eq!(result.percent, 0);
    }

    #[test]
    fn test_blank_skills_are_not_considered() {
        let result = compute_match(&["", "   "], &text("Python"));
        assert_eq!(result.percent, 0);
        assert_eq!(result.total_considered(), 0);
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let result = compute_match(&["C++"], &text("Looking for C++ engineers"));
        assert_eq!(result.matched_skills, vec!["C++"]);
        assert_eq!(result.percent, 100);

        let result = compute_match(&[".NET", "C#"], &text("Experience with ASP.NET Core"));
        assert_eq!(result.matched_skills, vec![".NET"]);
        assert_eq!(result.missing_skills, vec!["C#"]);
    }

    #[test]
    fn test_duplicates_and_case_variants() {
        let result = compute_match(
            &["Rust", "Rust", "rust", " Go "],
            &text("RUST and Go services"),
        );
        assert_eq!(result.matched_skills, vec!["Rust", "rust", "Go"]);
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.percent, 100);
    }

    #[test]
    fn test_matched_and_missing_partition_input() {
        let skills = ["Docker", "SQL", "", "Kafka", "Docker", "Linux"];
        let result = compute_match(&skills, &text("<p>Docker, PostgreSQL and linux</p>"));

        let mut union: Vec<String> = result
            .matched_skills
            .iter()
            .chain(result.missing_skills.iter())
            .cloned()
            .collect();
        union.sort();
        let mut expected = considered_skills(&skills);
        expected.sort();
        assert_eq!(union, expected);
        assert!(result
            .matched_skills
            .iter()
            .all(|s| !result.missing_skills.contains(s)));
        assert_eq!(result.matched_skills, vec!["Docker", "SQL", "Linux"]);
        assert_eq!(result.percent, 75);
    }

    #[test]
    fn test_percent_grows_with_vacancy_text() {
        let skills = ["Python", "Redis", "Git"];
        let without = compute_match(&skills, &text("Python only"));
        let with = compute_match(&skills, &text("Python with Redis"));
        assert!(with.percent >= without.percent);
        assert_eq!(without.percent, 33);
        assert_eq!(with.percent, 67);
    }

    #[test]
    fn test_title_and_all_fields_are_scanned() {
        let text = VacancyText {
            title: "Senior Kotlin engineer".to_string(),
            description: String::new(),
            requirements: Some("<li>Kubernetes</li>".to_string()),
            responsibilities: Some("Mentoring".to_string()),
        };
        let result = compute_match(&["Kotlin", "Kubernetes", "Mentoring", "Scala"], &text);
        assert_eq!(result.matched_skills, vec!["Kotlin", "Kubernetes", "Mentoring"]);
        assert_eq!(result.percent, 75);
    }

    #[test]
    fn test_markup_is_not_matched() {
        let result = compute_match(&["span", "href"], &text(r#"<span><a href="/x">link</a></span>"#));
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_gap_analysis_limit() {
        let result = MatchResult {
            matched_skills: vec!["a".into(), "b".into(), "c".into()],
            missing_skills: vec![],
            percent: 100,
        };
        let gap = result.gap_analysis(2);
        assert_eq!(gap.matched, vec!["a", "b"]);
        assert_eq!(gap.matched_total, 3);
        assert!(gap.all_matched());
    }

    #[test]
    fn test_match_percent_rounding() {
        assert_eq!(match_percent(0, 0), 0);
        assert_eq!(match_percent(1, 2), 50);
        assert_eq!(match_percent(1, 3), 33);
        assert_eq!(match_percent(2, 3), 67);
        assert_eq!(match_percent(1, 8), 13);
        assert_eq!(match_percent(4, 4), 100);
    }
}
