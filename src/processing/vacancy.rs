//! Typed records for the job-board REST resources the engine consumes

use serde::{Deserialize, Serialize};

/// A skill from the skills collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// A user's selected skill as returned by `/skills/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSkill {
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub level: Option<i32>,
}

/// Vacancy resource. Fields the backend omits or sends as null are
/// coerced to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub salary_from: Option<i64>,
    #[serde(default)]
    pub salary_to: Option<i64>,
    #[serde(default)]
    pub salary_currency: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default = "default_source")]
    pub source: String,
}

/// The textual fields the matcher scans. Title is plain text; the other
/// fields may carry inline markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacancyText {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
}

/// Which markup-bearing field a piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Description,
    Requirements,
    Responsibilities,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Description => write!(f, "Description"),
            SectionKind::Requirements => write!(f, "Requirements"),
            SectionKind::Responsibilities => write!(f, "Responsibilities"),
        }
    }
}

fn default_source() -> String {
    "manual".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Vacancy {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            requirements: None,
            responsibilities: None,
            company: None,
            city: None,
            is_remote: false,
            salary_from: None,
            salary_to: None,
            salary_currency: None,
            url: String::new(),
            source: default_source(),
        }
    }

    pub fn text(&self) -> VacancyText {
        VacancyText {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            responsibilities: self.responsibilities.clone(),
        }
    }

    /// Salary range for display, e.g. `100000–150000 RUB`.
    pub fn salary_label(&self) -> Option<String> {
        let currency = self
            .salary_currency
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "RUB".to_string());

        match (self.salary_from, self.salary_to) {
            (Some(from), Some(to)) => Some(format!("{}–{} {}", from, to, currency)),
            (Some(from), None) => Some(format!("from {} {}", from, currency)),
            (None, Some(to)) => Some(format!("up to {} {}", to, currency)),
            (None, None) => None,
        }
    }
}

impl VacancyText {
    /// Markup-bearing fields that are present and non-blank, in display order.
    pub fn sections(&self) -> Vec<(SectionKind, &str)> {
        let mut sections = Vec::new();
        if !self.description.trim().is_empty() {
            sections.push((SectionKind::Description, self.description.as_str()));
        }
        for (kind, field) in [
            (SectionKind::Requirements, &self.requirements),
            (SectionKind::Responsibilities, &self.responsibilities),
        ] {
            if let Some(value) = field.as_deref().filter(|v| !v.trim().is_empty()) {
                sections.push((kind, value));
            }
        }
        sections
    }

    /// Title plus the plain-text projection of each markup field, joined by
    /// single spaces. Empty fields are skipped.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if !self.title.is_empty() {
            parts.push(self.title.clone());
        }
        for (_, markup) in self.sections() {
            let plain = super::markup::strip_markup(markup);
            if !plain.is_empty() {
                parts.push(plain);
            }
        }
        parts.join(" ")
    }
}

/// Skill names from user-skill records, skipping entries without a usable name.
pub fn skill_names(user_skills: &[UserSkill]) -> Vec<String> {
    user_skills
        .iter()
        .filter_map(|item| item.skill.as_ref())
        .map(|skill| skill.name.clone())
        .filter(|name| !name.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_coerced() {
        let vacancy: Vacancy =
            serde_json::from_str(r#"{"id": 7, "title": "Backend", "description": null}"#).unwrap();
        assert_eq!(vacancy.id, 7);
        assert_eq!(vacancy.description, "");
        assert_eq!(vacancy.requirements, None);
        assert_eq!(vacancy.source, "manual");
    }

    #[test]
    fn test_plain_text_strips_markup_and_skips_empty_fields() {
        let text = VacancyText {
            title: "Rust Developer".to_string(),
            description: "<p>Build <b>services</b></p>".to_string(),
            requirements: Some("   ".to_string()),
            responsibilities: Some("<ul><li>Review code</li></ul>".to_string()),
        };
        assert_eq!(text.plain_text(), "Rust Developer Build services Review code");
        assert_eq!(text.sections().len(), 2);
    }

    #[test]
    fn test_skill_names_skip_blank_and_absent() {
        let skills: Vec<UserSkill> = serde_json::from_str(
            r#"[
                {"skill": {"id": 1, "name": "Python"}, "level": 3},
                {"skill": null, "level": 1},
                {"skill": {"id": 2, "name": "  "}},
                {"skill": {"id": 3, "name": "React"}, "level": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(skill_names(&skills), vec!["Python", "React"]);
    }

    #[test]
    fn test_salary_label() {
        let mut vacancy = Vacancy::new("Dev", "");
        assert_eq!(vacancy.salary_label(), None);
        vacancy.salary_from = Some(100);
        vacancy.salary_currency = Some("usd".to_string());
        assert_eq!(vacancy.salary_label().as_deref(), Some("from 100 USD"));
        vacancy.salary_to = Some(200);
        assert_eq!(vacancy.salary_label().as_deref(), Some("100–200 USD"));
    }
}
