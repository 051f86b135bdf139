//! Vacancy and skill extraction from file contents

use crate::error::{Result, SkillMatchError};
use crate::processing::markup::escape_text;
use crate::processing::vacancy::{skill_names, Skill, UserSkill, Vacancy};
use anyhow::Context;
use pulldown_cmark::{html, Event, Parser, Tag};
use scraper::{Html, Selector};
use serde::Deserialize;

/// Builds a vacancy from the raw contents of a file. `name` is the file stem,
/// used as the title when the content does not carry one.
pub trait VacancyExtractor {
    fn extract(&self, name: &str, content: &str) -> Result<Vacancy>;
}

/// A `Vacancy` record as served by the REST API.
pub struct JsonExtractor;

pub struct MarkdownExtractor;

pub struct HtmlExtractor;

pub struct PlainTextExtractor;

impl VacancyExtractor for JsonExtractor {
    fn extract(&self, name: &str, content: &str) -> Result<Vacancy> {
        let mut vacancy: Vacancy = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse vacancy JSON '{}'", name))?;
        if vacancy.title.trim().is_empty() {
            vacancy.title = name.to_string();
        }
        Ok(vacancy)
    }
}

impl VacancyExtractor for MarkdownExtractor {
    fn extract(&self, name: &str, content: &str) -> Result<Vacancy> {
        let mut html_output = String::new();
        html::push_html(&mut html_output, Parser::new(content));

        let title = Self::first_heading(content).unwrap_or_else(|| name.to_string());
        Ok(Vacancy::new(title, html_output))
    }
}

impl MarkdownExtractor {
    fn first_heading(content: &str) -> Option<String> {
        let mut in_heading = false;
        let mut heading = String::new();

        for event in Parser::new(content) {
            match event {
                Event::Start(Tag::Heading(..)) => in_heading = true,
                Event::End(Tag::Heading(..)) => {
                    let trimmed = heading.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                    in_heading = false;
                }
                Event::Text(text) | Event::Code(text) if in_heading => heading.push_str(&text),
                _ => {}
            }
        }
        None
    }
}

impl VacancyExtractor for HtmlExtractor {
    fn extract(&self, name: &str, content: &str) -> Result<Vacancy> {
        let heading_selector = Self::selector("h1")?;
        let title_selector = Self::selector("title")?;
        let body_selector = Self::selector("body")?;
        let document = Html::parse_document(content);

        // The page heading beats `<title>`, which often carries a site suffix.
        let title = document
            .select(&heading_selector)
            .chain(document.select(&title_selector))
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| name.to_string());

        // Only the body is vacancy content; head and doctype would not parse
        // as a fragment.
        let description = document
            .select(&body_selector)
            .next()
            .map(|body| body.inner_html().trim().to_string())
            .unwrap_or_default();

        Ok(Vacancy::new(title, description))
    }
}

impl HtmlExtractor {
    fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css)
            .map_err(|e| SkillMatchError::Processing(format!("Invalid selector '{}': {:?}", css, e)))
    }
}

impl VacancyExtractor for PlainTextExtractor {
    fn extract(&self, name: &str, content: &str) -> Result<Vacancy> {
        Ok(Vacancy::new(name, escape_text(content.trim())))
    }
}

/// Shapes accepted for a skills file.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsDocument {
    Skills(Vec<Skill>),
    UserSkills(Vec<UserSkill>),
    Names(Vec<String>),
}

/// Skill names from a JSON document (`[{id, name}]`, `[{skill: {id, name}}]`
/// or `["name"]`).
pub fn parse_skills_json(name: &str, content: &str) -> Result<Vec<String>> {
    let document: SkillsDocument = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse skills JSON '{}'", name))?;

    Ok(match document {
        SkillsDocument::Skills(skills) => skills.into_iter().map(|s| s.name).collect(),
        SkillsDocument::UserSkills(user_skills) => skill_names(&user_skills),
        SkillsDocument::Names(names) => names,
    })
}

/// Skill names from text: one per line and/or comma separated.
pub fn parse_skills_text(content: &str) -> Vec<String> {
    content
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_title_and_html() {
        let vacancy = MarkdownExtractor
            .extract("fallback", "# Rust `async` engineer\n\nWork with **Tokio**.\n")
            .unwrap();
        assert_eq!(vacancy.title, "Rust async engineer");
        assert!(vacancy.description.contains("<strong>Tokio</strong>"));
    }

    #[test]
    fn test_markdown_without_heading_uses_name() {
        let vacancy = MarkdownExtractor.extract("backend", "Just text").unwrap();
        assert_eq!(vacancy.title, "backend");
    }

    #[test]
    fn test_html_title_from_h1() {
        let vacancy = HtmlExtractor
            .extract("page", "<h1> Go developer </h1><p>gRPC</p>")
            .unwrap();
        assert_eq!(vacancy.title, "Go developer");
        assert_eq!(vacancy.description, "<h1> Go developer </h1><p>gRPC</p>");
    }

    #[test]
    fn test_html_document_keeps_only_body() {
        let page = "<!DOCTYPE html><html><head><title>Go dev | Acme</title></head>\
                    <body><h1>Go dev</h1><p>We use <b>Python</b></p></body></html>";
        let vacancy = HtmlExtractor.extract("page", page).unwrap();
        assert_eq!(vacancy.title, "Go dev");
        assert_eq!(vacancy.description, "<h1>Go dev</h1><p>We use <b>Python</b></p>");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let vacancy = PlainTextExtractor.extract("job", "C++ <templates> & STL").unwrap();
        assert_eq!(vacancy.description, "C++ &lt;templates&gt; &amp; STL");
    }

    #[test]
    fn test_json_vacancy() {
        let vacancy = JsonExtractor
            .extract("v", r#"{"id": 3, "title": "", "description": "<b>SQL</b>"}"#)
            .unwrap();
        assert_eq!(vacancy.title, "v");
        assert!(JsonExtractor.extract("v", "not json").is_err());
    }

    #[test]
    fn test_skills_json_shapes() {
        assert_eq!(
            parse_skills_json("s", r#"[{"id": 1, "name": "Python"}]"#).unwrap(),
            vec!["Python"]
        );
        assert_eq!(
            parse_skills_json("s", r#"[{"skill": {"id": 1, "name": "Rust"}, "level": 2}, {"skill": null}]"#)
                .unwrap(),
            vec!["Rust"]
        );
        assert_eq!(
            parse_skills_json("s", r#"["Go", "SQL"]"#).unwrap(),
            vec!["Go", "SQL"]
        );
        assert!(parse_skills_json("s", r#"{"skills": 1}"#).is_err());
    }

    #[test]
    fn test_skills_text() {
        assert_eq!(
            parse_skills_text("Python, SQL\n# comment\n\nMachine Learning\n"),
            vec!["Python", "SQL", "Machine Learning"]
        );
    }
}
