//! Input manager for loading vacancies and skill lists from disk

use crate::error::{Result, SkillMatchError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    parse_skills_json, parse_skills_text, HtmlExtractor, JsonExtractor, MarkdownExtractor,
    PlainTextExtractor, VacancyExtractor,
};
use crate::processing::vacancy::Vacancy;
use anyhow::Context;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a single vacancy from JSON, Markdown, HTML or plain text.
    pub async fn load_vacancy(&mut self, path: &Path) -> Result<Vacancy> {
        let content = self.read(path).await?;
        let name = Self::stem(path);

        match FileType::from_path(path) {
            FileType::Json => JsonExtractor.extract(&name, &content),
            FileType::Markdown => {
                info!("Rendering markdown vacancy: {}", path.display());
                MarkdownExtractor.extract(&name, &content)
            }
            FileType::Html => HtmlExtractor.extract(&name, &content),
            FileType::Text => PlainTextExtractor.extract(&name, &content),
            FileType::Unknown => Err(SkillMatchError::UnsupportedFormat(format!(
                "Unsupported vacancy file: {}",
                path.display()
            ))),
        }
    }

    /// Load a JSON array of vacancies, as returned by the list endpoint.
    pub async fn load_vacancies(&mut self, path: &Path) -> Result<Vec<Vacancy>> {
        if FileType::from_path(path) != FileType::Json {
            return Err(SkillMatchError::UnsupportedFormat(format!(
                "Vacancy lists must be JSON: {}",
                path.display()
            )));
        }

        let content = self.read(path).await?;
        let vacancies: Vec<Vacancy> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse vacancy list {}", path.display()))?;
        info!("Loaded {} vacancies from {}", vacancies.len(), path.display());
        Ok(vacancies)
    }

    /// Load the user's skill names from JSON or a plain list.
    pub async fn load_skills(&mut self, path: &Path) -> Result<Vec<String>> {
        let content = self.read(path).await?;
        let skills = match FileType::from_path(path) {
            FileType::Json => parse_skills_json(&Self::stem(path), &content)?,
            _ => parse_skills_text(&content),
        };
        info!("Loaded {} skills from {}", skills.len(), path.display());
        Ok(skills)
    }

    async fn read(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    fn stem(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
