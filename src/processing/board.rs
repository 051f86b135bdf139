//! Vacancy list state: infinite-scroll pagination, filters and per-vacancy
//! match scores.

use crate::processing::highlighter::{HighlightOptions, Highlighter};
use crate::processing::markup::escape_text;
use crate::processing::skill_matcher::{compute_match, MatchResult};
use crate::processing::vacancy::Vacancy;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Something that serves vacancies a page at a time.
pub trait VacancyPageSource {
    fn fetch_page(&self, offset: usize, limit: usize) -> Vec<Vacancy>;
}

/// Pages over an already-loaded list.
pub struct InMemoryVacancies {
    vacancies: Vec<Vacancy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_size: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BoardFilters {
    pub only_matched: bool,
    pub only_favorites: bool,
    pub favorites: HashSet<i64>,
}

/// One row of the rendered board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub id: i64,
    pub title: String,
    pub title_html: String,
    pub company: Option<String>,
    pub city: Option<String>,
    pub salary: Option<String>,
    pub favorite: bool,
    pub match_result: Option<MatchResult>,
}

pub struct VacancyBoard {
    vacancies: Vec<Vacancy>,
    pagination: Pagination,
}

impl InMemoryVacancies {
    pub fn new(vacancies: Vec<Vacancy>) -> Self {
        Self { vacancies }
    }
}

impl VacancyPageSource for InMemoryVacancies {
    fn fetch_page(&self, offset: usize, limit: usize) -> Vec<Vacancy> {
        self.vacancies
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            offset: 0,
            has_more: true,
        }
    }

    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset + self.page_size)
        } else {
            None
        }
    }
}

impl VacancyBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            vacancies: Vec::new(),
            pagination: Pagination::new(page_size),
        }
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Start over, e.g. after the search changed.
    pub fn reset(&mut self) {
        self.vacancies.clear();
        self.pagination.offset = 0;
        self.pagination.has_more = true;
    }

    /// Record a fetched page. Offset 0 replaces the list; later offsets append.
    pub fn apply_page(&mut self, offset: usize, page: Vec<Vacancy>) {
        self.pagination.has_more = page.len() == self.pagination.page_size;
        if offset == 0 {
            self.vacancies = page;
        } else {
            self.vacancies.extend(page);
        }
        self.pagination.offset = offset;
        debug!(
            "Board holds {} vacancies (offset {}, more: {})",
            self.vacancies.len(),
            offset,
            self.pagination.has_more
        );
    }

    /// Fetch the first page if empty, otherwise the next one. Returns false
    /// when the source is exhausted.
    pub fn load_next<P: VacancyPageSource>(&mut self, source: &P) -> bool {
        let offset = if self.vacancies.is_empty() {
            0
        } else {
            match self.pagination.next_offset() {
                Some(offset) => offset,
                None => return false,
            }
        };
        let page = source.fetch_page(offset, self.pagination.page_size);
        self.apply_page(offset, page);
        true
    }

    /// Match result per vacancy id. Empty when the user has no skills.
    pub fn match_map<S: AsRef<str>>(&self, skills: &[S]) -> HashMap<i64, MatchResult> {
        if skills.iter().all(|s| s.as_ref().trim().is_empty()) {
            return HashMap::new();
        }
        self.vacancies
            .iter()
            .map(|vacancy| (vacancy.id, compute_match(skills, &vacancy.text())))
            .collect()
    }

    pub fn filtered<'a>(
        &'a self,
        filters: &BoardFilters,
        matches: &HashMap<i64, MatchResult>,
    ) -> Vec<&'a Vacancy> {
        self.vacancies
            .iter()
            .filter(|v| !filters.only_favorites || filters.favorites.contains(&v.id))
            .filter(|v| {
                !filters.only_matched
                    || matches.get(&v.id).map(|m| m.has_matches()).unwrap_or(false)
            })
            .collect()
    }

    /// Filtered rows with titles highlighted using plain markers.
    pub fn entries<S: AsRef<str>>(
        &self,
        skills: &[S],
        filters: &BoardFilters,
        highlighter: &Highlighter,
        highlight_enabled: bool,
    ) -> Vec<BoardEntry> {
        let matches = self.match_map(skills);
        let options = HighlightOptions {
            highlight_enabled,
            tooltip_enabled: false,
        };

        self.filtered(filters, &matches)
            .into_iter()
            .map(|vacancy| {
                let match_result = matches.get(&vacancy.id).cloned();
                let escaped = escape_text(&vacancy.title);
                let title_html = match &match_result {
                    Some(m) => highlighter.highlight(&escaped, &m.matched_skills, options),
                    None => escaped,
                };
                BoardEntry {
                    id: vacancy.id,
                    title: vacancy.title.clone(),
                    title_html,
                    company: vacancy.company.clone(),
                    city: vacancy.city.clone(),
                    salary: vacancy.salary_label(),
                    favorite: filters.favorites.contains(&vacancy.id),
                    match_result,
                }
            })
            .collect()
    }
}

/// Split a keyword query on whitespace and commas, dropping blanks and
/// repeated tokens.
pub fn normalize_tokens(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}
