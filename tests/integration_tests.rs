//! Integration tests for the skill matcher

use skill_match::config::{Config, Preferences};
use skill_match::input::InputManager;
use skill_match::output::formatter::ReportGenerator;
use skill_match::output::report::{MatchReport, ReportMetadata};
use skill_match::processing::analyzer::AnalysisEngine;
use skill_match::processing::board::{BoardFilters, InMemoryVacancies, VacancyBoard};
use skill_match::processing::highlighter::Highlighter;
use skill_match::processing::markup::strip_markup;
use skill_match::{compute_match, highlight, HighlightOptions};
use std::path::Path;

#[tokio::test]
async fn test_vacancy_and_user_skills_from_json() {
    let mut manager = InputManager::new();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/vacancy.json"))
        .await
        .unwrap();
    let skills = manager
        .load_skills(Path::new("tests/fixtures/user_skills.json"))
        .await
        .unwrap();

    assert_eq!(vacancy.id, 42);
    assert_eq!(skills, vec!["Python", "React", "Docker"]);

    let result = compute_match(&skills, &vacancy.text());
    assert_eq!(result.matched_skills, vec!["Python", "Docker"]);
    // "react" only appears inside an href
    assert_eq!(result.missing_skills, vec!["React"]);
    assert_eq!(result.percent, 67);
}

#[tokio::test]
async fn test_markdown_vacancy() {
    let mut manager = InputManager::new();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/vacancy.md"))
        .await
        .unwrap();

    assert_eq!(vacancy.title, "Rust engineer");
    let result = compute_match(&["Tokio", "gRPC", "Kafka", "Rust"], &vacancy.text());
    assert_eq!(result.matched_skills, vec!["Tokio", "gRPC", "Rust"]);
    assert_eq!(result.percent, 75);

    let highlighted = highlight(
        &vacancy.description,
        &result.matched_skills,
        HighlightOptions {
            highlight_enabled: true,
            tooltip_enabled: false,
        },
    );
    assert!(highlighted.contains("<li><mark>gRPC</mark></li>"));
    assert_eq!(strip_markup(&highlighted), strip_markup(&vacancy.description));
}

#[tokio::test]
async fn test_html_vacancy_keeps_markup() {
    let mut manager = InputManager::new();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/vacancy.html"))
        .await
        .unwrap();

    assert_eq!(vacancy.title, "Platform engineer");
    assert!(vacancy.description.starts_with("<h1>Platform engineer</h1>"));
    assert!(!vacancy.description.contains("<title>"));

    let result = compute_match(&["Kubernetes", "Go", "Terraform"], &vacancy.text());
    assert_eq!(result.matched_skills, vec!["Kubernetes", "Go"]);

    let highlighted = highlight(
        &vacancy.description,
        &result.matched_skills,
        HighlightOptions {
            highlight_enabled: true,
            tooltip_enabled: false,
        },
    );
    assert!(highlighted.contains("<b><mark>Kubernetes</mark></b>"));
    assert!(highlighted.contains(r#"<a href="https://example.com/go"><mark>Go</mark></a>"#));
    assert!(highlighted.contains("<textarea>Kubernetes notes</textarea>"));
    assert_eq!(strip_markup(&highlighted), strip_markup(&vacancy.description));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/skills.txt");

    let first = manager.load_skills(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.load_skills(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec!["Python", "SQL", "C++"]);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .load_vacancy(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .load_vacancy(Path::new("tests/fixtures/nonexistent.json"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_board_pages_and_filters() {
    let mut manager = InputManager::new();
    let vacancies = manager
        .load_vacancies(Path::new("tests/fixtures/vacancies.json"))
        .await
        .unwrap();
    let skills = manager
        .load_skills(Path::new("tests/fixtures/skills.txt"))
        .await
        .unwrap();

    let source = InMemoryVacancies::new(vacancies);
    let mut board = VacancyBoard::new(2);
    while board.load_next(&source) {}
    assert_eq!(board.vacancies().len(), 5);
    assert!(!board.pagination().has_more);

    let filters = BoardFilters {
        only_matched: true,
        ..Default::default()
    };
    let entries = board.entries(&skills, &filters, &Highlighter::default(), true);
    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);

    let percents: Vec<u8> = entries
        .iter()
        .map(|e| e.match_result.as_ref().unwrap().percent)
        .collect();
    assert_eq!(percents, vec![67, 67, 33]);
    assert_eq!(entries[2].title_html, "<mark>C++</mark> engineer");
}

#[tokio::test]
async fn test_full_report_in_every_format() {
    let mut manager = InputManager::new();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/vacancy.json"))
        .await
        .unwrap();
    let skills = manager
        .load_skills(Path::new("tests/fixtures/user_skills.json"))
        .await
        .unwrap();

    let config = Config::default();
    let analysis = AnalysisEngine::new(&config).analyze(&vacancy, &skills);
    let report = MatchReport::new(
        analysis,
        ReportMetadata::new("vacancy.json", "user_skills.json"),
    );

    let generator = ReportGenerator::with_options(false, true, true, true, &config.highlight);
    let html = generator
        .generate_report(&report, skill_match::config::OutputFormat::Html)
        .unwrap();
    assert!(html.contains(r#"href="https://example.com/react""#));
    assert!(html.contains(r#"data-skill="Docker""#));

    let console = generator
        .generate_report(&report, skill_match::config::OutputFormat::Console)
        .unwrap();
    assert!(console.contains("67%"));
    assert!(console.contains("[Python]"));

    let json = generator
        .generate_report(&report, skill_match::config::OutputFormat::Json)
        .unwrap();
    assert!(json.contains("\"percent\": 67"));
}

#[test]
fn test_disabled_highlight_is_verbatim_end_to_end() {
    let config = Config::default();
    let engine = AnalysisEngine::new(&config).with_preferences(Preferences {
        highlight_enabled: false,
        tooltip_enabled: false,
    });
    let mut vacancy = skill_match::processing::Vacancy::new("Dev", "<p>Python &amp; <i>Go</i></p>");
    vacancy.requirements = Some("<ol><li>Python</li></ol>".to_string());

    let analysis = engine.analyze(&vacancy, &["Python", "Go"]);
    assert_eq!(analysis.match_result.percent, 100);
    assert_eq!(analysis.sections[0].html, vacancy.description);
    assert_eq!(analysis.sections[1].html, "<ol><li>Python</li></ol>");
}
