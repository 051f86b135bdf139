//! Output formatters for match and board reports

use crate::config::{HighlightStyle, OutputFormat};
use crate::error::{Result, SkillMatchError};
use crate::output::report::{BoardReport, MatchReport};
use crate::processing::highlighter::{Highlighter, Segment};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn format_board(&self, report: &BoardReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored skill highlights
pub struct ConsoleFormatter {
    use_colors: bool,
    highlighter: Highlighter,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter; matched skills are rendered in bold
pub struct MarkdownFormatter {
    include_metadata: bool,
    highlighter: Highlighter,
}

/// HTML formatter embedding the highlighted markup
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const STYLES: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .card { background: white; padding: 24px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); margin-bottom: 20px; }
        .muted { color: #6c757d; }
        .tag { display: inline-block; padding: 2px 10px; margin: 2px; border-radius: 12px; background: #e9ecef; }
        .tag.active { background: #d1e7dd; }
        .match-bar { height: 8px; background: #e9ecef; border-radius: 4px; }
        .match-fill { height: 8px; background: #198754; border-radius: 4px; }
        mark, .skill-highlight { background: #fff3cd; padding: 0 2px; }
        .skill-highlight { position: relative; border-bottom: 1px dashed #b58105; }
        .skill-highlight:hover::after { content: attr(data-tip); position: absolute; left: 0; top: 1.6em; background: #333; color: #fff; padding: 2px 8px; border-radius: 4px; white-space: nowrap; font-size: 0.8em; }
"#;

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} · Skill match</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="card">
        <h1>{{ title_html|safe }}</h1>
        <p class="muted">{{ subtitle }}</p>
        <p><strong>Match: {{ percent }}%</strong> · {{ verdict }}</p>
        <div class="match-bar"><div class="match-fill" style="width: {{ percent }}%"></div></div>
    </div>
    <div class="card">
        <h2>Skill gap analysis</h2>
        <h3>Matched ({{ matched_total }})</h3>
        <div>
        {% for skill in matched %}<span class="tag active">{{ skill }}</span>{% endfor %}
        {% if matched.is_empty() %}<span class="muted">No matches yet</span>{% endif %}
        </div>
        <h3>Worth improving ({{ missing_total }})</h3>
        <div>
        {% for skill in missing %}<span class="tag">{{ skill }}</span>{% endfor %}
        {% if missing.is_empty() %}<span class="muted">All skills matched</span>{% endif %}
        </div>
    </div>
    {% for section in sections %}
    <div class="card">
        <h2>{{ section.heading }}</h2>
        <div class="rich-text">{{ section.html|safe }}</div>
    </div>
    {% endfor %}
    <p class="muted">Generated {{ generated_at }} · skill-match {{ version }}</p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    styles: &'static str,
    title: String,
    title_html: String,
    subtitle: String,
    percent: u8,
    verdict: &'static str,
    matched: Vec<String>,
    missing: Vec<String>,
    matched_total: usize,
    missing_total: usize,
    sections: Vec<HtmlSection>,
    generated_at: String,
    version: String,
}

struct HtmlSection {
    heading: String,
    html: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Vacancies · Skill match</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="card">
        <h1>Vacancies</h1>
        <p class="muted">{{ summary }}</p>
    </div>
    {% for row in rows %}
    <div class="card">
        <h3>{{ row.title_html|safe }}</h3>
        <p class="muted">{{ row.details }}</p>
        {% if row.has_score %}
        <div>Match: {{ row.percent }}%</div>
        <div class="match-bar"><div class="match-fill" style="width: {{ row.percent }}%"></div></div>
        {% endif %}
    </div>
    {% endfor %}
    <p class="muted">Generated {{ generated_at }}</p>
</body>
</html>"#, ext = "html")]
struct BoardTemplate {
    include_styles: bool,
    styles: &'static str,
    summary: String,
    rows: Vec<BoardRow>,
    generated_at: String,
}

struct BoardRow {
    title_html: String,
    details: String,
    has_score: bool,
    percent: u8,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, highlighter: Highlighter) -> Self {
        Self {
            use_colors,
            highlighter,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_percent(&self, percent: u8) -> String {
        let color = match percent {
            80..=100 => Color::Green,
            50..=79 => Color::Yellow,
            20..=49 => Color::BrightYellow,
            _ => Color::Red,
        };
        let filled = (percent as usize + 5) / 10;
        let bar = format!("{}{}", "■".repeat(filled), "□".repeat(10 - filled.min(10)));
        format!(
            "{} {}",
            self.colorize(&bar, color),
            self.colorize(&format!("{}%", percent), color)
        )
    }

    fn render_segments(&self, segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|segment| match &segment.skill {
                Some(_) if self.use_colors => segment.text.black().on_yellow().to_string(),
                Some(_) => format!("[{}]", segment.text),
                None => segment.text.clone(),
            })
            .collect()
    }

    fn format_tags(&self, tags: &[String], total: usize, color: Color) -> String {
        let mut line = tags
            .iter()
            .map(|t| self.colorize(t, color))
            .collect::<Vec<_>>()
            .join(", ");
        if total > tags.len() {
            line.push_str(&format!(" (+{} more)", total - tags.len()));
        }
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let analysis = &report.analysis;
        let result = &analysis.match_result;
        let gap = &analysis.gap_analysis;
        let highlight = analysis.preferences.highlight_enabled;
        let mut output = String::new();

        output.push_str(&self.format_header(&analysis.vacancy.title, 1));
        let details: Vec<String> = [
            analysis.vacancy.company.clone(),
            analysis.vacancy.city.clone(),
            analysis.vacancy.salary_label(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            output.push_str(&format!("{}\n", details.join(" | ")));
        }
        output.push_str(&format!(
            "Match: {} {}\n",
            self.format_percent(result.percent),
            report.verdict()
        ));

        output.push_str(&self.format_header("Skill gap analysis", 2));
        if gap.matched.is_empty() {
            output.push_str("Matched: no matches yet\n");
        } else {
            output.push_str(&format!(
                "Matched: {}\n",
                self.format_tags(&gap.matched, gap.matched_total, Color::Green)
            ));
        }
        if gap.missing.is_empty() {
            output.push_str("Worth improving: all skills matched\n");
        } else {
            output.push_str(&format!(
                "Worth improving: {}\n",
                self.format_tags(&gap.missing, gap.missing_total, Color::Red)
            ));
        }

        for section in &analysis.sections {
            output.push_str(&self.format_header(&section.kind.to_string(), 3));
            if highlight {
                let segments = self
                    .highlighter
                    .segments(&section.plain, &result.matched_skills);
                output.push_str(&self.render_segments(&segments));
            } else {
                output.push_str(&section.plain);
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "\nGenerated: {} | skill-match {}\n",
            report.metadata.generated_label(),
            report.metadata.version
        ));
        Ok(output)
    }

    fn format_board(&self, report: &BoardReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("Vacancies", 1));
        output.push_str(&format!(
            "Showing {} of {} loaded (offset {}, more available: {})\n",
            report.entries.len(),
            report.total_loaded,
            report.pagination.offset,
            if report.pagination.has_more { "yes" } else { "no" }
        ));

        for entry in &report.entries {
            let star = if entry.favorite { "★ " } else { "" };
            let title = match &entry.match_result {
                Some(m) => self.render_segments(
                    &self.highlighter.segments(&entry.title, &m.matched_skills),
                ),
                None => entry.title.clone(),
            };
            output.push_str(&format!("\n{}{}\n", star, title));

            let details: Vec<String> = [entry.company.clone(), entry.city.clone(), entry.salary.clone()]
                .into_iter()
                .flatten()
                .collect();
            if !details.is_empty() {
                output.push_str(&format!("  {}\n", details.join(" | ")));
            }
            if let Some(m) = &entry.match_result {
                output.push_str(&format!("  Match: {}\n", self.format_percent(m.percent)));
            }
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_board(&self, report: &BoardReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, highlighter: Highlighter) -> Self {
        Self {
            include_metadata,
            highlighter,
        }
    }

    fn bold_matches(&self, text: &str, skills: &[String]) -> String {
        self.highlighter
            .segments(text, skills)
            .into_iter()
            .map(|segment| match segment.skill {
                Some(_) => format!("**{}**", segment.text),
                None => segment.text,
            })
            .collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let analysis = &report.analysis;
        let result = &analysis.match_result;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", analysis.vacancy.title));
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Vacancy:** `{}` | **Skills:** `{}`\n\n",
                report.metadata.generated_label(),
                report.metadata.vacancy_file,
                report.metadata.skills_file
            ));
        }

        output.push_str(&format!(
            "**Match:** {}% ({})\n\n",
            result.percent,
            report.verdict()
        ));

        output.push_str("## Skill gap analysis\n\n");
        output.push_str("| Matched | Worth improving |\n");
        output.push_str("|---------|-----------------|\n");
        let gap = &analysis.gap_analysis;
        for i in 0..gap.matched.len().max(gap.missing.len()) {
            output.push_str(&format!(
                "| {} | {} |\n",
                gap.matched.get(i).map(String::as_str).unwrap_or(""),
                gap.missing.get(i).map(String::as_str).unwrap_or("")
            ));
        }
        output.push('\n');

        for section in &analysis.sections {
            output.push_str(&format!("## {}\n\n", section.kind));
            if analysis.preferences.highlight_enabled {
                output.push_str(&self.bold_matches(&section.plain, &result.matched_skills));
            } else {
                output.push_str(&section.plain);
            }
            output.push_str("\n\n");
        }

        Ok(output)
    }

    fn format_board(&self, report: &BoardReport) -> Result<String> {
        let mut output = String::from("# Vacancies\n\n");
        output.push_str("| Vacancy | Company | Match |\n");
        output.push_str("|---------|---------|-------|\n");
        for entry in &report.entries {
            let (title, percent) = match &entry.match_result {
                Some(m) => (
                    self.bold_matches(&entry.title, &m.matched_skills),
                    format!("{}%", m.percent),
                ),
                None => (entry.title.clone(), "–".to_string()),
            };
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                title,
                entry.company.as_deref().unwrap_or(""),
                percent
            ));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let analysis = &report.analysis;
        let gap = &analysis.gap_analysis;
        let vacancy = &analysis.vacancy;

        let subtitle = [
            vacancy.company.clone(),
            vacancy.city.clone(),
            vacancy.salary_label(),
            Some(if vacancy.is_remote { "Remote" } else { "Office / hybrid" }.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            styles: STYLES,
            title: vacancy.title.clone(),
            title_html: analysis.title_html.clone(),
            subtitle,
            percent: analysis.match_result.percent,
            verdict: report.verdict(),
            matched: gap.matched.clone(),
            missing: gap.missing.clone(),
            matched_total: gap.matched_total,
            missing_total: gap.missing_total,
            sections: analysis
                .sections
                .iter()
                .map(|s| HtmlSection {
                    heading: s.kind.to_string(),
                    html: s.html.clone(),
                })
                .collect(),
            generated_at: report.metadata.generated_label(),
            version: report.metadata.version.clone(),
        };

        template
            .render()
            .map_err(|e| SkillMatchError::OutputFormatting(e.to_string()))
    }

    fn format_board(&self, report: &BoardReport) -> Result<String> {
        let rows = report
            .entries
            .iter()
            .map(|entry| BoardRow {
                title_html: entry.title_html.clone(),
                details: [entry.company.clone(), entry.city.clone(), entry.salary.clone()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" · "),
                has_score: entry.match_result.is_some(),
                percent: entry.match_result.as_ref().map(|m| m.percent).unwrap_or(0),
            })
            .collect();

        let template = BoardTemplate {
            include_styles: self.include_styles,
            styles: STYLES,
            summary: format!(
                "{} of {} loaded vacancies",
                report.entries.len(),
                report.total_loaded
            ),
            rows,
            generated_at: report.metadata.generated_label(),
        };

        template
            .render()
            .map_err(|e| SkillMatchError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new(style: &HighlightStyle) -> Self {
        Self::with_options(true, true, true, true, style)
    }

    pub fn with_options(
        use_colors: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
        style: &HighlightStyle,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, Highlighter::new(style.clone())),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(
                include_metadata,
                Highlighter::new(style.clone()),
            ),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_board(&self, report: &BoardReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_board(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&HighlightStyle::default())
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, vacancy_name: &str) -> String {
    let base_name = Path::new(vacancy_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_match.txt", base_name),
        OutputFormat::Json => format!("{}_match.json", base_name),
        OutputFormat::Markdown => format!("{}_match.md", base_name),
        OutputFormat::Html => format!("{}_match.html", base_name),
    }
}
