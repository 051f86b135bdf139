//! Markup-safe highlighting of matched skills
//!
//! Matches are wrapped only inside text nodes. Tag names, attribute values,
//! raw-text bodies (`script`, `style`, `textarea`, `title`, ...) and markers
//! from an earlier pass are left alone, so running the highlighter on its own
//! output never nests markers.

use crate::config::{HighlightStyle, Preferences};
use crate::processing::markup::{self, MarkupElement, MarkupNode};
use crate::processing::skill_matcher::skill_pattern;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display switches for a single highlight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    pub highlight_enabled: bool,
    pub tooltip_enabled: bool,
}

/// A run of plain text, tagged with the skill it matched if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub skill: Option<String>,
}

pub struct Highlighter {
    style: HighlightStyle,
}

/// Compiled alternation over the matched skills, one capture group per
/// skill so a match maps back to the name it came from.
struct SkillPattern {
    regex: Regex,
    names: Vec<String>,
}

impl From<Preferences> for HighlightOptions {
    fn from(prefs: Preferences) -> Self {
        Self {
            highlight_enabled: prefs.highlight_enabled,
            tooltip_enabled: prefs.tooltip_enabled,
        }
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Preferences::default().into()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(HighlightStyle::default())
    }
}

impl SkillPattern {
    fn build<S: AsRef<str>>(skills: &[S]) -> Option<Self> {
        let mut names: Vec<&str> = skills
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            return None;
        }

        // Longest first so "JavaScript" wins over "Java" at the same offset.
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        let mut seen = HashSet::new();
        names.retain(|name| seen.insert(*name));

        let pattern = names
            .iter()
            .map(|name| format!("({})", skill_pattern(name)))
            .collect::<Vec<_>>()
            .join("|");

        match Regex::new(&pattern) {
            Ok(regex) => Some(Self {
                regex,
                names: names.into_iter().map(str::to_string).collect(),
            }),
            Err(e) => {
                warn!("Could not build highlight pattern: {}", e);
                None
            }
        }
    }

    fn split(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in self.regex.captures_iter(text) {
            let Some(mat) = caps.get(0) else { continue };
            if mat.start() > last {
                segments.push(Segment {
                    text: text[last..mat.start()].to_string(),
                    skill: None,
                });
            }
            let skill = (1..caps.len())
                .find(|&group| caps.get(group).is_some())
                .and_then(|group| self.names.get(group - 1))
                .cloned()
                .unwrap_or_else(|| mat.as_str().to_string());
            segments.push(Segment {
                text: mat.as_str().to_string(),
                skill: Some(skill),
            });
            last = mat.end();
        }
        if last < text.len() {
            segments.push(Segment {
                text: text[last..].to_string(),
                skill: None,
            });
        }
        segments
    }
}

impl Highlighter {
    pub fn new(style: HighlightStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Wrap occurrences of `matched_skills` in `text` (an HTML fragment).
    ///
    /// With highlighting disabled, or nothing to highlight, the input is
    /// returned unchanged. Input the parser had to repair is rendered as its
    /// escaped plain text instead, still highlighted.
    pub fn highlight<S: AsRef<str>>(
        &self,
        text: &str,
        matched_skills: &[S],
        options: HighlightOptions,
    ) -> String {
        if text.is_empty() || !options.highlight_enabled {
            return text.to_string();
        }
        let Some(pattern) = SkillPattern::build(matched_skills) else {
            return text.to_string();
        };

        let parsed = markup::parse_fragment(text);
        if !parsed.is_clean() {
            warn!(
                "Markup needed {} repair(s); highlighting plain text instead",
                parsed.errors.len()
            );
            let plain = markup::plain_text(&parsed.nodes);
            let nodes = self.mark_text(&pattern, &plain, options);
            return markup::serialize(&nodes);
        }

        let nodes = self.walk(&pattern, parsed.nodes, options);
        debug!("Highlighted fragment of {} bytes", text.len());
        markup::serialize(&nodes)
    }

    /// Split plain text into highlighted and unhighlighted runs.
    pub fn segments<S: AsRef<str>>(&self, text: &str, matched_skills: &[S]) -> Vec<Segment> {
        match SkillPattern::build(matched_skills) {
            Some(pattern) => pattern.split(text),
            None if text.is_empty() => Vec::new(),
            None => vec![Segment {
                text: text.to_string(),
                skill: None,
            }],
        }
    }

    fn walk(
        &self,
        pattern: &SkillPattern,
        nodes: Vec<MarkupNode>,
        options: HighlightOptions,
    ) -> Vec<MarkupNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                MarkupNode::Text(text) => out.extend(self.mark_text(pattern, &text, options)),
                MarkupNode::Element(mut el) => {
                    if !self.is_skipped(&el) {
                        el.children = self.walk(pattern, el.children, options);
                    }
                    out.push(MarkupNode::Element(el));
                }
                other => out.push(other),
            }
        }
        out
    }

    fn mark_text(
        &self,
        pattern: &SkillPattern,
        text: &str,
        options: HighlightOptions,
    ) -> Vec<MarkupNode> {
        pattern
            .split(text)
            .into_iter()
            .map(|segment| match segment.skill {
                Some(skill) => MarkupNode::Element(self.marker(&segment.text, &skill, options)),
                None => MarkupNode::Text(segment.text),
            })
            .collect()
    }

    fn marker(&self, text: &str, skill: &str, options: HighlightOptions) -> MarkupElement {
        if options.tooltip_enabled {
            MarkupElement::new("span")
                .with_attr("class", self.style.marker_class.as_str())
                .with_attr("data-skill", skill)
                .with_attr("data-tip", format!("{}{}", self.style.tooltip_prefix, skill))
                .with_text(text)
        } else {
            MarkupElement::new("mark").with_text(text)
        }
    }

    fn is_skipped(&self, el: &MarkupElement) -> bool {
        el.holds_raw_text()
            || el.name == "mark"
            || (el.name == "span" && el.has_class(&self.style.marker_class))
    }
}

/// Highlight with the default marker style.
pub fn highlight<S: AsRef<str>>(text: &str, matched_skills: &[S], options: HighlightOptions) -> String {
    Highlighter::default().highlight(text, matched_skills, options)
}
