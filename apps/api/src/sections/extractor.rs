//! Splits unstructured resume text into labeled sections.
//!
//! A line is either a section header (fuzzy-matched against
//! [`headers::HEADER_VOCABULARY`]) or body content belonging to the most
//! recently seen header. Body lines before the first header land in
//! [`Section::Other`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::headers::{Section, HEADER_VOCABULARY};

/// Default minimum fuzzy score (0-100) for a line to count as a header.
/// Lower values over-detect headers; higher values miss noisy or
/// unconventionally phrased ones.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 80.0;

/// Canonical sections worth scoring against a job description.
pub const DEFAULT_IMPORTANT_SECTIONS: &[Section] = &[
    Section::Projects,
    Section::Certifications,
    Section::Publications,
    Section::Skills,
    Section::Experience,
];

static BLANK_LINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

pub struct SectionExtractor {
    threshold: f64,
    important_sections: Vec<Section>,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl SectionExtractor {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            important_sections: DEFAULT_IMPORTANT_SECTIONS.to_vec(),
        }
    }

    pub fn with_important_sections(mut self, sections: Vec<Section>) -> Self {
        self.important_sections = sections;
        self
    }

    /// Cleans page breaks and carriage returns, rejoins hyphen-broken words
    /// across line boundaries, and collapses runs of blank lines.
    fn preprocess(text: &str) -> String {
        let text = text.replace('\u{c}', " ").replace('\r', " ");
        let text = text.replace("-\n", "");
        BLANK_LINE_RUNS.replace_all(&text, "\n").into_owned()
    }

    /// Scores a case-folded line against every surface form and returns the
    /// best match, if any cleared the threshold.
    fn classify_header(&self, line: &str) -> Option<Section> {
        let (score, section) = best_header_match(line);
        (score >= self.threshold).then_some(section)
    }

    /// Divides resume text into canonical sections.
    ///
    /// Empty input yields an empty map; text with no recognizable header
    /// yields a single `other` entry holding the whole (whitespace-normalized)
    /// text. When the same canonical header occurs twice, the later
    /// occurrence's content OVERWRITES the earlier one.
    pub fn extract_sections(&self, text: &str) -> BTreeMap<Section, String> {
        let text = Self::preprocess(text);

        let mut sections = BTreeMap::new();
        let mut current_section = Section::Other;
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.classify_header(line) {
                Some(section) => {
                    if !buffer.is_empty() {
                        sections.insert(current_section, buffer.join(" "));
                        buffer.clear();
                    }
                    current_section = section;
                }
                None => buffer.push(line),
            }
        }

        if !buffer.is_empty() {
            sections.insert(current_section, buffer.join(" "));
        }

        sections
    }

    /// Filters a section map down to the configured important sections.
    pub fn important_sections(
        &self,
        sections: &BTreeMap<Section, String>,
    ) -> BTreeMap<Section, String> {
        sections
            .iter()
            .filter(|(section, _)| self.important_sections.contains(section))
            .map(|(section, text)| (*section, text.clone()))
            .collect()
    }

    /// Segments text and joins the important sections' content into a single
    /// scoring document.
    pub fn important_text(&self, text: &str) -> String {
        let sections = self.extract_sections(text);
        self.important_sections(&sections)
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Best-scoring vocabulary entry for a line, as (score 0-100, section).
fn best_header_match(line: &str) -> (f64, Section) {
    let line = line.to_lowercase();
    HEADER_VOCABULARY
        .iter()
        .map(|(surface, section)| {
            (strsim::normalized_levenshtein(&line, surface) * 100.0, *section)
        })
        .fold((0.0, Section::Other), |best, candidate| {
            if candidate.0 > best.0 {
                candidate
            } else {
                best
            }
        })
}
