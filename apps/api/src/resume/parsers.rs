//! Section parsers — turn one bounded section block into structured entries.
//!
//! Each parser is a strategy behind `SectionParser<E>` so a layout-aware or
//! model-backed parser can replace the blank-line heuristics without touching
//! segmentation or the record shape.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank line regex"));

static SKILL_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n,;]|\s{2,}").expect("skill delimiter regex"));

pub trait SectionParser<E>: Send + Sync {
    fn parse(&self, block: &str) -> Vec<E>;
}

/// Splits `block` into non-blank entries separated by one or more blank lines.
fn entry_blocks(block: &str) -> Vec<&str> {
    BLANK_LINES
        .split(block.trim())
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}

/// Line 1, line 2 and the remaining lines of an entry, each trimmed.
/// Absent parts are `None`.
struct EntryLines {
    first: String,
    second: Option<String>,
    rest: Option<String>,
}

impl EntryLines {
    fn split(entry: &str) -> Self {
        let lines: Vec<&str> = entry.split('\n').collect();
        Self {
            first: lines[0].trim().to_string(),
            second: lines.get(1).map(|l| l.trim().to_string()),
            rest: (lines.len() > 2).then(|| lines[2..].join("\n").trim().to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub const JOB_TITLE_PLACEHOLDER: &str = "Job Title";
const COMPANY_PLACEHOLDER: &str = "Company & Dates";
const RESPONSIBILITIES_PLACEHOLDER: &str = "Description of responsibilities.";

/// Title on line 1, company-and-dates on line 2, description below.
pub struct ExperienceBlockParser;

impl SectionParser<ExperienceEntry> for ExperienceBlockParser {
    fn parse(&self, block: &str) -> Vec<ExperienceEntry> {
        if block.trim().is_empty() {
            return Vec::new();
        }

        let entries: Vec<ExperienceEntry> = entry_blocks(block)
            .into_iter()
            .map(|entry| {
                let lines = EntryLines::split(entry);
                ExperienceEntry {
                    title: lines.first,
                    company: lines.second.unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string()),
                    dates: String::new(),
                    description: lines
                        .rest
                        .unwrap_or_else(|| RESPONSIBILITIES_PLACEHOLDER.to_string()),
                }
            })
            .collect();

        if entries.is_empty() {
            return vec![ExperienceEntry {
                title: "Experience Details".to_string(),
                company: String::new(),
                dates: String::new(),
                description: block.to_string(),
            }];
        }
        entries
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

const INSTITUTION_PLACEHOLDER: &str = "Institution & Dates";
const EDUCATION_DETAILS_PLACEHOLDER: &str = "Details about education.";

pub struct EducationBlockParser;

impl SectionParser<EducationEntry> for EducationBlockParser {
    fn parse(&self, block: &str) -> Vec<EducationEntry> {
        if block.trim().is_empty() {
            return Vec::new();
        }

        let entries: Vec<EducationEntry> = entry_blocks(block)
            .into_iter()
            .map(|entry| {
                let lines = EntryLines::split(entry);
                EducationEntry {
                    degree: lines.first,
                    institution: lines
                        .second
                        .unwrap_or_else(|| INSTITUTION_PLACEHOLDER.to_string()),
                    dates: String::new(),
                    details: lines
                        .rest
                        .unwrap_or_else(|| EDUCATION_DETAILS_PLACEHOLDER.to_string()),
                }
            })
            .collect();

        if entries.is_empty() {
            return vec![EducationEntry {
                degree: "Education Details".to_string(),
                institution: String::new(),
                dates: String::new(),
                details: block.to_string(),
            }];
        }
        entries
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Splits on newline, comma, semicolon or runs of 2+ whitespace.
/// Single-character tokens are dropped; order and duplicates are kept.
pub struct DelimitedSkillsParser;

impl SectionParser<String> for DelimitedSkillsParser {
    fn parse(&self, block: &str) -> Vec<String> {
        SKILL_DELIMITERS
            .split(block)
            .map(str::trim)
            .filter(|skill| skill.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

const PROJECT_DESCRIPTION_PLACEHOLDER: &str = "Description and technologies.";

/// Name on line 1, everything else is the description.
/// `technologies` and `link` are not extracted.
pub struct ProjectBlockParser;

impl SectionParser<ProjectEntry> for ProjectBlockParser {
    fn parse(&self, block: &str) -> Vec<ProjectEntry> {
        if block.trim().is_empty() {
            return Vec::new();
        }

        let entries: Vec<ProjectEntry> = entry_blocks(block)
            .into_iter()
            .map(|entry| {
                let (name, description) = match entry.split_once('\n') {
                    Some((first, rest)) => (first.trim(), rest.trim()),
                    None => (entry.trim(), PROJECT_DESCRIPTION_PLACEHOLDER),
                };
                ProjectEntry {
                    name: name.to_string(),
                    description: description.to_string(),
                    technologies: Vec::new(),
                    link: String::new(),
                }
            })
            .collect();

        if entries.is_empty() {
            return vec![ProjectEntry {
                name: "Project Details".to_string(),
                description: block.to_string(),
                technologies: Vec::new(),
                link: String::new(),
            }];
        }
        entries
    }
}
