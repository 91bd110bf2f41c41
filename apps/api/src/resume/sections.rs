//! Section segmentation — finds keyword-headed blocks (summary, experience, …)
//! in the raw resume text.
//!
//! A header is a keyword alone on its line (case-insensitive, surrounding
//! whitespace allowed), optionally followed by `:`. The first keyword in list
//! order that appears anywhere wins, even if a later keyword occurs earlier in
//! the text. A section runs until the nearest header of any stop group.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub const SUMMARY_KEYWORDS: &[&str] = &["summary", "profile", "about me", "objective"];
pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment history",
    "professional experience",
];
pub const EDUCATION_KEYWORDS: &[&str] = &["education", "academic background", "qualifications"];
pub const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "proficiencies",
    "core competencies",
];
pub const PROJECTS_KEYWORDS: &[&str] = &["projects", "personal projects", "portfolio"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionKind {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => SUMMARY_KEYWORDS,
            SectionKind::Experience => EXPERIENCE_KEYWORDS,
            SectionKind::Education => EDUCATION_KEYWORDS,
            SectionKind::Skills => SKILLS_KEYWORDS,
            SectionKind::Projects => PROJECTS_KEYWORDS,
        }
    }

    /// Headers that close this section. Summary is never a stop for the others.
    pub fn stop_groups(self) -> &'static [&'static [&'static str]] {
        match self {
            SectionKind::Summary => &[
                EXPERIENCE_KEYWORDS,
                EDUCATION_KEYWORDS,
                SKILLS_KEYWORDS,
                PROJECTS_KEYWORDS,
            ],
            SectionKind::Experience => &[EDUCATION_KEYWORDS, SKILLS_KEYWORDS, PROJECTS_KEYWORDS],
            SectionKind::Education => &[SKILLS_KEYWORDS, PROJECTS_KEYWORDS, EXPERIENCE_KEYWORDS],
            SectionKind::Skills => &[PROJECTS_KEYWORDS, EXPERIENCE_KEYWORDS, EDUCATION_KEYWORDS],
            SectionKind::Projects => &[EXPERIENCE_KEYWORDS, EDUCATION_KEYWORDS, SKILLS_KEYWORDS],
        }
    }

    pub fn find_in(self, text: &str) -> String {
        find_section(text, self.keywords(), self.stop_groups())
    }
}

/// The five raw section blocks of one resume. Missing sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeSections {
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
}

impl ResumeSections {
    pub fn segment(text: &str) -> Self {
        Self {
            summary: SectionKind::Summary.find_in(text),
            experience: SectionKind::Experience.find_in(text),
            education: SectionKind::Education.find_in(text),
            skills: SectionKind::Skills.find_in(text),
            projects: SectionKind::Projects.find_in(text),
        }
    }
}

/// Header regex for every builtin keyword, compiled once.
static HEADER_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [
        SUMMARY_KEYWORDS,
        EXPERIENCE_KEYWORDS,
        EDUCATION_KEYWORDS,
        SKILLS_KEYWORDS,
        PROJECTS_KEYWORDS,
    ]
    .into_iter()
    .flatten()
    .map(|kw| {
        let re = Regex::new(&header_source(kw)).expect("section header regex");
        (*kw, re)
    })
    .collect()
});

/// Returns the trimmed block under the first matching header, or `""` when no
/// keyword of `section_keywords` heads a line.
///
/// Stop headers are searched in the text after the section header, so a stop
/// keyword directly after `Header:` on the same line still ends the section.
pub fn find_section(
    text: &str,
    section_keywords: &[&str],
    stop_keyword_groups: &[&[&str]],
) -> String {
    let Some(start) = section_keywords
        .iter()
        .filter_map(|kw| header_pattern(kw))
        .find_map(|re| re.find(text).map(|m| m.end()))
    else {
        return String::new();
    };

    let rest = &text[start..];
    let end = stop_keyword_groups
        .iter()
        .flat_map(|group| group.iter())
        .filter_map(|kw| header_pattern(kw))
        .filter_map(|re| re.find(rest).map(|m| start + m.start()))
        .min()
        .unwrap_or(text.len());

    text[start..end].trim().to_string()
}

fn header_source(keyword: &str) -> String {
    format!(r"(?im)(^|\n)\s*{}\s*($|\n|:)", regex::escape(keyword))
}

/// Builtin keywords come from the cache; any other keyword is compiled here.
fn header_pattern(keyword: &str) -> Option<Cow<'static, Regex>> {
    match HEADER_PATTERNS.get(keyword) {
        Some(re) => Some(Cow::Borrowed(re)),
        None => Regex::new(&header_source(keyword)).ok().map(Cow::Owned),
    }
}
