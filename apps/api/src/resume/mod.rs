//! Resume parsing pipeline.
//!
//! Flow: bytes → extract_text → {name, contact, sections} over the same text →
//! section parsers → `ResumeRecord`.
//!
//! Everything here is synchronous and CPU-bound; HTTP callers run it inside
//! `tokio::task::spawn_blocking`.

pub mod contact;
pub mod extract;
#[cfg(test)]
mod fixtures;
pub mod handlers;
pub mod name;
pub mod parsers;
pub mod sections;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::resume::{
    or_placeholder, EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord,
    DEFAULT_PROFILE_IMAGE_URL, SUMMARY_PLACEHOLDER, TITLE_PLACEHOLDER,
};
use crate::resume::contact::extract_contact;
use crate::resume::extract::{extract_text, DocumentFormat};
use crate::resume::name::{EntityRecognizer, NameDetector};
use crate::resume::parsers::{
    DelimitedSkillsParser, EducationBlockParser, ExperienceBlockParser, ProjectBlockParser,
    SectionParser, JOB_TITLE_PLACEHOLDER,
};
use crate::resume::sections::ResumeSections;

/// Lines from the top of the resume handed to the name detector.
const NAME_WINDOW_LINES: usize = 5;

/// A first summary line shorter than this many words is taken as the title.
const MAX_TITLE_WORDS: usize = 5;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type '{0}'. Only PDF and DOCX are supported.")]
    UnsupportedFormat(String),

    #[error("Could not extract text from resume.")]
    ExtractionEmpty,

    #[error("Could not read resume file: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns the name detector and the per-section parser strategies.
/// Built once at startup and shared read-only across uploads.
pub struct ResumeParser {
    names: NameDetector,
    experience: Box<dyn SectionParser<ExperienceEntry>>,
    education: Box<dyn SectionParser<EducationEntry>>,
    skills: Box<dyn SectionParser<String>>,
    projects: Box<dyn SectionParser<ProjectEntry>>,
}

impl ResumeParser {
    /// Default blank-line / delimiter parsers for every section.
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            names: NameDetector::new(recognizer),
            experience: Box::new(ExperienceBlockParser),
            education: Box::new(EducationBlockParser),
            skills: Box::new(DelimitedSkillsParser),
            projects: Box::new(ProjectBlockParser),
        }
    }

    /// Parses a saved upload, deriving the format from its extension.
    /// Unsupported extensions fail before the file is read.
    #[allow(dead_code)]
    pub fn parse_file(&self, path: &Path) -> Result<ResumeRecord, ParseError> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes, format)
    }

    /// Extracts text and builds the record. Blank text is `ExtractionEmpty`.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<ResumeRecord, ParseError> {
        let raw_text = extract_text(bytes, format);
        if raw_text.trim().is_empty() {
            return Err(ParseError::ExtractionEmpty);
        }
        Ok(self.parse_text(&raw_text))
    }

    /// Builds a fully populated record from already-extracted text.
    pub fn parse_text(&self, raw_text: &str) -> ResumeRecord {
        // PDF text usually opens with blank lines; the window starts at the first real one.
        let leading = raw_text
            .split('\n')
            .skip_while(|line| line.trim().is_empty())
            .take(NAME_WINDOW_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        let name = self.names.detect(&leading);
        let contact = extract_contact(raw_text);
        let sections = ResumeSections::segment(raw_text);

        let summary = or_placeholder(Some(sections.summary), SUMMARY_PLACEHOLDER);
        let experience = self.experience.parse(&sections.experience);
        let education = self.education.parse(&sections.education);
        let skills = self.skills.parse(&sections.skills);
        let projects = self.projects.parse(&sections.projects);

        let title = derive_title(&experience, &summary);

        info!(
            "Parsed resume: experience={} education={} skills={} projects={}",
            experience.len(),
            education.len(),
            skills.len(),
            projects.len()
        );
        debug!("Detected name={name:?} title={title:?}");

        ResumeRecord {
            name,
            title,
            email: contact.email,
            phone: contact.phone,
            linkedin: contact.linkedin,
            github: contact.github,
            website: contact.website,
            summary,
            experience,
            education,
            skills,
            projects,
            profile_image_url: DEFAULT_PROFILE_IMAGE_URL.to_string(),
        }
    }
}

/// Section strategy overrides for layout-aware or model-backed parsers.
#[allow(dead_code)]
impl ResumeParser {
    pub fn with_experience_parser(
        mut self,
        parser: impl SectionParser<ExperienceEntry> + 'static,
    ) -> Self {
        self.experience = Box::new(parser);
        self
    }

    pub fn with_education_parser(
        mut self,
        parser: impl SectionParser<EducationEntry> + 'static,
    ) -> Self {
        self.education = Box::new(parser);
        self
    }

    pub fn with_skills_parser(mut self, parser: impl SectionParser<String> + 'static) -> Self {
        self.skills = Box::new(parser);
        self
    }

    pub fn with_projects_parser(
        mut self,
        parser: impl SectionParser<ProjectEntry> + 'static,
    ) -> Self {
        self.projects = Box::new(parser);
        self
    }
}

/// First real job title; else a short first summary line; else the placeholder.
fn derive_title(experience: &[ExperienceEntry], summary: &str) -> String {
    if let Some(first) = experience.first() {
        if first.title != JOB_TITLE_PLACEHOLDER {
            return first.title.clone();
        }
    }

    let first_line = summary.split('\n').next().unwrap_or_default().trim();
    if !first_line.is_empty() && first_line.split_whitespace().count() < MAX_TITLE_WORDS {
        return first_line.to_string();
    }

    TITLE_PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        EMAIL_PLACEHOLDER, GITHUB_PLACEHOLDER, LINKEDIN_PLACEHOLDER, NAME_PLACEHOLDER,
        PHONE_PLACEHOLDER, WEBSITE_PLACEHOLDER,
    };
    use crate::resume::fixtures::{pdf_bytes, NullRecognizer};
    use crate::resume::name::GazetteerRecognizer;
    use std::io::Write;

    const RESUME_TEXT: &str = "Jane Marie Smith\n\
        jane@example.com | +1 555 123 4567\n\
        linkedin.com/in/janesmith | github.com/janesmith | https://janesmith.dev\n\
        \n\
        Summary\n\
        Backend engineer who loves systems.\n\
        \n\
        Experience\n\
        Senior Engineer\n\
        Acme Corp 2020 - Present\n\
        Built the billing pipeline.\n\
        \n\
        Engineer\n\
        Initech 2017 - 2020\n\
        \n\
        Education\n\
        BSc Computer Science\n\
        State University\n\
        \n\
        Skills\n\
        Rust, Go; Python\n\
        \n\
        Projects\n\
        folio\n\
        Resume to portfolio renderer.";

    fn parser() -> ResumeParser {
        ResumeParser::new(Arc::new(NullRecognizer))
    }

    struct OneLineSkills;

    impl SectionParser<String> for OneLineSkills {
        fn parse(&self, block: &str) -> Vec<String> {
            vec![block.replace('\n', " ")]
        }
    }

    #[test]
    fn test_parse_text_builds_full_record() {
        let record = parser().parse_text(RESUME_TEXT);
        assert_eq!(record.name, "Jane Marie Smith");
        assert_eq!(record.title, "Senior Engineer");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.phone, "+1 555 123 4567");
        assert_eq!(record.linkedin, "linkedin.com/in/janesmith");
        assert_eq!(record.github, "github.com/janesmith");
        assert_eq!(record.website, "https://janesmith.dev");
        assert_eq!(record.summary, "Backend engineer who loves systems.");
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.experience[1].company, "Initech 2017 - 2020");
        assert_eq!(record.education[0].institution, "State University");
        assert_eq!(record.skills, vec!["Rust", "Go", "Python"]);
        assert_eq!(record.projects[0].name, "folio");
        assert_eq!(record.profile_image_url, DEFAULT_PROFILE_IMAGE_URL);
    }

    #[test]
    fn test_sparse_text_is_fully_populated_with_placeholders() {
        let record = parser().parse_text("just some words without structure");
        assert_eq!(record.name, NAME_PLACEHOLDER);
        assert_eq!(record.title, TITLE_PLACEHOLDER);
        assert_eq!(record.email, EMAIL_PLACEHOLDER);
        assert_eq!(record.phone, PHONE_PLACEHOLDER);
        assert_eq!(record.linkedin, LINKEDIN_PLACEHOLDER);
        assert_eq!(record.github, GITHUB_PLACEHOLDER);
        assert_eq!(record.website, WEBSITE_PLACEHOLDER);
        assert_eq!(record.summary, SUMMARY_PLACEHOLDER);
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_name_only_looks_at_first_five_lines() {
        let recognizer = Arc::new(GazetteerRecognizer::builtin());
        let text = "RESUME\nline two\nline three\nline four\nline five\nMaria Gonzalez";
        let record = ResumeParser::new(recognizer).parse_text(text);
        assert_eq!(record.name, NAME_PLACEHOLDER);
    }

    #[test]
    fn test_title_falls_back_to_short_summary_line() {
        let record = parser().parse_text("Summary\nStaff Platform Engineer\nLoves Rust.");
        assert_eq!(record.title, "Staff Platform Engineer");
    }

    #[test]
    fn test_title_placeholder_for_long_summary_line() {
        assert_eq!(
            derive_title(&[], "I build reliable distributed systems at scale."),
            TITLE_PLACEHOLDER
        );
        assert_eq!(derive_title(&[], SUMMARY_PLACEHOLDER), TITLE_PLACEHOLDER);
    }

    #[test]
    fn test_title_skips_job_title_placeholder() {
        let experience = vec![ExperienceEntry {
            title: JOB_TITLE_PLACEHOLDER.to_string(),
            company: String::new(),
            dates: String::new(),
            description: String::new(),
        }];
        assert_eq!(derive_title(&experience, "Data Engineer"), "Data Engineer");
    }

    #[test]
    fn test_custom_section_parser_is_used() {
        let record = parser()
            .with_skills_parser(OneLineSkills)
            .parse_text("Skills\nRust\nGo");
        assert_eq!(record.skills, vec!["Rust Go"]);
    }

    #[test]
    fn test_empty_documents_are_extraction_empty() {
        for format in [DocumentFormat::Pdf, DocumentFormat::Docx] {
            assert!(matches!(
                parser().parse_bytes(&[], format),
                Err(ParseError::ExtractionEmpty)
            ));
        }
    }

    #[test]
    fn test_unsupported_extension_fails_before_reading() {
        // The path does not exist: the error must come from the extension check.
        let result = parser().parse_file(Path::new("/nonexistent/resume.txt"));
        assert!(matches!(result, Err(ParseError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_file_with_corrupt_pdf_is_extraction_empty() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 truncated").unwrap();
        let result = parser().parse_file(file.path());
        assert!(matches!(result, Err(ParseError::ExtractionEmpty)));
    }

    #[test]
    fn test_parse_text_is_deterministic() {
        let p = parser();
        assert_eq!(p.parse_text(RESUME_TEXT), p.parse_text(RESUME_TEXT));
    }

    #[test]
    fn test_leading_blank_lines_do_not_hide_the_name() {
        let record = parser().parse_text("\n\n  \nXavier Quinn\n\nSkills\nRust, Go");
        assert_eq!(record.name, "Xavier Quinn");
    }

    #[test]
    fn test_pdf_name_falls_back_to_capitalized_first_line() {
        // Neither token is a builtin given name.
        let parser = ResumeParser::new(Arc::new(GazetteerRecognizer::builtin()));
        let bytes = pdf_bytes(&["Xavier Quinn", "Skills", "Rust, Go"]);
        let record = parser.parse_bytes(&bytes, DocumentFormat::Pdf).unwrap();
        assert_eq!(record.name, "Xavier Quinn");
        assert_eq!(record.skills, vec!["Rust", "Go"]);
    }
}
