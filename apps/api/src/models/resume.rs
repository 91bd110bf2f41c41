use serde::{Deserialize, Serialize};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Professional Title";
pub const EMAIL_PLACEHOLDER: &str = "your.email@example.com";
pub const PHONE_PLACEHOLDER: &str = "+1234567890";
pub const LINKEDIN_PLACEHOLDER: &str = "your-linkedin-profile";
pub const GITHUB_PLACEHOLDER: &str = "your-github-profile";
pub const WEBSITE_PLACEHOLDER: &str = "yourpersonal.website";
pub const SUMMARY_PLACEHOLDER: &str = "A brief professional summary about yourself.";

pub const DEFAULT_PROFILE_IMAGE_URL: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=387&q=80";

/// The structured profile extracted from one resume upload.
///
/// Every scalar field is always populated: extraction steps that find nothing
/// fall back to the matching `*_PLACEHOLDER` constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Text order, duplicates kept.
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub profile_image_url: String,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            name: NAME_PLACEHOLDER.to_string(),
            title: TITLE_PLACEHOLDER.to_string(),
            email: EMAIL_PLACEHOLDER.to_string(),
            phone: PHONE_PLACEHOLDER.to_string(),
            linkedin: LINKEDIN_PLACEHOLDER.to_string(),
            github: GITHUB_PLACEHOLDER.to_string(),
            website: WEBSITE_PLACEHOLDER.to_string(),
            summary: SUMMARY_PLACEHOLDER.to_string(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            profile_image_url: DEFAULT_PROFILE_IMAGE_URL.to_string(),
        }
    }
}

/// `company` holds the whole second line of the entry (company and dates together);
/// `dates` is never split out and stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

/// Same shape rules as [`ExperienceEntry`]: `dates` stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub dates: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

/// Extract-or-default: every best-effort extraction step funnels through here
/// so a miss always lands on a placeholder, never an empty field.
pub fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_fully_populated() {
        let record = ResumeRecord::default();
        for field in [
            &record.name,
            &record.title,
            &record.email,
            &record.phone,
            &record.linkedin,
            &record.github,
            &record.website,
            &record.summary,
            &record.profile_image_url,
        ] {
            assert!(!field.is_empty());
        }
    }

    #[test]
    fn test_or_placeholder_keeps_found_value() {
        assert_eq!(
            or_placeholder(Some("jane@example.com".to_string()), EMAIL_PLACEHOLDER),
            "jane@example.com"
        );
    }

    #[test]
    fn test_or_placeholder_replaces_missing_and_blank() {
        assert_eq!(or_placeholder(None, PHONE_PLACEHOLDER), PHONE_PLACEHOLDER);
        assert_eq!(
            or_placeholder(Some("   ".to_string()), PHONE_PLACEHOLDER),
            PHONE_PLACEHOLDER
        );
    }

    #[test]
    fn test_record_serializes_with_flat_field_names() {
        let json = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert_eq!(json["name"], "Your Name");
        assert!(json["experience"].as_array().unwrap().is_empty());
        assert!(json.get("profile_image_url").is_some());
    }
}
