//! Name detection — recognizer first, capitalized-words fallback second.
//!
//! The recognizer is an owned handle (`Arc<dyn EntityRecognizer>`) built once at
//! startup and shared read-only across uploads. Tests swap in their own.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::resume::NAME_PLACEHOLDER;

/// Two or three capitalized words filling the whole line, e.g. "John Michael Doe".
static CAPITALIZED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?:\s[A-Z][a-z]+){1,2})$").expect("name fallback regex")
});

static NAME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z'\-]*\.?$").expect("name token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Named-entity recognizer seam. Implementations must be cheap to call
/// concurrently; they hold no mutable state.
pub trait EntityRecognizer: Send + Sync {
    /// Entities in text order.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Gazetteer-driven PERSON recognizer.
///
/// Scans each line for runs of capitalized tokens (initials like `J.` allowed).
/// A run of at least two tokens whose first token is a known given name becomes
/// a PERSON entity: the whole run when it has two or three tokens, otherwise
/// its first two tokens. Any other run of two or more tokens ("Acme Corp",
/// "Senior Software Engineer") is reported as `Other`.
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
}

const BUILTIN_GIVEN_NAMES: &[&str] = &[
    "aaron", "abigail", "adam", "adrian", "ahmed", "aisha", "alan", "albert", "alex",
    "alexander", "alexandra", "alice", "alicia", "amanda", "amber", "amit", "amy", "ana",
    "andrea", "andrew", "angela", "anna", "anne", "anthony", "anton", "arjun", "ashley",
    "barbara", "ben", "benjamin", "beth", "brandon", "brian", "carlos", "carol", "caroline",
    "catherine", "charles", "charlotte", "chen", "chris", "christian", "christina",
    "christopher", "claire", "daniel", "david", "deborah", "deepak", "diana", "diego",
    "dmitri", "donald", "dylan", "edward", "elena", "elizabeth", "emily", "emma", "eric",
    "ethan", "eva", "fatima", "felix", "fernando", "francesca", "frank", "gabriel", "george",
    "grace", "hannah", "harry", "helen", "henry", "hiroshi", "ian", "isabella", "ivan",
    "jack", "jacob", "james", "jane", "janet", "jason", "javier", "jennifer", "jessica",
    "joan", "john", "jonathan", "jose", "joseph", "joshua", "juan", "julia", "justin",
    "karen", "kate", "katherine", "kevin", "kim", "laura", "lauren", "lei", "leo", "li",
    "linda", "lisa", "lucas", "lucy", "luis", "maria", "mark", "martin", "mary", "matthew",
    "maya", "mei", "michael", "michelle", "mohammed", "muhammad", "nancy", "natalie",
    "nathan", "nicholas", "nicole", "nina", "noah", "olivia", "omar", "oscar", "pablo",
    "patricia", "patrick", "paul", "peter", "priya", "rachel", "rahul", "raj", "rebecca",
    "richard", "robert", "ryan", "samantha", "samuel", "sandra", "sara", "sarah", "scott",
    "sean", "sofia", "sophia", "stephanie", "stephen", "steven", "susan", "thomas",
    "timothy", "tom", "victoria", "wei", "william", "yuki", "zoe",
];

impl GazetteerRecognizer {
    pub fn builtin() -> Self {
        Self::with_names(BUILTIN_GIVEN_NAMES.iter().copied())
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let given_names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { given_names }
    }

    /// Builtin list, extended with one given name per line from `path` when set.
    /// An unreadable file keeps the builtin list and logs a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let mut recognizer = Self::builtin();
        let Some(path) = path else {
            return recognizer;
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let before = recognizer.given_names.len();
                recognizer.given_names.extend(
                    contents
                        .lines()
                        .map(|l| l.trim().to_lowercase())
                        .filter(|l| !l.is_empty() && !l.starts_with('#')),
                );
                info!(
                    "Loaded {} extra given names from {}",
                    recognizer.given_names.len() - before,
                    path.display()
                );
            }
            Err(e) => warn!(
                "Could not read name gazetteer {}: {e}; using builtin names only",
                path.display()
            ),
        }
        recognizer
    }

    pub fn len(&self) -> usize {
        self.given_names.len()
    }

    fn is_given_name(&self, token: &str) -> bool {
        self.given_names
            .contains(&token.trim_end_matches('.').to_lowercase())
    }

    fn entity_from_run(&self, run: &[&str]) -> Option<Entity> {
        if run.len() < 2 {
            return None;
        }
        if !self.is_given_name(run[0]) {
            return Some(Entity {
                text: run.join(" "),
                label: EntityLabel::Other,
            });
        }
        let take = if run.len() <= 3 { run.len() } else { 2 };
        Some(Entity {
            text: run[..take].join(" "),
            label: EntityLabel::Person,
        })
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for line in text.lines() {
            let mut run: Vec<&str> = Vec::new();
            for raw in line.split_whitespace() {
                let token = raw.trim_end_matches([',', ';', '|']);
                let ends_run = token.len() != raw.len();
                if NAME_TOKEN.is_match(token) {
                    run.push(token);
                    if !ends_run {
                        continue;
                    }
                }
                entities.extend(self.entity_from_run(&run));
                run.clear();
            }
            entities.extend(self.entity_from_run(&run));
        }
        entities
    }
}

/// Picks the candidate's name out of the top of the resume.
#[derive(Clone)]
pub struct NameDetector {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl NameDetector {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// `leading_text` is the first few lines of the resume. The first PERSON
    /// entity wins; then a 2–3 capitalized-word first line; then the placeholder.
    pub fn detect(&self, leading_text: &str) -> String {
        if let Some(person) = self
            .recognizer
            .recognize(leading_text)
            .into_iter()
            .find(|e| e.label == EntityLabel::Person)
        {
            debug!("Name from recognizer: {}", person.text);
            return person.text;
        }

        let first_line = leading_text.split('\n').next().unwrap_or_default().trim();
        if CAPITALIZED_NAME.is_match(first_line) {
            debug!("Name from capitalized first line: {first_line}");
            return first_line.to_string();
        }

        NAME_PLACEHOLDER.to_string()
    }
}
