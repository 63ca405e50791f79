//! Declarative per-field constraints.
//!
//! Every rule is declared once here and applied uniformly by the validator —
//! including to every element of every collection. Length bounds are counted
//! in characters. A field with no upper bound uses `max: None`.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::schema::record::SkillLevel;

// ────────────────────────────────────────────────────────────────────────────
// Length rules
// ────────────────────────────────────────────────────────────────────────────

/// A min/max character-length constraint with a human-facing field label.
#[derive(Debug, Clone, Copy)]
pub struct LengthRule {
    pub label: &'static str,
    pub min: usize,
    pub max: Option<usize>,
}

impl LengthRule {
    const fn new(label: &'static str, min: usize, max: Option<usize>) -> Self {
        LengthRule { label, min, max }
    }

    /// Returns the violation message, or `None` when the value is in bounds.
    pub fn check(&self, value: &str) -> Option<String> {
        let len = value.chars().count();
        if len < self.min {
            return Some(format!(
                "{} must be at least {} characters long",
                self.label, self.min
            ));
        }
        if let Some(max) = self.max {
            if len > max {
                return Some(format!(
                    "{} must be at most {} characters long",
                    self.label, max
                ));
            }
        }
        None
    }
}

pub const NAME: LengthRule = LengthRule::new("Name", 3, Some(30));
pub const PHONE: LengthRule = LengthRule::new("Phone number", 10, Some(20));
pub const ADDRESS: LengthRule = LengthRule::new("Address", 10, Some(100));
pub const SUMMARY: LengthRule = LengthRule::new("Summary", 10, Some(150));

pub const EXPERIENCE_TITLE: LengthRule = LengthRule::new("Title", 3, None);
pub const EXPERIENCE_COMPANY: LengthRule = LengthRule::new("Company", 3, None);
pub const EXPERIENCE_DURATION: LengthRule = LengthRule::new("Duration", 5, Some(30));
pub const EXPERIENCE_DESCRIPTION: LengthRule = LengthRule::new("Description", 5, Some(100));

pub const EDUCATION_DEGREE: LengthRule = LengthRule::new("Degree", 3, None);
pub const EDUCATION_COLLEGE: LengthRule = LengthRule::new("College", 3, None);
pub const EDUCATION_DURATION: LengthRule = LengthRule::new("Duration", 5, Some(100));

pub const PROJECT_NAME: LengthRule = LengthRule::new("Project name", 3, None);
pub const PROJECT_DESCRIPTION: LengthRule = LengthRule::new("Description", 5, Some(100));

pub const CERTIFICATION_NAME: LengthRule = LengthRule::new("Certification name", 3, None);
pub const CERTIFICATION_DESCRIPTION: LengthRule = LengthRule::new("Description", 5, Some(100));

pub const SKILL_NAME: LengthRule = LengthRule::new("Skill name", 3, Some(30));
pub const KEYWORD_VALUE: LengthRule = LengthRule::new("Keyword", 2, Some(30));

// ────────────────────────────────────────────────────────────────────────────
// Format rules
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // One local part, one @, one domain with at least one dot. Deliberately
    // permissive beyond that — the form is not an MX verifier.
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Standard address grammar check for the `email` field.
pub fn check_email(value: &str) -> Option<String> {
    if EMAIL_RE.is_match(value) {
        None
    } else {
        Some("Invalid email address".to_string())
    }
}

/// Absolute-URL grammar check for optional link fields. Only invoked for
/// present, non-empty values — absence is always valid.
pub fn check_url(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(_) => None,
        Err(_) => Some("Invalid URL".to_string()),
    }
}

/// Closed-set membership check for the skill proficiency level.
pub fn check_level(value: &str) -> Option<String> {
    if SkillLevel::parse(value).is_some() {
        None
    } else {
        Some(format!(
            "Skill level must be one of beginner, intermediate, advanced, expert (got '{value}')"
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
