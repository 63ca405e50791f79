//! Record validation — `validate` applies the declarative rules to a raw
//! candidate and returns either a normalized record or the full set of
//! field-level violations.
//!
//! Properties the rest of the system relies on:
//! - Pure function: no side effects, safe to call on every keystroke.
//! - All violations are collected — a failure in `skills[2]` does not
//!   short-circuit `skills[3]`.
//! - Error paths use the record's own structure (`experience[1].title`) so
//!   the form layer can look up messages in O(1) during re-render.
//! - On success, values pass through unchanged; the only normalization is
//!   the declared "optional empty string ≡ absent".

use std::collections::HashMap;
use std::fmt;

use crate::schema::record::{
    Certification, Education, Experience, Keyword, Project, RawResume, ResumeRecord, Skill,
    SkillLevel,
};
use crate::schema::rules;

// ────────────────────────────────────────────────────────────────────────────
// Field errors
// ────────────────────────────────────────────────────────────────────────────

/// Mapping from field path to a human-readable violation message.
///
/// Paths mirror the record structure, including array indices:
/// `email`, `skills[2].name`, `experience[0].duration`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    fn insert(&mut self, path: impl Into<String>, message: String) {
        self.errors.insert(path.into(), message);
    }

    /// Message for a single field path, if that field failed validation.
    pub fn message(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(p, m)| (p.as_str(), m.as_str()))
    }

    /// Paths in lexicographic order, for deterministic reporting.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for path in self.sorted_paths() {
            if !first {
                write!(f, "; ")?;
            }
            // message() is Some by construction for every sorted path
            write!(f, "{path}: {}", self.message(path).unwrap_or(""))?;
            first = false;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation entry point
// ────────────────────────────────────────────────────────────────────────────

/// Validates a raw candidate against the declarative schema.
///
/// Returns the normalized `ResumeRecord` when every constraint holds, or the
/// complete `FieldErrors` mapping otherwise. Never partially accepts: one
/// out-of-bounds field invalidates the whole record.
pub fn validate(raw: &RawResume) -> Result<ResumeRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    check(&mut errors, "name", rules::NAME.check(&raw.name));
    check(&mut errors, "email", rules::check_email(&raw.email));
    check(&mut errors, "phone", rules::PHONE.check(&raw.phone));
    check(&mut errors, "address", rules::ADDRESS.check(&raw.address));
    check(&mut errors, "summary", rules::SUMMARY.check(&raw.summary));

    let linkedin = optional(&raw.linkedin);
    if let Some(value) = &linkedin {
        check(&mut errors, "linkedin", rules::check_url(value));
    }
    let website = optional(&raw.website);
    if let Some(value) = &website {
        check(&mut errors, "website", rules::check_url(value));
    }

    for (i, exp) in raw.experience.iter().enumerate() {
        check(
            &mut errors,
            format!("experience[{i}].title"),
            rules::EXPERIENCE_TITLE.check(&exp.title),
        );
        check(
            &mut errors,
            format!("experience[{i}].company"),
            rules::EXPERIENCE_COMPANY.check(&exp.company),
        );
        check(
            &mut errors,
            format!("experience[{i}].duration"),
            rules::EXPERIENCE_DURATION.check(&exp.duration),
        );
        check(
            &mut errors,
            format!("experience[{i}].description"),
            rules::EXPERIENCE_DESCRIPTION.check(&exp.description),
        );
    }

    for (i, edu) in raw.education.iter().enumerate() {
        check(
            &mut errors,
            format!("education[{i}].degree"),
            rules::EDUCATION_DEGREE.check(&edu.degree),
        );
        check(
            &mut errors,
            format!("education[{i}].college"),
            rules::EDUCATION_COLLEGE.check(&edu.college),
        );
        check(
            &mut errors,
            format!("education[{i}].duration"),
            rules::EDUCATION_DURATION.check(&edu.duration),
        );
    }

    for (i, project) in raw.projects.iter().enumerate() {
        check(
            &mut errors,
            format!("projects[{i}].name"),
            rules::PROJECT_NAME.check(&project.name),
        );
        check(
            &mut errors,
            format!("projects[{i}].description"),
            rules::PROJECT_DESCRIPTION.check(&project.description),
        );
        if let Some(link) = optional(&project.link) {
            check(
                &mut errors,
                format!("projects[{i}].link"),
                rules::check_url(&link),
            );
        }
    }

    for (i, cert) in raw.certifications.iter().enumerate() {
        check(
            &mut errors,
            format!("certifications[{i}].name"),
            rules::CERTIFICATION_NAME.check(&cert.name),
        );
        check(
            &mut errors,
            format!("certifications[{i}].description"),
            rules::CERTIFICATION_DESCRIPTION.check(&cert.description),
        );
    }

    for (i, skill) in raw.skills.iter().enumerate() {
        check(
            &mut errors,
            format!("skills[{i}].name"),
            rules::SKILL_NAME.check(&skill.name),
        );
        check(
            &mut errors,
            format!("skills[{i}].level"),
            rules::check_level(&skill.level),
        );
    }

    for (i, keyword) in raw.keywords.iter().enumerate() {
        check(
            &mut errors,
            format!("keywords[{i}].value"),
            rules::KEYWORD_VALUE.check(&keyword.value),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ResumeRecord {
        name: raw.name.clone(),
        email: raw.email.clone(),
        phone: raw.phone.clone(),
        address: raw.address.clone(),
        linkedin,
        website,
        summary: raw.summary.clone(),
        experience: raw
            .experience
            .iter()
            .map(|e| Experience {
                title: e.title.clone(),
                company: e.company.clone(),
                duration: e.duration.clone(),
                description: e.description.clone(),
            })
            .collect(),
        education: raw
            .education
            .iter()
            .map(|e| Education {
                degree: e.degree.clone(),
                college: e.college.clone(),
                duration: e.duration.clone(),
            })
            .collect(),
        projects: raw
            .projects
            .iter()
            .map(|p| Project {
                name: p.name.clone(),
                description: p.description.clone(),
                link: optional(&p.link),
            })
            .collect(),
        certifications: raw
            .certifications
            .iter()
            .map(|c| Certification {
                name: c.name.clone(),
                description: c.description.clone(),
            })
            .collect(),
        skills: raw
            .skills
            .iter()
            .map(|s| Skill {
                name: s.name.clone(),
                // Membership was checked above; errors would have returned early.
                level: SkillLevel::parse(&s.level).unwrap_or(SkillLevel::Beginner),
            })
            .collect(),
        keywords: raw
            .keywords
            .iter()
            .map(|k| Keyword {
                value: k.value.clone(),
            })
            .collect(),
    })
}

fn check(errors: &mut FieldErrors, path: impl Into<String>, violation: Option<String>) {
    if let Some(message) = violation {
        errors.insert(path, message);
    }
}

/// Declared normalization for optional fields: empty string ≡ absent.
fn optional(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::{RawEducation, RawExperience, RawKeyword, RawProject, RawSkill};

    fn make_valid_raw() -> RawResume {
        RawResume {
            name: "Jane Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            phone: "+1 555 123 4567".to_string(),
            address: "42 Harbor Lane, Springfield".to_string(),
            linkedin: Some("https://linkedin.com/in/janesmith".to_string()),
            website: None,
            summary: "Systems engineer with a decade of storage-layer work.".to_string(),
            experience: vec![RawExperience {
                title: "Staff Engineer".to_string(),
                company: "Initech".to_string(),
                duration: "2019 - 2024".to_string(),
                description: "Led the storage platform team of eight.".to_string(),
            }],
            education: vec![RawEducation {
                degree: "BSc Computer Science".to_string(),
                college: "State University".to_string(),
                duration: "2011 - 2015".to_string(),
            }],
            projects: vec![RawProject {
                name: "chunkd".to_string(),
                description: "Content-addressed chunk store in Rust.".to_string(),
                link: Some("https://github.com/janesmith/chunkd".to_string()),
            }],
            certifications: vec![],
            skills: vec![RawSkill {
                name: "Rust".to_string(),
                level: "expert".to_string(),
            }],
            keywords: vec![RawKeyword {
                value: "distributed systems".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_record_passes_through_structurally() {
        let raw = make_valid_raw();
        let record = validate(&raw).expect("in-bounds candidate must validate");

        assert_eq!(record.name, raw.name);
        assert_eq!(record.email, raw.email);
        assert_eq!(record.summary, raw.summary);
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].title, "Staff Engineer");
        assert_eq!(record.skills[0].level, SkillLevel::Expert);
        assert_eq!(
            record.linkedin.as_deref(),
            Some("https://linkedin.com/in/janesmith")
        );
    }

    #[test]
    fn test_invalid_email_reports_exact_path() {
        let mut raw = make_valid_raw();
        raw.email = "not-an-email".to_string();

        let errors = validate(&raw).expect_err("malformed email must fail");
        assert_eq!(errors.message("email"), Some("Invalid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_skill_name_reports_indexed_path() {
        let mut raw = make_valid_raw();
        raw.skills.push(RawSkill {
            name: "Go".to_string(), // 2 chars, below the 3-char minimum
            level: "advanced".to_string(),
        });
        raw.skills.push(RawSkill {
            name: "Python".to_string(),
            level: "expert".to_string(),
        });

        let errors = validate(&raw).expect_err("short skill name must fail");
        assert!(errors.message("skills[1].name").is_some());
        // The following element was still validated — no short-circuit.
        assert!(errors.message("skills[2].name").is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_violations_collected_across_elements() {
        let mut raw = make_valid_raw();
        raw.experience.push(RawExperience::default()); // never filled in
        raw.skills[0].level = "guru".to_string();

        let errors = validate(&raw).expect_err("multiple violations expected");
        // Each required subfield of the blank element fails its minimum.
        assert!(errors.message("experience[1].title").is_some());
        assert!(errors.message("experience[1].company").is_some());
        assert!(errors.message("experience[1].duration").is_some());
        assert!(errors.message("experience[1].description").is_some());
        assert!(errors.message("skills[0].level").is_some());
        // The first, valid experience element contributed no errors.
        assert!(errors.message("experience[0].title").is_none());
    }

    #[test]
    fn test_optional_empty_string_is_valid() {
        let mut raw = make_valid_raw();
        raw.linkedin = Some(String::new());
        raw.website = Some(String::new());

        let record = validate(&raw).expect("empty optional must be treated as absent");
        assert!(record.linkedin.is_none());
        assert!(record.website.is_none());
    }

    #[test]
    fn test_present_optional_url_is_validated() {
        let mut raw = make_valid_raw();
        raw.website = Some("not a url".to_string());

        let errors = validate(&raw).expect_err("present optional URL must parse");
        assert_eq!(errors.message("website"), Some("Invalid URL"));
    }

    #[test]
    fn test_empty_collections_are_valid() {
        let mut raw = make_valid_raw();
        raw.experience.clear();
        raw.education.clear();
        raw.projects.clear();
        raw.skills.clear();
        raw.keywords.clear();

        let record = validate(&raw).expect("no minimum-count constraint on arrays");
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let raw = make_valid_raw();
        let a = validate(&raw).expect("valid");
        let b = validate(&raw).expect("valid");
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());

        let mut bad = make_valid_raw();
        bad.name = "Jo".to_string();
        let e1 = validate(&bad).expect_err("invalid");
        let e2 = validate(&bad).expect_err("invalid");
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_scaffold_fails_with_per_element_errors() {
        let raw = RawResume::scaffold();
        let errors = validate(&raw).expect_err("untouched scaffold must not validate");

        assert!(errors.message("name").is_some());
        assert!(errors.message("experience[0].title").is_some());
        assert!(errors.message("keywords[0].value").is_some());
        // Placeholder level defaults to a member of the closed set.
        assert!(errors.message("skills[0].level").is_none());
    }

    #[test]
    fn test_display_is_sorted_and_complete() {
        let mut raw = make_valid_raw();
        raw.name = "Jo".to_string();
        raw.email = "nope".to_string();

        let errors = validate(&raw).expect_err("invalid");
        let rendered = errors.to_string();
        assert!(rendered.contains("email: Invalid email address"));
        assert!(rendered.contains("name: Name must be at least 3 characters long"));
        let email_pos = rendered.find("email").unwrap();
        let name_pos = rendered.find("name:").unwrap();
        assert!(email_pos < name_pos, "paths reported in sorted order");
    }
}
