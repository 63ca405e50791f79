//! Resume data model — the raw form-shaped input and the validated record.
//!
//! `RawResume` mirrors what the form collection layer produces: plain strings
//! for every scalar and loosely-typed element objects for every collection.
//! `ResumeRecord` is the validated counterpart; it only ever exists as the
//! output of `schema::validate::validate` and is owned by the store.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Skill level enum
// ────────────────────────────────────────────────────────────────────────────

/// Closed proficiency enumeration. No other string is accepted by the
/// validator, so downstream consumers never need a fallback branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// All four variants, in ascending proficiency order.
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }

    /// Parses the form's string representation. Returns `None` for anything
    /// outside the closed set — the validator turns that into a field error.
    pub fn parse(value: &str) -> Option<SkillLevel> {
        match value {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            "expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw (form-shaped) input
// ────────────────────────────────────────────────────────────────────────────

/// Untyped candidate record as collected from the form layer.
///
/// Every field defaults so that partially-filled submissions deserialize
/// cleanly and fail in the validator with per-field errors instead of at the
/// serde boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: String,
    pub experience: Vec<RawExperience>,
    pub education: Vec<RawEducation>,
    pub projects: Vec<RawProject>,
    pub certifications: Vec<RawCertification>,
    pub skills: Vec<RawSkill>,
    pub keywords: Vec<RawKeyword>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEducation {
    pub degree: String,
    pub college: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProject {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCertification {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSkill {
    pub name: String,
    pub level: String,
}

impl Default for RawSkill {
    fn default() -> Self {
        RawSkill {
            name: String::new(),
            level: "beginner".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeyword {
    pub value: String,
}

impl RawResume {
    /// The editable-form scaffold: all-empty scalars and exactly one
    /// placeholder row per collection. The placeholder rows drive the form UI;
    /// they do not pass validation until filled in (or removed).
    pub fn scaffold() -> Self {
        RawResume {
            experience: vec![RawExperience::default()],
            education: vec![RawEducation::default()],
            projects: vec![RawProject::default()],
            certifications: vec![RawCertification::default()],
            skills: vec![RawSkill::default()],
            keywords: vec![RawKeyword::default()],
            ..RawResume::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validated record
// ────────────────────────────────────────────────────────────────────────────

/// A fully validated resume record. Collection ordering is insertion order
/// and is preserved verbatim from the raw input through to the rendered
/// document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Professional-network URL; `None` when absent or submitted empty.
    pub linkedin: Option<String>,
    /// Personal-site URL; `None` when absent or submitted empty.
    pub website: Option<String>,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<Skill>,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub college: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub value: String,
}

impl ResumeRecord {
    /// Initial store value: all-empty scalars and one placeholder row per
    /// collection, matching the form scaffold. Replaced wholesale on the
    /// first successful submission.
    pub fn scaffold() -> Self {
        ResumeRecord {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            linkedin: None,
            website: None,
            summary: String::new(),
            experience: vec![Experience {
                title: String::new(),
                company: String::new(),
                duration: String::new(),
                description: String::new(),
            }],
            education: vec![Education {
                degree: String::new(),
                college: String::new(),
                duration: String::new(),
            }],
            projects: vec![Project {
                name: String::new(),
                description: String::new(),
                link: None,
            }],
            certifications: vec![Certification {
                name: String::new(),
                description: String::new(),
            }],
            skills: vec![Skill {
                name: String::new(),
                level: SkillLevel::Beginner,
            }],
            keywords: vec![Keyword {
                value: String::new(),
            }],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_parse_round_trips() {
        for level in SkillLevel::ALL {
            assert_eq!(SkillLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_skill_level_rejects_outside_closed_set() {
        assert_eq!(SkillLevel::parse("ninja"), None);
        assert_eq!(SkillLevel::parse("Expert"), None, "case-sensitive");
        assert_eq!(SkillLevel::parse(""), None);
    }

    #[test]
    fn test_skill_level_serde_uses_lowercase() {
        let json = serde_json::to_string(&SkillLevel::Expert).unwrap();
        assert_eq!(json, "\"expert\"");
        let back: SkillLevel = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(back, SkillLevel::Advanced);
    }

    #[test]
    fn test_scaffold_has_one_placeholder_per_collection() {
        let raw = RawResume::scaffold();
        assert!(raw.name.is_empty());
        assert_eq!(raw.experience.len(), 1);
        assert_eq!(raw.education.len(), 1);
        assert_eq!(raw.projects.len(), 1);
        assert_eq!(raw.certifications.len(), 1);
        assert_eq!(raw.skills.len(), 1);
        assert_eq!(raw.keywords.len(), 1);
        assert_eq!(raw.skills[0].level, "beginner");
    }

    #[test]
    fn test_raw_resume_deserializes_with_missing_fields() {
        // Partially-filled submissions must reach the validator, not die in serde.
        let raw: RawResume = serde_json::from_str(r#"{"name": "Jane Smith"}"#).unwrap();
        assert_eq!(raw.name, "Jane Smith");
        assert!(raw.email.is_empty());
        assert!(raw.experience.is_empty());
        assert!(raw.linkedin.is_none());
    }

    #[test]
    fn test_record_scaffold_mirrors_raw_scaffold() {
        let record = ResumeRecord::scaffold();
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.skills.len(), 1);
        assert_eq!(record.skills[0].level, SkillLevel::Beginner);
    }
}
