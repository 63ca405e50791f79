//! Document tree construction — maps a validated record into the ordered
//! visual structure the layout and export stages consume.
//!
//! Section emission rule: a section appears iff its backing field is
//! non-empty (non-blank string for Summary, non-empty collection otherwise),
//! and sections always appear in the fixed canonical order. Collection
//! elements are emitted in stored order, one block per element.

use serde::{Deserialize, Serialize};

use crate::schema::record::{ResumeRecord, SkillLevel};

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit sRGB color used for accents in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Section accent and header underline color.
pub const ACCENT: Rgb8 = Rgb8::new(0x66, 0x7e, 0xea);
/// Primary text color.
pub const INK: Rgb8 = Rgb8::new(0x1f, 0x29, 0x37);
/// Secondary text color (durations, descriptions, tags).
pub const MUTED: Rgb8 = Rgb8::new(0x4b, 0x55, 0x63);

/// Resolves a proficiency level to its badge accent color.
///
/// Total by construction — the enum is closed, so there is no default branch
/// and a missing case is a compile error rather than a runtime fallback.
pub fn level_accent(level: SkillLevel) -> Rgb8 {
    match level {
        SkillLevel::Beginner => Rgb8::new(0x4f, 0xac, 0xfe),
        SkillLevel::Intermediate => Rgb8::new(0x43, 0xe9, 0x7b),
        SkillLevel::Advanced => Rgb8::new(0xf0, 0x93, 0xfb),
        SkillLevel::Expert => Rgb8::new(0x66, 0x7e, 0xea),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tree types
// ────────────────────────────────────────────────────────────────────────────

/// The seven optional sections, in canonical render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Projects,
    Certifications,
    Skills,
    Keywords,
}

impl SectionKind {
    /// Canonical order — rendering iterates exactly this sequence.
    pub const ORDER: [SectionKind; 7] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Skills,
        SectionKind::Keywords,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
            SectionKind::Certifications => "Certifications",
            SectionKind::Skills => "Skills",
            SectionKind::Keywords => "Keywords",
        }
    }
}

/// Header block: the subject's name plus contact and link lines. Always
/// present; individual items are skipped when their field is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    /// Email / phone / address, in that order, empty items omitted.
    pub contact: Vec<String>,
    /// Professional-network and personal-site URLs, present items only.
    pub links: Vec<String>,
}

/// One visual block for a collection element with an optional trailing label
/// (duration), subheading (company/college/link), and body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryBlock {
    pub heading: String,
    pub trailing: Option<String>,
    pub subheading: Option<String>,
    pub body: Option<String>,
}

/// A skill badge: label plus the accent bound to its proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillBadge {
    pub label: String,
    pub level: SkillLevel,
}

impl SkillBadge {
    pub fn accent(&self) -> Rgb8 {
        level_accent(self.level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SectionBody {
    /// Free-running text (Summary).
    Paragraph(String),
    /// One block per element (Experience, Education, Projects, Certifications).
    Entries(Vec<EntryBlock>),
    /// Badge row (Skills).
    Badges(Vec<SkillBadge>),
    /// Inline tag row (Keywords).
    Tags(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

/// Ordered visual document, independent of page geometry. Height is
/// unconstrained here; pagination happens in the layout stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    pub header: Header,
    pub sections: Vec<Section>,
}

impl DocumentTree {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Maps a validated record into the ordered document tree. Never mutates the
/// record; fields are carried over verbatim apart from whitespace-only layout
/// decisions made downstream.
pub fn render(record: &ResumeRecord) -> DocumentTree {
    let header = Header {
        name: record.name.clone(),
        contact: [&record.email, &record.phone, &record.address]
            .into_iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect(),
        links: [&record.linkedin, &record.website]
            .into_iter()
            .flatten()
            .cloned()
            .collect(),
    };

    let mut sections = Vec::new();
    for kind in SectionKind::ORDER {
        if let Some(body) = section_body(record, kind) {
            sections.push(Section { kind, body });
        }
    }

    DocumentTree { header, sections }
}

/// Builds the body for one section, or `None` when its backing field is empty.
fn section_body(record: &ResumeRecord, kind: SectionKind) -> Option<SectionBody> {
    match kind {
        SectionKind::Summary => {
            if record.summary.is_empty() {
                None
            } else {
                Some(SectionBody::Paragraph(record.summary.clone()))
            }
        }
        SectionKind::Experience => non_empty(
            record
                .experience
                .iter()
                .map(|e| EntryBlock {
                    heading: e.title.clone(),
                    trailing: Some(e.duration.clone()),
                    subheading: Some(e.company.clone()),
                    body: Some(e.description.clone()),
                })
                .collect(),
        )
        .map(SectionBody::Entries),
        SectionKind::Education => non_empty(
            record
                .education
                .iter()
                .map(|e| EntryBlock {
                    heading: e.degree.clone(),
                    trailing: Some(e.duration.clone()),
                    subheading: Some(e.college.clone()),
                    body: None,
                })
                .collect(),
        )
        .map(SectionBody::Entries),
        SectionKind::Projects => non_empty(
            record
                .projects
                .iter()
                .map(|p| EntryBlock {
                    heading: p.name.clone(),
                    trailing: None,
                    subheading: p.link.clone(),
                    body: Some(p.description.clone()),
                })
                .collect(),
        )
        .map(SectionBody::Entries),
        SectionKind::Certifications => non_empty(
            record
                .certifications
                .iter()
                .map(|c| EntryBlock {
                    heading: c.name.clone(),
                    trailing: None,
                    subheading: None,
                    body: Some(c.description.clone()),
                })
                .collect(),
        )
        .map(SectionBody::Entries),
        SectionKind::Skills => non_empty(
            record
                .skills
                .iter()
                .map(|s| SkillBadge {
                    label: s.name.clone(),
                    level: s.level,
                })
                .collect(),
        )
        .map(SectionBody::Badges),
        SectionKind::Keywords => non_empty(
            record.keywords.iter().map(|k| k.value.clone()).collect(),
        )
        .map(SectionBody::Tags),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::{Education, Experience, Keyword, Project, Skill};

    fn make_record() -> ResumeRecord {
        let mut record = ResumeRecord::scaffold();
        record.name = "Jane Smith".to_string();
        record.email = "jane@example.com".to_string();
        record.phone = "+1 555 123 4567".to_string();
        record.address = "42 Harbor Lane".to_string();
        record.summary = "Storage systems engineer.".to_string();
        record.experience = vec![Experience {
            title: "Staff Engineer".to_string(),
            company: "Initech".to_string(),
            duration: "2019 - 2024".to_string(),
            description: "Led the storage platform team.".to_string(),
        }];
        record.education = vec![Education {
            degree: "BSc Computer Science".to_string(),
            college: "State University".to_string(),
            duration: "2011 - 2015".to_string(),
        }];
        record.projects = vec![Project {
            name: "chunkd".to_string(),
            description: "Content-addressed chunk store.".to_string(),
            link: Some("https://github.com/janesmith/chunkd".to_string()),
        }];
        record.certifications = vec![];
        record.skills = vec![Skill {
            name: "Rust".to_string(),
            level: SkillLevel::Expert,
        }];
        record.keywords = vec![Keyword {
            value: "distributed systems".to_string(),
        }];
        record
    }

    fn kinds(tree: &DocumentTree) -> Vec<SectionKind> {
        tree.sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_sections_follow_canonical_order() {
        let tree = render(&make_record());
        let got = kinds(&tree);
        let expected: Vec<SectionKind> = SectionKind::ORDER
            .into_iter()
            .filter(|k| got.contains(k))
            .collect();
        assert_eq!(got, expected, "emitted sections must follow ORDER");
        // Certifications is empty in the fixture and must be absent.
        assert!(tree.section(SectionKind::Certifications).is_none());
    }

    #[test]
    fn test_render_is_deterministic() {
        let record = make_record();
        let a = serde_json::to_value(render(&record)).unwrap();
        let b = serde_json::to_value(render(&record)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_collections_omit_sections() {
        // Record with empty experience, one education entry, empty skills.
        let mut record = make_record();
        record.experience.clear();
        record.skills.clear();

        let tree = render(&record);
        assert!(tree.section(SectionKind::Education).is_some());
        assert!(tree.section(SectionKind::Experience).is_none());
        assert!(tree.section(SectionKind::Skills).is_none());
    }

    #[test]
    fn test_blank_summary_omits_section() {
        let mut record = make_record();
        record.summary.clear();
        let tree = render(&record);
        assert!(tree.section(SectionKind::Summary).is_none());
    }

    #[test]
    fn test_experience_fields_map_to_block_roles() {
        let tree = render(&make_record());
        let section = tree.section(SectionKind::Experience).unwrap();
        let SectionBody::Entries(entries) = &section.body else {
            panic!("experience renders as entries");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].heading, "Staff Engineer");
        assert_eq!(entries[0].trailing.as_deref(), Some("2019 - 2024"));
        assert_eq!(entries[0].subheading.as_deref(), Some("Initech"));
        assert_eq!(
            entries[0].body.as_deref(),
            Some("Led the storage platform team.")
        );
    }

    #[test]
    fn test_collection_order_preserved_verbatim() {
        let mut record = make_record();
        record.keywords = vec![
            Keyword { value: "zebra".to_string() },
            Keyword { value: "alpha".to_string() },
            Keyword { value: "midpoint".to_string() },
        ];
        let tree = render(&record);
        let SectionBody::Tags(tags) = &tree.section(SectionKind::Keywords).unwrap().body else {
            panic!("keywords render as tags");
        };
        assert_eq!(tags, &["zebra", "alpha", "midpoint"], "insertion order, not sorted");
    }

    #[test]
    fn test_single_expert_skill_badge() {
        let mut record = make_record();
        record.skills = vec![Skill {
            name: "Go".to_string(),
            level: SkillLevel::Expert,
        }];
        let tree = render(&record);
        let SectionBody::Badges(badges) = &tree.section(SectionKind::Skills).unwrap().body else {
            panic!("skills render as badges");
        };
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].label, "Go");
        assert_eq!(badges[0].accent(), level_accent(SkillLevel::Expert));
    }

    #[test]
    fn test_level_accent_is_total_and_non_empty() {
        let mut seen = Vec::new();
        for level in SkillLevel::ALL {
            let accent = level_accent(level);
            assert_eq!(accent.hex().len(), 7, "well-formed hex attribute");
            seen.push(accent);
        }
        seen.dedup();
        assert_eq!(seen.len(), 4, "each level maps to a distinct accent");
    }

    #[test]
    fn test_header_skips_empty_items_but_is_always_present() {
        let mut record = make_record();
        record.phone.clear();
        record.linkedin = None;
        record.website = Some("https://janesmith.dev".to_string());

        let tree = render(&record);
        assert_eq!(tree.header.name, "Jane Smith");
        assert_eq!(tree.header.contact, vec!["jane@example.com", "42 Harbor Lane"]);
        assert_eq!(tree.header.links, vec!["https://janesmith.dev"]);
    }
}
