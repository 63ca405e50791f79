//! Page layout and pagination.
//!
//! Turns a `DocumentTree` into positioned text runs and divider rules on
//! fixed A4 pages. The geometry is constant — page size, margins, and font
//! sizes never depend on any viewport. Content that does not fit flows onto
//! additional pages; nothing is ever truncated.

use crate::render::document::{
    DocumentTree, Rgb8, Section, SectionBody, SectionKind, ACCENT, INK, MUTED,
};
use crate::render::metrics::{FontMetrics, HELVETICA, HELVETICA_BOLD};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 0.352_778;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed physical page geometry. Everything here is in millimetres or points.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    /// Name line at the top of the header.
    pub name_pt: f32,
    /// Section titles.
    pub section_pt: f32,
    /// Entry headings.
    pub heading_pt: f32,
    /// Body text, badges, paragraph content.
    pub body_pt: f32,
    /// Contact lines, trailing duration labels, badge levels.
    pub small_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl PageGeometry {
    /// A4 portrait with fixed margins — the only geometry the exporter uses.
    pub fn a4() -> Self {
        PageGeometry {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 16.0,
            name_pt: 22.0,
            section_pt: 12.5,
            heading_pt: 11.0,
            body_pt: 10.0,
            small_pt: 9.0,
            line_height: 1.4,
        }
    }

    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Usable text width in em units at the given font size, for the
    /// metric tables' word-wrap.
    pub fn text_width_em(&self, size_pt: f32) -> f32 {
        self.text_width_mm() / (size_pt * MM_PER_PT)
    }

    fn line_height_mm(&self, size_pt: f32) -> f32 {
        size_pt * MM_PER_PT * self.line_height
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// One positioned piece of text. `y_mm` is the baseline measured from the
/// bottom-left page origin, matching the PDF coordinate system.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub style: FontStyle,
    pub color: Rgb8,
}

/// A horizontal divider rule.
#[derive(Debug, Clone)]
pub struct RuleLine {
    pub x1_mm: f32,
    pub x2_mm: f32,
    pub y_mm: f32,
    pub thickness_pt: f32,
    pub color: Rgb8,
}

/// Everything drawn on one physical page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
    pub rules: Vec<RuleLine>,
}

// ────────────────────────────────────────────────────────────────────────────
// Flow cursor
// ────────────────────────────────────────────────────────────────────────────

/// Vertical flow over an unbounded sequence of pages. The cursor tracks the
/// top edge of the next line, measured from the page top; emitted runs are
/// converted to bottom-origin baselines.
struct Flow<'g> {
    geom: &'g PageGeometry,
    pages: Vec<PageLayout>,
    cursor_mm: f32,
}

impl<'g> Flow<'g> {
    fn new(geom: &'g PageGeometry) -> Self {
        Flow {
            geom,
            pages: vec![PageLayout::default()],
            cursor_mm: geom.margin_mm,
        }
    }

    /// Starts a new page if fewer than `needed_mm` remain below the cursor.
    fn ensure(&mut self, needed_mm: f32) {
        if self.cursor_mm + needed_mm > self.geom.height_mm - self.geom.margin_mm {
            self.pages.push(PageLayout::default());
            self.cursor_mm = self.geom.margin_mm;
        }
    }

    fn advance(&mut self, mm: f32) {
        self.cursor_mm += mm;
    }

    /// Baseline (bottom-origin) for a line of `size_pt` starting at the cursor.
    fn baseline(&self, size_pt: f32) -> f32 {
        self.geom.height_mm - (self.cursor_mm + size_pt * MM_PER_PT)
    }

    /// Places one run on the current line without advancing — callers stack
    /// several runs on a shared baseline, then advance once.
    fn place(&mut self, text: &str, x_mm: f32, size_pt: f32, style: FontStyle, color: Rgb8) {
        let y_mm = self.baseline(size_pt);
        let page = self.pages.last_mut().expect("flow always has a page");
        page.runs.push(TextRun {
            text: text.to_string(),
            x_mm,
            y_mm,
            size_pt,
            style,
            color,
        });
    }

    /// One full-width line: page-break check, place, advance.
    fn line(&mut self, text: &str, x_mm: f32, size_pt: f32, style: FontStyle, color: Rgb8) {
        let lh = self.geom.line_height_mm(size_pt);
        self.ensure(lh);
        self.place(text, x_mm, size_pt, style, color);
        self.advance(lh);
    }

    fn rule(&mut self, thickness_pt: f32, color: Rgb8) {
        let y_mm = self.geom.height_mm - self.cursor_mm;
        let page = self.pages.last_mut().expect("flow always has a page");
        page.rules.push(RuleLine {
            x1_mm: self.geom.margin_mm,
            x2_mm: self.geom.width_mm - self.geom.margin_mm,
            y_mm,
            thickness_pt,
            color,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

const SECTION_GAP_MM: f32 = 3.0;
const ENTRY_GAP_MM: f32 = 2.0;
const BADGE_GAP_MM: f32 = 4.0;
const BADGE_LABEL_GAP_MM: f32 = 1.5;

/// Lays the document tree out on as many A4 pages as it needs.
pub fn paginate(tree: &DocumentTree, geom: &PageGeometry) -> Vec<PageLayout> {
    let mut flow = Flow::new(geom);

    layout_header(&mut flow, tree, geom);
    for section in &tree.sections {
        layout_section(&mut flow, section, geom);
    }

    flow.pages
}

fn centered_x(geom: &PageGeometry, metrics: &FontMetrics, text: &str, size_pt: f32) -> f32 {
    let width_mm = metrics.measure_str(text) * size_pt * MM_PER_PT;
    let x = geom.margin_mm + (geom.text_width_mm() - width_mm) / 2.0;
    x.max(geom.margin_mm)
}

/// Wraps `text` to the page measure and emits each line centered.
fn centered_lines(
    flow: &mut Flow<'_>,
    geom: &PageGeometry,
    metrics: &'static FontMetrics,
    text: &str,
    size_pt: f32,
    style: FontStyle,
    color: Rgb8,
) {
    for line in metrics.wrap(text, geom.text_width_em(size_pt)) {
        let x = centered_x(geom, metrics, &line, size_pt);
        flow.line(&line, x, size_pt, style, color);
    }
}

fn layout_header(flow: &mut Flow<'_>, tree: &DocumentTree, geom: &PageGeometry) {
    centered_lines(
        flow,
        geom,
        &HELVETICA_BOLD,
        &tree.header.name,
        geom.name_pt,
        FontStyle::Bold,
        INK,
    );
    flow.advance(1.0);

    if !tree.header.contact.is_empty() {
        let contact = tree.header.contact.join("   •   ");
        centered_lines(
            flow,
            geom,
            &HELVETICA,
            &contact,
            geom.small_pt,
            FontStyle::Regular,
            MUTED,
        );
    }
    if !tree.header.links.is_empty() {
        let links = tree.header.links.join("   •   ");
        centered_lines(
            flow,
            geom,
            &HELVETICA,
            &links,
            geom.small_pt,
            FontStyle::Regular,
            MUTED,
        );
    }

    flow.advance(1.5);
    flow.rule(1.2, ACCENT);
    flow.advance(SECTION_GAP_MM);
}

fn layout_section(flow: &mut Flow<'_>, section: &Section, geom: &PageGeometry) {
    layout_section_title(flow, section.kind, geom);

    match &section.body {
        SectionBody::Paragraph(text) => layout_paragraph(flow, text, geom),
        SectionBody::Entries(entries) => {
            for entry in entries {
                layout_entry(flow, entry, geom);
            }
        }
        SectionBody::Badges(badges) => layout_badges(flow, badges, geom),
        SectionBody::Tags(tags) => {
            // Tags flow as one wrapped line of separated values.
            layout_paragraph(flow, &tags.join("  •  "), geom);
        }
    }

    flow.advance(SECTION_GAP_MM);
}

fn layout_section_title(flow: &mut Flow<'_>, kind: SectionKind, geom: &PageGeometry) {
    // Keep the title and its rule together with at least one body line.
    let needed = geom.line_height_mm(geom.section_pt) + 1.0 + geom.line_height_mm(geom.body_pt);
    flow.ensure(needed);

    let title = kind.title().to_uppercase();
    flow.line(&title, geom.margin_mm, geom.section_pt, FontStyle::Bold, ACCENT);
    flow.rule(0.6, MUTED);
    flow.advance(2.0);
}

fn layout_paragraph(flow: &mut Flow<'_>, text: &str, geom: &PageGeometry) {
    let max_em = geom.text_width_em(geom.body_pt);
    for line in HELVETICA.wrap(text, max_em) {
        flow.line(&line, geom.margin_mm, geom.body_pt, FontStyle::Regular, INK);
    }
}

fn layout_entry(
    flow: &mut Flow<'_>,
    entry: &crate::render::document::EntryBlock,
    geom: &PageGeometry,
) {
    // Heading lines, with the trailing label right-aligned on the first
    // baseline. Headings have no maximum length, so they wrap against a
    // measure that leaves the trailing label's column free.
    let lh = geom.line_height_mm(geom.heading_pt);
    let trailing_mm = entry
        .trailing
        .as_ref()
        .map(|t| HELVETICA.measure_str(t) * geom.small_pt * MM_PER_PT + ENTRY_GAP_MM)
        .unwrap_or(0.0);
    let heading_em = (geom.text_width_mm() - trailing_mm) / (geom.heading_pt * MM_PER_PT);

    flow.ensure(lh + geom.line_height_mm(geom.body_pt));
    let mut heading_lines = HELVETICA_BOLD.wrap(&entry.heading, heading_em).into_iter();
    if let Some(first) = heading_lines.next() {
        flow.place(&first, geom.margin_mm, geom.heading_pt, FontStyle::Bold, INK);
    }
    if let Some(trailing) = &entry.trailing {
        let width_mm = HELVETICA.measure_str(trailing) * geom.small_pt * MM_PER_PT;
        let x = geom.width_mm - geom.margin_mm - width_mm;
        flow.place(trailing, x, geom.small_pt, FontStyle::Regular, MUTED);
    }
    flow.advance(lh);
    for line in heading_lines {
        flow.line(&line, geom.margin_mm, geom.heading_pt, FontStyle::Bold, INK);
    }

    if let Some(subheading) = &entry.subheading {
        let max_em = geom.text_width_em(geom.body_pt);
        for line in HELVETICA.wrap(subheading, max_em) {
            flow.line(&line, geom.margin_mm, geom.body_pt, FontStyle::Regular, MUTED);
        }
    }

    if let Some(body) = &entry.body {
        let max_em = geom.text_width_em(geom.body_pt);
        for line in HELVETICA.wrap(body, max_em) {
            flow.line(&line, geom.margin_mm, geom.body_pt, FontStyle::Regular, MUTED);
        }
    }

    flow.advance(ENTRY_GAP_MM);
}

fn layout_badges(
    flow: &mut Flow<'_>,
    badges: &[crate::render::document::SkillBadge],
    geom: &PageGeometry,
) {
    let lh = geom.line_height_mm(geom.body_pt);
    let right_edge = geom.width_mm - geom.margin_mm;
    let mut x = geom.margin_mm;
    let mut row_open = false;

    for badge in badges {
        let level_text = badge.level.as_str().to_uppercase();
        let name_mm = HELVETICA_BOLD.measure_str(&badge.label) * geom.body_pt * MM_PER_PT;
        let level_mm = HELVETICA.measure_str(&level_text) * geom.small_pt * MM_PER_PT;
        let badge_mm = name_mm + BADGE_LABEL_GAP_MM + level_mm;

        if row_open && x + badge_mm > right_edge {
            flow.advance(lh);
            x = geom.margin_mm;
            row_open = false;
        }
        if !row_open {
            flow.ensure(lh);
            row_open = true;
        }

        flow.place(&badge.label, x, geom.body_pt, FontStyle::Bold, INK);
        flow.place(
            &level_text,
            x + name_mm + BADGE_LABEL_GAP_MM,
            geom.small_pt,
            FontStyle::Regular,
            badge.accent(),
        );
        x += badge_mm + BADGE_GAP_MM;
    }

    if row_open {
        flow.advance(lh);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
