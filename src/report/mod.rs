//! Decision trace report renderer
//!
//! Lays an [`AnalysisResult`] out as a paginated A4 document:
//! - title block and generation timestamp on page 1
//! - metrics bar with the confidence score and risk level, tier-colored
//! - five sections (summary text, then four bullet lists)
//! - a "Page i of N" footer stamped on every page once layout is finished
//!
//! Pagination uses fixed space estimates per block instead of measuring the
//! final text height.

pub mod layout;
pub mod palette;
pub mod pdf;
pub mod wrap;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::DEFAULT_PRODUCT_NAME;
use crate::models::AnalysisResult;
use layout::{FontFace, Page, PageFlow, TextStyle, CONTENT_WIDTH, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use palette::{Rgb, Tier};

pub const REPORT_TITLE: &str = "Decision Trace Report";
pub const EMPTY_LIST_PLACEHOLDER: &str = "No items identified";
pub const BULLET: &str = "\u{2022}";

/// Space reserved before a section header.
pub const SECTION_HEADER_SPACE: f32 = 30.0;
/// Space reserved before each list item.
pub const LIST_ITEM_SPACE: f32 = 15.0;
pub const LINE_HEIGHT: f32 = 6.0;
pub const BULLET_INDENT: f32 = 8.0;

const TITLE_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 24.0, palette::TITLE);
const TIMESTAMP_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0, palette::TIMESTAMP);
const METRIC_LABEL_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 11.0, palette::HEADING);
const SECTION_TITLE_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 14.0, palette::HEADING);
const BODY_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0, palette::BODY);
const PLACEHOLDER_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0, palette::MUTED);
const FOOTER_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 8.0, palette::MUTED).centered();

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to encode content of page {page}: {message}")]
    Encode { page: usize, message: String },

    #[error("failed to write PDF document: {0}")]
    Write(String),

    #[error("failed to save report to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub product_name: String,
    pub generated_at: DateTime<Utc>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// A finished document, ready to be offered for download or saved.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedReport {
    /// Write the document into `dir` under its file name.
    ///
    /// Goes through a temporary file so a failed write never leaves a
    /// truncated PDF behind.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let target = dir.join(&self.file_name);
        let partial = dir.join(format!(".{}.part", self.file_name));
        let save_err = |source| ReportError::Save { path: target.clone(), source };

        std::fs::write(&partial, &self.bytes).map_err(save_err)?;
        if let Err(source) = std::fs::rename(&partial, &target) {
            let _ = std::fs::remove_file(&partial);
            return Err(save_err(source));
        }
        info!(path = %target.display(), pages = self.page_count, "Report saved");
        Ok(target)
    }
}

#[derive(Debug, Clone, Copy)]
enum SectionBody<'a> {
    Text(&'a str),
    List(&'a [String]),
}

pub struct ReportRenderer {
    options: ReportOptions,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::with_options(ReportOptions::default())
    }

    pub fn with_options(options: ReportOptions) -> Self {
        Self { options }
    }

    /// `decision-trace-<YYYY-MM-DD>.pdf`, dated by the generation instant in UTC.
    pub fn file_name(&self) -> String {
        format!("decision-trace-{}.pdf", self.options.generated_at.format("%Y-%m-%d"))
    }

    /// Lay out every page, footers included.
    pub fn layout(&self, analysis: &AnalysisResult) -> Vec<Page> {
        let mut flow = PageFlow::new();

        self.title_block(&mut flow);
        metrics_bar(&mut flow, analysis);

        let sections = [
            ("Decision Summary", SectionBody::Text(&analysis.decision_summary), palette::ACCENT_PRIMARY),
            ("Assumptions", SectionBody::List(&analysis.assumptions), palette::ACCENT_NEUTRAL),
            ("Hidden Cognitive Biases", SectionBody::List(&analysis.hidden_biases), palette::ACCENT_CAUTION),
            ("Missing Information", SectionBody::List(&analysis.missing_information), palette::ACCENT_NEUTRAL),
            (
                "Alternative Decision Paths",
                SectionBody::List(&analysis.alternative_decision_paths),
                palette::ACCENT_PRIMARY,
            ),
        ];
        for (title, body, accent) in sections {
            section(&mut flow, title, body, accent);
        }

        let mut pages = flow.into_pages();
        stamp_footers(&mut pages, &self.options.product_name);
        pages
    }

    pub fn render(&self, analysis: &AnalysisResult) -> Result<RenderedReport, ReportError> {
        let pages = self.layout(analysis);
        let bytes = pdf::write_pdf(&pages)?;
        debug!(pages = pages.len(), size = bytes.len(), "Report rendered");

        Ok(RenderedReport {
            file_name: self.file_name(),
            bytes,
            page_count: pages.len(),
        })
    }

    fn title_block(&self, flow: &mut PageFlow) {
        flow.text(MARGIN, flow.y(), REPORT_TITLE, TITLE_STYLE);
        flow.advance(12.0);

        let at = self.options.generated_at;
        let stamp = format!("Generated: {} at {}", at.format("%-m/%-d/%Y"), at.format("%-I:%M:%S %p"));
        flow.text(MARGIN, flow.y(), stamp, TIMESTAMP_STYLE);
        flow.advance(15.0);
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render with default options: the stock product name and the current time.
pub fn render(analysis: &AnalysisResult) -> Result<RenderedReport, ReportError> {
    ReportRenderer::new().render(analysis)
}

fn metrics_bar(flow: &mut PageFlow, analysis: &AnalysisResult) {
    let top = flow.y();
    flow.draw(layout::DrawOp::RoundedRect {
        x: MARGIN,
        y: top,
        w: CONTENT_WIDTH,
        h: 25.0,
        r: 3.0,
        fill: palette::METRICS_FILL,
    });

    let baseline = top + 10.0;
    let score_color = Tier::from_score(analysis.confidence_score).color();
    let risk_color = Tier::from_risk(analysis.risk_level).color();

    flow.text(MARGIN + 5.0, baseline, "Confidence Score:", METRIC_LABEL_STYLE);
    flow.text(MARGIN + 50.0, baseline, format!("{}/100", analysis.confidence_score), metric_value(score_color));
    flow.text(MARGIN + 80.0, baseline, "Risk Level:", METRIC_LABEL_STYLE);
    flow.text(MARGIN + 110.0, baseline, analysis.risk_level.as_str(), metric_value(risk_color));

    flow.advance(35.0);
}

fn metric_value(color: Rgb) -> TextStyle {
    TextStyle::new(FontFace::Regular, 11.0, color)
}

fn section(flow: &mut PageFlow, title: &str, body: SectionBody<'_>, accent: Rgb) {
    flow.ensure_space(SECTION_HEADER_SPACE);

    let top = flow.y();
    flow.draw(layout::DrawOp::Circle { cx: MARGIN + 3.0, cy: top + 3.0, r: 3.0, fill: accent });
    flow.text(MARGIN + 10.0, top + 5.0, title, SECTION_TITLE_STYLE);
    flow.advance(12.0);

    match body {
        SectionBody::Text(text) => {
            let lines = wrap::wrap_text(text, CONTENT_WIDTH, BODY_STYLE.size);
            flow.text_lines(MARGIN, &lines, LINE_HEIGHT, BODY_STYLE);
            flow.advance(5.0);
        }
        SectionBody::List([]) => {
            flow.text(MARGIN, flow.y(), EMPTY_LIST_PLACEHOLDER, PLACEHOLDER_STYLE);
            flow.advance(LINE_HEIGHT);
        }
        SectionBody::List(items) => {
            for item in items {
                // Fixed reservation: an item wrapping to four or more lines
                // near the bottom keeps its page and runs past BOTTOM_LIMIT.
                flow.ensure_space(LIST_ITEM_SPACE);
                flow.text(MARGIN + 2.0, flow.y(), BULLET, BODY_STYLE);
                let lines = wrap::wrap_text(item, CONTENT_WIDTH - BULLET_INDENT, BODY_STYLE.size);
                flow.text_lines(MARGIN + BULLET_INDENT, &lines, LINE_HEIGHT, BODY_STYLE);
                flow.advance(2.0);
            }
        }
    }

    flow.advance(8.0);
}

/// Stamp "<product> • Page i of N" on every page. Runs after layout so that
/// N is the final page count.
fn stamp_footers(pages: &mut [Page], product_name: &str) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        page.ops.push(layout::DrawOp::Text {
            x: PAGE_WIDTH / 2.0,
            y: PAGE_HEIGHT - layout::FOOTER_OFFSET,
            text: format!("{} {} Page {} of {}", product_name, BULLET, index + 1, total),
            style: FOOTER_STYLE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfidenceScore, RiskLevel};
    use chrono::TimeZone;
    use super::layout::{DrawOp, BOTTOM_LIMIT, TOP};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 9).unwrap()
    }

    fn renderer() -> ReportRenderer {
        ReportRenderer::with_options(ReportOptions {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            generated_at: fixed_time(),
        })
    }

    fn analysis(score: i64, risk: RiskLevel) -> AnalysisResult {
        AnalysisResult {
            decision_summary: "Accepted a startup offer over a stable corporate role.".to_string(),
            assumptions: vec!["The startup secures funding".to_string(), "Equity will be valuable".to_string()],
            hidden_biases: vec!["Optimism bias".to_string()],
            missing_information: vec!["Runway of the startup".to_string()],
            alternative_decision_paths: vec!["Negotiate a counter-offer".to_string()],
            confidence_score: ConfidenceScore::try_from(score).unwrap(),
            risk_level: risk,
        }
    }

    fn all_texts(pages: &[Page]) -> Vec<(usize, f32, f32, String)> {
        pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.texts().map(move |(x, y, t)| (i, x, y, t.to_string())))
            .collect()
    }

    fn text_style<'a>(pages: &'a [Page], needle: &str) -> &'a TextStyle {
        pages
            .iter()
            .flat_map(|page| page.ops.iter())
            .find_map(|op| match op {
                DrawOp::Text { text, style, .. } if text == needle => Some(style),
                _ => None,
            })
            .unwrap()
    }

    fn header_y(pages: &[Page], title: &str) -> (usize, f32) {
        all_texts(pages)
            .into_iter()
            .find(|(_, x, _, t)| t == title && *x == MARGIN + 10.0)
            .map(|(page, _, y, _)| (page, y))
            .unwrap()
    }

    fn bullets(pages: &[Page]) -> usize {
        all_texts(pages)
            .iter()
            .filter(|(_, x, _, t)| t == BULLET && *x == MARGIN + 2.0)
            .count()
    }

    #[test]
    fn test_file_name_uses_iso_date() {
        assert_eq!(renderer().file_name(), "decision-trace-2026-03-07.pdf");
    }

    #[test]
    fn test_title_block_on_first_page() {
        let pages = renderer().layout(&analysis(80, RiskLevel::Low));
        let texts = all_texts(&pages);
        assert_eq!(texts[0], (0, MARGIN, TOP, REPORT_TITLE.to_string()));
        assert_eq!(texts[1], (0, MARGIN, TOP + 12.0, "Generated: 3/7/2026 at 2:05:09 PM".to_string()));
    }

    #[test]
    fn test_first_section_follows_metrics_bar() {
        let pages = renderer().layout(&analysis(80, RiskLevel::Low));
        // 20 + 12 (title) + 15 (timestamp) + 35 (metrics) = 82, title drawn 5 below
        assert_eq!(header_y(&pages, "Decision Summary"), (0, 87.0));
        assert!(matches!(
            pages[0].ops[2],
            DrawOp::RoundedRect { x, y, w, h, .. } if x == MARGIN && y == 47.0 && w == CONTENT_WIDTH && h == 25.0
        ));
    }

    #[test]
    fn test_high_score_low_risk_is_green() {
        let pages = renderer().layout(&analysis(85, RiskLevel::Low));
        assert_eq!(text_style(&pages, "85/100").color, palette::SUCCESS);
        assert_eq!(text_style(&pages, "Low").color, palette::SUCCESS);
    }

    #[test]
    fn test_medium_score_medium_risk_is_gold() {
        let pages = renderer().layout(&analysis(45, RiskLevel::Medium));
        assert_eq!(text_style(&pages, "45/100").color, palette::WARNING);
        assert_eq!(text_style(&pages, "Medium").color, palette::WARNING);
    }

    #[test]
    fn test_low_score_high_risk_is_red() {
        let pages = renderer().layout(&analysis(10, RiskLevel::High));
        assert_eq!(text_style(&pages, "10/100").color, palette::DANGER);
        assert_eq!(text_style(&pages, "High").color, palette::DANGER);
    }

    #[test]
    fn test_empty_lists_render_placeholders() {
        let mut empty = analysis(50, RiskLevel::Medium);
        empty.assumptions.clear();
        empty.hidden_biases.clear();
        empty.missing_information.clear();
        empty.alternative_decision_paths.clear();

        let pages = renderer().layout(&empty);
        let placeholders = all_texts(&pages)
            .into_iter()
            .filter(|(_, _, _, t)| t == EMPTY_LIST_PLACEHOLDER)
            .count();
        assert_eq!(placeholders, 4);
        assert_eq!(bullets(&pages), 0);
        assert_eq!(text_style(&pages, EMPTY_LIST_PLACEHOLDER).color, palette::MUTED);
    }

    #[test]
    fn test_bullet_per_item_in_order() {
        let pages = renderer().layout(&analysis(50, RiskLevel::Medium));
        assert_eq!(bullets(&pages), 5);

        let items: Vec<String> = all_texts(&pages)
            .into_iter()
            .filter(|(_, x, _, _)| *x == MARGIN + BULLET_INDENT)
            .map(|(_, _, _, t)| t)
            .collect();
        assert_eq!(
            items,
            vec![
                "The startup secures funding",
                "Equity will be valuable",
                "Optimism bias",
                "Runway of the startup",
                "Negotiate a counter-offer",
            ]
        );
    }

    #[test]
    fn test_long_summary_pushes_next_section_down() {
        let short = analysis(50, RiskLevel::Medium);
        let mut long = short.clone();
        long.decision_summary = "The decision to relocate the whole team was made in one meeting ".repeat(12);

        let line_count = wrap::wrap_text(&long.decision_summary, CONTENT_WIDTH, 10.0).len();
        assert!(line_count > 1);

        let (_, short_y) = header_y(&renderer().layout(&short), "Assumptions");
        let (_, long_y) = header_y(&renderer().layout(&long), "Assumptions");
        assert_eq!(long_y - short_y, (line_count - 1) as f32 * LINE_HEIGHT);
    }

    #[test]
    fn test_overflowing_list_paginates_within_bounds() {
        let mut crowded = analysis(50, RiskLevel::Medium);
        crowded.assumptions = (1..=60).map(|i| format!("Assumption number {}", i)).collect();

        let pages = renderer().layout(&crowded);
        assert!(pages.len() >= 3);
        assert_eq!(bullets(&pages), 64);

        for (page, _, y, text) in all_texts(&pages) {
            if text.contains(" Page ") {
                continue;
            }
            assert!(y <= BOTTOM_LIMIT, "'{}' on page {} drawn at {}", text, page + 1, y);
        }

        // continuation pages start at the top margin
        let first_on_page_two = all_texts(&pages).into_iter().find(|(page, _, _, _)| *page == 1).unwrap();
        assert_eq!(first_on_page_two.2, TOP);
    }

    #[test]
    fn test_tall_item_near_bottom_keeps_its_page() {
        let mut crowded = analysis(50, RiskLevel::Medium);
        // 17 short items leave the cursor at 125 + 17 * 8 = 261, and 261 + 15 fits
        crowded.assumptions = (1..=17).map(|i| format!("Item {}", i)).collect();
        crowded.assumptions.push("Line one\nLine two\nLine three\nLine four\nLine five".to_string());

        let pages = renderer().layout(&crowded);
        let tall: Vec<(usize, f32)> = all_texts(&pages)
            .into_iter()
            .filter(|(_, _, _, t)| t.starts_with("Line "))
            .map(|(page, _, y, _)| (page, y))
            .collect();
        assert_eq!(tall, vec![(0, 261.0), (0, 267.0), (0, 273.0), (0, 279.0), (0, 285.0)]);
        assert!(tall[4].1 > BOTTOM_LIMIT);
        assert!(tall[4].1 < PAGE_HEIGHT - layout::FOOTER_OFFSET);

        // the following section still breaks onto a fresh page
        assert_eq!(header_y(&pages, "Hidden Cognitive Biases"), (1, TOP + 5.0));
    }

    #[test]
    fn test_section_header_moves_to_new_page_when_tight() {
        let mut crowded = analysis(50, RiskLevel::Medium);
        // 82 + 12 + 6 + 5 + 8 = 113 after the summary; each short item takes 8
        crowded.assumptions = (1..=16).map(|i| format!("Item {}", i)).collect();
        // 113 + 12 + 16 * 8 + 8 = 261, and 261 + 30 > 277
        let pages = renderer().layout(&crowded);
        assert_eq!(header_y(&pages, "Hidden Cognitive Biases"), (1, TOP + 5.0));
    }

    #[test]
    fn test_footer_on_every_page() {
        let mut crowded = analysis(50, RiskLevel::Medium);
        crowded.missing_information = (1..=80).map(|i| format!("Unknown factor {}", i)).collect();
        let pages = renderer().layout(&crowded);
        let total = pages.len();
        assert!(total > 1);

        for (index, page) in pages.iter().enumerate() {
            let footers: Vec<&str> = page.texts().map(|(_, _, t)| t).filter(|t| t.contains(" Page ")).collect();
            assert_eq!(footers, vec![format!("Decision Trace Engine \u{2022} Page {} of {}", index + 1, total)]);
        }
        assert_eq!(text_style(&pages, &format!("Decision Trace Engine \u{2022} Page 1 of {}", total)).align, layout::Align::Center);
    }

    #[test]
    fn test_render_produces_pdf_with_matching_pages() {
        let report = renderer().render(&analysis(72, RiskLevel::Low)).unwrap();
        assert_eq!(report.file_name, "decision-trace-2026-03-07.pdf");
        assert_eq!(report.page_count, 1);

        let doc = lopdf::Document::load_mem(&report.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), report.page_count);
    }

    #[test]
    fn test_save_to_writes_file() {
        let dir = std::env::temp_dir().join(format!("decision-trace-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let report = renderer().render(&analysis(30, RiskLevel::High)).unwrap();
        let path = report.save_to(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "decision-trace-2026-03-07.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), report.bytes);
        assert!(!dir.join(".decision-trace-2026-03-07.pdf.part").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_to_missing_dir_fails() {
        let report = renderer().render(&analysis(30, RiskLevel::High)).unwrap();
        let err = report.save_to(Path::new("/nonexistent/decision-trace")).unwrap_err();
        assert!(matches!(err, ReportError::Save { .. }));
    }
}
