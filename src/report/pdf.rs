//! Serializes laid-out pages into a PDF document with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::layout::{Align, DrawOp, FontFace, Page, TextStyle, PAGE_HEIGHT, PAGE_WIDTH};
use super::palette::Rgb;
use super::wrap::text_width;
use super::ReportError;

const PT_PER_MM: f32 = 72.0 / 25.4;
/// Bezier control distance for quarter circles.
const KAPPA: f32 = 0.552_284_8;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

pub fn write_pdf(pages: &[Page]) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (PAGE_WIDTH * PT_PER_MM).into(),
        (PAGE_HEIGHT * PT_PER_MM).into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().map_err(|e| ReportError::Encode {
            page: index + 1,
            message: e.to_string(),
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ReportError::Write(e.to_string()))?;
    Ok(bytes)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, text, style } => text_operations(&mut ops, *x, *y, text, style),
            DrawOp::Circle { cx, cy, r, fill } => circle_operations(&mut ops, *cx, *cy, *r, *fill),
            DrawOp::RoundedRect { x, y, w, h, r, fill } => {
                rounded_rect_operations(&mut ops, *x, *y, *w, *h, *r, *fill)
            }
        }
    }
    ops
}

fn px(x: f32) -> f32 {
    x * PT_PER_MM
}

fn py(y: f32) -> f32 {
    (PAGE_HEIGHT - y) * PT_PER_MM
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| (*v).into()).collect()
}

fn set_fill(ops: &mut Vec<Operation>, color: Rgb) {
    ops.push(Operation::new("rg", reals(&color.unit())));
}

fn text_operations(ops: &mut Vec<Operation>, x: f32, y: f32, text: &str, style: &TextStyle) {
    let font = match style.face {
        FontFace::Regular => REGULAR_FONT,
        FontFace::Bold => BOLD_FONT,
    };
    let left = match style.align {
        Align::Left => x,
        Align::Center => x - text_width(text, style.size) / 2.0,
    };

    set_fill(ops, style.color);
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), style.size.into()]));
    ops.push(Operation::new("Td", reals(&[px(left), py(y)])));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn circle_operations(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32, fill: Rgb) {
    let (x, y, r) = (px(cx), py(cy), px(r));
    let k = KAPPA * r;

    set_fill(ops, fill);
    ops.push(Operation::new("m", reals(&[x + r, y])));
    ops.push(Operation::new("c", reals(&[x + r, y + k, x + k, y + r, x, y + r])));
    ops.push(Operation::new("c", reals(&[x - k, y + r, x - r, y + k, x - r, y])));
    ops.push(Operation::new("c", reals(&[x - r, y - k, x - k, y - r, x, y - r])));
    ops.push(Operation::new("c", reals(&[x + k, y - r, x + r, y - k, x + r, y])));
    ops.push(Operation::new("h", vec![]));
    ops.push(Operation::new("f", vec![]));
}

fn rounded_rect_operations(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32, r: f32, fill: Rgb) {
    let left = px(x);
    let right = px(x + w);
    let top = py(y);
    let bottom = py(y + h);
    let r = px(r);
    let k = KAPPA * r;

    set_fill(ops, fill);
    ops.push(Operation::new("m", reals(&[left + r, bottom])));
    ops.push(Operation::new("l", reals(&[right - r, bottom])));
    ops.push(Operation::new("c", reals(&[right - r + k, bottom, right, bottom + r - k, right, bottom + r])));
    ops.push(Operation::new("l", reals(&[right, top - r])));
    ops.push(Operation::new("c", reals(&[right, top - r + k, right - r + k, top, right - r, top])));
    ops.push(Operation::new("l", reals(&[left + r, top])));
    ops.push(Operation::new("c", reals(&[left + r - k, top, left, top - r + k, left, top - r])));
    ops.push(Operation::new("l", reals(&[left, bottom + r])));
    ops.push(Operation::new("c", reals(&[left, bottom + r - k, left + r - k, bottom, left + r, bottom])));
    ops.push(Operation::new("h", vec![]));
    ops.push(Operation::new("f", vec![]));
}

/// Map text onto the WinAnsi code page of the standard Type1 fonts.
/// Characters without a WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::TextStyle;
    use crate::report::palette;

    fn page_with_text(text: &str) -> Page {
        Page {
            ops: vec![
                DrawOp::RoundedRect { x: 20.0, y: 40.0, w: 170.0, h: 25.0, r: 3.0, fill: palette::METRICS_FILL },
                DrawOp::Circle { cx: 23.0, cy: 80.0, r: 3.0, fill: palette::ACCENT_PRIMARY },
                DrawOp::Text {
                    x: 20.0,
                    y: 20.0,
                    text: text.to_string(),
                    style: TextStyle::new(FontFace::Bold, 14.0, palette::HEADING),
                },
            ],
        }
    }

    fn page_strings(doc: &Document, page_id: lopdf::ObjectId) -> Vec<Vec<u8>> {
        let raw = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&raw).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_write_pdf_page_count() {
        let pages = vec![page_with_text("one"), page_with_text("two"), page_with_text("three")];
        let bytes = write_pdf(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_write_pdf_text_is_readable() {
        let bytes = write_pdf(&[page_with_text("Assumptions (2)")]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        assert_eq!(page_strings(&doc, page_id), vec![b"Assumptions (2)".to_vec()]);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Page 1 • 2"), b"Page 1 \x95 2".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_y_axis_is_flipped() {
        assert!((py(0.0) - PAGE_HEIGHT * PT_PER_MM).abs() < 1e-3);
        assert!(py(PAGE_HEIGHT).abs() < 1e-3);
    }
}
