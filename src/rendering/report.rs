//! Composition of the downloadable report image.
//!
//! The report is the recolored capture centered on a white sheet with a
//! three-column legend table underneath: category label, share of forest,
//! share of the whole image. Layout is computed from the output width so
//! narrow captures still get a readable panel.

use crate::analysis::{CategoryCounts, PixelBuffer};
use crate::models::{Category, ReportRow};
use crate::rendering::canvas::Canvas;
use crate::rendering::font;

/// White frame around the capture.
const MARGIN: u32 = 10;
/// Height of the legend panel below the capture.
const PANEL_H: u32 = 280;
/// The sheet never gets narrower than this, so the table always fits.
const MIN_OUT_W: u32 = 900;
/// Horizontal table inset.
const PAD_X: u32 = 24;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const TEXT: [u8; 3] = [0, 0, 0];
const RULE: [u8; 3] = [17, 17, 17];

/// Body text scale. The 7px glyph at 2x lands inside the 12..18px band the
/// layout was designed around; the title runs one step larger.
const TEXT_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 3;

/// One-decimal percentage of `part` against `reference`, "0.0%" when the
/// reference is empty.
pub fn pct(part: u64, reference: u64) -> String {
    if reference == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / reference as f64 * 100.0)
}

/// The five legend rows: the three overlay categories, then the two
/// emphasized summary rows. Forest share of itself is by definition 100%.
pub fn legend_rows(counts: &CategoryCounts, total_pixels: u64) -> Vec<ReportRow> {
    let forest = counts.forest_total();
    let value = counts.value_total();

    let mut rows = Vec::with_capacity(5);
    for cat in [
        Category::LowPotential,
        Category::MidValue,
        Category::DarkHighValue,
    ] {
        let n = counts.get(cat);
        rows.push(ReportRow::new(
            cat.display_name(),
            pct(n, forest),
            pct(n, total_pixels),
        ));
    }
    rows.push(ReportRow::summary(
        "TOTAL VÄRDEAREAL",
        pct(value, forest),
        pct(value, total_pixels),
    ));
    rows.push(ReportRow::summary(
        "TOTAL SKOGSMARK",
        "100.0%".to_string(),
        pct(forest, total_pixels),
    ));
    rows
}

/// Output image dimensions for a capture of the given size.
pub fn output_size(width: u32, height: u32) -> (u32, u32) {
    let out_w = (width + MARGIN * 2).max(MIN_OUT_W);
    let out_h = height + PANEL_H + MARGIN;
    (out_w, out_h)
}

/// Compose the full report sheet: centered capture on top, title and
/// legend table in the panel below.
pub fn compose_report(image: &PixelBuffer, rows: &[ReportRow], source_name: &str) -> PixelBuffer {
    let (out_w, out_h) = output_size(image.width(), image.height());
    let mut canvas = Canvas::new(out_w, out_h, BACKGROUND);

    let img_x = (out_w - image.width()) / 2;
    canvas.blit(image, img_x, MARGIN);

    let fh = font::GLYPH_H * TEXT_SCALE;
    let left_x = PAD_X;
    let right_x = out_w - PAD_X;
    let col2_right = (out_w as u64 * 70 / 100) as u32;
    let col3_right = right_x;

    let start_y = image.height() + MARGIN + 28;
    canvas.draw_text_bold(
        left_x,
        start_y,
        &format!("Areaanalys: {source_name}"),
        TITLE_SCALE,
        TEXT,
    );

    let head_y = start_y + font::GLYPH_H * TITLE_SCALE + 14;
    canvas.draw_text_bold(left_x, head_y, "Kategori", TEXT_SCALE, TEXT);
    draw_right_text(&mut canvas, "% av Skog", col2_right, head_y, true);
    draw_right_text(&mut canvas, "% av Total", col3_right, head_y, true);

    let mut y = head_y + fh + 10;
    canvas.hline(left_x, y, right_x - left_x, RULE);
    y += fh * 8 / 5;

    let max_cat_w = (col2_right - 18) - left_x;
    let mut summary_rule_drawn = false;

    for row in rows {
        if row.emphasis && !summary_rule_drawn {
            canvas.hline(left_x, y - fh * 2 / 5, right_x - left_x, RULE);
            y += fh * 8 / 5;
            summary_rule_drawn = true;
        }

        let label = ellipsize(&row.name, max_cat_w, TEXT_SCALE);
        if row.emphasis {
            canvas.draw_text_bold(left_x, y, &label, TEXT_SCALE, TEXT);
        } else {
            canvas.draw_text(left_x, y, &label, TEXT_SCALE, TEXT);
        }
        draw_right_text(&mut canvas, &row.pct_of_forest, col2_right, y, row.emphasis);
        draw_right_text(&mut canvas, &row.pct_of_total, col3_right, y, row.emphasis);

        y += fh + 10;
    }

    canvas.into_buffer()
}

fn draw_right_text(canvas: &mut Canvas, text: &str, right_x: u32, y: u32, bold: bool) {
    let x = right_x.saturating_sub(font::text_width(text, TEXT_SCALE));
    if bold {
        canvas.draw_text_bold(x, y, text, TEXT_SCALE, TEXT);
    } else {
        canvas.draw_text(x, y, text, TEXT_SCALE, TEXT);
    }
}

/// Truncate `text` with a trailing ellipsis so it renders within `max_w`
/// pixels. Binary search over the character count; the font is monospaced,
/// so width is linear in it, but the search mirrors how measurement-based
/// truncation behaves on proportional fonts.
fn ellipsize(text: &str, max_w: u32, scale: u32) -> String {
    if font::text_width(text, scale) <= max_w {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut lo = 0usize;
    let mut hi = chars.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        let candidate: String = chars[..mid].iter().chain(['…'].iter()).collect();
        if font::text_width(&candidate, scale) <= max_w {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    chars[..lo.saturating_sub(1)]
        .iter()
        .chain(['…'].iter())
        .collect()
}
