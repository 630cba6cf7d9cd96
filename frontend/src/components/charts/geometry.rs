//! Pixel math for the charts, kept free of any drawing backend.

use std::f64::consts::{FRAC_PI_2, TAU};

/// One donut slice, angles in radians clockwise from twelve o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Position of the value in the series (for colour and legend)
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Split the full circle between the positive values. Zero and negative
/// values get no slice; an all-zero series gets no slices at all.
pub fn donut_slices(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -FRAC_PI_2;
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > 0.0)
        .map(|(index, value)| {
            let sweep = value / total * TAU;
            let slice = Slice { index, start: angle, end: angle + sweep };
            angle += sweep;
            slice
        })
        .collect()
}

pub fn point_on_circle(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Closed outline of a ring segment: the outer arc forwards, then the inner
/// arc back.
pub fn ring_segment(center: (i32, i32), outer: f64, inner: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start).abs() / TAU) * 120.0).ceil().max(2.0) as usize;
    let step = (end - start) / steps as f64;

    let outer_arc = (0..=steps).map(|i| point_on_circle(center, outer, start + step * i as f64));
    let inner_arc = (0..=steps)
        .rev()
        .map(|i| point_on_circle(center, inner, start + step * i as f64));
    outer_arc.chain(inner_arc).collect()
}

/// Upper bound for a value axis that starts at zero: the maximum plus some
/// headroom, rounded up to one significant digit.
pub fn value_axis_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let padded = max * 1.1;
    let magnitude = 10f64.powi(padded.log10().floor() as i32);
    (padded / magnitude).ceil() * magnitude
}

/// Rough width of a label in pixels. Canvas text isn't measured here, so
/// legends use an average glyph width.
pub fn estimate_text_width(text: &str, font_px: u32) -> u32 {
    (text.chars().count() as f64 * font_px as f64 * 0.6).ceil() as u32
}

pub const LEGEND_SWATCH: u32 = 12;
const LEGEND_GAP: u32 = 6;
const LEGEND_ITEM_PADDING: u32 = 20;
pub const LEGEND_ROW_HEIGHT: u32 = 28;

/// Where one legend entry starts (swatch top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendItem {
    pub index: usize,
    pub x: i32,
    pub y: i32,
}

/// Lay legend entries out in centred rows below a chart. Returns the items
/// and the total legend height.
pub fn legend_layout(labels: &[String], font_px: u32, area_width: u32, top: i32) -> (Vec<LegendItem>, u32) {
    let widths: Vec<u32> = labels
        .iter()
        .map(|label| LEGEND_SWATCH + LEGEND_GAP + estimate_text_width(label, font_px) + LEGEND_ITEM_PADDING)
        .collect();

    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut row_width = 0;
    for (index, width) in widths.iter().enumerate() {
        match rows.last_mut() {
            Some(row) if row_width + width <= area_width => {
                row.push(index);
                row_width += width;
            }
            _ => {
                rows.push(vec![index]);
                row_width = *width;
            }
        }
    }

    let mut items = Vec::with_capacity(labels.len());
    for (row_index, row) in rows.iter().enumerate() {
        let total: u32 = row.iter().map(|i| widths[*i]).sum();
        let mut x = (area_width.saturating_sub(total) / 2) as i32;
        let y = top + (row_index as u32 * LEGEND_ROW_HEIGHT) as i32;
        for index in row {
            items.push(LegendItem { index: *index, x, y });
            x += widths[*index] as i32;
        }
    }

    (items, rows.len() as u32 * LEGEND_ROW_HEIGHT)
}

/// Backing store size for a canvas: its laid-out size when it has one,
/// otherwise the width/height attributes.
pub fn canvas_size(client: (i32, i32), attributes: (u32, u32)) -> (u32, u32) {
    let pick = |client: i32, attribute: u32| if client > 0 { client as u32 } else { attribute.max(1) };
    (pick(client.0, attributes.0), pick(client.1, attributes.1))
}
