//! Color assignment for year lines.
//!
//! Lines are drawn over either a light or a dark background, so the palette is
//! first filtered down to colors with at least WCAG's 3:1 non-text contrast
//! against that background.

use lwl_core::{LevelError, Result};
use std::collections::BTreeMap;

/// Minimum contrast ratio for graphical objects (WCAG 1.4.11).
pub const MIN_CONTRAST_RATIO: f64 = 3.0;

pub const LIGHT_BACKGROUND: &str = "#FFFFFF";
pub const DARK_BACKGROUND: &str = "#091a28";

/// Used when the filtered palette is empty.
pub const FALLBACK_COLOR: &str = "#888";

/// d3 schemeCategory10, schemeSet3, schemePaired and schemeDark2, in that order.
pub const DEFAULT_PALETTE: &[&str] = &[
    // category10
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
    // set3
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
    // paired
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c",
    "#fdbf6f", "#ff7f00", "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
    // dark2
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02",
    "#a6761d", "#666666",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse `#rgb` or `#rrggbb` (the `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let invalid = || LevelError::InvalidColor(hex.to_string());
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let full: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn linearize(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
pub fn luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// WCAG contrast ratio between two luminances, in `[1, 21]`.
pub fn contrast(l1: f64, l2: f64) -> f64 {
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

/// Keep the colors that reach [`MIN_CONTRAST_RATIO`] against `background`.
/// Colors that do not parse are dropped.
pub fn contrast_palette<'a>(palette: &[&'a str], background: &str) -> Result<Vec<&'a str>> {
    let background = luminance(hex_to_rgb(background)?);
    Ok(palette
        .iter()
        .copied()
        .filter(|color| {
            hex_to_rgb(color)
                .map(|rgb| contrast(luminance(rgb), background) >= MIN_CONTRAST_RATIO)
                .unwrap_or(false)
        })
        .collect())
}

/// Give each year a palette color, cycling through the palette in year-list order.
pub fn year_colors(years: &[i32], palette: &[&str]) -> BTreeMap<i32, String> {
    years
        .iter()
        .enumerate()
        .map(|(idx, year)| {
            let color = if palette.is_empty() {
                FALLBACK_COLOR
            } else {
                palette[idx % palette.len()]
            };
            (*year, color.to_string())
        })
        .collect()
}
