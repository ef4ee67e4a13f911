use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use super::spec::{Alpha, Palette};
use crate::data::model::Value;

/// Single-series default (matplotlib's first cycle colour).
pub const PRIMARY: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
/// Second series colour, used for the trend chart's raw points.
pub const SECONDARY: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
/// Fixed accent for the best-fit line.
pub const ACCENT: Color32 = Color32::RED;

const fn rgb(hex: u32) -> Color32 {
    Color32::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const DEEP: [u32; 10] = [
    0x4c72b0, 0xdd8452, 0x55a868, 0xc44e52, 0x8172b3, 0x937860, 0xda8bc3, 0x8c8c8c, 0xccb974,
    0x64b5cd,
];
const MUTED: [u32; 10] = [
    0x4878d0, 0xee854a, 0x6acc64, 0xd65f5f, 0x956cb4, 0x8c613c, 0xdc7ec0, 0x797979, 0xd5bb67,
    0x82c6e2,
];
const PASTEL: [u32; 10] = [
    0xa1c9f4, 0xffb482, 0x8de5a1, 0xff9f9b, 0xd0bbff, 0xdebb9b, 0xfab0e4, 0xcfcfcf, 0xfffea3,
    0xb9f2f0,
];
const BRIGHT: [u32; 10] = [
    0x023eff, 0xff7c00, 0x1ac938, 0xe8000b, 0x8b2be2, 0x9f4800, 0xf14cc1, 0xa3a3a3, 0xffc400,
    0x00d7ff,
];
const DARK: [u32; 10] = [
    0x001c7f, 0xb1400d, 0x12711c, 0x8c0800, 0x591e71, 0x592f0d, 0xa23582, 0x3c3c3c, 0xb8850a,
    0x006374,
];
const COLORBLIND: [u32; 10] = [
    0x0173b2, 0xde8f05, 0x029e73, 0xd55e00, 0xcc78bc, 0xca9161, 0xfbafe4, 0x949494, 0xece133,
    0x56b4e9,
];

// ---------------------------------------------------------------------------
// Palette colours
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_hues(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

/// `n` colours from `palette`, cycling the qualitative sets past ten.
pub fn palette_colors(palette: Palette, n: usize) -> Vec<Color32> {
    let base: &[u32] = match palette {
        Palette::Deep => &DEEP,
        Palette::Muted => &MUTED,
        Palette::Pastel => &PASTEL,
        Palette::Bright => &BRIGHT,
        Palette::Dark => &DARK,
        Palette::Colorblind => &COLORBLIND,
        Palette::Hls => return generate_hues(n),
    };
    base.iter().cycle().take(n).map(|&hex| rgb(hex)).collect()
}

/// Apply `alpha` to an opaque colour.
pub fn with_alpha(color: Color32, alpha: Alpha) -> Color32 {
    let a = (alpha.get() * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

// ---------------------------------------------------------------------------
// Color mapping: hue value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a hue column to palette colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Value, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// One colour per distinct value, assigned in category order.
    pub fn new(categories: &BTreeSet<Value>, palette: Palette) -> Self {
        let colors = palette_colors(palette, categories.len());
        let mapping = categories.iter().cloned().zip(colors).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given hue value.
    pub fn color_for(&self, value: &Value) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }
}
