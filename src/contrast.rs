// Keeps particle colors visible on both light and dark backgrounds by
// pulling very light or very dark colors back toward the middle.

use crate::color::Color;

const TOO_LIGHT: f64 = 0.8;
const TOO_DARK: f64 = 0.2;
const DARKEN: f64 = 0.3;
const LIGHTEN: f64 = 1.5;

/// Relative luminance in 0..1 (sRGB linearized, BT.709 weights).
pub fn luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

pub fn enhance_contrast(color: Color) -> Color {
    match contrast_factor(luminance(color)) {
        Some(factor) => {
            let [r, g, b] = color.rgb_f64();
            Color::from_rgb_f64([r * factor, g * factor, b * factor], color.a)
        }
        None => color,
    }
}

fn contrast_factor(luminance: f64) -> Option<f64> {
    if luminance > TOO_LIGHT {
        Some(DARKEN)
    } else if luminance < TOO_DARK {
        Some(LIGHTEN)
    } else {
        None
    }
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
