// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num >> 0) as u8;

        Color { r, g, b, a }
    }

    // Builds a color from floating point channels, rounding and clamping
    // each one into 0..=255. Alpha is taken as is.
    pub fn from_rgb_f64(rgb: [f64; 3], a: u8) -> Color {
        Color {
            r: clamp_channel(rgb[0]),
            g: clamp_channel(rgb[1]),
            b: clamp_channel(rgb[2]),
            a,
        }
    }

    pub fn rgb_f64(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// CSS fill style, with alpha scaled to the canvas' 0..1 convention.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

fn clamp_channel(value: f64) -> u8 {
    value.round().max(0.0).min(255.0) as u8
}
