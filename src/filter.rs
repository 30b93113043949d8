// Color pipeline applied to a particle's source color before drawing:
// filter, then hue rotation, then brightness. Alpha is never touched.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    None,
    Grayscale,
    Sepia,
    Invert,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::None
    }
}

impl Filter {
    pub fn from_name(name: &str) -> Option<Filter> {
        match name {
            "none" => Some(Filter::None),
            "grayscale" => Some(Filter::Grayscale),
            "sepia" => Some(Filter::Sepia),
            "invert" => Some(Filter::Invert),
            _ => None,
        }
    }
}

pub fn apply_filter(color: Color, filter: Filter, hue_rotation: f64, brightness: f64) -> Color {
    let [mut red, mut green, mut blue] = color.rgb_f64();

    match filter {
        Filter::None => {}
        Filter::Grayscale => {
            let gray = 0.299 * red + 0.587 * green + 0.114 * blue;
            red = gray;
            green = gray;
            blue = gray;
        }
        Filter::Sepia => {
            let sepia_red = (0.393 * red + 0.769 * green + 0.189 * blue).min(255.0);
            let sepia_green = (0.349 * red + 0.686 * green + 0.168 * blue).min(255.0);
            let sepia_blue = (0.272 * red + 0.534 * green + 0.131 * blue).min(255.0);
            red = sepia_red;
            green = sepia_green;
            blue = sepia_blue;
        }
        Filter::Invert => {
            red = 255.0 - red;
            green = 255.0 - green;
            blue = 255.0 - blue;
        }
    }

    if hue_rotation != 0.0 {
        let rotated = rotate_hue([red, green, blue], hue_rotation);
        red = rotated[0];
        green = rotated[1];
        blue = rotated[2];
    }

    if brightness != 1.0 {
        red = (red * brightness).min(255.0);
        green = (green * brightness).min(255.0);
        blue = (blue * brightness).min(255.0);
    }

    Color::from_rgb_f64([red, green, blue], color.a)
}

// Takes and returns channels in 0..255; the result is rounded to whole values.
fn rotate_hue(rgb: [f64; 3], degrees: f64) -> [f64; 3] {
    let (hue, saturation, lightness) = rgb_to_hsl([rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0]);

    let mut hue = (hue * 360.0 + degrees) % 360.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    let [r, g, b] = hsl_to_rgb(hue / 360.0, saturation, lightness);
    [(r * 255.0).round(), (g * 255.0).round(), (b * 255.0).round()]
}

// All components in 0..1.
fn rgb_to_hsl([red, green, blue]: [f64; 3]) -> (f64, f64, f64) {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let lightness = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let hue = if max == red {
        (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
    } else if max == green {
        (blue - red) / delta + 2.0
    } else {
        (red - green) / delta + 4.0
    };

    (hue / 6.0, saturation, lightness)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    [
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
