// Draws a single particle onto a 2D drawing surface, using the source color run
// through the filter pipeline and contrast correction

use crate::color::Color;
use crate::config::Config;
use crate::contrast::enhance_contrast;
use crate::filter::{apply_filter, Filter};
use crate::particle::{Origin, Particle};
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;
use web_sys::CanvasRenderingContext2d;

/// Immediate mode 2D paint target, the subset of the canvas API particles use.
pub trait Surface {
    fn set_fill_style(&mut self, style: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<(), String>;
    fn close_path(&mut self);
    fn fill(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke(&mut self);
}

// Inherent canvas methods are called by path so they don't resolve back to
// the trait methods of the same name.
impl Surface for CanvasRenderingContext2d {
    fn set_fill_style(&mut self, style: &str) {
        CanvasRenderingContext2d::set_fill_style_str(self, style);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<(), String> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start_angle, end_angle)
            .map_err(|e| format!("arc failed: {:?}", e))
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

/// User supplied drawing routine, called with (surface, x, y, size).
pub type CustomShape = Rc<dyn Fn(&mut dyn Surface, f64, f64, f64) -> Result<(), String>>;

#[derive(Clone)]
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Custom(CustomShape),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Square
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Square => write!(f, "Square"),
            Shape::Circle => write!(f, "Circle"),
            Shape::Triangle => write!(f, "Triangle"),
            Shape::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Shape {
    pub fn from_name(name: &str) -> Option<Shape> {
        match name {
            "square" => Some(Shape::Square),
            "circle" => Some(Shape::Circle),
            "triangle" => Some(Shape::Triangle),
            _ => None,
        }
    }
}

/// Final on-screen color for a particle with the given origin.
pub fn particle_color(origin: &Origin, filter: Filter, hue_rotation: f64, brightness: f64) -> Color {
    enhance_contrast(apply_filter(origin.color, filter, hue_rotation, brightness))
}

pub fn draw_particle(
    particle: &Particle,
    origin: &Origin,
    surface: &mut dyn Surface,
    config: &Config,
) -> Result<(), String> {
    let color = particle_color(origin, config.filter, config.hue_rotation, config.brightness);
    surface.set_fill_style(&color.to_css());

    // Whole pixels only, sub-pixel positions flicker
    let x = particle.pos[0].floor();
    let y = particle.pos[1].floor();
    let size = config.particle_gap / 2.0;

    match &config.particle_shape {
        Shape::Circle => {
            surface.begin_path();
            surface.arc(x, y, size, 0.0, PI * 2.0)?;
            surface.fill();
        }
        Shape::Triangle => {
            surface.begin_path();
            surface.move_to(x, y - size);
            surface.line_to(x + size, y + size);
            surface.line_to(x - size, y + size);
            surface.close_path();
            surface.fill();
        }
        Shape::Square => {
            surface.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
        }
        Shape::Custom(draw) => draw(surface, x, y, size)?,
    }
    Ok(())
}
