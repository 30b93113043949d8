extern crate nalgebra_glm as glm;

pub mod color;
pub mod config;
pub mod contrast;
pub mod filter;
pub mod impulse;
pub mod particle;
pub mod physics;
pub mod pointer;
pub mod shape;
mod utils;

use crate::color::Color;
use crate::config::Config;
use crate::filter::Filter;
use crate::particle::{Origin, Particle};
use crate::pointer::Pointer;
use crate::shape::{Shape, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Only touches the console when timing is switched on
    fn start_if(enabled: bool, name: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Owns the particle field for one canvas. The host page decodes the image
// into origins, calls add_particle for each, and then drives update/render
// once per animation frame.
#[wasm_bindgen]
pub struct ParticleCanvas {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    origins: Vec<Origin>,
    config: Config,
    custom_shape: Option<js_sys::Function>,
    pointer: Pointer,
    vortex: Pointer,
    speed: f64,
    debug_timing: bool,
    rng: StdRng,
}

#[wasm_bindgen]
impl ParticleCanvas {
    pub fn new(width: u32, height: u32) -> ParticleCanvas {
        ParticleCanvas::with_rng(width, height, StdRng::from_entropy())
    }

    pub fn with_seed(width: u32, height: u32, seed: u32) -> ParticleCanvas {
        ParticleCanvas::with_rng(width, height, StdRng::seed_from_u64(seed as u64))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // Returns false once max_particles is reached
    pub fn add_particle(&mut self, x: f64, y: f64, origin_x: f64, origin_y: f64, rgba: u32) -> bool {
        if let Some(max) = self.config.max_particles {
            if self.particles.len() >= max {
                return false;
            }
        }
        let origin = Origin::new(origin_x, origin_y, Color::from_u32(rgba));
        self.particles.push(origin.spawn_particle(x, y));
        self.origins.push(origin);
        true
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
        self.origins.clear();
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn live_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_dead).count()
    }

    // True once every live particle has snapped back onto its origin, the
    // host can stop scheduling frames until the next interaction.
    pub fn is_settled(&self) -> bool {
        self.particles
            .iter()
            .filter(|p| !p.is_dead)
            .all(|p| p.is_settled())
    }

    pub fn set_particle_gap(&mut self, gap: f64) {
        self.config.particle_gap = gap;
    }

    pub fn set_mouse_force(&mut self, force: f64) {
        self.config.mouse_force = force;
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.config.gravity = gravity;
    }

    pub fn set_noise(&mut self, noise: f64) {
        self.config.noise = noise;
    }

    pub fn set_click_strength(&mut self, strength: f64) {
        self.config.click_strength = strength;
    }

    pub fn set_hue_rotation(&mut self, degrees: f64) {
        self.config.hue_rotation = degrees;
    }

    pub fn set_brightness(&mut self, brightness: f64) {
        self.config.brightness = brightness;
    }

    pub fn set_filter(&mut self, name: &str) {
        self.config.filter = Filter::from_name(name).unwrap_or_else(|| {
            console::warn_1(&format!("unknown filter '{}', using none", name).into());
            Filter::None
        });
    }

    pub fn set_particle_shape(&mut self, name: &str) {
        self.config.particle_shape = Shape::from_name(name).unwrap_or_else(|| {
            console::warn_1(&format!("unknown particle shape '{}', using square", name).into());
            Shape::Square
        });
    }

    // Called as f(ctx, x, y, size) for every particle, overriding the named shape
    pub fn set_custom_shape(&mut self, draw: js_sys::Function) {
        self.custom_shape = Some(draw);
    }

    pub fn clear_custom_shape(&mut self) {
        self.custom_shape = None;
    }

    pub fn set_vortex_mode(&mut self, enabled: bool) {
        self.config.vortex_mode = enabled;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    // Particles past the cap are marked dead rather than dropped, so raising
    // the cap again brings them back where they were.
    pub fn set_max_particles(&mut self, max: usize) {
        self.config.max_particles = Some(max);
        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.is_dead = i >= max;
        }
    }

    pub fn set_debug_timing(&mut self, enabled: bool) {
        self.debug_timing = enabled;
    }

    // The vortex center follows the pointer
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
        self.vortex.move_to(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.release();
        self.vortex.release();
    }

    pub fn click(&mut self, x: f64, y: f64) {
        impulse::apply_click_force(&mut self.particles, x, y, &self.config);
    }

    pub fn update(&mut self) {
        let _timer = Timer::start_if(self.debug_timing, "ParticleCanvas::update");
        let gravity_factor = self.config.gravity;
        for (particle, origin) in self.particles.iter_mut().zip(&self.origins) {
            if particle.is_dead {
                continue;
            }
            physics::update_particle(
                particle,
                origin,
                &self.config,
                &self.pointer,
                &self.vortex,
                self.speed,
                gravity_factor,
                &mut self.rng,
            );
        }
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let _timer = Timer::start_if(self.debug_timing, "ParticleCanvas::render");
        ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let config = self.frame_config(ctx);
        let mut surface = ctx.clone();
        for (particle, origin) in self.particles.iter().zip(&self.origins) {
            if particle.is_dead {
                continue;
            }
            shape::draw_particle(particle, origin, &mut surface, &config)
                .map_err(|e| JsValue::from_str(&e))?;
        }
        Ok(())
    }
}

impl ParticleCanvas {
    fn with_rng(width: u32, height: u32, rng: StdRng) -> ParticleCanvas {
        ParticleCanvas {
            width,
            height,
            particles: Vec::new(),
            origins: Vec::new(),
            config: Config::default(),
            custom_shape: None,
            pointer: Pointer::inactive(),
            vortex: Pointer::inactive(),
            speed: 1.0,
            debug_timing: false,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // Snapshot used for one frame of drawing. A JS custom shape needs the
    // canvas context, so it is bound here rather than stored in the config.
    fn frame_config(&self, ctx: &CanvasRenderingContext2d) -> Config {
        let mut config = self.config.clone();
        if let Some(draw) = &self.custom_shape {
            let draw = draw.clone();
            let ctx: JsValue = ctx.clone().into();
            config.particle_shape = Shape::Custom(Rc::new(
                move |_surface: &mut dyn Surface, x: f64, y: f64, size: f64| -> Result<(), String> {
                    let args = js_sys::Array::new();
                    args.push(&ctx);
                    args.push(&JsValue::from_f64(x));
                    args.push(&JsValue::from_f64(y));
                    args.push(&JsValue::from_f64(size));
                    draw.apply(&JsValue::NULL, &args)
                        .map(|_| ())
                        .map_err(|e| format!("custom shape failed: {:?}", e))
                },
            ));
        }
        config
    }
}
