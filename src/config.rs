// Per-frame configuration snapshot shared read-only by every particle in a tick

use crate::filter::Filter;
use crate::shape::Shape;

#[derive(Clone, Debug)]
pub struct Config {
    /// Spacing between particles in px; particles are drawn at half of it.
    pub particle_gap: f64,
    /// Signed: positive pushes particles away from the pointer, negative pulls.
    pub mouse_force: f64,
    /// Velocity damping factor applied every tick.
    pub gravity: f64,
    pub noise: f64,
    pub click_strength: f64,
    pub hue_rotation: f64,
    pub filter: Filter,
    pub particle_shape: Shape,
    pub vortex_mode: bool,
    pub brightness: f64,
    pub max_particles: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            particle_gap: 4.0,
            mouse_force: 30.0,
            gravity: 0.9,
            noise: 0.0,
            click_strength: 100.0,
            hue_rotation: 0.0,
            filter: Filter::default(),
            particle_shape: Shape::default(),
            vortex_mode: false,
            brightness: 1.0,
            max_particles: None,
        }
    }
}
