// Simple particle struct to keep track of individual position and velocity,
// plus the immutable origin each particle returns to

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub target: [f64; 2],
    pub is_dead: bool,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, target: [f64; 2]) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [0.0, 0.0],
            target,
            is_dead: false,
        }
    }

    // Resting exactly on the target with no motion left, which only happens
    // after a rest snap.
    pub fn is_settled(&self) -> bool {
        self.pos == self.target && self.vel == [0.0, 0.0]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Origin {
    pub pos: [f64; 2],
    pub color: Color,
}

impl Origin {
    pub fn new(x: f64, y: f64, color: Color) -> Origin {
        Origin { pos: [x, y], color }
    }

    pub fn spawn_particle(&self, pos_x: f64, pos_y: f64) -> Particle {
        Particle::new(pos_x, pos_y, self.pos)
    }
}
