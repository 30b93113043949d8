// One-shot outward impulse from a click or tap, applied to every live particle
// before the next tick

use crate::config::Config;
use crate::particle::Particle;

const IMPULSE_SCALE: f64 = 0.1;

pub fn apply_click_force(particles: &mut [Particle], click_x: f64, click_y: f64, config: &Config) {
    let click = glm::vec2(click_x, click_y);
    for particle in particles.iter_mut().filter(|p| !p.is_dead) {
        let offset = glm::vec2(particle.pos[0], particle.pos[1]) - click;
        let distance = glm::length(&offset);
        // A particle sitting on the click point has no direction to be pushed in
        if distance <= 0.0 {
            continue;
        }

        // +1 keeps the force finite right next to the click
        let force = config.click_strength / (distance + 1.0);
        let push = offset * (force * IMPULSE_SCALE / distance);
        particle.vel[0] += push[0];
        particle.vel[1] += push[1];
    }
}
