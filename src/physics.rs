// Force model: spring back to the origin with some ambient noise, pointer or
// vortex interaction, damping, and a hard snap once a particle is at rest.

use crate::config::Config;
use crate::particle::{Origin, Particle};
use crate::pointer::Pointer;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

// Inside this radius the spring softens so particles don't overshoot.
const SOFT_SPRING_RADIUS: f64 = 5.0;
const SOFT_SPRING_FORCE: f64 = 0.1;
const SPRING_STIFFNESS: f64 = 0.02;

const SETTLE_RADIUS: f64 = 10.0;
const SETTLE_DAMPING: f64 = 0.8;

const SNAP_RADIUS: f64 = 1.0;
const SNAP_VELOCITY: f64 = 0.1;

const VORTEX_PULL: f64 = 0.1;

#[allow(clippy::too_many_arguments)]
pub fn update_particle<R: Rng + ?Sized>(
    particle: &mut Particle,
    origin: &Origin,
    config: &Config,
    pointer: &Pointer,
    vortex: &Pointer,
    speed: f64,
    gravity_factor: f64,
    rng: &mut R,
) {
    let offset = jitter(config.noise, rng);
    let to_origin = vec2_add(vec2_sub(origin.pos, particle.pos), offset);
    let distance = vec2_len(to_origin);

    let force = if distance < SOFT_SPRING_RADIUS {
        SOFT_SPRING_FORCE * (distance / SOFT_SPRING_RADIUS)
    } else {
        SPRING_STIFFNESS * distance
    };
    if distance > 0.0 {
        let pull = vec2_scale(to_origin, force * speed / distance);
        particle.vel = vec2_add(particle.vel, pull);
    }

    if pointer.active {
        if config.vortex_mode {
            swirl_around(particle, vortex);
        } else {
            push_from(particle, pointer, config.mouse_force, speed);
        }
    }

    let damping = if !pointer.active && distance < SETTLE_RADIUS {
        gravity_factor.max(SETTLE_DAMPING)
    } else {
        gravity_factor
    };
    particle.vel = vec2_scale(particle.vel, damping);

    let at_rest = !pointer.active
        && distance < SNAP_RADIUS
        && particle.vel[0].abs() < SNAP_VELOCITY
        && particle.vel[1].abs() < SNAP_VELOCITY;
    if at_rest {
        particle.pos = origin.pos;
        particle.vel = [0.0, 0.0];
    } else {
        particle.pos = vec2_add(particle.pos, particle.vel);
    }
}

// Each axis uniform in [-noise/2, noise/2]
fn jitter<R: Rng + ?Sized>(noise: f64, rng: &mut R) -> Vector2<f64> {
    [(rng.gen::<f64>() - 0.5) * noise, (rng.gen::<f64>() - 0.5) * noise]
}

// Tangential push of 1/r plus a weak pull toward the center, so particles
// orbit the vortex instead of fleeing or collapsing into it.
fn swirl_around(particle: &mut Particle, vortex: &Pointer) {
    let radial = vec2_sub(particle.pos, vortex.pos);
    let dist = vec2_len(radial);
    if dist <= 0.0 {
        return;
    }

    let force = 1.0 / dist;
    let angle = radial[1].atan2(radial[0]) + FRAC_PI_2;
    let tangent = [angle.cos() * force, angle.sin() * force];
    let inward = vec2_scale(radial, force * VORTEX_PULL / dist);
    particle.vel = vec2_sub(vec2_add(particle.vel, tangent), inward);
}

fn push_from(particle: &mut Particle, pointer: &Pointer, mouse_force: f64, speed: f64) {
    let away = vec2_sub(particle.pos, pointer.pos);
    let dist = vec2_len(away);
    if dist <= 0.0 {
        return;
    }

    let force = mouse_force / dist;
    particle.vel = vec2_add(particle.vel, vec2_scale(away, force * speed / dist));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn origin_at(x: f64, y: f64) -> Origin {
        Origin::new(x, y, Color::from_u32(0x808080ff))
    }

    fn quiet_config() -> Config {
        Config {
            noise: 0.0,
            ..Config::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn particle_at_origin_stays_put() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(1);
        let idle = Pointer::inactive();

        update_particle(&mut p, &origin, &quiet_config(), &idle, &idle, 1.0, 0.9, &mut rng);

        assert_eq!(p.pos, [100.0, 100.0]);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn far_particle_gets_linear_spring() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        let idle = Pointer::inactive();

        update_particle(&mut p, &origin, &quiet_config(), &idle, &idle, 1.0, 1.0, &mut rng);

        // 0.02 * 141.42 along the diagonal
        assert!(approx(p.vel[0], 2.0), "{:?}", p.vel);
        assert!(approx(p.vel[1], 2.0), "{:?}", p.vel);
        assert!(approx(p.pos[0], 2.0) && approx(p.pos[1], 2.0), "{:?}", p.pos);
    }

    #[test]
    fn speed_scales_the_spring() {
        let origin = origin_at(100.0, 0.0);
        let mut p = origin.spawn_particle(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        let idle = Pointer::inactive();

        update_particle(&mut p, &origin, &quiet_config(), &idle, &idle, 0.5, 1.0, &mut rng);

        assert!(approx(p.vel[0], 1.0), "{:?}", p.vel);
        assert_eq!(p.vel[1], 0.0);
    }

    #[test]
    fn near_rest_snaps_exactly() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.5, 100.0);
        p.vel = [0.05, -0.05];
        let mut rng = StdRng::seed_from_u64(3);
        let idle = Pointer::inactive();

        update_particle(&mut p, &origin, &quiet_config(), &idle, &idle, 1.0, 0.9, &mut rng);

        assert_eq!(p.pos, [100.0, 100.0]);
        assert_eq!(p.vel, [0.0, 0.0]);
        assert!(p.is_settled());
    }

    #[test]
    fn no_snap_while_pointer_is_active() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.5, 100.0);
        let mut rng = StdRng::seed_from_u64(3);
        let config = Config {
            mouse_force: 0.0,
            ..quiet_config()
        };
        let pointer = Pointer::new([500.0, 500.0]);

        update_particle(&mut p, &origin, &config, &pointer, &pointer, 1.0, 0.9, &mut rng);

        assert!(p.pos != origin.pos);
        assert!(!p.is_settled());
    }

    #[test]
    fn converges_to_origin_when_undisturbed() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        let idle = Pointer::inactive();
        let config = quiet_config();

        for _ in 0..1000 {
            update_particle(&mut p, &origin, &config, &idle, &idle, 1.0, config.gravity, &mut rng);
            assert!(p.vel[0].is_finite() && p.vel[1].is_finite());
        }

        assert_eq!(p.pos, origin.pos);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn settles_even_with_weak_damping() {
        // gravity 0.5 is raised to 0.8 near the origin
        let origin = origin_at(10.0, 10.0);
        let mut p = origin.spawn_particle(14.0, 7.0);
        let mut rng = StdRng::seed_from_u64(5);
        let idle = Pointer::inactive();

        for _ in 0..500 {
            update_particle(&mut p, &origin, &quiet_config(), &idle, &idle, 1.0, 0.5, &mut rng);
        }

        assert!(p.is_settled());
    }

    #[test]
    fn positive_mouse_force_repels() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(6);
        let config = Config {
            mouse_force: 10.0,
            ..quiet_config()
        };
        let pointer = Pointer::new([90.0, 100.0]);

        update_particle(&mut p, &origin, &config, &pointer, &Pointer::inactive(), 1.0, 1.0, &mut rng);

        assert!(approx(p.vel[0], 1.0), "{:?}", p.vel);
        assert!(approx(p.vel[1], 0.0));
        assert!(approx(p.pos[0], 101.0));
    }

    #[test]
    fn negative_mouse_force_attracts() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(6);
        let config = Config {
            mouse_force: -10.0,
            ..quiet_config()
        };
        let pointer = Pointer::new([90.0, 100.0]);

        update_particle(&mut p, &origin, &config, &pointer, &Pointer::inactive(), 1.0, 1.0, &mut rng);

        assert!(approx(p.vel[0], -1.0), "{:?}", p.vel);
    }

    #[test]
    fn pointer_on_top_of_particle_adds_nothing() {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(6);
        let pointer = Pointer::new([100.0, 100.0]);

        update_particle(&mut p, &origin, &quiet_config(), &pointer, &pointer, 1.0, 1.0, &mut rng);

        assert_eq!(p.vel, [0.0, 0.0]);
        assert_eq!(p.pos, [100.0, 100.0]);
    }

    #[test]
    fn vortex_swirls_instead_of_pushing() {
        let origin = origin_at(110.0, 100.0);
        let mut p = origin.spawn_particle(110.0, 100.0);
        let mut rng = StdRng::seed_from_u64(7);
        let config = Config {
            vortex_mode: true,
            ..quiet_config()
        };
        let pointer = Pointer::new([0.0, 0.0]);
        let vortex = Pointer::new([100.0, 100.0]);

        update_particle(&mut p, &origin, &config, &pointer, &vortex, 1.0, 1.0, &mut rng);

        // tangent 1/10 along +y, inward 0.1 * 1/10 along -x
        assert!(approx(p.vel[0], -0.01), "{:?}", p.vel);
        assert!(approx(p.vel[1], 0.1), "{:?}", p.vel);
    }

    #[test]
    fn vortex_is_ignored_while_pointer_is_inactive() {
        let origin = origin_at(110.0, 100.0);
        let mut p = origin.spawn_particle(110.0, 100.0);
        let mut rng = StdRng::seed_from_u64(7);
        let config = Config {
            vortex_mode: true,
            ..quiet_config()
        };
        let vortex = Pointer::new([100.0, 100.0]);

        update_particle(&mut p, &origin, &config, &Pointer::inactive(), &vortex, 1.0, 1.0, &mut rng);

        assert!(p.is_settled());
    }

    // Starts 5 or 20 px from the origin, moving at (1, 0) with gravity 0.5
    fn one_step_velocity(offset: [f64; 2], pointer: Pointer) -> [f64; 2] {
        let origin = origin_at(100.0, 100.0);
        let mut p = origin.spawn_particle(100.0 + offset[0], 100.0 + offset[1]);
        p.vel = [1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(8);
        let config = Config {
            mouse_force: 0.0,
            ..quiet_config()
        };

        update_particle(&mut p, &origin, &config, &pointer, &pointer, 1.0, 0.5, &mut rng);
        p.vel
    }

    #[test]
    fn damping_is_raised_near_origin_when_idle() {
        // spring adds (-0.06, -0.08), then 0.8 instead of 0.5
        let vel = one_step_velocity([3.0, 4.0], Pointer::inactive());
        assert!(approx(vel[0], 0.94 * 0.8), "{:?}", vel);
        assert!(approx(vel[1], -0.08 * 0.8), "{:?}", vel);
    }

    #[test]
    fn damping_is_plain_gravity_far_from_origin() {
        // spring adds (-0.24, -0.32)
        let vel = one_step_velocity([12.0, 16.0], Pointer::inactive());
        assert!(approx(vel[0], 0.76 * 0.5), "{:?}", vel);
        assert!(approx(vel[1], -0.32 * 0.5), "{:?}", vel);
    }

    #[test]
    fn damping_is_plain_gravity_while_pointer_is_active() {
        let vel = one_step_velocity([3.0, 4.0], Pointer::new([500.0, 500.0]));
        assert!(approx(vel[0], 0.94 * 0.5), "{:?}", vel);
        assert!(approx(vel[1], -0.08 * 0.5), "{:?}", vel);
    }

    #[test]
    fn jitter_stays_within_half_the_noise() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let [x, y] = jitter(6.0, &mut rng);
            assert!(x.abs() <= 3.0 && y.abs() <= 3.0, "{} {}", x, y);
        }
        assert_eq!(jitter(0.0, &mut rng), [0.0, 0.0]);
    }

    #[test]
    fn noise_nudges_a_resting_particle_only_slightly() {
        let origin = origin_at(50.0, 50.0);
        let noise = 4.0;
        let config = Config {
            noise,
            ..Config::default()
        };
        let idle = Pointer::inactive();
        let mut rng = StdRng::seed_from_u64(12);
        let bound = 0.02 * noise / 2f64.sqrt() + 1e-12;

        for _ in 0..2000 {
            let mut p = origin.spawn_particle(50.0, 50.0);
            update_particle(&mut p, &origin, &config, &idle, &idle, 1.0, 1.0, &mut rng);
            let dv = vec2_len(p.vel);
            assert!(dv <= bound, "dv {} over {}", dv, bound);
        }
    }

    #[test]
    fn noise_is_reproducible_from_the_seed() {
        let origin = origin_at(50.0, 50.0);
        let config = Config {
            noise: 8.0,
            ..Config::default()
        };
        let idle = Pointer::inactive();

        let run = |seed| {
            let mut p = origin.spawn_particle(20.0, 30.0);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..10 {
                update_particle(&mut p, &origin, &config, &idle, &idle, 1.0, 0.9, &mut rng);
            }
            p
        };

        assert_eq!(run(9), run(9));
        assert!(run(9).pos != run(10).pos);
    }
}
