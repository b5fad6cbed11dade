// Simple particle struct to keep track of individual position, velocity, size and opacity

use crate::config::FieldConfig;
use crate::random::RandomSource;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, alpha: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            alpha,
        }
    }

    // Draw order is x, y, vx, vy, radius, alpha
    pub fn spawn<R: RandomSource>(width: u32, height: u32, config: &FieldConfig, rng: &mut R) -> Particle {
        let half_speed = config.speed / 2.0;
        let pos_x = rng.next_unit() * width as f64;
        let pos_y = rng.next_unit() * height as f64;
        let vel_x = rng.next_in(-half_speed, half_speed);
        let vel_y = rng.next_in(-half_speed, half_speed);
        let radius = rng.next_in(config.min_radius, config.max_radius);
        let alpha = rng.next_in(config.min_alpha, config.max_alpha);
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, alpha)
    }

    // Moves by one frame of velocity, reappearing on the opposite edge when leaving the surface
    pub fn step(&mut self, width: u32, height: u32) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.pos[0] = wrap(self.pos[0], width as f64);
        self.pos[1] = wrap(self.pos[1], height as f64);
    }
}

fn wrap(coord: f64, size: f64) -> f64 {
    if coord < 0.0 {
        size
    } else if coord > size {
        0.0
    } else {
        coord
    }
}
