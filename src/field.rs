// The particle collection plus the size of the surface it lives on.
// Stepping and drawing are separate so a frame can be driven piece by piece.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::surface::Surface;

/// A line to draw between two particles closer than the connect distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub opacity: f64,
}

pub struct Field {
    pub config: FieldConfig,
    particles: Vec<Particle>,
    width: u32,
    height: u32,
    generation: u64,
}

impl Field {
    pub fn new(config: FieldConfig) -> Field {
        Field {
            config,
            particles: Vec::new(),
            width: 0,
            height: 0,
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    // How many times the particle set has been (re)built
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // Throws away the current particles and spawns a fresh set sized for the surface width
    pub fn build<R: RandomSource>(&mut self, rng: &mut R) {
        let count = self.config.count_for_width(self.width);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::spawn(self.width, self.height, &self.config, rng));
        }
        self.particles = particles;
        self.generation += 1;
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }

    fn link_between(&self, i: usize, j: usize) -> Option<Link> {
        let a = self.particles.get(i)?;
        let b = self.particles.get(j)?;
        let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
        if distance < self.config.connect_distance {
            let opacity = (1.0 - distance / self.config.connect_distance) * self.config.link_max_opacity;
            Some(Link {
                from: i,
                to: j,
                distance,
                opacity,
            })
        } else {
            None
        }
    }

    // Every unordered pair (i < j) close enough to connect. O(n^2), n is capped by the config
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let n = self.particles.len();
        (0..n).flat_map(move |i| (i + 1..n).filter_map(move |j| self.link_between(i, j)))
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);
        let color = self.config.color;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, color, p.alpha);
        }
        for link in self.links() {
            surface.stroke_line(
                self.particles[link.from].pos,
                self.particles[link.to].pos,
                color,
                link.opacity,
                self.config.link_width,
            );
        }
    }
}
