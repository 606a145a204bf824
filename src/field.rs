// Owns the particle buffer for one viewport and drives the per-frame
// update and draw passes over it.

use crate::config::FieldConfig;
use crate::error::SurfaceError;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use vecmath::Vector2;
extern crate nalgebra_glm as glm;

pub struct ParticleField {
    width: f64,
    height: f64,
    config: FieldConfig,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        ParticleField {
            width: 0.0,
            height: 0.0,
            config,
            particles: Vec::new(),
        }
    }

    /// Builds a field around an existing set of particles.
    pub fn with_particles(
        config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
    ) -> Self {
        ParticleField {
            width,
            height,
            config,
            particles,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Adopts a new viewport and throws every particle away in favour of a
    /// freshly randomised set.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        let count = self.config.particle_count as usize;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(rng, &self.config, width, height));
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for particle in &mut self.particles {
            particle.advance(rng, &self.config, self.width, self.height);
        }
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.clear(self.width, self.height)?;
        for index in 0..self.particles.len() {
            self.draw_particle(index, surface)?;
        }
        Ok(())
    }

    // One animation frame. Each particle moves and is drawn before the next one
    // moves, so its links are measured against a partly updated field.
    // Every particle moves even when drawing fails; the first failure is
    // returned once the frame is done.
    pub fn tick<R: Rng + ?Sized, S: Surface>(
        &mut self,
        rng: &mut R,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        let mut first_error = surface.clear(self.width, self.height).err();
        for index in 0..self.particles.len() {
            self.particles[index].advance(rng, &self.config, self.width, self.height);
            if let Err(e) = self.draw_particle(index, surface) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Every other particle close enough to `index` to be linked, with the
    /// opacity of the line between them. A pair shows up from both ends.
    pub fn links_from(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let origin = self.particles[index].pos;
        self.particles
            .iter()
            .enumerate()
            .filter(move |(other, _)| *other != index)
            .filter_map(move |(other, p)| {
                connection_opacity(distance(origin, p.pos), &self.config)
                    .map(|opacity| (other, opacity))
            })
    }

    fn draw_particle<S: Surface>(&self, index: usize, surface: &mut S) -> Result<(), SurfaceError> {
        let p = &self.particles[index];
        surface.draw_glyph(p.glyph, p.pos, p.rotation, p.size)?;
        for (other, opacity) in self.links_from(index) {
            surface.draw_link(p.pos, self.particles[other].pos, opacity)?;
        }
        Ok(())
    }
}

/// Opacity of the line between two particles `distance` apart, or `None` when
/// they are too far apart to be linked.
pub fn connection_opacity(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some((1.0 - distance / config.link_distance) * config.link_opacity)
    } else {
        None
    }
}

fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    glm::distance(&glm::vec2(a[0], a[1]), &glm::vec2(b[0], b[1]))
}
