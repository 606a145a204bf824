// A single drifting glyph: position, velocity, heading and a fixed font size

use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

pub const GLYPHS: [&str; 8] = ["📚", "✏️", "🧮", "✒️", "📄", "📓", "📐", "📝"];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    /// Heading in radians, kept equal to `atan2(vel.y, vel.x)`.
    pub rotation: f64,
    pub size: f64,
    pub glyph: &'static str,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, glyph: &'static str) -> Particle {
        Particle {
            pos,
            vel,
            rotation: heading(vel),
            size,
            glyph,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &FieldConfig,
        width: f64,
        height: f64,
    ) -> Particle {
        let vel_x = (rng.gen::<f64>() - 0.5) * uniform(rng, config.min_speed, config.max_speed);
        let vel_y = (rng.gen::<f64>() - 0.5) * uniform(rng, config.min_speed, config.max_speed);
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let glyph = GLYPHS[rng.gen_range(0, GLYPHS.len())];
        let size = uniform(rng, config.min_size, config.max_size);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, glyph)
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }

    // One tick of movement: drift, bounce off the viewport edges, maybe wander,
    // then re-aim the glyph along its new heading.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &FieldConfig,
        width: f64,
        height: f64,
    ) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);

        let bounds = [width, height];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 || self.pos[axis] > bounds[axis] {
                self.vel[axis] = -self.vel[axis] + (rng.gen::<f64>() - 0.5) * config.edge_jitter;
                self.pos[axis] = self.pos[axis].max(0.0).min(bounds[axis]);
            }
        }

        if rng.gen::<f64>() < config.wander_chance {
            self.vel[0] += (rng.gen::<f64>() - 0.5) * config.wander_strength;
            self.vel[1] += (rng.gen::<f64>() - 0.5) * config.wander_strength;
        }
        self.limit_speed(config.max_speed);

        self.rotation = heading(self.vel);
    }

    // Scales down only; a slow particle stays slow.
    fn limit_speed(&mut self, max_speed: f64) {
        let speed = self.speed();
        if speed > max_speed {
            self.vel = vecmath::vec2_scale(self.vel, max_speed / speed);
        }
    }
}

pub fn heading(vel: Vector2<f64>) -> f64 {
    vel[1].atan2(vel[0])
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}
