// Tunables for the particle field. The defaults are the values the background
// ships with; JS callers can construct one and override fields before mounting.

use crate::error::ConfigError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    pub min_size: f64,
    pub max_size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Width of the uniform jitter added to a component reflected off an edge.
    pub edge_jitter: f64,
    /// Per-particle, per-tick probability of a random course change.
    pub wander_chance: f64,
    /// Width of the uniform nudge applied to each velocity axis on a course change.
    pub wander_strength: f64,
    pub link_distance: f64,
    pub link_opacity: f64,
    #[wasm_bindgen(skip)]
    pub font_family: String,
    #[wasm_bindgen(skip)]
    pub link_rgb: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::PARTICLE_COUNT,
            min_size: 20.0,
            max_size: 35.0,
            min_speed: 0.0,
            max_speed: 5.0,
            edge_jitter: 0.5,
            wander_chance: 0.01,
            wander_strength: 0.3,
            link_distance: FieldConfig::LINK_DISTANCE,
            link_opacity: FieldConfig::LINK_OPACITY,
            font_family: "Arial".to_owned(),
            link_rgb: [255, 255, 255],
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_owned();
    }

    pub fn set_link_color(&mut self, r: u8, g: u8, b: u8) {
        self.link_rgb = [r, g, b];
    }
}

impl FieldConfig {
    pub const PARTICLE_COUNT: u32 = 50;
    /// Links are checked pairwise every frame, so the count stays small.
    pub const MAX_PARTICLES: u32 = 2_000;
    pub const LINK_DISTANCE: f64 = 150.0;
    pub const LINK_OPACITY: f64 = 0.2;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > FieldConfig::MAX_PARTICLES {
            return Err(ConfigError::ParticleCount(self.particle_count));
        }
        if !(self.min_size >= 0.0 && self.min_size <= self.max_size) {
            return Err(ConfigError::SizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if !(self.min_speed >= 0.0 && self.min_speed <= self.max_speed) {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if !(self.link_distance > 0.0) {
            return Err(ConfigError::LinkDistance(self.link_distance));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ConfigError::LinkOpacity(self.link_opacity));
        }
        if !(0.0..=1.0).contains(&self.wander_chance) {
            return Err(ConfigError::WanderChance(self.wander_chance));
        }
        for jitter in [self.edge_jitter, self.wander_strength].iter() {
            if !(*jitter >= 0.0) {
                return Err(ConfigError::Jitter(*jitter));
            }
        }
        Ok(())
    }

    pub(crate) fn link_style(&self, opacity: f64) -> String {
        let [r, g, b] = self.link_rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, opacity)
    }
}
