mod background;
pub mod config;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod particle;
mod renderer;
pub mod surface;
mod utils;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use background::ParticleBackground;
pub use config::FieldConfig;
pub use error::{BackgroundError, ConfigError, SurfaceError};
pub use field::{connection_opacity, ParticleField};
pub use particle::Particle;
pub use surface::Surface;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
