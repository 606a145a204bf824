// Error types for the particle background. Nothing here is ever surfaced to
// the page: a failed mount leaves an inert background and a console warning.

use std::fmt;
use wasm_bindgen::JsValue;

/// Errors raised by a drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The canvas could not hand out a 2D rendering context.
    ContextUnavailable,
    /// A canvas call threw.
    Draw(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::ContextUnavailable => write!(f, "2d rendering context is unavailable"),
            SurfaceError::Draw(msg) => write!(f, "canvas draw call failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        SurfaceError::Draw(describe(&value))
    }
}

/// A field configuration that cannot be honoured.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ParticleCount(u32),
    SizeRange { min: f64, max: f64 },
    SpeedRange { min: f64, max: f64 },
    LinkDistance(f64),
    LinkOpacity(f64),
    WanderChance(f64),
    Jitter(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParticleCount(n) => write!(
                f,
                "particle count {} exceeds the limit of {}",
                n,
                crate::config::FieldConfig::MAX_PARTICLES
            ),
            ConfigError::SizeRange { min, max } => {
                write!(f, "invalid glyph size range [{}, {}]", min, max)
            }
            ConfigError::SpeedRange { min, max } => {
                write!(f, "invalid speed range [{}, {}]", min, max)
            }
            ConfigError::LinkDistance(d) => write!(f, "link distance must be positive, got {}", d),
            ConfigError::LinkOpacity(o) => write!(f, "link opacity must lie in [0, 1], got {}", o),
            ConfigError::WanderChance(p) => {
                write!(f, "wander chance must lie in [0, 1], got {}", p)
            }
            ConfigError::Jitter(j) => write!(f, "jitter widths must be non-negative, got {}", j),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that keep the background from starting.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundError {
    /// Not running inside a browser window.
    NoWindow,
    Surface(SurfaceError),
    Config(ConfigError),
    /// The window would not report its inner size.
    Viewport(String),
    /// The resize listener could not be registered.
    Listener(String),
    /// The frame scheduler refused a request.
    Schedule(String),
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::NoWindow => write!(f, "no global window"),
            BackgroundError::Surface(e) => write!(f, "{}", e),
            BackgroundError::Config(e) => write!(f, "{}", e),
            BackgroundError::Viewport(msg) => write!(f, "failed to read viewport size: {}", msg),
            BackgroundError::Listener(msg) => {
                write!(f, "failed to register resize listener: {}", msg)
            }
            BackgroundError::Schedule(msg) => write!(f, "failed to schedule frame: {}", msg),
        }
    }
}

impl std::error::Error for BackgroundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackgroundError::Surface(e) => Some(e),
            BackgroundError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SurfaceError> for BackgroundError {
    fn from(e: SurfaceError) -> Self {
        BackgroundError::Surface(e)
    }
}

impl From<ConfigError> for BackgroundError {
    fn from(e: ConfigError) -> Self {
        BackgroundError::Config(e)
    }
}

// JS exceptions are usually strings or Error objects; fall back to Debug.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
