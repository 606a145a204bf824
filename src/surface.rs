// The drawing operations the particle field needs from whatever it paints on.

use crate::error::SurfaceError;
use vecmath::Vector2;

pub trait Surface {
    /// Wipes a `width` x `height` area starting at the origin.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError>;

    /// Draws `glyph` centred on `pos`, turned by `rotation` radians, at a font
    /// size of `size` pixels.
    fn draw_glyph(
        &mut self,
        glyph: &str,
        pos: Vector2<f64>,
        rotation: f64,
        size: f64,
    ) -> Result<(), SurfaceError>;

    /// Strokes a 1px line between two points.
    fn draw_link(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        opacity: f64,
    ) -> Result<(), SurfaceError>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Clear(f64, f64),
        Glyph {
            glyph: String,
            pos: Vector2<f64>,
            rotation: f64,
            size: f64,
        },
        Link {
            from: Vector2<f64>,
            to: Vector2<f64>,
            opacity: f64,
        },
    }

    /// Remembers every call so tests can inspect what a frame drew.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn links(&self) -> Vec<(Vector2<f64>, Vector2<f64>, f64)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Link { from, to, opacity } => Some((*from, *to, *opacity)),
                    _ => None,
                })
                .collect()
        }

        pub fn glyph_count(&self) -> usize {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Glyph { .. }))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
            self.calls.push(DrawCall::Clear(width, height));
            Ok(())
        }

        fn draw_glyph(
            &mut self,
            glyph: &str,
            pos: Vector2<f64>,
            rotation: f64,
            size: f64,
        ) -> Result<(), SurfaceError> {
            self.calls.push(DrawCall::Glyph {
                glyph: glyph.to_owned(),
                pos,
                rotation,
                size,
            });
            Ok(())
        }

        fn draw_link(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            opacity: f64,
        ) -> Result<(), SurfaceError> {
            self.calls.push(DrawCall::Link { from, to, opacity });
            Ok(())
        }
    }
}
