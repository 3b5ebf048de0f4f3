use doodle_codec::Edge;

use crate::surface::{Rgba, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub ink: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            ink: Rgba::BLACK,
        }
    }
}

/// Black-on-white [`render_with`].
pub fn render<S: Surface + ?Sized>(surface: &mut S, bits: &str, edge: Edge, pixel_size: u32) {
    render_with(surface, bits, edge, pixel_size, Palette::default());
}

/// Clear the surface, then paint a `pixel_size` square for every `'1'`.
///
/// Bit `i` lands at column `i % edge`, row `i / edge`. Squares are solid
/// fills with no smoothing; anything past the surface is clipped.
pub fn render_with<S: Surface + ?Sized>(
    surface: &mut S,
    bits: &str,
    edge: Edge,
    pixel_size: u32,
    palette: Palette,
) {
    surface.fill(palette.background);

    let edge = edge.get();
    for (i, bit) in bits.bytes().enumerate() {
        if bit != b'1' {
            continue;
        }
        let col = (i % edge) as u32;
        let row = (i / edge) as u32;
        surface.fill_rect(
            col.saturating_mul(pixel_size),
            row.saturating_mul(pixel_size),
            pixel_size,
            pixel_size,
            palette.ink,
        );
    }
}

/// Render into a `canvas_len` square, sizing cells to fill it.
///
/// A drawing made under a different edge (say a 16x16 doodle in a 32x32
/// deployment) is laid out by its own edge, so it still fills the canvas.
/// Lengths that are not a valid square fall back to `edge`.
pub fn render_fitted<S: Surface + ?Sized>(surface: &mut S, bits: &str, edge: Edge, canvas_len: u32) {
    let drawn = Edge::from_pixel_count(bits.len()).unwrap_or(edge);
    let pixel_size = canvas_len / drawn.get() as u32;
    render(surface, bits, drawn, pixel_size);
}
