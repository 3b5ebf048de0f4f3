/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
}

/// A 2D raster the renderer can paint on.
pub trait Surface {
    /// (width, height) in device pixels.
    fn size(&self) -> (u32, u32);

    /// Paint the whole surface.
    fn fill(&mut self, color: Rgba);

    /// Paint an axis-aligned rectangle. Parts outside the surface are dropped.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);
}

/// In-memory RGBA surface, row-major, 4 bytes per pixel.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(Rgba(rgba))
    }

    /// Raw RGBA bytes, e.g. for handing to an image encoder.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.0);
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let offset = self.offset(col, row);
                self.pixels[offset..offset + 4].copy_from_slice(&color.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill(Rgba::WHITE);
        buf.fill_rect(2, 2, 10, 10, Rgba::BLACK);

        assert_eq!(buf.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(buf.pixel(2, 2), Some(Rgba::BLACK));
        assert_eq!(buf.pixel(3, 3), Some(Rgba::BLACK));
        assert_eq!(buf.pixel(4, 4), None);
        assert_eq!(buf.as_bytes().len(), 64);
    }
}
