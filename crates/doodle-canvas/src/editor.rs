use rand::Rng;

use doodle_codec::{CodecError, Edge, PackedPixels, compress_drawing, decompress_drawing};

/// A square grid of on/off cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    edge: Edge,
    cells: Vec<bool>,
}

impl Drawing {
    pub fn empty(edge: Edge) -> Self {
        Self {
            edge,
            cells: vec![false; edge.pixel_count()],
        }
    }

    pub fn random<R: Rng>(edge: Edge, rng: &mut R) -> Self {
        Self {
            edge,
            cells: (0..edge.pixel_count()).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// From a pixel string of exactly `edge²` `'0'`/`'1'` characters.
    pub fn from_bits(bits: &str, edge: Edge) -> Result<Self, CodecError> {
        // Round-trip through the codec for its validation.
        let packed = compress_drawing(bits, edge)?;
        Self::unpack(&packed, edge)
    }

    pub fn unpack(packed: &PackedPixels, edge: Edge) -> Result<Self, CodecError> {
        let bits = decompress_drawing(packed, edge)?;
        Ok(Self {
            edge,
            cells: bits.bytes().map(|b| b == b'1').collect(),
        })
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set one cell. Out-of-range coordinates are ignored.
    /// Returns true if the cell changed.
    pub fn set(&mut self, x: usize, y: usize, on: bool) -> bool {
        match self.index(x, y) {
            Some(i) if self.cells[i] != on => {
                self.cells[i] = on;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn is_blank(&self) -> bool {
        !self.cells.contains(&true)
    }

    pub fn to_bits(&self) -> String {
        self.cells.iter().map(|&on| if on { '1' } else { '0' }).collect()
    }

    pub fn pack(&self) -> Result<PackedPixels, CodecError> {
        compress_drawing(&self.to_bits(), self.edge)
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let edge = self.edge.get();
        (x < edge && y < edge).then(|| y * edge + x)
    }
}

/// Mouse buttons, as far as drawing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Other,
}

/// Editing session on a square canvas of `canvas_len` device pixels.
///
/// The primary button (or a touch) draws, unless erase mode is on; any other
/// button always erases.
pub struct Editor {
    drawing: Drawing,
    canvas_len: u32,
    erase: bool,
}

impl Editor {
    pub fn new(edge: Edge, canvas_len: u32) -> Self {
        Self {
            drawing: Drawing::empty(edge),
            canvas_len,
            erase: false,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn canvas_len(&self) -> u32 {
        self.canvas_len
    }

    /// Device pixels per cell.
    pub fn pixel_size(&self) -> u32 {
        self.canvas_len / self.drawing.edge.get() as u32
    }

    pub fn set_erase(&mut self, erase: bool) {
        self.erase = erase;
    }

    pub fn erase_mode(&self) -> bool {
        self.erase
    }

    pub fn reset(&mut self) {
        self.drawing.clear();
    }

    /// Map a pointer position relative to the canvas' top-left corner to a
    /// cell, clamping positions outside the canvas to its border.
    pub fn cell_at(&self, x: f64, y: f64) -> (usize, usize) {
        let len = f64::from(self.canvas_len);
        let edge = self.drawing.edge.get() as f64;
        let to_cell = |v: f64| {
            let clamped = v.clamp(0.0, (len - 1.0).max(0.0));
            (clamped / len * edge) as usize
        };
        (to_cell(x), to_cell(y))
    }

    /// Pointer moved with `button` held; `None` means no button is down.
    pub fn pointer_move(&mut self, x: f64, y: f64, button: Option<PointerButton>) -> bool {
        match button {
            Some(button) => self.paint(x, y, self.ink_for(button)),
            None => false,
        }
    }

    /// Button released over the canvas; paints the final cell.
    pub fn pointer_up(&mut self, x: f64, y: f64, button: PointerButton) -> bool {
        self.paint(x, y, self.ink_for(button))
    }

    pub fn touch_move(&mut self, x: f64, y: f64) -> bool {
        self.paint(x, y, !self.erase)
    }

    fn ink_for(&self, button: PointerButton) -> bool {
        button == PointerButton::Primary && !self.erase
    }

    fn paint(&mut self, x: f64, y: f64, on: bool) -> bool {
        let (col, row) = self.cell_at(x, y);
        self.drawing.set(col, row, on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_drawing_is_all_zeros() {
        let d = Drawing::empty(Edge::DEFAULT);
        assert_eq!(d.to_bits(), "0".repeat(1024));
        assert!(d.is_blank());
        assert_eq!(d.pack().unwrap().len(), 64);
    }

    #[test]
    fn random_drawings_survive_packing() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let d = Drawing::random(Edge::DEFAULT, &mut rng);
            let packed = d.pack().unwrap();
            assert_eq!(Drawing::unpack(&packed, Edge::DEFAULT).unwrap(), d);
        }
    }

    #[test]
    fn set_is_row_major() {
        let edge = Edge::new(4).unwrap();
        let mut d = Drawing::empty(edge);
        assert!(d.set(1, 2, true));
        assert!(!d.set(1, 2, true));
        assert!(!d.set(4, 0, true));
        assert_eq!(d.to_bits(), "0000000001000000");
        assert_eq!(d.get(1, 2), Some(true));
        assert_eq!(d.get(9, 9), None);

        assert_eq!(Drawing::from_bits("0000000001000000", edge).unwrap(), d);
        assert!(Drawing::from_bits("0101", edge).is_err());
    }

    #[test]
    fn pointer_maps_and_clamps() {
        let editor = Editor::new(Edge::DEFAULT, 320);
        assert_eq!(editor.pixel_size(), 10);
        assert_eq!(editor.cell_at(0.0, 0.0), (0, 0));
        assert_eq!(editor.cell_at(15.0, 319.0), (1, 31));
        assert_eq!(editor.cell_at(-40.0, 1000.0), (0, 31));
    }

    #[test]
    fn buttons_and_erase_mode() {
        let mut editor = Editor::new(Edge::DEFAULT, 320);

        assert!(!editor.pointer_move(5.0, 5.0, None));
        assert!(editor.pointer_move(5.0, 5.0, Some(PointerButton::Primary)));
        assert_eq!(editor.drawing().get(0, 0), Some(true));

        assert!(editor.pointer_up(5.0, 5.0, PointerButton::Other));
        assert_eq!(editor.drawing().get(0, 0), Some(false));

        assert!(editor.touch_move(15.0, 5.0));
        editor.set_erase(true);
        assert!(editor.erase_mode());
        assert!(editor.touch_move(15.0, 5.0));
        assert!(editor.drawing().is_blank());

        editor.set_erase(false);
        editor.pointer_up(100.0, 100.0, PointerButton::Primary);
        assert!(!editor.drawing().is_blank());
        editor.reset();
        assert!(editor.drawing().is_blank());
    }
}
