use tracing::warn;

use doodle_codec::{Edge, decompress};
use doodle_types::{DayBucket, Doodle, Timestamp};

use crate::render::render_fitted;
use crate::surface::Surface;

/// One doodle as the UI shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoodleView {
    pub day_bucket: DayBucket,
    pub created_at: Timestamp,
    /// Creation time as `HH:MM:SS` UTC.
    pub label: String,
    /// Full key, `yy-mm-dd/createdAt`.
    pub caption: String,
    pub bits: String,
}

impl DoodleView {
    pub fn render_to<S: Surface + ?Sized>(&self, surface: &mut S, edge: Edge, canvas_len: u32) {
        render_fitted(surface, &self.bits, edge, canvas_len);
    }
}

/// The doodles currently on screen.
///
/// Owned by the view that shows them. Every change bumps [`revision`], which
/// is the signal to rebuild [`views`] and repaint.
///
/// [`revision`]: Gallery::revision
/// [`views`]: Gallery::views
pub struct Gallery {
    edge: Edge,
    doodles: Vec<Doodle>,
    revision: u64,
}

impl Gallery {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            doodles: Vec::new(),
            revision: 0,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn doodles(&self) -> &[Doodle] {
        &self.doodles
    }

    pub fn len(&self) -> usize {
        self.doodles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doodles.is_empty()
    }

    /// Replace everything, e.g. after fetching the day's doodles.
    pub fn replace(&mut self, doodles: Vec<Doodle>) {
        self.doodles = doodles;
        self.revision += 1;
    }

    /// Add a doodle the server just accepted.
    pub fn insert(&mut self, doodle: Doodle) {
        self.doodles.push(doodle);
        self.revision += 1;
    }

    /// Drop a doodle the server just deleted. Returns false if it was not shown.
    pub fn remove(&mut self, day_bucket: &DayBucket, created_at: &Timestamp) -> bool {
        match self.doodles.iter().position(|d| d.has_key(day_bucket, created_at)) {
            Some(i) => {
                self.doodles.remove(i);
                self.revision += 1;
                true
            }
            None => {
                warn!("Deleted doodle {}/{} was not in the gallery", day_bucket, created_at);
                false
            }
        }
    }

    /// Newest first.
    pub fn views(&self) -> Vec<DoodleView> {
        self.doodles
            .iter()
            .rev()
            .map(|d| DoodleView {
                day_bucket: d.day_bucket.clone(),
                created_at: d.created_at,
                label: d.created_at.as_datetime().format("%H:%M:%S").to_string(),
                caption: format!("{}/{}", d.day_bucket, d.created_at),
                bits: decompress(&d.pixels),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_codec::{PackedPixels, compress};

    fn doodle(ts: &str, bits: &str) -> Doodle {
        Doodle::new(Timestamp::parse(ts).unwrap(), compress(bits).unwrap())
    }

    #[test]
    fn revision_tracks_changes() {
        let mut gallery = Gallery::new(Edge::DEFAULT);
        assert_eq!(gallery.revision(), 0);

        let a = doodle("2023-02-24T04:04:38.569Z", "1000000000000000");
        let b = doodle("2023-02-24T05:00:00.000Z", "0000000000000001");
        gallery.replace(vec![a.clone()]);
        gallery.insert(b.clone());
        assert_eq!(gallery.revision(), 2);
        assert_eq!(gallery.len(), 2);

        assert!(gallery.remove(&a.day_bucket, &a.created_at));
        assert_eq!(gallery.revision(), 3);
        assert!(!gallery.remove(&a.day_bucket, &a.created_at));
        assert_eq!(gallery.revision(), 3);
        assert_eq!(gallery.doodles(), &[b]);
    }

    #[test]
    fn views_are_newest_first_and_decoded() {
        let mut gallery = Gallery::new(Edge::DEFAULT);
        gallery.replace(vec![
            doodle("2023-02-24T04:04:38.569Z", "1000000000000000"),
            doodle("2023-02-24T05:00:00.000Z", "0000000000000001"),
        ]);

        let views = gallery.views();
        assert_eq!(views[0].label, "05:00:00");
        assert_eq!(views[0].caption, "23-02-24/2023-02-24T05:00:00.000Z");
        assert_eq!(views[0].bits, "0000000000000001");
        assert_eq!(views[1].label, "04:04:38");
        assert_eq!(views[1].day_bucket.as_str(), "23-02-24");
    }

    #[test]
    fn view_renders_into_surface() {
        use crate::surface::{PixelBuffer, Rgba};

        let edge = Edge::new(16).unwrap();
        let mut units = vec![0u16; edge.packed_len()];
        units[0] = 0x8000;
        let d = Doodle::new(Timestamp::now(), PackedPixels::from_units(units));

        let mut gallery = Gallery::new(edge);
        gallery.insert(d);

        let mut buf = PixelBuffer::new(160, 160);
        gallery.views()[0].render_to(&mut buf, gallery.edge(), 160);
        assert_eq!(buf.pixel(9, 9), Some(Rgba::BLACK));
        assert_eq!(buf.pixel(10, 0), Some(Rgba::WHITE));
    }
}
