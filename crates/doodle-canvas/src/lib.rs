//! Front-end model for doodles, independent of any UI toolkit.
//!
//! - [`surface`]: the raster a renderer paints on, plus an in-memory RGBA buffer
//! - [`render`]: bit string → filled squares
//! - [`editor`]: the drawing being edited and how pointer input changes it
//! - [`gallery`]: the doodles on screen and the view model built from them

pub mod editor;
pub mod gallery;
pub mod render;
pub mod surface;

pub use editor::{Drawing, Editor, PointerButton};
pub use gallery::{DoodleView, Gallery};
pub use render::{Palette, render, render_fitted, render_with};
pub use surface::{PixelBuffer, Rgba, Surface};
