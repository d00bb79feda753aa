//! The drawing capability the compositor renders into.

use image::RgbaImage;

use crate::error::Result;
use crate::geometry::{Rect, Shape};
use crate::paint::Paint;

/// Drop shadow cast by an image blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Blur extent in output units; the Gaussian sigma is half of it.
    pub blur: f64,
    /// Shadow color, black at this opacity.
    pub opacity: f64,
}

/// A target that can fill shapes, clip, and blit images.
///
/// Implementations own all of their drawing state; callers pass the surface
/// explicitly into each step of a render.
pub trait Surface {
    /// Fills `shape` with `paint`, honoring the active clip.
    fn fill(&mut self, shape: &Shape, paint: &Paint);

    /// Restricts later drawing to the inside of `shape`, on top of any
    /// clip already in force.
    fn push_clip(&mut self, shape: &Shape);

    /// Drops the most recent clip.
    fn pop_clip(&mut self);

    /// Draws `image` scaled into `dest`, optionally casting `shadow`.
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect, shadow: Option<&Shadow>) -> Result<()>;
}
