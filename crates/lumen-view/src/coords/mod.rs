//! 2D coordinate types.
//!
//! Canvas positions are logical pixels with a top-left origin. Viewport
//! rectangles are stored as fractions of the canvas in `[0, 1]` and converted
//! to integer pixel rects ([`RectPx`]) when applied to the GPU.

mod rect;
mod vec2;

pub use rect::{Rect, RectPx};
pub use vec2::Vec2;
