use std::fmt;

use crate::camera::CameraState;
use crate::coords::{RectPx, Vec2};

/// Opaque handle to a 3D object owned by the external rendering engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Renderer capability limits, recorded once when the first view attaches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Capabilities {
    pub max_texture_size: u32,
    pub max_cube_map_size: u32,
}

/// Failure surfaced by a backend call.
#[derive(Debug, Clone)]
pub enum RenderError {
    /// The backend rejected or failed the draw/readback.
    Backend(String),
    /// The backend does not implement index-pass picking.
    PickUnsupported,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Backend(msg) => write!(f, "backend error: {msg}"),
            RenderError::PickUnsupported => write!(f, "backend does not support index picking"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Pick request location for an index pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickPoint {
    /// Pixel to decode, relative to the viewport rect (top-left origin).
    pub x: u32,
    pub y: u32,
    /// Viewport rect the index pass must cover.
    pub viewport: RectPx,
    /// Normalized device coordinates of the pick within the viewport.
    pub device: Vec2,
}

/// Contract implemented by the external 3D engine.
///
/// One backend instance corresponds to one canvas/renderer pair. Calls are
/// issued strictly from the render loop and event router, single-threaded.
pub trait RenderBackend {
    /// Resizes the canvas drawable, in physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current drawable size `(width, height)`.
    fn canvas_size(&self) -> (u32, u32);

    /// Clears the whole canvas.
    fn clear(&mut self);

    /// Applies a viewport + scissor rect for the next draw.
    fn apply_viewport(&mut self, rect: RectPx);

    /// Draws `scene` with `camera` into the current viewport rect.
    fn render(&mut self, scene: ObjectId, camera: &CameraState) -> Result<(), RenderError>;

    /// Renders `scene` index-encoded (each pickable object shaded with its
    /// pick-index color) and returns the RGBA bytes at the requested pixel.
    fn render_index(
        &mut self,
        scene: ObjectId,
        camera: &CameraState,
        pick: &PickPoint,
    ) -> Result<[u8; 4], RenderError>;

    /// Reads back the canvas contents (used for snapshot rendering).
    fn read_image(&mut self) -> Result<image::RgbaImage, RenderError>;

    /// Device limits.
    fn capabilities(&self) -> Capabilities;
}
