use crate::camera::CameraState;
use crate::coords::RectPx;
use crate::system::ViewId;

use super::{ObjectId, RenderBackend};

/// Context handed to pre/post render hooks, once per viewport pass.
pub struct RenderPassCtx<'a> {
    pub view: ViewId,
    /// Index of the viewport within its view.
    pub viewport: usize,
    pub viewport_rect: RectPx,
    pub backend: &'a mut dyn RenderBackend,
    pub scene: ObjectId,
    pub camera: &'a CameraState,
}
