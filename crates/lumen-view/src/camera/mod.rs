//! Camera state, projections and the built-in orbit manipulator.
//!
//! Scene cameras live on camera components, but viewports can override the
//! scene camera with a locally managed one (orthographic top/left/front
//! panes). Both kinds resolve to a [`CameraState`] snapshot handed to the
//! render backend.

mod orbit;
mod projection;

pub use orbit::OrbitController;
pub use projection::{Projection, ProjectionKind, ViewPreset};

use glam::Mat4;

/// Camera snapshot for one render pass: world transform + projection.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Camera-to-world transform.
    pub transform: Mat4,
    pub projection: Projection,
}

impl CameraState {
    pub fn new(transform: Mat4, projection: Projection) -> Self {
        Self { transform, projection }
    }

    /// World-to-camera (view) matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Returns a copy adapted to the given viewport aspect ratio.
    pub fn with_aspect(&self, aspect: f32) -> Self {
        let mut out = self.clone();
        out.projection.aspect = aspect;
        out
    }
}
