//! Backend seam toward the rendering primitive layer.
//!
//! The view layer never draws meshes itself; an external 3D engine
//! implements [`RenderBackend`] and receives scene/camera snapshots per
//! viewport pass. The seam is object-safe so render views can own any
//! backend behind a `Box<dyn RenderBackend>`.

mod backend;
mod ctx;

pub use backend::{Capabilities, ObjectId, PickPoint, RenderBackend, RenderError};
pub use ctx::RenderPassCtx;
