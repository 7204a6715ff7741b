//! Lumen view layer.
//!
//! Turns a [`lumen_graph`] component graph into an interactive,
//! multi-viewport 3D presentation: viewport math and quad layouts, GPU
//! index-pass picking, pointer/trigger routing with sticky targets, and a
//! render loop coordinating the active scene/camera pair across views.
//!
//! The 3D engine itself stays external, behind [`render::RenderBackend`].

pub mod camera;
pub mod component;
pub mod coords;
pub mod input;
pub mod logging;
pub mod pick;
pub mod render;
pub mod scene;
pub mod system;
pub mod view;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use component::{Action, RenderHooks, SceneGraph, UpdateCtx, ViewComponent};
pub use render::{Capabilities, ObjectId, RenderBackend, RenderError};
pub use scene::{CameraComponent, SceneComponent};
pub use system::{RenderSystem, SystemEvent, ViewId};
pub use view::{RenderView, SnapshotFormat};
pub use viewport::{QuadSplit, QuadViewLayout, Viewport};
