//! Scene and camera components.
//!
//! A [`SceneComponent`] anchors a renderable scene in the graph: it owns the
//! backend scene object, remembers which camera was last active for it, and
//! caches the pre/post render-hook lists for its subtree. A
//! [`CameraComponent`] publishes the camera state the active scene renders
//! with.

mod camera;
mod render_lists;
#[allow(clippy::module_inception)]
mod scene;

pub use camera::CameraComponent;
pub use render_lists::RenderLists;
pub use scene::SceneComponent;

use lumen_graph::ComponentId;

use crate::component::SceneGraph;

/// Downcasts a graph component to a [`SceneComponent`].
pub fn scene_component(graph: &SceneGraph, id: ComponentId) -> Option<&SceneComponent> {
    graph.component(id)?.as_any().downcast_ref()
}

pub fn scene_component_mut(graph: &mut SceneGraph, id: ComponentId) -> Option<&mut SceneComponent> {
    graph.component_mut(id)?.as_any_mut().downcast_mut()
}

/// Downcasts a graph component to a [`CameraComponent`].
pub fn camera_component(graph: &SceneGraph, id: ComponentId) -> Option<&CameraComponent> {
    graph.component(id)?.as_any().downcast_ref()
}

pub fn camera_component_mut(graph: &mut SceneGraph, id: ComponentId) -> Option<&mut CameraComponent> {
    graph.component_mut(id)?.as_any_mut().downcast_mut()
}
