use std::any::Any;

use lumen_graph::{ComponentId, EventFlag};

use crate::component::{Action, UpdateCtx, ViewComponent};
use crate::render::ObjectId;

use super::RenderLists;

/// Graph component anchoring a renderable scene.
///
/// Owns the backend scene object, remembers the camera last activated for
/// this scene, and caches the render-hook lists for its subtree.
pub struct SceneComponent {
    root: ObjectId,
    active_camera: Option<ComponentId>,
    activate: EventFlag,
    lists: RenderLists,
}

impl SceneComponent {
    pub fn new(root: ObjectId) -> Self {
        Self {
            root,
            active_camera: None,
            activate: EventFlag::new(),
            lists: RenderLists::default(),
        }
    }

    /// Backend object for this scene's root.
    #[inline]
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Requests activation; applied on the next update pass.
    pub fn activate(&mut self) {
        self.activate.set();
    }

    /// Camera last activated while this scene was current.
    #[inline]
    pub fn active_camera(&self) -> Option<ComponentId> {
        self.active_camera
    }

    pub(crate) fn set_active_camera(&mut self, camera: Option<ComponentId>) {
        self.active_camera = camera;
    }

    pub(crate) fn set_lists(&mut self, lists: RenderLists) {
        self.lists = lists;
    }

    /// Moves the cached lists out for iteration; restore with [`set_lists`].
    ///
    /// [`set_lists`]: SceneComponent::set_lists
    pub(crate) fn take_lists(&mut self) -> RenderLists {
        std::mem::take(&mut self.lists)
    }
}

impl ViewComponent for SceneComponent {
    fn type_name(&self) -> &'static str {
        "Scene"
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if self.activate.take_changed() {
            ctx.actions.push(Action::ActivateScene(ctx.component));
        }
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
