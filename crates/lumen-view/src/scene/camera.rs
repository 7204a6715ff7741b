use std::any::Any;

use glam::Mat4;
use lumen_graph::{EventFlag, Property};

use crate::camera::{CameraState, Projection};
use crate::component::{Action, UpdateCtx, ViewComponent};

/// Graph component publishing a camera.
///
/// The first update pass activates the camera automatically unless
/// [`set_auto_activate`] disabled it; later activations go through the
/// `activate` socket or [`RenderSystem::activate_camera`].
///
/// [`set_auto_activate`]: CameraComponent::set_auto_activate
/// [`RenderSystem::activate_camera`]: crate::system::RenderSystem::activate_camera
pub struct CameraComponent {
    pub projection: Property<Projection>,
    pub transform: Property<Mat4>,
    activate: EventFlag,
    auto_activate: bool,
}

impl CameraComponent {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection: Property::new(projection),
            transform: Property::new(Mat4::IDENTITY),
            activate: EventFlag::new(),
            auto_activate: true,
        }
    }

    pub fn set_auto_activate(&mut self, auto: bool) {
        self.auto_activate = auto;
    }

    /// Requests activation; applied on the next update pass.
    pub fn activate(&mut self) {
        self.activate.set();
    }

    /// Snapshot used for rendering.
    pub fn camera_state(&self) -> CameraState {
        CameraState::new(*self.transform.get(), *self.projection.get())
    }
}

impl ViewComponent for CameraComponent {
    fn type_name(&self) -> &'static str {
        "Camera"
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if std::mem::take(&mut self.auto_activate) || self.activate.take_changed() {
            ctx.actions.push(Action::ActivateCamera(ctx.component));
        }
        self.projection.take_changed() | self.transform.take_changed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
