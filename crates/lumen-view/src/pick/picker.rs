use lumen_graph::ComponentId;

use crate::camera::CameraState;
use crate::coords::Vec2;
use crate::render::{ObjectId, PickPoint, RenderBackend, RenderError};
use crate::viewport::Viewport;

use super::PickRegistry;

/// Encodes a pick index as the color an object writes in the index pass.
#[inline]
pub fn index_to_color(index: u32) -> [u8; 4] {
    [
        (index >> 16) as u8,
        (index >> 8) as u8,
        index as u8,
        0xff,
    ]
}

/// Decodes an index-pass pixel. `None` for the background (index 0).
#[inline]
pub fn color_to_index(color: [u8; 4]) -> Option<u32> {
    let index = (u32::from(color[0]) << 16) | (u32::from(color[1]) << 8) | u32::from(color[2]);
    (index != 0).then_some(index)
}

/// What a pick resolved to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PickHit {
    /// The object whose index was read back.
    pub object: ObjectId,
    /// The component owning that object, if any ancestor links to one.
    pub component: Option<ComponentId>,
}

/// Runs the index pass for a single pixel and resolves the result.
#[derive(Debug, Default)]
pub struct GpuPicker;

impl GpuPicker {
    /// Picks the object under `local` (canvas pixels) in the given viewport.
    ///
    /// Returns `Ok(None)` when the pixel is background or the index is stale
    /// (retired between the render and the readback).
    pub fn pick(
        &self,
        backend: &mut dyn RenderBackend,
        registry: &PickRegistry,
        scene: ObjectId,
        camera: &CameraState,
        viewport: &Viewport,
        local: Vec2,
    ) -> Result<Option<PickHit>, RenderError> {
        let px = viewport.pixel_rect();
        if px.width == 0 || px.height == 0 {
            return Ok(None);
        }
        let x = (local.x - px.x as f32).clamp(0.0, (px.width - 1) as f32) as u32;
        let y = (local.y - px.y as f32).clamp(0.0, (px.height - 1) as f32) as u32;
        let point = PickPoint {
            x,
            y,
            viewport: px,
            device: Vec2::new(viewport.device_x(local.x), viewport.device_y(local.y)),
        };
        let color = backend.render_index(scene, camera, &point)?;
        let Some(index) = color_to_index(color) else {
            return Ok(None);
        };
        Ok(registry.object_by_index(index).map(|object| PickHit {
            object,
            component: registry.resolve_component(object),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_backend;
    use glam::Mat4;

    use crate::camera::Projection;

    #[test]
    fn color_codec_round_trips() {
        for index in [1u32, 255, 256, 70000, 0x00ff_ffff] {
            assert_eq!(color_to_index(index_to_color(index)), Some(index));
        }
        assert_eq!(color_to_index([0, 0, 0, 0xff]), None);
    }

    #[test]
    fn pick_resolves_through_the_registry() {
        let (mut backend, state) = mock_backend(800, 600);
        let mut registry = PickRegistry::new();
        let component = ComponentId::from_raw(3);
        registry.register(ObjectId(1), None, Some(component), false);
        let index = registry
            .register(ObjectId(2), Some(ObjectId(1)), None, true)
            .unwrap();
        state.borrow_mut().pick_index = index;

        let mut viewport = Viewport::new();
        viewport.set_canvas_size(800, 600);
        let camera = CameraState::new(Mat4::IDENTITY, Projection::perspective(52.0));
        let hit = GpuPicker
            .pick(
                backend.as_mut(),
                &registry,
                ObjectId(0),
                &camera,
                &viewport,
                Vec2::new(400.0, 300.0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(hit.object, ObjectId(2));
        assert_eq!(hit.component, Some(component));

        let point = state.borrow().last_pick_point.unwrap();
        assert_eq!((point.x, point.y), (400, 300));
    }

    #[test]
    fn background_pick_is_none() {
        let (mut backend, state) = mock_backend(800, 600);
        state.borrow_mut().pick_index = 0;
        let registry = PickRegistry::new();
        let mut viewport = Viewport::new();
        viewport.set_canvas_size(800, 600);
        let camera = CameraState::new(Mat4::IDENTITY, Projection::perspective(52.0));
        let hit = GpuPicker
            .pick(
                backend.as_mut(),
                &registry,
                ObjectId(0),
                &camera,
                &viewport,
                Vec2::new(10.0, 10.0),
            )
            .unwrap();
        assert!(hit.is_none());
    }
}
