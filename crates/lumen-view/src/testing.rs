//! Shared mock render backend for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::CameraState;
use crate::coords::RectPx;
use crate::pick::index_to_color;
use crate::render::{Capabilities, ObjectId, PickPoint, RenderBackend, RenderError};

#[derive(Debug, Default)]
pub(crate) struct MockState {
    /// One entry per backend call, in order.
    pub calls: Vec<String>,
    /// Index returned (color-encoded) by the next `render_index`.
    pub pick_index: u32,
    pub last_pick_point: Option<PickPoint>,
    pub size: (u32, u32),
    pub render_count: usize,
}

pub(crate) struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

pub(crate) fn mock_backend(width: u32, height: u32) -> (Box<MockBackend>, Rc<RefCell<MockState>>) {
    let state = Rc::new(RefCell::new(MockState {
        size: (width, height),
        ..MockState::default()
    }));
    (
        Box::new(MockBackend {
            state: state.clone(),
        }),
        state,
    )
}

impl RenderBackend for MockBackend {
    fn set_size(&mut self, width: u32, height: u32) {
        let mut s = self.state.borrow_mut();
        s.size = (width, height);
        s.calls.push(format!("set_size {width}x{height}"));
    }

    fn canvas_size(&self) -> (u32, u32) {
        self.state.borrow().size
    }

    fn clear(&mut self) {
        self.state.borrow_mut().calls.push("clear".into());
    }

    fn apply_viewport(&mut self, rect: RectPx) {
        self.state.borrow_mut().calls.push(format!(
            "viewport {},{} {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ));
    }

    fn render(&mut self, scene: ObjectId, _camera: &CameraState) -> Result<(), RenderError> {
        let mut s = self.state.borrow_mut();
        s.render_count += 1;
        s.calls.push(format!("render {}", scene.0));
        Ok(())
    }

    fn render_index(
        &mut self,
        _scene: ObjectId,
        _camera: &CameraState,
        pick: &PickPoint,
    ) -> Result<[u8; 4], RenderError> {
        let mut s = self.state.borrow_mut();
        s.last_pick_point = Some(*pick);
        s.calls.push(format!("render_index {},{}", pick.x, pick.y));
        Ok(index_to_color(s.pick_index))
    }

    fn read_image(&mut self) -> Result<image::RgbaImage, RenderError> {
        let (w, h) = self.state.borrow().size;
        self.state.borrow_mut().calls.push("read_image".into());
        Ok(image::RgbaImage::new(w.max(1), h.max(1)))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            max_texture_size: 4096,
            max_cube_map_size: 2048,
        }
    }
}
