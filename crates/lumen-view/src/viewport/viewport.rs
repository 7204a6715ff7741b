use crate::camera::{CameraState, OrbitController, Projection, ProjectionKind, ViewPreset};
use crate::coords::{Rect, RectPx, Vec2};
use crate::input::{PointerEvent, TriggerEvent};

/// Locally managed camera overriding the scene camera for one viewport.
///
/// Used by the orthographic panes of a quad layout: the pane keeps its own
/// projection and orbit state, independent of whichever camera is active in
/// the scene.
#[derive(Debug, Clone)]
pub struct BuiltinCamera {
    pub projection: Projection,
    pub preset: ViewPreset,
    pub manip: OrbitController,
    /// When false the built-in camera ignores pointer/trigger input.
    pub manip_enabled: bool,
}

impl BuiltinCamera {
    fn camera_state(&self, aspect: f32) -> CameraState {
        let mut projection = self.projection;
        projection.aspect = aspect;
        CameraState::new(self.manip.camera_transform(), projection)
    }
}

/// A rectangular sub-region of a canvas.
///
/// Geometry is stored in normalized canvas fractions; the canvas pixel size
/// is cached so hit-testing and device-coordinate conversion work in pixels.
#[derive(Debug, Clone)]
pub struct Viewport {
    rect: Rect,
    canvas_width: u32,
    canvas_height: u32,
    pub enabled: bool,
    builtin: Option<BuiltinCamera>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            rect: Rect::unit(),
            canvas_width: 1,
            canvas_height: 1,
            enabled: true,
            builtin: None,
        }
    }

    /// Sets the viewport rect in normalized canvas fractions.
    pub fn set_size(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rect = Rect::new(x, y, width, height);
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Updates the cached canvas size (called on canvas resize).
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width.max(1);
        self.canvas_height = height.max(1);
    }

    /// Viewport rect in canvas pixels.
    pub fn pixel_rect(&self) -> RectPx {
        self.rect.to_pixels(self.canvas_width, self.canvas_height)
    }

    /// Whether a canvas-pixel position lies inside this viewport.
    pub fn is_inside(&self, p: Vec2) -> bool {
        let px = self.pixel_rect();
        p.x >= px.x as f32
            && p.y >= px.y as f32
            && p.x < (px.x + px.width as i32) as f32
            && p.y < (px.y + px.height as i32) as f32
    }

    /// Canvas-pixel x to normalized device x in `[-1, 1]`.
    pub fn device_x(&self, x: f32) -> f32 {
        let px = self.pixel_rect();
        if px.width == 0 {
            return 0.0;
        }
        ((x - px.x as f32) / px.width as f32) * 2.0 - 1.0
    }

    /// Canvas-pixel y to normalized device y in `[-1, 1]` (up positive).
    pub fn device_y(&self, y: f32) -> f32 {
        let px = self.pixel_rect();
        if px.height == 0 {
            return 0.0;
        }
        -(((y - px.y as f32) / px.height as f32) * 2.0 - 1.0)
    }

    // ── built-in camera ───────────────────────────────────────────────────

    /// Installs a built-in camera with the given projection and orientation
    /// preset, replacing any previous override.
    pub fn set_builtin_camera(
        &mut self,
        kind: ProjectionKind,
        preset: ViewPreset,
    ) -> &mut BuiltinCamera {
        let projection = match kind {
            ProjectionKind::Perspective => Projection::perspective(52.0),
            ProjectionKind::Orthographic => Projection::orthographic(20.0),
        };
        self.builtin.insert(BuiltinCamera {
            projection,
            preset,
            manip: OrbitController::from_preset(preset),
            manip_enabled: false,
        })
    }

    /// Enables the built-in camera manipulator; returns it for configuration.
    ///
    /// # Panics
    /// Panics if no built-in camera is installed.
    pub fn enable_manip(&mut self, enabled: bool) -> &mut OrbitController {
        let builtin = self
            .builtin
            .as_mut()
            .expect("enable_manip: viewport has no built-in camera");
        builtin.manip_enabled = enabled;
        &mut builtin.manip
    }

    pub fn builtin_camera(&self) -> Option<&BuiltinCamera> {
        self.builtin.as_ref()
    }

    /// Camera to use for this viewport's pass: the built-in override when
    /// present, else the scene camera, either way with the viewport aspect.
    pub fn update_camera(&self, scene_camera: Option<&CameraState>) -> Option<CameraState> {
        let aspect = self.pixel_rect().aspect();
        match &self.builtin {
            Some(builtin) => Some(builtin.camera_state(aspect)),
            None => scene_camera.map(|c| c.with_aspect(aspect)),
        }
    }

    // ── manipulator input ─────────────────────────────────────────────────

    /// Forwards a pointer event to the built-in manipulator.
    /// Returns whether the camera changed (callers force a redraw).
    pub fn on_pointer(&mut self, event: &PointerEvent) -> bool {
        match &mut self.builtin {
            Some(b) if b.manip_enabled => b.manip.on_pointer(event),
            _ => false,
        }
    }

    /// Forwards a trigger event to the built-in manipulator.
    pub fn on_trigger(&mut self, event: &TriggerEvent) -> bool {
        match &mut self.builtin {
            Some(b) if b.manip_enabled => b.manip.on_trigger(event),
            _ => false,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
