use glam::{Mat4, Vec3};

use crate::input::{PointerEvent, PointerKind, TriggerEvent, TriggerKind, buttons};

use super::ViewPreset;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    Orbit,
    Pan,
    Dolly,
}

/// Built-in camera manipulator: orbit angles plus a view-space offset.
///
/// The camera transform is `R_yaw · R_pitch · T(offset)`, i.e. the camera
/// sits `offset.z` away from the orbit center, shifted by `offset.x/y` in
/// view space. Pointer drags orbit (left), pan (right) or dolly (middle);
/// the wheel zooms by scaling the distance.
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Pitch and yaw in degrees.
    pub pitch: f32,
    pub yaw: f32,
    /// View-space offset; `z` is the distance to the orbit center.
    pub offset: Vec3,
    /// When false, drags never change pitch/yaw (axis-locked ortho panes).
    pub orientation_enabled: bool,
    mode: Option<Mode>,
}

const ORBIT_SPEED: f32 = 0.3; // degrees per pixel
const ZOOM_STEP: f32 = 0.07; // fraction of distance per wheel line
const MIN_DISTANCE: f32 = 0.1;

impl OrbitController {
    pub fn new() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            offset: Vec3::new(0.0, 0.0, 50.0),
            orientation_enabled: true,
            mode: None,
        }
    }

    pub fn from_preset(preset: ViewPreset) -> Self {
        let (pitch, yaw) = preset.orbit_angles();
        Self {
            pitch,
            yaw,
            ..Self::new()
        }
    }

    /// Camera-to-world transform for the current orbit state.
    pub fn camera_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_translation(self.offset)
    }

    /// Applies a pointer event; returns whether the camera changed.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => {
                self.mode = Some(self.mode_for_buttons(event.buttons));
                false
            }
            PointerKind::Up => {
                self.mode = None;
                false
            }
            PointerKind::Move => {
                let Some(mode) = self.mode else { return false };
                let dx = event.movement.x;
                let dy = event.movement.y;
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                match mode {
                    Mode::Orbit => {
                        self.yaw += dx * ORBIT_SPEED;
                        self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(-90.0, 90.0);
                    }
                    Mode::Pan => {
                        let scale = self.offset.z * 0.002;
                        self.offset.x -= dx * scale;
                        self.offset.y += dy * scale;
                    }
                    Mode::Dolly => {
                        self.scale_distance(1.0 + dy * 0.005);
                    }
                }
                true
            }
            PointerKind::Hover => false,
        }
    }

    /// Applies a trigger event; returns whether the camera changed.
    pub fn on_trigger(&mut self, event: &TriggerEvent) -> bool {
        match event.kind {
            TriggerKind::Wheel => {
                if event.wheel == 0.0 {
                    return false;
                }
                self.scale_distance(1.0 + event.wheel * ZOOM_STEP);
                true
            }
            TriggerKind::DblClick | TriggerKind::ContextMenu => false,
        }
    }

    fn mode_for_buttons(&self, held: u32) -> Mode {
        if held & buttons::MIDDLE != 0 {
            Mode::Dolly
        } else if held & buttons::RIGHT != 0 || !self.orientation_enabled {
            Mode::Pan
        } else {
            Mode::Orbit
        }
    }

    fn scale_distance(&mut self, factor: f32) {
        self.offset.z = (self.offset.z * factor).max(MIN_DISTANCE);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}
