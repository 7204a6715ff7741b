use glam::Mat4;

/// Projection family.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// Axis-aligned view orientation presets for built-in viewport cameras.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewPreset {
    None,
    Left,
    Right,
    Top,
    Bottom,
    Front,
    Back,
}

impl ViewPreset {
    /// Orbit angles (pitch, yaw) in degrees placing the camera on the preset
    /// axis, looking at the origin.
    pub fn orbit_angles(self) -> (f32, f32) {
        match self {
            ViewPreset::None | ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Back => (0.0, 180.0),
            ViewPreset::Left => (0.0, -90.0),
            ViewPreset::Right => (0.0, 90.0),
            ViewPreset::Top => (-90.0, 0.0),
            ViewPreset::Bottom => (90.0, 0.0),
        }
    }
}

/// Projection parameters.
///
/// `aspect` is filled in per pass by the viewport; the remaining fields are
/// authored on the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    /// Vertical field of view in degrees (perspective).
    pub fov_y: f32,
    /// Vertical half-extent of the view volume (orthographic).
    pub size: f32,
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn perspective(fov_y: f32) -> Self {
        Self {
            kind: ProjectionKind::Perspective,
            fov_y,
            size: 20.0,
            zoom: 1.0,
            near: 0.01,
            far: 10_000.0,
            aspect: 1.0,
        }
    }

    pub fn orthographic(size: f32) -> Self {
        Self {
            kind: ProjectionKind::Orthographic,
            fov_y: 52.0,
            size,
            zoom: 1.0,
            near: 0.01,
            far: 10_000.0,
            aspect: 1.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match self.kind {
            ProjectionKind::Perspective => {
                let fov = (self.fov_y / self.zoom.max(f32::EPSILON)).to_radians();
                Mat4::perspective_rh(fov, self.aspect.max(f32::EPSILON), self.near, self.far)
            }
            ProjectionKind::Orthographic => {
                let half_h = self.size / self.zoom.max(f32::EPSILON);
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(52.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_matrix_is_finite() {
        let mut p = Projection::perspective(52.0);
        p.aspect = 16.0 / 9.0;
        let m = p.matrix();
        assert!(m.is_finite());
    }

    #[test]
    fn orthographic_extents_follow_aspect() {
        let mut p = Projection::orthographic(10.0);
        p.aspect = 2.0;
        let m = p.matrix();
        // x extent is twice the y extent: a point at x=20 lands on the NDC edge.
        let edge = m * glam::Vec4::new(20.0, 0.0, -1.0, 1.0);
        assert!((edge.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn presets_fix_pitch_and_yaw() {
        assert_eq!(ViewPreset::Top.orbit_angles(), (-90.0, 0.0));
        assert_eq!(ViewPreset::Left.orbit_angles(), (0.0, -90.0));
        assert_eq!(ViewPreset::Front.orbit_angles(), (0.0, 0.0));
    }
}
