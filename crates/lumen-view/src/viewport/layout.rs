use crate::camera::{ProjectionKind, ViewPreset};
use crate::view::RenderView;

/// Which panes of a four-pane split are visible.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QuadViewLayout {
    /// Only the main (perspective) pane.
    Single,
    /// Main pane and the top-view pane, side by side.
    HorizontalSplit,
    /// Main pane and the top-view pane, stacked.
    VerticalSplit,
    /// All four panes.
    Quad,
}

/// Manages the classic four-pane editor split on a [`RenderView`].
///
/// Pane 0 keeps the scene camera; panes 1-3 carry built-in orthographic
/// cameras (top, left, front) that pan instead of orbiting. Split positions
/// are normalized canvas fractions.
#[derive(Debug)]
pub struct QuadSplit {
    layout: QuadViewLayout,
    horizontal_split: f32,
    vertical_split: f32,
    /// Index of the first of the four consecutive viewports this split owns.
    base: usize,
}

impl QuadSplit {
    /// Adds four viewports to the view and applies the initial layout.
    pub fn install(view: &mut RenderView, layout: QuadViewLayout) -> Self {
        let base = view.add_viewport();
        for preset in [ViewPreset::Top, ViewPreset::Left, ViewPreset::Front] {
            let ix = view.add_viewport();
            let vp = view.viewport_mut(ix);
            vp.set_builtin_camera(ProjectionKind::Orthographic, preset);
            vp.enable_manip(true).orientation_enabled = false;
        }
        let mut split = Self {
            layout,
            horizontal_split: 0.5,
            vertical_split: 0.5,
            base,
        };
        split.apply(view);
        split
    }

    pub fn layout(&self) -> QuadViewLayout {
        self.layout
    }

    pub fn set_layout(&mut self, view: &mut RenderView, layout: QuadViewLayout) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.apply(view);
    }

    /// Moves the vertical divider (x fraction of the left panes).
    pub fn set_horizontal_split(&mut self, view: &mut RenderView, split: f32) {
        self.horizontal_split = split.clamp(0.0, 1.0);
        self.apply(view);
    }

    /// Moves the horizontal divider (y fraction of the top panes).
    pub fn set_vertical_split(&mut self, view: &mut RenderView, split: f32) {
        self.vertical_split = split.clamp(0.0, 1.0);
        self.apply(view);
    }

    /// Writes the pane rects and enabled flags for the current layout.
    pub fn apply(&mut self, view: &mut RenderView) {
        let h = self.horizontal_split;
        let v = self.vertical_split;
        // (x, y, w, h, enabled) per pane.
        let panes: [(f32, f32, f32, f32, bool); 4] = match self.layout {
            QuadViewLayout::Single => [
                (0.0, 0.0, 1.0, 1.0, true),
                (0.0, 0.0, 0.0, 0.0, false),
                (0.0, 0.0, 0.0, 0.0, false),
                (0.0, 0.0, 0.0, 0.0, false),
            ],
            QuadViewLayout::HorizontalSplit => [
                (0.0, 0.0, h, 1.0, true),
                (h, 0.0, 1.0 - h, 1.0, true),
                (0.0, 0.0, 0.0, 0.0, false),
                (0.0, 0.0, 0.0, 0.0, false),
            ],
            QuadViewLayout::VerticalSplit => [
                (0.0, 0.0, 1.0, v, true),
                (0.0, v, 1.0, 1.0 - v, true),
                (0.0, 0.0, 0.0, 0.0, false),
                (0.0, 0.0, 0.0, 0.0, false),
            ],
            QuadViewLayout::Quad => [
                (0.0, 0.0, h, v, true),
                (h, 0.0, 1.0 - h, v, true),
                (0.0, v, h, 1.0 - v, true),
                (h, v, 1.0 - h, 1.0 - v, true),
            ],
        };
        for (i, (x, y, w, hh, enabled)) in panes.into_iter().enumerate() {
            let vp = view.viewport_mut(self.base + i);
            vp.set_size(x, y, w, hh);
            vp.enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_backend;

    fn quad_view(layout: QuadViewLayout) -> (RenderView, QuadSplit) {
        let (backend, _state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        let split = QuadSplit::install(&mut view, layout);
        (view, split)
    }

    fn rects(view: &RenderView) -> Vec<(f32, f32, f32, f32, bool)> {
        view.viewports()
            .iter()
            .map(|vp| {
                let r = vp.rect();
                (r.origin.x, r.origin.y, r.size.x, r.size.y, vp.enabled)
            })
            .collect()
    }

    #[test]
    fn quad_layout_partitions_the_canvas() {
        let (mut view, mut split) = quad_view(QuadViewLayout::Quad);
        split.set_horizontal_split(&mut view, 0.3);
        split.set_vertical_split(&mut view, 0.7);
        assert_eq!(
            rects(&view),
            vec![
                (0.0, 0.0, 0.3, 0.7, true),
                (0.3, 0.0, 0.7, 0.7, true),
                (0.0, 0.7, 0.3, 0.3, true),
                (0.3, 0.7, 0.7, 0.3, true),
            ]
        );
    }

    #[test]
    fn single_layout_disables_ortho_panes() {
        let (view, _split) = quad_view(QuadViewLayout::Single);
        let r = rects(&view);
        assert_eq!(r[0], (0.0, 0.0, 1.0, 1.0, true));
        assert!(!r[1].4 && !r[2].4 && !r[3].4);
    }

    #[test]
    fn horizontal_split_shares_the_width() {
        let (mut view, mut split) = quad_view(QuadViewLayout::HorizontalSplit);
        split.set_horizontal_split(&mut view, 0.25);
        let r = rects(&view);
        assert_eq!(r[0], (0.0, 0.0, 0.25, 1.0, true));
        assert_eq!(r[1], (0.25, 0.0, 0.75, 1.0, true));
        assert!(!r[2].4 && !r[3].4);
    }

    #[test]
    fn vertical_split_stacks_the_top_pane() {
        let (mut view, mut split) = quad_view(QuadViewLayout::VerticalSplit);
        split.set_vertical_split(&mut view, 0.25);
        let r = rects(&view);
        assert_eq!(r[0], (0.0, 0.0, 1.0, 0.25, true));
        // The second pane is the same one a horizontal split would show.
        assert_eq!(r[1], (0.0, 0.25, 1.0, 0.75, true));
        assert!(!r[2].4 && !r[3].4);
        assert_eq!(view.viewports()[1].builtin_camera().unwrap().preset, ViewPreset::Top);
    }

    #[test]
    fn ortho_panes_carry_builtin_cameras() {
        let (view, _split) = quad_view(QuadViewLayout::Quad);
        assert!(view.viewports()[0].builtin_camera().is_none());
        for vp in &view.viewports()[1..] {
            let builtin = vp.builtin_camera().unwrap();
            assert!(builtin.manip_enabled);
            assert!(!builtin.manip.orientation_enabled);
        }
    }

    #[test]
    fn set_layout_is_a_no_op_for_the_same_layout() {
        let (mut view, mut split) = quad_view(QuadViewLayout::Quad);
        split.set_horizontal_split(&mut view, 0.3);
        // Re-applying the same layout must not reset the stored splits.
        split.set_layout(&mut view, QuadViewLayout::Quad);
        assert_eq!(rects(&view)[0].2, 0.3);
    }
}
