//! Render views: one canvas/backend pair plus its viewports, sticky event
//! targets and snapshot rendering.

mod render_view;
pub(crate) mod router;

pub use render_view::{RenderView, SnapshotFormat};
