//! Screen-space viewports and the quad split layout.

mod layout;
#[allow(clippy::module_inception)]
mod viewport;

pub use layout::{QuadSplit, QuadViewLayout};
pub use viewport::{BuiltinCamera, Viewport};
