//! The render system: view registry, active scene/camera coordination,
//! the frame pulse and event routing entry points.

mod pulse;
mod renderer;

pub use pulse::{Pulse, PulseTime};
pub use renderer::{RenderSystem, SystemEvent, ViewId};
