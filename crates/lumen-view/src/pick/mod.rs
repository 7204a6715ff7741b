//! GPU index-pass picking.
//!
//! Objects that want to be pickable are registered with a [`PickRegistry`],
//! which hands out stable non-zero indices. A pick renders the scene into an
//! index target where each object writes its index as a color, reads back the
//! pixel under the cursor, and resolves the index to an object and, through
//! the parent chain, to the component that owns it.

mod picker;
mod registry;
mod target;

pub use picker::{GpuPicker, PickHit, color_to_index, index_to_color};
pub use registry::PickRegistry;
pub use target::{DEPTH_FORMAT, INDEX_FORMAT, PickTarget};
