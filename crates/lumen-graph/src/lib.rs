//! Lumen graph crate.
//!
//! A minimal node/component arena used by the view layer. This is the narrow
//! seam to the component-graph runtime: node hierarchy with deterministic
//! traversal, component attachment, a structural revision counter, and small
//! property/event-socket primitives. It is generic over the component payload
//! so higher layers define their own component trait.

mod graph;
mod id;
mod socket;

pub use graph::Graph;
pub use id::{ComponentId, NodeId};
pub use socket::{EventFlag, Property};
