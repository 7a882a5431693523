//! Treelet-reorder state layer
//!
//! The bubble buffer (per-node status bitmap), the per-dispatch run
//! parameters, and the arena that owns every buffer for one dispatch.
//! The reorder algorithm itself (treelet formation, SAH evaluation) is
//! an external consumer of this state.

pub mod bubble;
pub mod params;
pub mod arena;

pub use arena::{ReorderArena, ReorderViewMut};
pub use bubble::BubbleBuffer;
pub use params::ReorderParams;
