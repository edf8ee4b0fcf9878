//! Orbit hierarchy and scene graph for the orrery simulator.
//!
//! Bodies live in an insertion-ordered arena. Each tick every orbital body
//! accumulates spin, steps along its ring, inherits its position through the
//! parent chain (a moon orbits a planet orbiting the sun), and composes the
//! model matrix the render side consumes. Backdrop bodies are placed once
//! and never tick.
//!
//! Parents must be inserted before their children. That single rule makes
//! cycles unrepresentable and fixes the update order: one front-to-back
//! pass always sees parents placed before the children that read them.

mod body;
mod graph;
mod transform;

pub use body::{Body, BodyId, BodyKind, BodySpec};
pub use graph::{Ancestors, SceneError, SceneGraph};
pub use transform::{backdrop_transform, orbital_transform};
