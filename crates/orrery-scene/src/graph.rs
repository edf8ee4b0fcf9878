//! The scene graph: an insertion-ordered arena of bodies, the per-tick
//! update pass, and the parent-chain walk that places every body in world
//! space.

use thiserror::Error;

use crate::body::{Body, BodyId, BodyKind, BodySpec};
use crate::transform::{backdrop_transform, orbital_transform};

/// Errors from scene-graph mutation.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The parent handle does not name a body already in this graph.
    #[error("parent {0:?} is not in this scene graph; insert parents before children")]
    UnknownParent(BodyId),

    /// Another body already uses this name.
    #[error("body name '{0}' is already taken")]
    DuplicateName(String),
}

/// Arena of bodies forming the orbit hierarchy.
///
/// Parents must be inserted before their children, so a body's ancestors
/// always sit at lower arena indices. That ordering makes cycles
/// unrepresentable and lets a single front-to-back pass update parents
/// before the children that read them.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    bodies: Vec<Body>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Inserts a body and immediately places it, so its world position and
    /// transform are valid before the first tick.
    ///
    /// Fails if `spec` names a parent that is not already present, or
    /// reuses a name already in the graph (names are lookup identity).
    pub fn insert(&mut self, spec: BodySpec) -> Result<BodyId, SceneError> {
        if let Some(parent) = spec.parent {
            if parent.index() >= self.bodies.len() {
                return Err(SceneError::UnknownParent(parent));
            }
            if spec.kind == BodyKind::Backdrop {
                log::debug!("backdrop body '{}' ignores its parent", spec.name);
            }
        }
        if self.bodies.iter().any(|body| body.name == spec.name) {
            return Err(SceneError::DuplicateName(spec.name));
        }
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::from_spec(spec));
        self.update_body(id.index(), false);
        Ok(id)
    }

    /// Advances the simulation by one tick: every orbital body accumulates
    /// spin, orbiting bodies step along their rings, and all world positions
    /// and transforms are recomposed front to back.
    pub fn advance(&mut self) {
        for index in 0..self.bodies.len() {
            self.update_body(index, true);
        }
    }

    /// Recomposes world positions and transforms without advancing any
    /// counters. Used while paused so position edits still land on screen.
    pub fn refresh(&mut self) {
        for index in 0..self.bodies.len() {
            self.update_body(index, false);
        }
    }

    /// Places body `index`: optionally integrates its counters, then walks
    /// the parent chain to accumulate the world position and composes the
    /// model matrix.
    fn update_body(&mut self, index: usize, integrate: bool) {
        // Ancestors all live below `index`, so the split keeps them readable
        // while the body itself is mutated.
        let (done, rest) = self.bodies.split_at_mut(index);
        let body = &mut rest[0];

        if integrate && body.kind == BodyKind::Orbital {
            body.spin += body.spin_velocity;
            if body.parent.is_some() {
                let angle = body.angle();
                body.local_offset.x = body.orbit_radius * angle.cos();
                body.local_offset.z = body.orbit_radius * angle.sin();
                body.steps += body.orbit_velocity;
            }
        }

        match body.kind {
            BodyKind::Orbital => {
                let mut world = body.local_offset;
                let mut next = body.parent;
                while let Some(parent) = next {
                    let ancestor = &done[parent.index()];
                    world += ancestor.local_offset;
                    next = ancestor.parent;
                }
                body.world_position = world;
                body.transform = orbital_transform(
                    world,
                    body.scale,
                    body.spin,
                    body.full_spin,
                    body.orientation,
                );
            }
            BodyKind::Backdrop => {
                body.world_position = body.local_offset;
                body.transform = backdrop_transform(body.local_offset, body.scale);
            }
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Mutable access for position and orientation edits. Changes take
    /// effect on the next [`advance`](Self::advance) or
    /// [`refresh`](Self::refresh).
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    /// Looks a body up by name. Linear scan; fine at solar-system scale.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|body| body.name == name)
            .map(|index| BodyId(index as u32))
    }

    /// Bodies in insertion order, which is also update order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index as u32), body))
    }

    /// Walks from `id`'s parent up to the root it hangs off.
    pub fn ancestors(&self, id: BodyId) -> Ancestors<'_> {
        Ancestors {
            bodies: &self.bodies,
            next: self.get(id).and_then(|body| body.parent),
        }
    }
}

/// Iterator over a body's ancestors, nearest first.
pub struct Ancestors<'a> {
    bodies: &'a [Body],
    next: Option<BodyId>,
}

impl Iterator for Ancestors<'_> {
    type Item = BodyId;

    fn next(&mut self) -> Option<BodyId> {
        let id = self.next?;
        self.next = self.bodies[id.index()].parent;
        Some(id)
    }
}

/// Direct indexing for handles the caller knows are live.
impl std::ops::Index<BodyId> for SceneGraph {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }
}
