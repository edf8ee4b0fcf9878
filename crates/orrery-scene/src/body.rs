//! Body definitions: static orbit parameters plus the per-tick state the
//! update pass mutates.

use glam::{DVec3, Mat4};

/// Handle to a body stored in a [`SceneGraph`](crate::SceneGraph).
///
/// Handles are arena indices and are only meaningful for the graph that
/// issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    /// Arena slot behind this handle.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a body participates in the per-tick update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyKind {
    /// Advanced every tick: accumulates spin, and orbits its parent when it
    /// has one.
    #[default]
    Orbital,
    /// Far-field scenery placed once. Its transform is translation and scale
    /// only, and any configured parent is ignored.
    Backdrop,
}

/// Everything needed to insert a body into the scene graph.
///
/// Angles are radians; the two velocities are per-tick increments. `phase`
/// seeds the orbit step counter so bodies on the same radius can start at
/// different points along the ring.
#[derive(Clone, Debug)]
pub struct BodySpec {
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    pub orbit_radius: f64,
    pub orbit_velocity: f64,
    pub spin_velocity: f64,
    pub scale: f64,
    /// Fixed orientation correction applied after spin, about X, Y, Z in
    /// that order.
    pub orientation: DVec3,
    /// Spin about all three axes instead of just Y.
    pub full_spin: bool,
    /// Initial value of the orbit step counter.
    pub phase: f64,
    /// Initial local offset. For roots and backdrop bodies this is the world
    /// position.
    pub position: DVec3,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: BodyKind::Orbital,
            parent: None,
            orbit_radius: 0.0,
            orbit_velocity: 0.0,
            spin_velocity: 0.0,
            scale: 1.0,
            orientation: DVec3::ZERO,
            full_spin: false,
            phase: 0.0,
            position: DVec3::ZERO,
        }
    }
}

impl BodySpec {
    /// Spec for a free-floating root body at `position`.
    pub fn root(name: impl Into<String>, position: DVec3) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    /// Spec for a body orbiting `parent` at `radius`, advancing by
    /// `velocity` radians-per-step each tick.
    pub fn orbiting(name: impl Into<String>, parent: BodyId, radius: f64, velocity: f64) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            orbit_radius: radius,
            orbit_velocity: velocity,
            ..Self::default()
        }
    }

    /// Spec for a backdrop body at `position`.
    pub fn backdrop(name: impl Into<String>, position: DVec3, scale: f64) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::Backdrop,
            position,
            scale,
            ..Self::default()
        }
    }

    pub fn with_spin(mut self, velocity: f64) -> Self {
        self.spin_velocity = velocity;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_orientation(mut self, orientation: DVec3) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_full_spin(mut self, full_spin: bool) -> Self {
        self.full_spin = full_spin;
        self
    }
}

/// A body in the arena: immutable orbit parameters plus the state the
/// per-tick update advances.
#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) name: String,
    pub(crate) kind: BodyKind,
    pub(crate) parent: Option<BodyId>,
    pub(crate) orbit_radius: f64,
    pub(crate) orbit_velocity: f64,
    pub(crate) spin_velocity: f64,
    pub(crate) scale: f64,
    pub(crate) orientation: DVec3,
    pub(crate) full_spin: bool,
    /// Accumulated orbit steps. The orbit angle is derived from this, so
    /// rewinding the counter rewinds the body along its ring.
    pub(crate) steps: f64,
    /// Accumulated spin angle in radians.
    pub(crate) spin: f64,
    /// Offset from the parent. Absolute position for roots and backdrops.
    pub(crate) local_offset: DVec3,
    /// Position after walking the parent chain, current as of the last
    /// update pass.
    pub(crate) world_position: DVec3,
    /// Composed model matrix, current as of the last update pass.
    pub(crate) transform: Mat4,
}

impl Body {
    pub(crate) fn from_spec(spec: BodySpec) -> Self {
        Self {
            name: spec.name,
            kind: spec.kind,
            parent: spec.parent,
            orbit_radius: spec.orbit_radius,
            orbit_velocity: spec.orbit_velocity,
            spin_velocity: spec.spin_velocity,
            scale: spec.scale,
            orientation: spec.orientation,
            full_spin: spec.full_spin,
            steps: spec.phase,
            spin: 0.0,
            local_offset: spec.position,
            world_position: spec.position,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn orbit_velocity(&self) -> f64 {
        self.orbit_velocity
    }

    pub fn spin_velocity(&self) -> f64 {
        self.spin_velocity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn full_spin(&self) -> bool {
        self.full_spin
    }

    /// Raw orbit step counter.
    pub fn steps(&self) -> f64 {
        self.steps
    }

    /// Accumulated spin angle in radians.
    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// Current orbit angle in radians, derived the same way the update pass
    /// derives it: steps scaled by the orbit velocity, or the raw counter
    /// when the velocity is zero so a phase offset still pins an absolute
    /// angle on a static body.
    pub fn angle(&self) -> f64 {
        if self.orbit_velocity != 0.0 {
            self.steps * self.orbit_velocity
        } else {
            self.steps
        }
    }

    /// Offset from the parent (absolute position for roots and backdrops).
    pub fn local_offset(&self) -> DVec3 {
        self.local_offset
    }

    /// World-space position as of the last update pass.
    pub fn world_position(&self) -> DVec3 {
        self.world_position
    }

    /// Model matrix as of the last update pass.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Shifts the body by `delta` in its parent's space.
    ///
    /// The Y component survives orbiting: the update pass only rewrites X
    /// and Z, so lifting a body off the orbital plane persists.
    pub fn nudge(&mut self, delta: DVec3) {
        self.local_offset += delta;
    }

    /// Replaces the local offset outright. For an orbiting body the X and Z
    /// components are rewritten on the next advance.
    pub fn set_position(&mut self, position: DVec3) {
        self.local_offset = position;
    }

    /// Rewinds or fast-forwards the orbit step counter.
    pub fn set_phase(&mut self, steps: f64) {
        self.steps = steps;
    }

    pub fn set_orientation(&mut self, orientation: DVec3) {
        self.orientation = orientation;
    }

    pub fn set_full_spin(&mut self, full_spin: bool) {
        self.full_spin = full_spin;
    }
}
