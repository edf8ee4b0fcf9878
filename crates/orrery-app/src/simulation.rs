//! Simulation assembly: turns the config and system manifest into a live
//! scene graph with model bindings and a clock, then drives it tick by
//! tick.

use glam::DVec3;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info, trace};

use orrery_config::{BodyRole, Config, SystemDef, SystemError};
use orrery_render::{DrawList, ModelBindings, ModelLibrary};
use orrery_scene::{Body, BodyId, BodyKind, BodySpec, SceneError, SceneGraph};
use orrery_space::StarfieldGenerator;

use crate::clock::SimClock;

/// Errors from assembling a simulation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The system manifest failed validation.
    #[error("invalid system manifest: {0}")]
    Manifest(#[from] SystemError),

    /// A body names a parent the builder has not inserted yet.
    #[error("body '{child}' references unknown parent '{parent}'")]
    UnknownParent { child: String, parent: String },

    /// The scene graph rejected a body.
    #[error("scene rejected body '{name}': {source}")]
    Scene {
        name: String,
        #[source]
        source: SceneError,
    },
}

/// A fully assembled orrery: scene graph, model bindings, starfield, and
/// the clock that owns pause state.
#[derive(Debug)]
pub struct Simulation {
    scene: SceneGraph,
    models: ModelLibrary,
    bindings: ModelBindings,
    clock: SimClock,
    draw_list: DrawList,
    clear_color: [f32; 4],
    trace_bodies: bool,
}

impl Simulation {
    /// Builds the simulation from a config and a validated system layout:
    /// registers models, inserts bodies parent-first, scatters the backdrop
    /// starfield, and honors `start_paused`.
    pub fn build(config: &Config, system: &SystemDef) -> Result<Self, BuildError> {
        system.validate()?;

        let star_count = config.starfield.star_count;
        let mut scene = SceneGraph::with_capacity(system.bodies.len() + star_count as usize);
        let mut models = ModelLibrary::new();
        let mut bindings = ModelBindings::default();
        let mut names: FxHashMap<&str, BodyId> = FxHashMap::default();

        for def in &system.bodies {
            let parent = match &def.parent {
                Some(parent) => {
                    Some(*names.get(parent.as_str()).ok_or_else(|| {
                        BuildError::UnknownParent {
                            child: def.name.clone(),
                            parent: parent.clone(),
                        }
                    })?)
                }
                None => None,
            };
            let kind = match def.kind {
                BodyRole::Orbital => BodyKind::Orbital,
                BodyRole::Backdrop => BodyKind::Backdrop,
            };
            let spec = BodySpec {
                name: def.name.clone(),
                kind,
                parent,
                orbit_radius: def.orbit_radius,
                orbit_velocity: def.orbit_velocity,
                spin_velocity: def.spin_velocity,
                scale: def.scale,
                orientation: DVec3::from_array(def.orientation),
                full_spin: def.full_spin,
                phase: def.phase,
                position: DVec3::from_array(def.position),
            };
            let id = scene.insert(spec).map_err(|source| BuildError::Scene {
                name: def.name.clone(),
                source,
            })?;
            names.insert(def.name.as_str(), id);

            if def.model.is_empty() {
                debug!("body '{}' has no model and will not be drawn", def.name);
            } else {
                bindings.insert(id, models.register(&def.model));
            }
        }

        if star_count > 0 {
            let star_model = (!config.starfield.star_model.is_empty())
                .then(|| models.register(&config.starfield.star_model));
            let stars = StarfieldGenerator::new(config.starfield.seed, star_count)
                .with_distances(config.starfield.min_distance, config.starfield.max_distance)
                .with_scales(config.starfield.min_scale, config.starfield.max_scale)
                .generate();
            for (index, star) in stars.iter().enumerate() {
                let id = scene
                    .insert(BodySpec::backdrop(
                        format!("star-{index}"),
                        star.position,
                        star.scale,
                    ))
                    .map_err(|source| BuildError::Scene {
                        name: format!("star-{index}"),
                        source,
                    })?;
                if let Some(model) = star_model {
                    bindings.insert(id, model);
                }
            }
        }

        info!(
            "simulation assembled: {} bodies, {} stars, {} models",
            system.bodies.len(),
            star_count,
            models.len()
        );

        Ok(Self {
            draw_list: DrawList::with_capacity(bindings.len()),
            scene,
            models,
            bindings,
            clock: SimClock::new(config.simulation.start_paused),
            clear_color: config.environment.clear_color,
            trace_bodies: config.debug.trace_bodies,
        })
    }

    /// One fixed tick. Running, this integrates orbits and spin; paused, it
    /// only recomposes transforms, so edits made while paused still land on
    /// screen.
    pub fn step(&mut self) {
        if self.clock.paused {
            self.scene.refresh();
        } else {
            self.scene.advance();
            self.clock.record_tick();
        }

        if self.trace_bodies {
            for (_, body) in self.scene.iter() {
                if body.kind() == BodyKind::Orbital {
                    trace!(
                        "tick {}: {} at {:?}",
                        self.clock.ticks(),
                        body.name(),
                        body.world_position()
                    );
                }
            }
        }
    }

    /// Extracts, sorts, and returns this frame's draw list. The list is
    /// reused across frames, so the borrow ends before the next call.
    pub fn draw_list(&mut self) -> &DrawList {
        self.draw_list.clear();
        self.draw_list.extract(&self.scene, &self.bindings);
        self.draw_list.sort();
        &self.draw_list
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene access for position and orientation edits.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn models(&self) -> &ModelLibrary {
        &self.models
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// RGBA color a rasterizer would clear the frame with.
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.scene.find(name)
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.scene.find(name).and_then(|id| self.scene.get(id))
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle();
    }
}
