//! The system manifest: which bodies exist, what orbits what, and which
//! model each body is drawn with. Persisted as `system.ron` next to the
//! config so users can rearrange the sky without recompiling.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SystemError;

/// How a declared body participates in the simulation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BodyRole {
    /// Advanced every tick: spins, and orbits its parent when it has one.
    #[default]
    Orbital,
    /// Far-field scenery placed once and never advanced.
    Backdrop,
}

/// One body declaration in the manifest.
///
/// Angles are radians and velocities are per-tick steps. Sparse entries are
/// fine; anything omitted falls back to the field default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyDef {
    /// Unique body name; also how parents are referenced.
    pub name: String,
    /// Asset path of the model this body is drawn with.
    pub model: String,
    /// Name of the body this one orbits, declared earlier in the list.
    pub parent: Option<String>,
    pub kind: BodyRole,
    pub orbit_radius: f64,
    pub orbit_velocity: f64,
    pub spin_velocity: f64,
    pub scale: f64,
    /// Starting value of the orbit step counter.
    pub phase: f64,
    /// Fixed orientation correction in radians, applied about X, Y, Z.
    pub orientation: [f64; 3],
    /// Spin about all three axes instead of just Y.
    pub full_spin: bool,
    /// Initial offset; the world position for roots and backdrop bodies.
    pub position: [f64; 3],
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: String::new(),
            parent: None,
            kind: BodyRole::Orbital,
            orbit_radius: 0.0,
            orbit_velocity: 0.0,
            spin_velocity: 0.0,
            scale: 1.0,
            phase: 0.0,
            orientation: [0.0; 3],
            full_spin: false,
            position: [0.0; 3],
        }
    }
}

/// The full system layout. `Default` is the stock sun/planets/moon scene, so
/// a first run writes a working sky.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemDef {
    pub bodies: Vec<BodyDef>,
}

impl Default for SystemDef {
    fn default() -> Self {
        let planet = |name: &str, radius: f64, velocity: f64, spin: f64, scale: f64, phase: f64| {
            BodyDef {
                name: name.to_string(),
                model: format!("assets/{name}/scene.gltf"),
                parent: Some("sun".to_string()),
                orbit_radius: radius,
                orbit_velocity: velocity,
                spin_velocity: spin,
                scale,
                phase,
                ..BodyDef::default()
            }
        };

        Self {
            bodies: vec![
                BodyDef {
                    name: "sun".to_string(),
                    model: "assets/sun/scene.gltf".to_string(),
                    spin_velocity: 0.004,
                    scale: 1.0,
                    ..BodyDef::default()
                },
                planet("mercury", 4.0, 0.009, 0.005, 0.08, 0.0),
                planet("venus", 6.0, 0.007, 0.002, 0.12, 40.0),
                BodyDef {
                    // Axial tilt leaning the spin axis off vertical.
                    orientation: [0.0, 0.0, 0.41],
                    model: "assets/earth/Earth.obj".to_string(),
                    ..planet("earth", 9.0, 0.005, 0.02, 0.15, 80.0)
                },
                BodyDef {
                    name: "moon".to_string(),
                    model: "assets/moon/scene.gltf".to_string(),
                    parent: Some("earth".to_string()),
                    orbit_radius: 1.5,
                    orbit_velocity: 0.02,
                    spin_velocity: 0.01,
                    scale: 0.05,
                    ..BodyDef::default()
                },
                planet("mars", 12.0, 0.004, 0.018, 0.1, 120.0),
                planet("jupiter", 16.0, 0.0022, 0.04, 0.45, 200.0),
                planet("saturn", 20.0, 0.0018, 0.035, 0.4, 260.0),
                planet("uranus", 24.0, 0.0014, 0.025, 0.25, 320.0),
                planet("neptune", 28.0, 0.0011, 0.025, 0.25, 400.0),
            ],
        }
    }
}

impl SystemDef {
    /// Checks manifest-level invariants: unique names, and every parent
    /// declared before the child that orbits it.
    pub fn validate(&self) -> Result<(), SystemError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.bodies.len());
        for body in &self.bodies {
            if let Some(parent) = &body.parent {
                if !seen.contains(parent.as_str()) {
                    return Err(SystemError::UndeclaredParent {
                        child: body.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            if !seen.insert(body.name.as_str()) {
                return Err(SystemError::DuplicateBody(body.name.clone()));
            }
        }
        Ok(())
    }

    /// Load the manifest from the given directory, or create the stock
    /// layout file. The result is always validated.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, SystemError> {
        let manifest_path = config_dir.join("system.ron");

        if manifest_path.exists() {
            let contents =
                std::fs::read_to_string(&manifest_path).map_err(SystemError::ReadError)?;
            let system: SystemDef = ron::from_str(&contents).map_err(SystemError::ParseError)?;
            system.validate()?;
            log::info!(
                "Loaded system manifest with {} bodies from {}",
                system.bodies.len(),
                manifest_path.display()
            );
            Ok(system)
        } else {
            let system = SystemDef::default();
            system.save(config_dir)?;
            log::info!("Created default system manifest at {}", manifest_path.display());
            Ok(system)
        }
    }

    /// Save the manifest to the given directory as `system.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), SystemError> {
        std::fs::create_dir_all(config_dir).map_err(SystemError::WriteError)?;

        let manifest_path = config_dir.join("system.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(SystemError::SerializeError)?;

        std::fs::write(&manifest_path, serialized).map_err(SystemError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, parent: Option<&str>) -> BodyDef {
        BodyDef {
            name: name.to_string(),
            model: format!("assets/{name}.obj"),
            parent: parent.map(str::to_string),
            ..BodyDef::default()
        }
    }

    #[test]
    fn test_default_layout_validates() {
        let system = SystemDef::default();
        system.validate().unwrap();
        assert!(system.bodies.len() >= 10, "stock layout should be a full sky");
    }

    #[test]
    fn test_default_layout_orders_parents_first() {
        let system = SystemDef::default();
        let position = |name: &str| system.bodies.iter().position(|b| b.name == name).unwrap();
        assert_eq!(position("sun"), 0);
        assert!(position("earth") < position("moon"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let system = SystemDef {
            bodies: vec![named("sun", None), named("sun", None)],
        };
        let err = system.validate().unwrap_err();
        assert!(matches!(err, SystemError::DuplicateBody(name) if name == "sun"));
    }

    #[test]
    fn test_forward_parent_reference_rejected() {
        let system = SystemDef {
            bodies: vec![named("moon", Some("earth")), named("earth", None)],
        };
        let err = system.validate().unwrap_err();
        assert!(matches!(
            err,
            SystemError::UndeclaredParent { child, parent }
                if child == "moon" && parent == "earth"
        ));
    }

    #[test]
    fn test_self_parent_rejected() {
        let system = SystemDef {
            bodies: vec![named("ouroboros", Some("ouroboros"))],
        };
        assert!(matches!(
            system.validate(),
            Err(SystemError::UndeclaredParent { .. })
        ));
    }

    #[test]
    fn test_sparse_body_entry_fills_defaults() {
        let ron_str = r#"(bodies: [(name: "lone", model: "assets/lone.obj")])"#;
        let system: SystemDef = ron::from_str(ron_str).unwrap();
        assert_eq!(system.bodies.len(), 1);
        let body = &system.bodies[0];
        assert_eq!(body.scale, 1.0);
        assert_eq!(body.kind, BodyRole::Orbital);
        assert!(!body.full_spin);
    }

    #[test]
    fn test_backdrop_role_parses() {
        let ron_str =
            r#"(bodies: [(name: "polaris", model: "assets/star.gltf", kind: Backdrop, position: (0.0, 80.0, -90.0))])"#;
        let system: SystemDef = ron::from_str(ron_str).unwrap();
        assert_eq!(system.bodies[0].kind, BodyRole::Backdrop);
        assert_eq!(system.bodies[0].position, [0.0, 80.0, -90.0]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let system = SystemDef::default();
        system.save(dir.path()).unwrap();
        let loaded = SystemDef::load_or_create(dir.path()).unwrap();
        assert_eq!(system, loaded);
    }

    #[test]
    fn test_load_or_create_writes_stock_layout() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!dir.path().join("system.ron").exists());
        let system = SystemDef::load_or_create(dir.path()).unwrap();
        assert_eq!(system, SystemDef::default());
        assert!(dir.path().join("system.ron").exists());
    }

    #[test]
    fn test_load_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let broken = SystemDef {
            bodies: vec![named("moon", Some("earth"))],
        };
        // save() does not validate, so the bad file lands on disk.
        broken.save(dir.path()).unwrap();
        let result = SystemDef::load_or_create(dir.path());
        assert!(matches!(
            result,
            Err(SystemError::UndeclaredParent { .. })
        ));
    }
}
