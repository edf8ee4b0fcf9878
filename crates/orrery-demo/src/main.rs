//! Headless demo binary that assembles the stock solar system and walks it
//! through its paces: hierarchy construction, fast-forwarded orbits, pause
//! semantics, and draw-list extraction.
//!
//! Configuration is loaded from `config.ron` and the body layout from
//! `system.ron`; both are created on first run and can be overridden via
//! CLI flags. Run with `cargo run -p orrery-demo -- --ticks 1200` to
//! fast-forward further, or `--seconds 5` to drive the wall-clock frame
//! loop.

use std::time::{Duration, Instant};

use clap::Parser;
use glam::DVec3;
use orrery_app::{FrameLoop, Simulation};
use orrery_config::{CliArgs, Config, SystemDef};
use orrery_scene::BodyKind;
use tracing::{info, trace, warn};

/// Logs the assembled hierarchy: who orbits whom, and the full ancestor
/// chain of the deepest body.
fn demonstrate_hierarchy(sim: &Simulation) {
    info!("Starting hierarchy walk demonstration");

    let scene = sim.scene();
    let orbital = scene
        .iter()
        .filter(|(_, body)| body.kind() == BodyKind::Orbital)
        .count();
    let backdrop = scene.len() - orbital;
    info!("Scene holds {orbital} orbital bodies and {backdrop} backdrop stars");

    for (_, body) in scene.iter() {
        if body.kind() != BodyKind::Orbital {
            continue;
        }
        match body.parent().and_then(|parent| scene.get(parent)) {
            Some(parent) => info!(
                "  {} orbits {} at radius {} ({} rad/tick)",
                body.name(),
                parent.name(),
                body.orbit_radius(),
                body.orbit_velocity()
            ),
            None => info!("  {} anchors the system", body.name()),
        }
    }

    if let Some(moon) = sim.find("moon") {
        let chain: Vec<&str> = scene.ancestors(moon).map(|id| scene[id].name()).collect();
        info!("moon's ancestor chain: {}", chain.join(" -> "));
    }

    info!("Hierarchy walk demonstration completed successfully");
}

/// Runs `ticks` fixed steps, tracing a few body positions at regular
/// intervals.
fn demonstrate_fast_forward(sim: &mut Simulation, ticks: u64) {
    info!("Starting fast-forward demonstration ({ticks} ticks)");

    let interval = (ticks / 5).max(1);
    for tick in 1..=ticks {
        sim.step();
        if tick % interval == 0 {
            if let Some(earth) = sim.body("earth") {
                let p = earth.world_position();
                info!(
                    "tick {tick}: earth at ({:.2}, {:.2}, {:.2}), orbit angle {:.3} rad",
                    p.x,
                    p.y,
                    p.z,
                    earth.angle()
                );
            }
            if let Some(moon) = sim.body("moon") {
                let p = moon.world_position();
                info!("tick {tick}: moon at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
            }
        }
    }

    info!("Simulation clock now at {} ticks", sim.clock().ticks());
    info!("Fast-forward demonstration completed successfully");
}

/// Pauses integration, proves orbits freeze while edits still land, then
/// resumes.
fn demonstrate_pause_and_edit(sim: &mut Simulation) {
    info!("Starting pause/edit demonstration");

    sim.set_paused(true);
    let frozen = sim.body("earth").map(|body| body.world_position());
    for _ in 0..30 {
        sim.step();
    }
    let still = sim.body("earth").map(|body| body.world_position());
    if frozen == still {
        info!("30 paused steps left earth exactly at {:?}", still);
    } else {
        warn!("paused integration drifted: {:?} vs {:?}", frozen, still);
    }

    // Lift earth off the orbital plane while paused; the moon should follow
    // on the next refresh without any tick elapsing.
    if let Some(earth) = sim.find("earth")
        && let Some(body) = sim.scene_mut().get_mut(earth)
    {
        body.nudge(DVec3::new(0.0, 2.0, 0.0));
    }
    sim.step();
    if let Some(moon) = sim.body("moon") {
        info!(
            "moon followed the paused edit up to y = {:.2}",
            moon.world_position().y
        );
    }

    sim.set_paused(false);
    sim.step();
    if let Some(earth) = sim.body("earth") {
        info!(
            "earth keeps its lift after resume: y = {:.2} at tick {}",
            earth.world_position().y,
            sim.clock().ticks()
        );
    }

    info!("Pause/edit demonstration completed successfully");
}

/// Extracts one frame's draw list and reports how instances group by model.
fn demonstrate_draw_extraction(sim: &mut Simulation) {
    info!("Starting draw-list extraction demonstration");

    let clear_color = sim.clear_color();
    let (instances, group_count, largest) = {
        let list = sim.draw_list();
        let largest = list
            .groups()
            .max_by_key(|group| group.instance_count())
            .map(|group| (group.model, group.instance_count()));
        (list.len(), list.groups().count(), largest)
    };

    info!("Extracted {instances} instances in {group_count} model groups");
    if let Some((model, count)) = largest {
        let path = sim.models().path(model).unwrap_or("<unknown>");
        info!("Largest group shares '{path}' across {count} instances");
    }
    info!("Frame clears to {clear_color:?} before submission");
    info!("Draw-list extraction demonstration completed successfully");
}

/// Drives the simulation with the wall-clock frame loop for `seconds`.
fn run_frame_loop(sim: &mut Simulation, tick_rate: u32, seconds: f64) {
    info!("Driving the wall-clock frame loop for {seconds:.1}s at {tick_rate} Hz");

    let mut frame_loop = FrameLoop::new(tick_rate);
    let started = Instant::now();
    while started.elapsed().as_secs_f64() < seconds {
        frame_loop.tick(|_dt, _sim_time| sim.step(), |_alpha| {
            // A rasterizer would consume the draw list here.
        });
        let instances = sim.draw_list().len();
        trace!(
            "frame {}: {instances} instances ready",
            frame_loop.frame_count()
        );
        std::thread::sleep(Duration::from_millis(2));
    }

    info!(
        "Frame loop ran {} frames and {} fixed updates ({:.2}s simulated)",
        frame_loop.frame_count(),
        frame_loop.update_count(),
        frame_loop.total_sim_time()
    );
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("orrery")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // Initialize logging with config and debug settings
    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    // The body layout comes from its own manifest next to the config
    let system = match SystemDef::load_or_create(&config_dir) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("Failed to load system manifest: {e}");
            std::process::exit(1);
        }
    };

    let mut sim = match Simulation::build(&config, &system) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Failed to assemble simulation: {e}");
            std::process::exit(1);
        }
    };

    // Walk the assembled hierarchy
    demonstrate_hierarchy(&sim);

    // Fast-forward the orbits with position traces
    demonstrate_fast_forward(&mut sim, args.ticks.unwrap_or(600));

    // Freeze integration and edit the scene while paused
    demonstrate_pause_and_edit(&mut sim);

    // Extract one frame's draw list
    demonstrate_draw_extraction(&mut sim);

    // Optionally drive everything from the wall clock
    if let Some(seconds) = args.seconds {
        run_frame_loop(&mut sim, config.simulation.tick_rate, seconds);
    }

    info!("orrery demo completed");
}
