//! Configuration system for the orrery simulator.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization. The system manifest (`system.ron`) declares the
//! bodies themselves and is validated so parents always precede children.

mod cli;
mod config;
mod error;
mod system;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, EnvironmentConfig, SimulationConfig, StarfieldConfig};
pub use error::{ConfigError, SystemError};
pub use system::{BodyDef, BodyRole, SystemDef};
