//! Far-field dressing for the orrery: deterministic starfield scatter and
//! the blackbody tinting that colors it.

pub mod starfield;

pub use starfield::{BackdropStar, StarfieldGenerator, blackbody_to_rgb};
