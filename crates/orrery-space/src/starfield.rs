//! Procedural starfield scatter: deterministic placement of backdrop stars
//! in a spherical shell around the scene.

use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A single scattered star, ready to become a backdrop body.
#[derive(Clone, Debug)]
pub struct BackdropStar {
    /// World-space position inside the shell.
    pub position: DVec3,
    /// Uniform model scale, weighted by brightness.
    pub scale: f64,
    /// Brightness in [0.0, 1.0] where 1.0 is the brightest visible star.
    pub brightness: f32,
    /// Color temperature mapped to RGB, blue-white (hot) to red (cool).
    pub color: [f32; 3],
}

/// Scatters a deterministic set of stars from a seed.
///
/// Directions are uniform over the sphere (no pole clustering) with the
/// distance drawn from the configured shell, so the scatter reads as a sky
/// rather than a disc.
#[derive(Clone, Debug)]
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    min_distance: f64,
    max_distance: f64,
    min_scale: f64,
    max_scale: f64,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self {
            seed,
            star_count,
            min_distance: 60.0,
            max_distance: 140.0,
            min_scale: 0.05,
            max_scale: 0.3,
        }
    }

    /// Sets the shell the stars land in.
    pub fn with_distances(mut self, min: f64, max: f64) -> Self {
        self.min_distance = min.min(max);
        self.max_distance = max.max(min);
        self
    }

    /// Sets the model-scale range.
    pub fn with_scales(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min.min(max);
        self.max_scale = max.max(min);
        self
    }

    /// Generates the scatter. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<BackdropStar> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);

        for _ in 0..self.star_count {
            let theta = rng.random::<f64>() * std::f64::consts::TAU;
            let phi = (1.0 - 2.0 * rng.random::<f64>()).acos();
            let direction = DVec3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            );
            let distance = rng.random_range(self.min_distance..=self.max_distance);

            // Power-law brightness: many dim stars, few bright ones.
            let raw: f32 = rng.random();
            let brightness = raw.powf(4.0).clamp(0.0, 1.0);

            let temperature = 2000.0 + brightness * 28000.0;
            let color = blackbody_to_rgb(temperature);

            // Brighter stars get the larger models.
            let scale =
                self.min_scale + brightness as f64 * (self.max_scale - self.min_scale);

            stars.push(BackdropStar {
                position: direction * distance,
                scale,
                brightness,
                color,
            });
        }

        log::debug!(
            "scattered {} stars in shell [{}, {}] from seed {}",
            stars.len(),
            self.min_distance,
            self.max_distance,
            self.seed
        );
        stars
    }
}

/// Convert a blackbody temperature in Kelvin to an approximate sRGB color.
///
/// Uses a simplified Planckian locus approximation (Tanner Helland algorithm).
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    let r = if t <= 66.0 {
        1.0
    } else {
        (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };
    let g = if t <= 66.0 {
        (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0
    } else {
        (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };
    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
    };
    [r, g, b]
}
