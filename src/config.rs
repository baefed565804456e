use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::errors::{ErrorKind, Result};
use crate::grid::MAX_GRID_CELLS;
use crate::units::{Height, Width};

pub const DEFAULT_GRID_WIDTH: usize = 128;
pub const DEFAULT_GRID_HEIGHT: usize = 128;
pub const DEFAULT_WALL_ROTATION_DEGREES: f32 = 90.0;
pub const DEFAULT_CELL_SPACING: f32 = 200.0;

/// Parameters for one maze generation run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeConfig {
    pub width: Width,
    pub height: Height,
    /// Fixed seed for reproducible runs, a fresh random seed is drawn when `None`.
    pub seed: Option<u64>,
    /// Yaw applied to rotated walls by the turn generator.
    pub wall_rotation_degrees: f32,
    /// Distance between neighbouring cell origins in placement space.
    pub cell_spacing: f32,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: Width(DEFAULT_GRID_WIDTH),
            height: Height(DEFAULT_GRID_HEIGHT),
            seed: None,
            wall_rotation_degrees: DEFAULT_WALL_ROTATION_DEGREES,
            cell_spacing: DEFAULT_CELL_SPACING,
        }
    }
}

impl MazeConfig {
    /// Reject configurations that cannot produce a grid, before anything is allocated.
    pub fn validate(&self) -> Result<()> {
        let (Width(w), Height(h)) = (self.width, self.height);
        if w == 0 || h == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }
        match w.checked_mul(h) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => return Err(ErrorKind::GridTooLarge(w, h).into()),
        }
        if !self.wall_rotation_degrees.is_finite() {
            return Err(ErrorKind::InvalidWallRotation(self.wall_rotation_degrees).into());
        }
        if !self.cell_spacing.is_finite() {
            return Err(ErrorKind::InvalidCellSpacing(self.cell_spacing).into());
        }
        Ok(())
    }

    /// The configured seed, or a new one from the thread rng.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }

    /// Seeded generator for a run along with the seed used, so the run can be repeated.
    pub fn rng(&self) -> (XorShiftRng, u64) {
        let seed = self.seed_or_random();
        debug!("maze rng seed {}", seed);
        (XorShiftRng::seed_from_u64(seed), seed)
    }
}

pub struct MazeConfigBuilder {
    config: MazeConfig,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder { config: MazeConfig::default() }
    }
    pub fn width(mut self, width: usize) -> MazeConfigBuilder {
        self.config.width = Width(width);
        self
    }
    pub fn height(mut self, height: usize) -> MazeConfigBuilder {
        self.config.height = Height(height);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> MazeConfigBuilder {
        self.config.seed = seed;
        self
    }
    pub fn wall_rotation_degrees(mut self, degrees: f32) -> MazeConfigBuilder {
        self.config.wall_rotation_degrees = degrees;
        self
    }
    pub fn cell_spacing(mut self, spacing: f32) -> MazeConfigBuilder {
        self.config.cell_spacing = spacing;
        self
    }
    pub fn build(self) -> Result<MazeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for MazeConfigBuilder {
    fn default() -> MazeConfigBuilder {
        MazeConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::RngCore;

    #[test]
    fn defaults() {
        let config = MazeConfigBuilder::new().build().expect("defaults are valid");
        assert_eq!(config.width, Width(128));
        assert_eq!(config.height, Height(128));
        assert_eq!(config.seed, None);
        assert_eq!(config.wall_rotation_degrees, 90.0);
        assert_eq!(config.cell_spacing, 200.0);
    }

    #[test]
    fn zero_dimensions_rejected() {
        let err = MazeConfigBuilder::new().width(0).build().unwrap_err();
        assert!(matches!(err.0, ErrorKind::InvalidDimensions(0, 128)));
        let err = MazeConfigBuilder::new().height(0).build().unwrap_err();
        assert!(matches!(err.0, ErrorKind::InvalidDimensions(128, 0)));
    }

    #[test]
    fn oversized_dimensions_rejected() {
        let err = MazeConfigBuilder::new().width(usize::MAX).height(3).build().unwrap_err();
        assert!(matches!(err.0, ErrorKind::GridTooLarge(_, 3)));
    }

    #[test]
    fn non_finite_rotation_rejected() {
        let err = MazeConfigBuilder::new().wall_rotation_degrees(std::f32::NAN).build().unwrap_err();
        assert!(matches!(err.0, ErrorKind::InvalidWallRotation(_)));
        assert!(MazeConfigBuilder::new().wall_rotation_degrees(-45.0).build().is_ok());
    }

    #[test]
    fn non_finite_cell_spacing_rejected() {
        for &spacing in &[std::f32::NAN, std::f32::INFINITY, std::f32::NEG_INFINITY] {
            let err = MazeConfigBuilder::new().cell_spacing(spacing).build().unwrap_err();
            assert!(matches!(err.0, ErrorKind::InvalidCellSpacing(_)));
        }
        let config = MazeConfig {
            cell_spacing: std::f32::NAN,
            ..MazeConfig::default()
        };
        assert!(crate::turns::turn_layout(&config).is_err());
        assert!(MazeConfigBuilder::new().cell_spacing(0.5).build().is_ok());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = MazeConfigBuilder::new().seed(Some(42)).build().unwrap();
        let (mut a, seed_a) = config.rng();
        let (mut b, seed_b) = config.rng();
        assert_eq!(seed_a, 42);
        assert_eq!(seed_b, 42);
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
