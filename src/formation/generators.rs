//! Target position generators, one per formation
//!
//! Each generator maps `(index, total)` to a point. Shapes are fixed; fine
//! detail (angles, jitter) is drawn from the supplied random source.

use std::f32::consts::{PI, TAU};
use rand::{Rng, RngCore};
use crate::math::Vec3;

pub const TREE_HEIGHT: f32 = 8.0;
pub const TREE_MAX_RADIUS: f32 = 3.5;

pub const GALAXY_MIN_RADIUS: f32 = 5.0;
pub const GALAXY_MAX_RADIUS: f32 = 15.0;
/// Vertical squash that flattens the sphere into a disc-like cloud
pub const GALAXY_FLATTEN: f32 = 0.5;

pub const ORNAMENT_HEIGHT: f32 = 7.0;
pub const ORNAMENT_MAX_RADIUS: f32 = 3.2;
/// Golden-ish angular step between consecutive ornaments (in half turns)
const ORNAMENT_ANGLE_STEP: f32 = 2.4;
const ORNAMENT_INSET: f32 = 0.85;

pub const RIBBON_HEIGHT: f32 = 7.5;
pub const RIBBON_MAX_RADIUS: f32 = 3.3;
pub const RIBBON_TURNS: f32 = 4.0;

/// Cone body: dense toward the base, tapering to a point
pub fn tree_cone(index: usize, total: usize, rng: &mut dyn RngCore) -> Vec3 {
    debug_assert!(index < total, "index {} out of range for {}", index, total);

    let t = (index as f32 / total as f32).powf(0.8);
    let y = t * TREE_HEIGHT - TREE_HEIGHT / 2.0;

    let layer_radius = TREE_MAX_RADIUS * (1.0 - t * 0.95);
    let angle = rng.gen_range(0.0..TAU);
    let radius = layer_radius * rng.gen_range(0.7..=1.0);

    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Flattened spherical shell cloud; independent of index
pub fn galaxy_cloud(index: usize, total: usize, rng: &mut dyn RngCore) -> Vec3 {
    debug_assert!(index < total, "index {} out of range for {}", index, total);

    let radius = rng.gen_range(GALAXY_MIN_RADIUS..=GALAXY_MAX_RADIUS);
    let theta = rng.gen_range(0.0..TAU);
    // acos(2u - 1) keeps the polar distribution uniform over the sphere
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin() * GALAXY_FLATTEN,
        radius * phi.cos(),
    )
}

/// One ornament per slot, sitting just inside the foliage surface
pub fn ornament_spiral(index: usize, total: usize, rng: &mut dyn RngCore) -> Vec3 {
    debug_assert!(index < total, "index {} out of range for {}", index, total);

    let t = (index as f32 + 0.5) / total as f32;
    let y = t * ORNAMENT_HEIGHT - ORNAMENT_HEIGHT / 2.0;
    let layer_radius = ORNAMENT_MAX_RADIUS * (1.0 - t * 0.9) * ORNAMENT_INSET;
    let angle = index as f32 * PI * ORNAMENT_ANGLE_STEP + rng.gen_range(0.0..0.5);

    Vec3::new(angle.cos() * layer_radius, y, angle.sin() * layer_radius)
}

/// Garland wound four times around the cone
pub fn ribbon_helix(index: usize, total: usize, _rng: &mut dyn RngCore) -> Vec3 {
    debug_assert!(index < total, "index {} out of range for {}", index, total);

    let t = index as f32 / total as f32;
    let y = t * RIBBON_HEIGHT - RIBBON_HEIGHT / 2.0;
    let radius = RIBBON_MAX_RADIUS * (1.0 - t * 0.92);
    let angle = ribbon_angle(index, total);

    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Angle along the ribbon helix for a given segment
pub fn ribbon_angle(index: usize, total: usize) -> f32 {
    index as f32 / total as f32 * TAU * RIBBON_TURNS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tree_base_wider_than_apex() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = tree_cone(0, 1000, &mut rng);
        let apex = tree_cone(999, 1000, &mut rng);

        assert!((base.y + TREE_HEIGHT / 2.0).abs() < 0.0001);
        assert!(apex.y > 3.9);
        assert!(base.horizontal_length() >= TREE_MAX_RADIUS * 0.7 - 0.0001);
        assert!(apex.horizontal_length() < 0.3);
    }

    #[test]
    fn test_tree_density_biased_to_base() {
        let mut rng = StdRng::seed_from_u64(8);
        let total = 1000;
        let below_middle = (0..total)
            .filter(|&i| tree_cone(i, total, &mut rng).y < 0.0)
            .count();
        // t = (i/n)^0.8 puts ~42% of indices below the midpoint, not 50%
        assert!(below_middle < total / 2);
        assert!(below_middle > total / 3);
    }

    #[test]
    fn test_galaxy_shell_radius() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..500 {
            let p = galaxy_cloud(i, 500, &mut rng);
            let unflattened = Vec3::new(p.x, p.y / GALAXY_FLATTEN, p.z);
            let r = unflattened.length();
            assert!(r >= GALAXY_MIN_RADIUS - 0.001 && r <= GALAXY_MAX_RADIUS + 0.001);
            assert!(p.y.abs() <= GALAXY_MAX_RADIUS * GALAXY_FLATTEN + 0.001);
        }
    }

    #[test]
    fn test_ornament_slots_climb() {
        let mut rng = StdRng::seed_from_u64(10);
        let total = 40;
        let mut prev_y = f32::MIN;
        for i in 0..total {
            let p = ornament_spiral(i, total, &mut rng);
            assert!(p.y > prev_y);
            prev_y = p.y;
        }
    }

    #[test]
    fn test_ribbon_is_deterministic() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_eq!(ribbon_helix(37, 150, &mut a), ribbon_helix(37, 150, &mut b));
    }

    #[test]
    fn test_ribbon_four_turns() {
        assert!((ribbon_angle(0, 150)).abs() < 0.0001);
        assert!((ribbon_angle(75, 150) - 4.0 * PI).abs() < 0.0001);
    }
}
