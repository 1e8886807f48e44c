//! Per-frame animator: steps tweens and layers procedural motion on top

use crate::math::Vec3;
use crate::pool::{EntityPool, InstanceTransform};
use super::procedural;

/// Advance every entity of `pool` by `dt` seconds, with `elapsed` the total
/// scene time driving procedural motion.
///
/// Zero, negative or non-finite `dt` is a no-op tick: nothing is stepped and
/// the stored transforms are left untouched. Returns whether the tick ran.
pub fn advance(pool: &mut EntityPool, dt: f32, elapsed: f32) -> bool {
    if !dt.is_finite() || dt <= 0.0 || !elapsed.is_finite() {
        return false;
    }

    for entity in pool.entities_mut() {
        if let Some(position) = entity.tween.advance(dt) {
            entity.position = position;
        }
    }
    pose(pool, elapsed);

    true
}

/// Recompute every stored transform from the current base positions and
/// the pool's motion profile at `elapsed`, without stepping any tween.
pub(crate) fn pose(pool: &mut EntityPool, elapsed: f32) {
    let motion = *pool.motion();
    let shape = Vec3::from(motion.shape);

    for entity in pool.entities_mut() {
        let offset = procedural::evaluate(
            &motion,
            entity.phase(),
            entity.speed(),
            entity.helix_yaw(),
            elapsed,
        );

        entity.transform = InstanceTransform {
            position: Vec3::new(
                entity.position.x,
                entity.position.y + offset.lift,
                entity.position.z,
            ),
            rotation: offset.rotation,
            scale: shape.scale(entity.scale_base() * offset.pulse),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::retarget;
    use crate::animation::procedural::Heading;
    use crate::config::PoolConfig;
    use crate::formation::Mode;
    use crate::pool::PoolKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: f32 = 0.016;

    #[test]
    fn test_galaxy_scenario_settles_exactly() {
        let mut rng = StdRng::seed_from_u64(4000);
        let mut pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), Mode::Tree, &mut rng).unwrap();
        retarget(&mut pool, Mode::Galaxy, &mut rng);

        let mut elapsed = 0.0;
        while elapsed < 2.5 {
            elapsed += FRAME;
            assert!(advance(&mut pool, FRAME, elapsed));
        }

        assert!(pool.is_settled());
        for e in pool.entities() {
            assert_eq!(e.tween().progress(), 1.0);
            assert_eq!(e.position(), e.target(Mode::Galaxy));

            let lift = (elapsed * e.speed() + e.phase()).sin() * 0.03;
            let rendered = e.transform().position;
            let base = Vec3::new(rendered.x, rendered.y - lift, rendered.z);
            assert!(base.distance(&e.target(Mode::Galaxy)) < 1e-4);
        }
    }

    #[test]
    fn test_every_kind_settles_within_plan() {
        let mut rng = StdRng::seed_from_u64(21);
        for kind in PoolKind::ALL {
            let mut pool = EntityPool::new(kind, &PoolConfig::for_kind(kind), Mode::Galaxy, &mut rng).unwrap();
            retarget(&mut pool, Mode::Tree, &mut rng);

            let settle = pool.transition().max_settle_time();
            let mut elapsed = 0.0;
            while elapsed < settle + FRAME {
                elapsed += FRAME;
                advance(&mut pool, FRAME, elapsed);
            }

            assert!(pool.is_settled(), "{} not settled", kind);
            assert!(pool.entities().iter().all(|e| e.position() == e.target(Mode::Tree)));
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), Mode::Tree, &mut rng).unwrap();
        retarget(&mut pool, Mode::Galaxy, &mut rng);
        advance(&mut pool, FRAME, 1.0);

        let before: Vec<_> = pool.entities().iter().map(|e| (*e.transform(), *e.tween())).collect();
        for dt in [0.0, -0.016, f32::NAN, f32::INFINITY] {
            assert!(!advance(&mut pool, dt, 1.0 + FRAME));
        }
        let after: Vec<_> = pool.entities().iter().map(|e| (*e.transform(), *e.tween())).collect();
        assert_eq!(before, after);
        assert!(pool.entities().iter().all(|e| e.transform().position.is_finite()));
    }

    #[test]
    fn test_procedural_motion_while_settled() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), Mode::Tree, &mut rng).unwrap();

        advance(&mut pool, FRAME, 1.0);
        let a: Vec<_> = pool.entities().iter().map(|e| *e.transform()).collect();
        advance(&mut pool, FRAME, 1.5);
        let b: Vec<_> = pool.entities().iter().map(|e| *e.transform()).collect();

        for (e, (ta, tb)) in pool.entities().iter().zip(a.iter().zip(&b)) {
            assert_eq!(e.position(), e.target(Mode::Tree));
            assert!((tb.rotation.y - ta.rotation.y - 0.25).abs() < 1e-4);
            assert!(tb.scale.x >= e.scale_base() * 0.85 - 1e-6);
            assert!(tb.scale.x <= e.scale_base() * 1.15 + 1e-6);
        }
    }

    #[test]
    fn test_ribbon_orientation() {
        let mut rng = StdRng::seed_from_u64(24);
        let config = PoolConfig::ribbon();
        assert_eq!(config.motion.heading, Heading::Helix);
        let mut pool = EntityPool::new(PoolKind::Ribbon, &config, Mode::Tree, &mut rng).unwrap();
        advance(&mut pool, FRAME, 3.0);

        for e in pool.entities() {
            let t = e.transform();
            assert_eq!(t.rotation, Vec3::new(0.0, e.helix_yaw(), 0.3));
            assert!((t.scale.x - 0.15).abs() < 1e-6);
            assert!((t.scale.y - 0.03).abs() < 1e-6);
            assert!((t.scale.z - 0.08).abs() < 1e-6);
            assert_eq!(t.position, e.position());
        }
    }

    #[test]
    fn test_ornaments_hold_still() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut pool = EntityPool::new(PoolKind::Ornaments, &PoolConfig::ornaments(), Mode::Tree, &mut rng).unwrap();
        advance(&mut pool, FRAME, 7.0);
        for e in pool.entities() {
            let t = e.transform();
            assert_eq!(t.position, e.target(Mode::Tree));
            assert_eq!(t.rotation, Vec3::ZERO);
            assert_eq!(t.scale, Vec3::splat(e.scale_base()));
        }
    }
}
