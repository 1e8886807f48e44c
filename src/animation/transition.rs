//! Transition controller: re-arms every entity's tween on a mode change

use rand::RngCore;
use crate::error::Result;
use crate::formation::Mode;
use crate::pool::EntityPool;

/// Start moving every entity of `pool` toward its `mode` target.
///
/// Each tween restarts from the entity's live position, so interrupting an
/// in-flight transition never jumps. Duration and delay are drawn fresh per
/// entity; the easing is the one the pool associates with `mode`. Calling
/// this again with the same mode simply re-arms the tweens.
pub fn retarget(pool: &mut EntityPool, mode: Mode, rng: &mut dyn RngCore) {
    let plan = *pool.transition();
    let easing = plan.easing_for(mode);

    for entity in pool.entities_mut() {
        let duration = plan.duration.sample(rng);
        let delay = plan.delay.sample(rng);
        let from = entity.position;
        let to = entity.target(mode);
        entity.tween.restart(from, to, duration, delay, easing);
    }

    pool.set_mode(mode);
}

/// [`retarget`] by mode name. An unknown name fails before any entity is
/// touched, leaving the pool exactly as it was.
pub fn retarget_named(pool: &mut EntityPool, name: &str, rng: &mut dyn RngCore) -> Result<Mode> {
    let mode: Mode = name.parse()?;
    retarget(pool, mode, rng);
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{advance, Easing};
    use crate::config::PoolConfig;
    use crate::error::AnimError;
    use crate::pool::PoolKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(kind: PoolKind, rng: &mut StdRng) -> EntityPool {
        EntityPool::new(kind, &PoolConfig::for_kind(kind), Mode::Tree, rng).unwrap()
    }

    #[test]
    fn test_retarget_arms_every_entity() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = pool(PoolKind::Particles, &mut rng);
        retarget(&mut pool, Mode::Galaxy, &mut rng);

        assert_eq!(pool.mode(), Mode::Galaxy);
        for e in pool.entities() {
            let tween = e.tween();
            assert!(tween.is_active());
            assert_eq!(tween.start, e.target(Mode::Tree));
            assert_eq!(tween.target, e.target(Mode::Galaxy));
            assert_eq!(tween.elapsed, 0.0);
            assert!(tween.duration >= 1.5 && tween.duration <= 2.0);
            assert!(tween.delay >= 0.0 && tween.delay <= 0.3);
            assert_eq!(tween.easing, Easing::EaseOut);
        }
    }

    #[test]
    fn test_easing_follows_destination() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut pool = pool(PoolKind::Particles, &mut rng);
        retarget(&mut pool, Mode::Galaxy, &mut rng);
        retarget(&mut pool, Mode::Tree, &mut rng);
        assert!(pool.entities().iter().all(|e| e.tween().easing == Easing::EaseInOut));
    }

    #[test]
    fn test_interrupt_restarts_from_live_position() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut pool = pool(PoolKind::Ornaments, &mut rng);
        retarget(&mut pool, Mode::Galaxy, &mut rng);

        let mut elapsed = 0.0;
        for _ in 0..40 {
            elapsed += 0.016;
            advance(&mut pool, 0.016, elapsed);
        }
        let mid: Vec<_> = pool.entities().iter().map(|e| e.position()).collect();
        assert!(pool
            .entities()
            .iter()
            .zip(&mid)
            .any(|(e, p)| *p != e.target(Mode::Tree) && *p != e.target(Mode::Galaxy)));

        retarget(&mut pool, Mode::Tree, &mut rng);
        for (e, p) in pool.entities().iter().zip(&mid) {
            assert_eq!(e.tween().start, *p);
            assert_eq!(e.tween().target, e.target(Mode::Tree));
        }

        // The first frame after the interrupt is still inside the delay
        // window or barely past it: nothing jumps.
        elapsed += 0.001;
        advance(&mut pool, 0.001, elapsed);
        for (e, p) in pool.entities().iter().zip(&mid) {
            assert!(e.position().distance(p) < 0.05);
        }
    }

    #[test]
    fn test_retarget_same_mode_rearms() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut pool = pool(PoolKind::Ribbon, &mut rng);
        retarget(&mut pool, Mode::Tree, &mut rng);
        for e in pool.entities() {
            assert!(e.tween().is_active());
            assert_eq!(e.tween().start, e.tween().target);
        }
    }

    #[test]
    fn test_unknown_name_leaves_pool_intact() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut pool = pool(PoolKind::Ornaments, &mut rng);
        retarget(&mut pool, Mode::Galaxy, &mut rng);
        advance(&mut pool, 0.5, 0.5);
        let before: Vec<_> = pool.entities().iter().map(|e| *e.tween()).collect();

        let err = retarget_named(&mut pool, "snowglobe", &mut rng).unwrap_err();
        assert_eq!(err, AnimError::UnknownMode("snowglobe".into()));
        assert_eq!(pool.mode(), Mode::Galaxy);
        let after: Vec<_> = pool.entities().iter().map(|e| *e.tween()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_retarget_named() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut pool = pool(PoolKind::Ribbon, &mut rng);
        assert_eq!(retarget_named(&mut pool, "galaxy", &mut rng), Ok(Mode::Galaxy));
        assert_eq!(pool.mode(), Mode::Galaxy);
    }
}
