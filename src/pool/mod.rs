//! Entity pools: fixed-size arenas of animated elements sharing one batch

mod entity;
mod palette;

pub use entity::{Entity, InstanceTransform, ModeTargets};
pub use palette::{ColorScheme, Palette, ORNAMENT_COLORS};

use std::fmt;
use log::debug;
use rand::RngCore;
use crate::animation::{self, Easing};
use crate::animation::procedural::MotionProfile;
use crate::config::{PoolConfig, Range, TransitionConfig};
use crate::error::{AnimError, Result};
use crate::formation::generators::ribbon_angle;
use crate::formation::{Formation, Mode};

/// Which population a pool animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Particles,
    Ornaments,
    Ribbon,
}

impl PoolKind {
    pub const ALL: [PoolKind; 3] = [PoolKind::Particles, PoolKind::Ornaments, PoolKind::Ribbon];

    pub fn name(&self) -> &'static str {
        match self {
            PoolKind::Particles => "particles",
            PoolKind::Ornaments => "ornaments",
            PoolKind::Ribbon => "ribbon",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transition parameters resolved from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    pub duration: Range,
    pub delay: Range,
    tree_easing: Easing,
    galaxy_easing: Easing,
}

impl TransitionPlan {
    fn from_config(config: &TransitionConfig) -> Result<Self> {
        config.duration.validate("transition.duration")?;
        config.delay.validate("transition.delay")?;
        if config.delay.min < 0.0 || config.duration.min < 0.0 {
            return Err(AnimError::InvalidRange {
                field: "transition".into(),
                min: config.delay.min.min(config.duration.min),
                max: config.duration.max,
            });
        }
        Ok(Self {
            duration: config.duration,
            delay: config.delay,
            tree_easing: config.easing.get(Mode::Tree).parse()?,
            galaxy_easing: config.easing.get(Mode::Galaxy).parse()?,
        })
    }

    /// Easing used for motion toward `mode`
    pub fn easing_for(&self, mode: Mode) -> Easing {
        match mode {
            Mode::Tree => self.tree_easing,
            Mode::Galaxy => self.galaxy_easing,
        }
    }

    /// Longest time any entity can take to settle after a retarget
    pub fn max_settle_time(&self) -> f32 {
        self.delay.max + self.duration.max
    }
}

/// Fixed-size arena of entities. Never grows or shrinks after creation.
#[derive(Debug, Clone)]
pub struct EntityPool {
    kind: PoolKind,
    tree_formation: Formation,
    galaxy_formation: Formation,
    transition: TransitionPlan,
    motion: MotionProfile,
    mode: Mode,
    entities: Vec<Entity>,
}

impl EntityPool {
    /// Build a pool with every entity resting on its `initial_mode` target.
    ///
    /// The configuration is fully validated before the first entity is
    /// generated, so a bad name or range never yields a half-built pool.
    pub fn new(kind: PoolKind, config: &PoolConfig, initial_mode: Mode, rng: &mut dyn RngCore) -> Result<Self> {
        if config.count == 0 {
            return Err(AnimError::InvalidPoolSize {
                kind: kind.name().to_string(),
                count: config.count,
            });
        }

        let tree_formation: Formation = config.formations.get(Mode::Tree).parse()?;
        let galaxy_formation: Formation = config.formations.get(Mode::Galaxy).parse()?;
        let palette = Palette::from_scheme(&config.colors)?;
        config.scale.validate("scale")?;
        config.speed.validate("speed")?;
        let transition = TransitionPlan::from_config(&config.transition)?;
        if !config.motion.is_finite() {
            return Err(AnimError::Config(format!("{}: non-finite motion profile", kind)));
        }

        let total = config.count;
        let mut entities = Vec::with_capacity(total);
        for i in 0..total {
            let targets = ModeTargets {
                tree: tree_formation.generate(i, total, rng),
                galaxy: galaxy_formation.generate(i, total, rng),
            };
            let color = palette.sample(i, rng);
            let scale_base = config.scale.sample(rng);
            let phase = palette::sample_phase(rng);
            let speed = config.speed.sample(rng);

            entities.push(Entity::new(
                targets,
                initial_mode,
                color,
                scale_base,
                phase,
                speed,
                ribbon_angle(i, total),
            ));
        }

        debug!(
            "created {} pool: {} entities, {} / {}",
            kind, total, tree_formation, galaxy_formation
        );

        let mut pool = Self {
            kind,
            tree_formation,
            galaxy_formation,
            transition,
            motion: config.motion,
            mode: initial_mode,
            entities,
        };
        // Resting pose at time zero, so the first flush already carries the profile
        animation::pose(&mut pool, 0.0);
        Ok(pool)
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Mode most recently targeted
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn formation_for(&self, mode: Mode) -> Formation {
        match mode {
            Mode::Tree => self.tree_formation,
            Mode::Galaxy => self.galaxy_formation,
        }
    }

    pub fn transition(&self) -> &TransitionPlan {
        &self.transition
    }

    pub fn motion(&self) -> &MotionProfile {
        &self.motion
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always false: empty pools are rejected at creation
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// True once every entity's tween has settled
    pub fn is_settled(&self) -> bool {
        self.entities.iter().all(|e| !e.tween.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PerMode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn test_fresh_pool_rests_on_initial_mode() {
        for mode in Mode::ALL {
            let pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), mode, &mut rng()).unwrap();
            assert_eq!(pool.len(), 4000);
            assert_eq!(pool.mode(), mode);
            assert!(pool.is_settled());
            for e in pool.entities() {
                assert_eq!(e.position(), e.target(mode));
            }
        }
    }

    #[test]
    fn test_targets_inside_formation_bounds() {
        for kind in PoolKind::ALL {
            let pool = EntityPool::new(kind, &PoolConfig::for_kind(kind), Mode::Tree, &mut rng()).unwrap();
            for mode in Mode::ALL {
                let bounds = pool.formation_for(mode).bounds();
                assert!(pool.entities().iter().all(|e| bounds.contains(e.target(mode))));
            }
        }
    }

    #[test]
    fn test_attribute_ranges() {
        let config = PoolConfig::particles();
        let pool = EntityPool::new(PoolKind::Particles, &config, Mode::Tree, &mut rng()).unwrap();
        for e in pool.entities() {
            assert!(e.phase() >= 0.0 && e.phase() < std::f32::consts::TAU);
            assert!(e.speed() >= 0.5 && e.speed() <= 1.0);
            assert!(e.scale_base() >= 0.015 && e.scale_base() <= 0.04);
        }
    }

    #[test]
    fn test_ornament_palette_cycles() {
        let pool = EntityPool::new(PoolKind::Ornaments, &PoolConfig::ornaments(), Mode::Tree, &mut rng()).unwrap();
        let entities = pool.entities();
        assert_eq!(entities[0].color(), entities[10].color());
        assert_eq!(entities[7].color(), entities[37].color());
        assert_ne!(entities[0].color(), entities[1].color());
    }

    #[test]
    fn test_same_config_different_values() {
        let config = PoolConfig::ornaments();
        let a = EntityPool::new(PoolKind::Ornaments, &config, Mode::Tree, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = EntityPool::new(PoolKind::Ornaments, &config, Mode::Tree, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a.len(), b.len());
        assert_ne!(a.entities()[0].target(Mode::Galaxy), b.entities()[0].target(Mode::Galaxy));
    }

    #[test]
    fn test_rejects_empty_pool() {
        let mut config = PoolConfig::ribbon();
        config.count = 0;
        let err = EntityPool::new(PoolKind::Ribbon, &config, Mode::Tree, &mut rng()).unwrap_err();
        assert_eq!(err, AnimError::InvalidPoolSize { kind: "ribbon".into(), count: 0 });
    }

    #[test]
    fn test_rejects_unknown_formation_at_creation() {
        let mut config = PoolConfig::particles();
        config.formations = PerMode::new("tree_cone", "spiral_arms");
        let err = EntityPool::new(PoolKind::Particles, &config, Mode::Tree, &mut rng()).unwrap_err();
        assert_eq!(err, AnimError::UnknownFormation("spiral_arms".into()));
    }

    #[test]
    fn test_rejects_unknown_easing_at_creation() {
        let mut config = PoolConfig::ornaments();
        config.transition.easing = PerMode::new("power2.inOut", "elastic");
        let err = EntityPool::new(PoolKind::Ornaments, &config, Mode::Tree, &mut rng()).unwrap_err();
        assert_eq!(err, AnimError::UnknownEasing("elastic".into()));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let mut config = PoolConfig::ornaments();
        config.transition.delay = Range::new(-0.5, 0.2);
        let err = EntityPool::new(PoolKind::Ornaments, &config, Mode::Tree, &mut rng()).unwrap_err();
        assert!(matches!(err, AnimError::InvalidRange { .. }));
    }

    #[test]
    fn test_transition_plan_easings() {
        let pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), Mode::Tree, &mut rng()).unwrap();
        assert_eq!(pool.transition().easing_for(Mode::Tree), Easing::EaseInOut);
        assert_eq!(pool.transition().easing_for(Mode::Galaxy), Easing::EaseOut);
        assert!((pool.transition().max_settle_time() - 2.3).abs() < 1e-5);
    }

    #[test]
    fn test_ribbon_rests_in_profile_pose() {
        let pool = EntityPool::new(PoolKind::Ribbon, &PoolConfig::ribbon(), Mode::Tree, &mut rng()).unwrap();
        for e in pool.entities() {
            let t = e.transform();
            assert_eq!(t.position, e.position());
            assert_eq!(t.rotation, crate::math::Vec3::new(0.0, e.helix_yaw(), 0.3));
            assert!((t.scale.x - 0.15).abs() < 1e-6);
            assert!((t.scale.y - 0.03).abs() < 1e-6);
            assert!((t.scale.z - 0.08).abs() < 1e-6);
        }
    }

    #[test]
    fn test_particles_rest_at_time_zero_phase() {
        let pool = EntityPool::new(PoolKind::Particles, &PoolConfig::particles(), Mode::Galaxy, &mut rng()).unwrap();
        for e in pool.entities().iter().take(50) {
            let t = e.transform();
            assert!((t.rotation.y - e.phase()).abs() < 1e-6);
            assert!((t.position.y - e.position().y - e.phase().sin() * 0.03).abs() < 1e-5);
            let pulse = 1.0 + e.phase().sin() * 0.15;
            assert!((t.scale.x - e.scale_base() * pulse).abs() < 1e-6);
        }
    }

}
