//! Scene configuration: every tunable of the animation core
//!
//! Defaults reproduce the stock look. A YAML document can override any
//! subset; omitted keys keep the default for that pool kind.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use crate::animation::procedural::MotionProfile;
use crate::error::{AnimError, Result};
use crate::formation::Mode;
use crate::pool::{ColorScheme, PoolKind};

/// Closed interval `[min, max]` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(AnimError::InvalidRange {
                field: field.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Uniform draw; callers validate first
    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// A string per mode: formation names or easing names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerMode {
    pub tree: String,
    pub galaxy: String,
}

impl PerMode {
    pub fn new(tree: &str, galaxy: &str) -> Self {
        Self { tree: tree.to_string(), galaxy: galaxy.to_string() }
    }

    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Tree => &self.tree,
            Mode::Galaxy => &self.galaxy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Seconds, drawn fresh per entity on every retarget
    pub duration: Range,
    /// Seconds of stagger before an entity starts moving
    pub delay: Range,
    /// Easing used when moving toward each mode
    pub easing: PerMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub count: usize,
    /// Formation name each mode resolves to
    pub formations: PerMode,
    pub colors: ColorScheme,
    pub scale: Range,
    pub speed: Range,
    pub transition: TransitionConfig,
    pub motion: MotionProfile,
}

impl PoolConfig {
    pub fn for_kind(kind: PoolKind) -> Self {
        match kind {
            PoolKind::Particles => Self::particles(),
            PoolKind::Ornaments => Self::ornaments(),
            PoolKind::Ribbon => Self::ribbon(),
        }
    }

    /// Green foliage sparkles: breathe, spin and pulse
    pub fn particles() -> Self {
        Self {
            count: 4000,
            formations: PerMode::new("tree_cone", "galaxy_cloud"),
            colors: ColorScheme::foliage(),
            scale: Range::new(0.015, 0.04),
            speed: Range::new(0.5, 1.0),
            transition: TransitionConfig {
                duration: Range::new(1.5, 2.0),
                delay: Range::new(0.0, 0.3),
                easing: PerMode::new("power2.inOut", "power2.out"),
            },
            motion: MotionProfile::sparkle(),
        }
    }

    /// Ornament balls: static apart from the morph
    pub fn ornaments() -> Self {
        Self {
            count: 40,
            formations: PerMode::new("ornament_spiral", "galaxy_cloud"),
            colors: ColorScheme::ornaments(),
            scale: Range::new(0.12, 0.22),
            speed: Range::fixed(1.0),
            transition: TransitionConfig {
                duration: Range::new(1.2, 1.6),
                delay: Range::new(0.0, 0.2),
                easing: PerMode::new("power2.inOut", "power2.inOut"),
            },
            motion: MotionProfile::still(),
        }
    }

    /// Golden garland segments, oriented along the helix and tilted
    pub fn ribbon() -> Self {
        Self {
            count: 150,
            formations: PerMode::new("ribbon_helix", "galaxy_cloud"),
            colors: ColorScheme::golden(),
            scale: Range::fixed(1.0),
            speed: Range::fixed(1.0),
            transition: TransitionConfig {
                duration: Range::new(1.3, 1.7),
                delay: Range::new(0.0, 0.2),
                easing: PerMode::new("power2.inOut", "power2.inOut"),
            },
            motion: MotionProfile::garland(),
        }
    }

    fn apply(&mut self, section: PoolSection) {
        if let Some(count) = section.count {
            self.count = count;
        }
        if let Some(formations) = section.formations {
            self.formations = formations;
        }
        if let Some(colors) = section.colors {
            self.colors = colors;
        }
        if let Some(scale) = section.scale {
            self.scale = scale;
        }
        if let Some(speed) = section.speed {
            self.speed = speed;
        }
        if let Some(transition) = section.transition {
            self.transition = transition;
        }
        if let Some(motion) = section.motion {
            self.motion = motion;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub initial_mode: Mode,
    pub particles: PoolConfig,
    pub ornaments: PoolConfig,
    pub ribbon: PoolConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Tree,
            particles: PoolConfig::particles(),
            ornaments: PoolConfig::ornaments(),
            ribbon: PoolConfig::ribbon(),
        }
    }
}

impl SceneConfig {
    /// Parse a YAML override document on top of the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let section: SceneSection = serde_yaml::from_str(yaml)?;
        let mut config = Self::default();
        if let Some(mode) = section.initial_mode {
            config.initial_mode = mode;
        }
        config.particles.apply(section.particles);
        config.ornaments.apply(section.ornaments);
        config.ribbon.apply(section.ribbon);
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn pool(&self, kind: PoolKind) -> &PoolConfig {
        match kind {
            PoolKind::Particles => &self.particles,
            PoolKind::Ornaments => &self.ornaments,
            PoolKind::Ribbon => &self.ribbon,
        }
    }

    pub fn total_entities(&self) -> usize {
        PoolKind::ALL.iter().map(|k| self.pool(*k).count).sum()
    }
}

/// YAML layer: everything optional so a document can override one key
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SceneSection {
    initial_mode: Option<Mode>,
    particles: PoolSection,
    ornaments: PoolSection,
    ribbon: PoolSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PoolSection {
    count: Option<usize>,
    formations: Option<PerMode>,
    colors: Option<ColorScheme>,
    scale: Option<Range>,
    speed: Option<Range>,
    transition: Option<TransitionConfig>,
    motion: Option<MotionProfile>,
}
