//! Formations: named target arrangements every pool can morph between
//!
//! A [`Mode`] is what the outside world asks for (tree or galaxy). Each pool
//! maps a mode to a [`Formation`], the concrete shape its entities settle into.

pub mod generators;
pub mod registry;

use std::fmt;
use std::str::FromStr;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use crate::error::AnimError;
use crate::math::Vec3;
use generators::*;

pub use registry::Generator;

/// Scene-wide arrangement selected by the external controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Tree,
    Galaxy,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Tree, Mode::Galaxy];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Tree => "tree",
            Mode::Galaxy => "galaxy",
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Tree => Mode::Galaxy,
            Mode::Galaxy => Mode::Tree,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Mode::Tree),
            "galaxy" => Ok(Mode::Galaxy),
            _ => Err(AnimError::UnknownMode(s.to_string())),
        }
    }
}

/// Concrete target shapes. Discriminants index [`registry::REGISTRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formation {
    TreeCone = 0,
    GalaxyCloud = 1,
    OrnamentSpiral = 2,
    RibbonHelix = 3,
}

/// Envelope every generated point stays inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationBounds {
    /// Maximum distance from the vertical axis
    pub max_radius: f32,
    /// Maximum |y|
    pub half_height: f32,
}

impl FormationBounds {
    pub fn contains(&self, p: Vec3) -> bool {
        p.is_finite()
            && p.horizontal_length() <= self.max_radius + 1e-4
            && p.y.abs() <= self.half_height + 1e-4
    }
}

impl Formation {
    pub const ALL: [Formation; 4] = [
        Formation::TreeCone,
        Formation::GalaxyCloud,
        Formation::OrnamentSpiral,
        Formation::RibbonHelix,
    ];

    pub fn name(&self) -> &'static str {
        registry::name_of(*self)
    }

    pub fn generator(&self) -> Generator {
        registry::generator_of(*self)
    }

    /// Target position for entity `index` of `total`
    pub fn generate(&self, index: usize, total: usize, rng: &mut dyn RngCore) -> Vec3 {
        (self.generator())(index, total, rng)
    }

    pub fn bounds(&self) -> FormationBounds {
        match self {
            Formation::TreeCone => FormationBounds {
                max_radius: TREE_MAX_RADIUS,
                half_height: TREE_HEIGHT / 2.0,
            },
            Formation::GalaxyCloud => FormationBounds {
                max_radius: GALAXY_MAX_RADIUS,
                half_height: GALAXY_MAX_RADIUS * GALAXY_FLATTEN,
            },
            Formation::OrnamentSpiral => FormationBounds {
                max_radius: ORNAMENT_MAX_RADIUS,
                half_height: ORNAMENT_HEIGHT / 2.0,
            },
            Formation::RibbonHelix => FormationBounds {
                max_radius: RIBBON_MAX_RADIUS,
                half_height: RIBBON_HEIGHT / 2.0,
            },
        }
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formation {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::lookup(s.trim()).ok_or_else(|| AnimError::UnknownFormation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mode_parse() {
        assert_eq!("tree".parse::<Mode>().unwrap(), Mode::Tree);
        assert_eq!(" Galaxy ".parse::<Mode>().unwrap(), Mode::Galaxy);
        assert_eq!(
            "forest".parse::<Mode>(),
            Err(AnimError::UnknownMode("forest".to_string()))
        );
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Tree.toggled(), Mode::Galaxy);
        assert_eq!(Mode::Galaxy.toggled().toggled(), Mode::Galaxy);
    }

    #[test]
    fn test_formation_parse() {
        assert_eq!("ribbon_helix".parse::<Formation>().unwrap(), Formation::RibbonHelix);
        assert!(matches!(
            "nebula".parse::<Formation>(),
            Err(AnimError::UnknownFormation(_))
        ));
    }

    #[test]
    fn test_generators_total_and_bounded() {
        let mut rng = StdRng::seed_from_u64(2024);
        for formation in Formation::ALL {
            let bounds = formation.bounds();
            for total in [1usize, 2, 3, 40, 150, 997, 10_000] {
                for index in 0..total {
                    let p = formation.generate(index, total, &mut rng);
                    assert!(
                        bounds.contains(p),
                        "{} produced {:?} at {}/{}",
                        formation, p, index, total
                    );
                }
            }
        }
    }
}
