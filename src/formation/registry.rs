use rand::RngCore;
use crate::math::Vec3;
use super::generators::{galaxy_cloud, ornament_spiral, ribbon_helix, tree_cone};
use super::Formation;

/// Generator signature shared by every formation
pub type Generator = fn(usize, usize, &mut dyn RngCore) -> Vec3;

/// Name → generator table, in [`Formation`] discriminant order. Adding a
/// formation means adding a variant and a row here; the transition code never changes.
pub const REGISTRY: &[(Formation, &str, Generator)] = &[
    (Formation::TreeCone, "tree_cone", tree_cone),
    (Formation::GalaxyCloud, "galaxy_cloud", galaxy_cloud),
    (Formation::OrnamentSpiral, "ornament_spiral", ornament_spiral),
    (Formation::RibbonHelix, "ribbon_helix", ribbon_helix),
];

pub fn lookup(name: &str) -> Option<Formation> {
    REGISTRY
        .iter()
        .find(|(_, n, _)| *n == name)
        .map(|(f, _, _)| *f)
}

pub fn name_of(formation: Formation) -> &'static str {
    entry(formation).1
}

pub fn generator_of(formation: Formation) -> Generator {
    entry(formation).2
}

fn entry(formation: Formation) -> &'static (Formation, &'static str, Generator) {
    &REGISTRY[formation as usize]
}
