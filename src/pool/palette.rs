//! Color schemes for each pool kind
//!
//! `ColorScheme` is the configuration form (hex strings, HSL ranges);
//! `Palette` is the validated form that samples colors at pool creation.

use std::f32::consts::TAU;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use crate::config::Range;
use crate::error::{AnimError, Result};
use crate::math::Rgb;

/// Classic ornament colors, cycled by index
pub const ORNAMENT_COLORS: [&str; 10] = [
    "#C41E3A", // red
    "#1E90FF", // blue
    "#FFD700", // gold
    "#228B22", // green
    "#FF69B4", // pink
    "#9400D3", // purple
    "#FF8C00", // orange
    "#C0C0C0", // silver
    "#8B0000", // dark red
    "#4169E1", // royal blue
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum ColorScheme {
    /// Mostly green foliage with occasional near-white sparkles
    Foliage {
        green_probability: f32,
        hue: Range,
        saturation: Range,
        lightness: Range,
        sparkle_lightness: Range,
    },
    /// Fixed list cycled by entity index
    Cycle { colors: Vec<String> },
    /// Fully saturated narrow hue band
    Golden { hue: Range, lightness: Range },
}

impl ColorScheme {
    pub fn foliage() -> Self {
        ColorScheme::Foliage {
            green_probability: 0.85,
            hue: Range::new(0.33, 0.38),
            saturation: Range::new(0.7, 1.0),
            lightness: Range::new(0.25, 0.45),
            sparkle_lightness: Range::new(0.9, 1.0),
        }
    }

    pub fn ornaments() -> Self {
        ColorScheme::Cycle {
            colors: ORNAMENT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn golden() -> Self {
        ColorScheme::Golden {
            hue: Range::new(0.12, 0.15),
            lightness: Range::new(0.5, 0.6),
        }
    }
}

/// Validated, ready-to-sample color scheme
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    Foliage {
        green_probability: f32,
        hue: Range,
        saturation: Range,
        lightness: Range,
        sparkle_lightness: Range,
    },
    Cycle(Vec<Rgb>),
    Golden { hue: Range, lightness: Range },
}

impl Palette {
    pub fn from_scheme(scheme: &ColorScheme) -> Result<Self> {
        match scheme {
            ColorScheme::Foliage { green_probability, hue, saturation, lightness, sparkle_lightness } => {
                let p = *green_probability;
                if !(0.0..=1.0).contains(&p) {
                    return Err(AnimError::InvalidRange {
                        field: "colors.green_probability".into(),
                        min: p,
                        max: p,
                    });
                }
                hue.validate("colors.hue")?;
                saturation.validate("colors.saturation")?;
                lightness.validate("colors.lightness")?;
                sparkle_lightness.validate("colors.sparkle_lightness")?;
                Ok(Palette::Foliage {
                    green_probability: p,
                    hue: *hue,
                    saturation: *saturation,
                    lightness: *lightness,
                    sparkle_lightness: *sparkle_lightness,
                })
            }
            ColorScheme::Cycle { colors } => {
                if colors.is_empty() {
                    return Err(AnimError::InvalidColor("empty palette".into()));
                }
                let parsed = colors
                    .iter()
                    .map(|c| Rgb::from_hex(c).ok_or_else(|| AnimError::InvalidColor(c.clone())))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Palette::Cycle(parsed))
            }
            ColorScheme::Golden { hue, lightness } => {
                hue.validate("colors.hue")?;
                lightness.validate("colors.lightness")?;
                Ok(Palette::Golden { hue: *hue, lightness: *lightness })
            }
        }
    }

    /// Color for entity `index`
    pub fn sample(&self, index: usize, rng: &mut dyn RngCore) -> Rgb {
        match self {
            Palette::Foliage { green_probability, hue, saturation, lightness, sparkle_lightness } => {
                if rng.gen::<f32>() < *green_probability {
                    Rgb::from_hsl(hue.sample(rng), saturation.sample(rng), lightness.sample(rng))
                } else {
                    Rgb::from_hsl(0.0, 0.0, sparkle_lightness.sample(rng))
                }
            }
            Palette::Cycle(colors) => colors[index % colors.len()],
            Palette::Golden { hue, lightness } => {
                Rgb::from_hsl(hue.sample(rng), 1.0, lightness.sample(rng))
            }
        }
    }
}

/// Per-entity phase offset in [0, 2π)
pub fn sample_phase(rng: &mut dyn RngCore) -> f32 {
    rng.gen_range(0.0..TAU)
}
