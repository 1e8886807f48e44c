//! Animation module: formation transitions and per-frame motion
//!
//! A mode change re-arms per-entity tweens ([`retarget`]); every frame
//! [`advance`] steps them and layers breathing, spin and pulse on top.

mod animator;
mod easing;
pub mod procedural;
mod transition;
mod tween;

pub use animator::advance;
pub(crate) use animator::pose;
pub use easing::{Easing, ease};
pub use procedural::{Heading, MotionProfile};
pub use transition::{retarget, retarget_named};
pub use tween::{Tween, MIN_DURATION};
