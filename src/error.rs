//! Error types for scene construction, retargeting and rendering

use thiserror::Error;

/// Errors raised while building or driving the scene.
///
/// None of these occur inside a frame: pools are validated when they are
/// built, and mode names are parsed before any entity is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    /// Mode name other than `tree` or `galaxy`.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Formation name missing from the registry.
    #[error("unknown formation: {0}")]
    UnknownFormation(String),

    /// Easing name that does not map to a curve.
    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    /// Pools must hold at least one entity.
    #[error("invalid pool size for {kind}: {count}")]
    InvalidPoolSize { kind: String, count: usize },

    /// Range with `min > max` or non-finite bounds.
    #[error("invalid range for {field}: [{min}, {max}]")]
    InvalidRange { field: String, min: f32, max: f32 },

    /// Palette entry that is not a `#RRGGBB` color.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// WebGL resource creation or upload failed.
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AnimError>;

impl From<serde_yaml::Error> for AnimError {
    fn from(e: serde_yaml::Error) -> Self {
        AnimError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AnimError::UnknownMode("forest".into()).to_string(), "unknown mode: forest");
        assert_eq!(
            AnimError::InvalidPoolSize { kind: "ornaments".into(), count: 0 }.to_string(),
            "invalid pool size for ornaments: 0"
        );
    }

    #[test]
    fn test_yaml_error_converts() {
        let err: AnimError = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err().into();
        assert!(matches!(err, AnimError::Config(_)));
    }
}
