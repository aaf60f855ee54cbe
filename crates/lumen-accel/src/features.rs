//! Feature flags controlling construction and queries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Deepest tree the builder accepts. Bounds construction recursion.
pub const MAX_SUPPORTED_DEPTH: u32 = 64;

/// How the builder chooses a split at each internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Axis cycles with depth (`depth mod 3`), split at the median by count.
    FixedAxis,
    /// Exhaustive surface area heuristic over all three axes.
    #[default]
    SurfaceArea,
}

/// Construction parameters consumed by the hierarchy builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Split policy.
    pub split_policy: SplitPolicy,
    /// Nodes at this depth become leaves regardless of primitive count.
    pub max_depth: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Features::default().build_config()
    }
}

/// Feature flags selected by the renderer.
///
/// Loadable from TOML; missing keys take their defaults:
///
/// ```
/// use lumen_accel::{Features, SplitPolicy};
///
/// let features = Features::from_toml_str(r#"
///     normal_interp = true
///     split_policy = "fixed_axis"
///     max_depth = 16
/// "#).unwrap();
/// assert!(features.accel_structure);
/// assert_eq!(features.split_policy, SplitPolicy::FixedAxis);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Use the hierarchy. When false every query tests every primitive.
    pub accel_structure: bool,
    /// Blend vertex normals with the hit's barycentric coordinates.
    pub normal_interp: bool,
    /// Blend vertex texture coordinates with the hit's barycentric coordinates.
    pub texture_mapping: bool,
    /// Split policy used while building.
    pub split_policy: SplitPolicy,
    /// Maximum tree depth, root being depth 0.
    pub max_depth: u32,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            accel_structure: true,
            normal_interp: false,
            texture_mapping: false,
            split_policy: SplitPolicy::SurfaceArea,
            max_depth: 10,
        }
    }
}

impl Features {
    /// Parse and validate features from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let features: Features = toml::from_str(text)?;
        features.validate()?;
        Ok(features)
    }

    /// Read, parse and validate a TOML features file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::InvalidSettings(format!(
                "max_depth must be between 1 and {MAX_SUPPORTED_DEPTH}, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// The subset of flags the builder needs.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            split_policy: self.split_policy,
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let features = Features::default();
        assert!(features.accel_structure);
        assert!(!features.normal_interp);
        assert!(!features.texture_mapping);
        assert_eq!(features.split_policy, SplitPolicy::SurfaceArea);
        assert_eq!(features.max_depth, 10);
        assert!(features.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Features::from_toml_str("").unwrap(), Features::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let features = Features::from_toml_str(
            r#"
            accel_structure = false
            normal_interp = true
            texture_mapping = true
            split_policy = "surface_area"
            max_depth = 20
            "#,
        )
        .unwrap();
        assert!(!features.accel_structure);
        assert!(features.normal_interp);
        assert!(features.texture_mapping);
        assert_eq!(features.max_depth, 20);
    }

    #[test]
    fn test_invalid_depth() {
        let err = Features::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings(_)));

        let err = Features::from_toml_str("max_depth = 65").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings(_)));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let err = Features::from_toml_str(r#"split_policy = "binned""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Features::load("/nonexistent/lumen-features.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let features = Features {
            split_policy: SplitPolicy::FixedAxis,
            ..Features::default()
        };
        let text = toml::to_string(&features).unwrap();
        assert_eq!(Features::from_toml_str(&text).unwrap(), features);
    }
}
