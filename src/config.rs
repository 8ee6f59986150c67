//! Tunable settings for a zoo session.

use std::time::Duration;

use thiserror::Error;

use crate::controller::FramePolicy;

/// Errors raised by [`ZooConfig::validate`] and TOML loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Display scale must be at least 1
    #[error("Display scale must be at least 1")]
    ZeroScale,
    /// Pulse steps must be spaced by a non-zero delay
    #[error("Pulse step delay must be non-zero")]
    ZeroPulseStep,
    /// The TOML source could not be parsed
    #[cfg(feature = "toml")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Pointer mapping parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointerConfig {
    /// Frames subtracted after dividing by the frame width, so the cursor
    /// lines up with the visible crop window
    pub calibration: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { calibration: 2.0 }
    }
}

/// Pet pulse timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseConfig {
    /// Delay between consecutive pulse steps in milliseconds
    pub step_ms: u64,
    /// Sprites with more frames than this get a third step
    pub long_sprite_threshold: u32,
}

impl PulseConfig {
    /// Delay between steps as a [`Duration`].
    #[inline]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            step_ms: 75,
            long_sprite_threshold: 20,
        }
    }
}

/// Settings for a [`Zoo`](crate::Zoo) session.
///
/// All fields are optional in TOML and fall back to the defaults below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZooConfig {
    /// Display scale versus native sprite size
    pub display_scale: u32,
    /// Prefix for asset URLs (e.g. a public URL), without trailing slash
    pub asset_root: String,
    pub pointer: PointerConfig,
    pub pulse: PulseConfig,
    /// How pointer-driven frame indices are applied
    pub frame_policy: FramePolicy,
}

impl Default for ZooConfig {
    fn default() -> Self {
        Self {
            display_scale: 2,
            asset_root: String::new(),
            pointer: PointerConfig::default(),
            pulse: PulseConfig::default(),
            frame_policy: FramePolicy::Passthrough,
        }
    }
}

impl ZooConfig {
    /// Parse and validate a config from TOML.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the display cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.pulse.step_ms == 0 {
            return Err(ConfigError::ZeroPulseStep);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ZooConfig::default();
        assert_eq!(config.display_scale, 2);
        assert_eq!(config.pointer.calibration, 2.0);
        assert_eq!(config.pulse.step(), Duration::from_millis(75));
        assert_eq!(config.pulse.long_sprite_threshold, 20);
        assert_eq!(config.frame_policy, FramePolicy::Passthrough);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values() {
        let config = ZooConfig {
            display_scale: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroScale));

        let config = ZooConfig {
            pulse: PulseConfig {
                step_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPulseStep));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn partial_toml() {
        let config = ZooConfig::from_toml_str(
            r#"
            asset_root = "/zoo"
            frame_policy = "clamp"

            [pulse]
            step_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.asset_root, "/zoo");
        assert_eq!(config.frame_policy, FramePolicy::Clamp);
        assert_eq!(config.pulse.step_ms, 50);
        assert_eq!(config.pulse.long_sprite_threshold, 20);
        assert_eq!(config.display_scale, 2);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_rejects_zero_scale() {
        assert_eq!(
            ZooConfig::from_toml_str("display_scale = 0"),
            Err(ConfigError::ZeroScale)
        );
    }
}
