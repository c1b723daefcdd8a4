use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning for the free-look camera. Every field has a default, so a JSON
/// document only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Position,
    // facing direction before the first look update, need not be unit length
    pub front: Vec3,
    pub world_up: Vec3,

    // degrees
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub pitch_limit: f32,

    /// Degrees of look rotation per pixel of cursor travel.
    pub sensitivity: f32,
    /// World units per second while a movement key is held.
    pub movement_speed: f32,

    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Position::new(0.0, 0.0, 4.0),
            front: Vec3::new(0.5, 0.5, -1.0),
            world_up: Vec3::Y,

            yaw: 0.0,
            pitch: 0.0,
            zoom: 45.0,
            min_zoom: 1.0,
            max_zoom: 45.0,
            pitch_limit: 89.0,

            sensitivity: 0.1,
            movement_speed: 2.5,

            aspect_ratio: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl CameraConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return invalid("aspect_ratio", "must be finite and positive");
        }
        if !(self.near > 0.0) {
            return invalid("near", "must be positive");
        }
        if !(self.far > self.near) {
            return invalid("far", "must be greater than near");
        }
        if !(self.min_zoom > 0.0) {
            return invalid("min_zoom", "must be positive");
        }
        if !(self.max_zoom >= self.min_zoom) || self.max_zoom >= 180.0 {
            return invalid("max_zoom", "must lie between min_zoom and 180");
        }
        if !(0.0..90.0).contains(&self.pitch_limit) {
            return invalid("pitch_limit", "must lie in [0, 90)");
        }
        if self.world_up.try_normalize().is_none() {
            return invalid("world_up", "must be a non-zero vector");
        }
        if !self.sensitivity.is_finite() || !self.movement_speed.is_finite() {
            return invalid("sensitivity", "sensitivity and movement_speed must be finite");
        }

        Ok(())
    }
}
