//! Chamber configuration
//!
//! Loaded from JSON by hosts that want something other than the defaults.
//! Grid geometry is fixed at build time and is not configurable here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_BALLS, GRAVITY};
use crate::error::ChamberError;
use crate::render::ColorPattern;
use crate::sim::{Gravity, Resolver};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamberConfig {
    /// Ball buffer size used when `init` is asked for zero balls
    pub default_max_balls: usize,
    /// Constant acceleration applied to every ball (units/s²)
    pub gravity: Vec2,
    /// Brick collision strategy
    pub resolver: Resolver,
    /// Pattern for the first game
    pub first_pattern: ColorPattern,
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self {
            default_max_balls: DEFAULT_MAX_BALLS,
            gravity: Vec2::new(0.0, -GRAVITY),
            resolver: Resolver::Neighborhood,
            first_pattern: ColorPattern::Rainbow,
        }
    }
}

impl ChamberConfig {
    pub fn from_json(json: &str) -> Result<Self, ChamberError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ChamberError::InvalidConfig(e.to_string()))?;
        if config.default_max_balls == 0 {
            return Err(ChamberError::InvalidConfig(
                "default_max_balls must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Integrator built from the configured gravity
    pub fn integrator(&self) -> Gravity {
        Gravity {
            acceleration: self.gravity,
        }
    }
}
