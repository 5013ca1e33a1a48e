// Input source priority and facing transforms
//
// Up to two controllers can drive. Each tick exactly one of them (or none) is
// authoritative, and its stick axes are rotated to the facing it drives from.

use serde::{Deserialize, Serialize};

use super::mixer::InputSample;
use crate::gamepad::{Gamepad, Key};

/// Which physical direction a controller's "forward" maps to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl Facing {
    /// Rotate a raw stick pair into drive axes
    ///
    /// Raw Y follows the gamepad convention (forward is negative), so `Front`
    /// flips it. Rotation is never transformed by facing.
    pub fn apply(self, raw_x: f32, raw_y: f32, rotation: f32) -> InputSample {
        let (x, y) = match self {
            Facing::Front => (raw_x, -raw_y),
            Facing::Back => (-raw_x, raw_y),
            Facing::Left => (raw_y, raw_x),
            Facing::Right => (-raw_y, -raw_x),
        };
        InputSample::new(x, y, rotation)
    }
}

/// Per-source drive settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    pub facing: Facing,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            facing: Facing::Front,
        }
    }
}

/// The source that drives this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Primary,
    Secondary,
    None,
}

/// Rules deciding which controller drives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityPolicy {
    pub primary: SourceConfig,
    pub secondary: SourceConfig,
    /// Whether the secondary source may seize control with `override_key`
    pub secondary_can_override: bool,
    pub override_key: Key,
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self {
            primary: SourceConfig::default(),
            secondary: SourceConfig::default(),
            secondary_can_override: true,
            override_key: Key::Y,
        }
    }
}

impl PriorityPolicy {
    /// Only the primary controller drives
    pub fn single(facing: Facing) -> Self {
        Self {
            primary: SourceConfig {
                enabled: true,
                facing,
            },
            secondary: SourceConfig {
                enabled: false,
                ..Default::default()
            },
            secondary_can_override: false,
            ..Default::default()
        }
    }

    /// Decide which source is authoritative this tick
    ///
    /// The secondary drives when it is enabled and either the primary is
    /// disabled, the primary is idle, or the secondary holds the override key.
    pub fn resolve(&self, primary: &Gamepad, secondary: &Gamepad) -> Authority {
        let primary_idle = !self.primary.enabled || !primary.is_being_used();
        let overriding = self.secondary_can_override && secondary.pressed(self.override_key);

        if self.secondary.enabled && (primary_idle || overriding) {
            Authority::Secondary
        } else if self.primary.enabled {
            Authority::Primary
        } else {
            Authority::None
        }
    }

    pub fn facing(&self, authority: Authority) -> Option<Facing> {
        match authority {
            Authority::Primary => Some(self.primary.facing),
            Authority::Secondary => Some(self.secondary.facing),
            Authority::None => None,
        }
    }
}
