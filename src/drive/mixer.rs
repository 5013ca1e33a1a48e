// Mecanum drive mixing for a four-wheel holonomic base
// Converts a (strafe, forward, rotation) intent into per-wheel motor powers.

use serde::{Deserialize, Serialize};

/// Tuned to counteract imperfect strafing on mecanum rollers
pub const DEFAULT_STRAFE_COEFFICIENT: f32 = 1.5;

/// Divisor applied while one modifier is held
pub const DEFAULT_PRECISION_DIVISOR: f32 = 2.0;

/// Divisor applied while both modifiers are held
pub const DEFAULT_SLOW_DIVISOR: f32 = 5.0;

/// One tick of drive intent, each axis in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl InputSample {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    /// Scale all three axes uniformly
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.rotation * k)
    }
}

/// Modifier buttons that select the speed tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub primary_held: bool,
    pub secondary_held: bool,
}

/// Discrete speed-reduction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    #[default]
    Normal,
    /// One modifier held
    Precision,
    /// Both modifiers held
    Slow,
}

impl SpeedTier {
    pub fn from_modifiers(modifiers: ModifierState) -> Self {
        match (modifiers.primary_held, modifiers.secondary_held) {
            (true, true) => SpeedTier::Slow,
            (true, false) | (false, true) => SpeedTier::Precision,
            (false, false) => SpeedTier::Normal,
        }
    }
}

/// Tuning for the mixer; defaults match the reference drive base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    pub strafe_coefficient: f32,
    pub precision_divisor: f32,
    pub slow_divisor: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            strafe_coefficient: DEFAULT_STRAFE_COEFFICIENT,
            precision_divisor: DEFAULT_PRECISION_DIVISOR,
            slow_divisor: DEFAULT_SLOW_DIVISOR,
        }
    }
}

impl MixerConfig {
    /// Divisor bound to a tier; `Normal` is always 1
    pub fn divisor(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::Normal => 1.0,
            SpeedTier::Precision => self.precision_divisor,
            SpeedTier::Slow => self.slow_divisor,
        }
    }
}

/// Motor powers for the four drive wheels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelPowers {
    pub front_left: f32,
    pub front_right: f32,
    pub back_left: f32,
    pub back_right: f32,
}

impl WheelPowers {
    pub fn new(front_left: f32, front_right: f32, back_left: f32, back_right: f32) -> Self {
        Self {
            front_left,
            front_right,
            back_left,
            back_right,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns powers as array [front_left, front_right, back_left, back_right]
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }

    /// Largest absolute power of the four wheels
    pub fn max_magnitude(&self) -> f32 {
        self.as_array().iter().fold(0.0f32, |m, p| m.max(p.abs()))
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(
            f(self.front_left),
            f(self.front_right),
            f(self.back_left),
            f(self.back_right),
        )
    }
}

/// Mix an input sample into raw (un-normalized) wheel powers
pub fn mix(input: InputSample, strafe_coefficient: f32) -> WheelPowers {
    let x = input.x * strafe_coefficient;
    let y = input.y;
    let r = input.rotation;

    WheelPowers {
        front_left: y + x + r,
        front_right: y - x - r,
        back_left: y - x + r,
        back_right: y + x - r,
    }
}

/// Divide all four powers by the largest magnitude when it exceeds 1
///
/// Scaling uniformly keeps the ratio between wheels, so the robot still travels
/// in the commanded direction. Clamping each wheel on its own would bend the
/// heading.
pub fn normalize(powers: WheelPowers) -> WheelPowers {
    let max = powers.max_magnitude().max(1.0);
    powers.map(|p| p / max)
}

/// Convert a drive intent into wheel powers
///
/// # Arguments
/// * `input` - strafe, forward and rotation axes, each expected in [-1, 1]
/// * `speed_factor` - overall multiplier, any positive value
/// * `tier` - speed tier chosen from the modifier buttons
/// * `config` - strafe coefficient and tier divisors
///
/// Inputs are not validated: values outside [-1, 1] propagate as given. A
/// divisor of zero is a caller error and yields non-finite powers.
pub fn compute_wheel_powers(
    input: InputSample,
    speed_factor: f32,
    tier: SpeedTier,
    config: &MixerConfig,
) -> WheelPowers {
    let normalized = normalize(mix(input, config.strafe_coefficient));
    let scale = speed_factor / config.divisor(tier);
    normalized.map(|p| p * scale)
}
