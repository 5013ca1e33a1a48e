// Per-tick teleop pipeline: gamepads -> authority -> facing -> tier -> mixer

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::mixer::{compute_wheel_powers, MixerConfig, ModifierState, SpeedTier, WheelPowers};
use super::priority::{Authority, PriorityPolicy};
use crate::gamepad::{Gamepad, Key};

/// Result of one teleop tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveOutput {
    pub powers: WheelPowers,
    pub authority: Authority,
    pub tier: SpeedTier,
}

impl DriveOutput {
    /// No source drives; all wheels stopped
    pub fn stopped() -> Self {
        Self {
            powers: WheelPowers::zero(),
            authority: Authority::None,
            tier: SpeedTier::Normal,
        }
    }
}

/// Mixed-input drive pipeline
#[derive(Debug, Clone)]
pub struct Teleop {
    mixer: MixerConfig,
    policy: PriorityPolicy,
    speed_factor: f32,
    last_authority: Option<Authority>,
}

impl Teleop {
    pub fn new(mixer: MixerConfig, policy: PriorityPolicy, speed_factor: f32) -> Self {
        Self {
            mixer,
            policy,
            speed_factor,
            last_authority: None,
        }
    }

    pub fn mixer(&self) -> &MixerConfig {
        &self.mixer
    }

    pub fn policy(&self) -> &PriorityPolicy {
        &self.policy
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn set_speed_factor(&mut self, speed_factor: f32) {
        self.speed_factor = speed_factor;
    }

    /// Compute this tick's wheel powers from both controllers
    pub fn update(&mut self, primary: &Gamepad, secondary: &Gamepad) -> DriveOutput {
        let authority = self.policy.resolve(primary, secondary);
        if self.last_authority != Some(authority) {
            info!("Drive authority: {:?}", authority);
            self.last_authority = Some(authority);
        }

        let (pad, facing) = match (authority, self.policy.facing(authority)) {
            (Authority::Primary, Some(facing)) => (primary, facing),
            (Authority::Secondary, Some(facing)) => (secondary, facing),
            _ => return DriveOutput::stopped(),
        };

        let input = facing.apply(
            pad.float(Key::LeftStickX),
            pad.float(Key::LeftStickY),
            pad.float(Key::RightStickX),
        );
        let tier = SpeedTier::from_modifiers(ModifierState {
            primary_held: pad.pressed(Key::LeftBumper),
            secondary_held: pad.pressed(Key::RightBumper),
        });
        let powers = compute_wheel_powers(input, self.speed_factor, tier, &self.mixer);

        debug!(
            "Wheel powers ({:?}): fl={:.3}, fr={:.3}, bl={:.3}, br={:.3}",
            tier, powers.front_left, powers.front_right, powers.back_left, powers.back_right
        );

        DriveOutput {
            powers,
            authority,
            tier,
        }
    }
}

impl Default for Teleop {
    fn default() -> Self {
        Self::new(MixerConfig::default(), PriorityPolicy::default(), 1.0)
    }
}
