// Define message types for the runtime

use serde::{Deserialize, Serialize};

use crate::drive::mixer::{SpeedTier, WheelPowers};
use crate::drive::priority::Authority;
use crate::drive::teleop::DriveOutput;

// Gamepad snapshots from the driver station -> runtime are `crate::gamepad::Gamepad`

// Actuation output from runtime -> drive hardware
// Has default values because a stale or absent input still publishes a stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveActuation {
    pub front_left: f32,
    pub front_right: f32,
    pub back_left: f32,
    pub back_right: f32,
    pub authority: Authority,
    pub tier: SpeedTier,
}

impl Default for DriveActuation {
    fn default() -> Self {
        Self::from(&DriveOutput::stopped())
    }
}

impl From<&DriveOutput> for DriveActuation {
    fn from(out: &DriveOutput) -> Self {
        Self {
            front_left: out.powers.front_left,
            front_right: out.powers.front_right,
            back_left: out.powers.back_left,
            back_right: out.powers.back_right,
            authority: out.authority,
            tier: out.tier,
        }
    }
}

impl DriveActuation {
    pub fn powers(&self) -> WheelPowers {
        WheelPowers::new(
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        )
    }
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    InputStale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actuation_is_stop() {
        let act = DriveActuation::default();
        assert_eq!(act.powers(), WheelPowers::zero());
        assert_eq!(act.authority, Authority::None);
    }

    #[test]
    fn test_actuation_json_shape() {
        let out = DriveOutput {
            powers: WheelPowers::new(0.5, -0.5, 0.25, -0.25),
            authority: Authority::Secondary,
            tier: SpeedTier::Precision,
        };
        let json = serde_json::to_value(DriveActuation::from(&out)).unwrap();
        assert_eq!(json["front_right"], -0.5);
        assert_eq!(json["authority"], "secondary");
        assert_eq!(json["tier"], "precision");
    }

    #[test]
    fn test_health_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RuntimeHealth::InputStale).unwrap(),
            "\"input_stale\""
        );
    }
}
