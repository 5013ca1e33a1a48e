// Loop rate, timeouts, topics, drive tuning
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drive::mixer::MixerConfig;
use crate::drive::priority::PriorityPolicy;
use crate::drive::train::DriveTrainConfig;
use crate::gamepad::ControlMap;
use crate::hardware::HardwareAliases;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Gamepad input timeout for watchdog
pub const INPUT_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_GAMEPAD1: &str = "ftc/input/gamepad1"; // primary driver
pub const TOPIC_GAMEPAD2: &str = "ftc/input/gamepad2"; // secondary driver
pub const TOPIC_RT_DRIVE: &str = "ftc/rt/drive"; // wheel powers
pub const TOPIC_HEALTH: &str = "ftc/state/health"; // health status

// Drive motor names in the hardware map: [front_left, front_right, back_left, back_right]
pub const DRIVE_MOTOR_NAMES: [&str; 4] = [
    "frontLeftMotor",
    "frontRightMotor",
    "backLeftMotor",
    "backRightMotor",
];

/// Error types for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a teleop program can tune without recompiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleopConfig {
    pub mixer: MixerConfig,
    pub speed_factor: f32,
    pub policy: PriorityPolicy,
    pub controls: ControlMap,
    pub aliases: HardwareAliases,
    pub drive_train: DriveTrainConfig,
    pub loop_hz: u64,
    pub input_timeout_ms: u64,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            mixer: MixerConfig::default(),
            speed_factor: 1.0,
            policy: PriorityPolicy::default(),
            controls: ControlMap::default(),
            aliases: HardwareAliases::default(),
            drive_train: DriveTrainConfig::default(),
            loop_hz: LOOP_HZ,
            input_timeout_ms: INPUT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl TeleopConfig {
    /// Load a JSON config; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn loop_period(&self) -> Duration {
        Duration::from_millis((1000 / self.loop_hz.max(1)).max(1))
    }

    pub fn input_timeout(&self) -> Duration {
        Duration::from_millis(self.input_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::priority::Facing;
    use crate::gamepad::Key;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TeleopConfig::from_json("{}").unwrap();
        assert_eq!(config, TeleopConfig::default());
        assert_eq!(config.mixer.strafe_coefficient, 1.5);
        assert_eq!(config.mixer.precision_divisor, 2.0);
        assert_eq!(config.mixer.slow_divisor, 5.0);
        assert_eq!(config.loop_period(), Duration::from_millis(20));
        assert_eq!(config.input_timeout(), INPUT_TIMEOUT);
    }

    #[test]
    fn test_partial_config() {
        let config = TeleopConfig::from_json(
            r#"{
                "mixer": { "strafe_coefficient": 1.2 },
                "speed_factor": 0.8,
                "policy": {
                    "secondary": { "enabled": true, "facing": "left" },
                    "override_key": "guide"
                },
                "controls": { "intake": "right_trigger" },
                "aliases": { "liftMotor": ["lift"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.mixer.strafe_coefficient, 1.2);
        assert_eq!(config.mixer.slow_divisor, 5.0);
        assert_eq!(config.speed_factor, 0.8);
        assert_eq!(config.policy.secondary.facing, Facing::Left);
        assert_eq!(config.policy.primary.facing, Facing::Front);
        assert_eq!(config.policy.override_key, Key::Guide);
        assert_eq!(config.controls.get("intake"), Some(Key::RightTrigger));
        assert_eq!(config.aliases.resolve("lift"), Some("liftMotor"));
    }

    #[test]
    fn test_invalid_config() {
        let err = TeleopConfig::from_json(r#"{"speed_factor": "fast"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TeleopConfig::load("/nonexistent/teleop.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
