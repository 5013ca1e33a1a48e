// Four-motor mecanum drive train
//
// Owns the drive motors fetched from the hardware map and forwards each tick's
// wheel powers to them. Individual wheels can be disabled so their port can be
// reused for testing another mechanism.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mixer::WheelPowers;
use crate::config::DRIVE_MOTOR_NAMES;
use crate::hardware::{
    configured_motor, Actuator, Direction, HardwareError, HardwareMap, MotorSettings, Result,
    RunMode, ZeroPowerBehavior,
};

/// Mounting direction of each drive motor when driving forward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTrainConfig {
    pub directions: [Direction; 4],
}

impl Default for DriveTrainConfig {
    fn default() -> Self {
        // Left side motors are mirrored on a mecanum chassis
        Self {
            directions: [
                Direction::Reverse,
                Direction::Forward,
                Direction::Reverse,
                Direction::Forward,
            ],
        }
    }
}

/// How to bring up the drive motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveInit {
    /// Use the configured directions; false inverts every motor
    pub forward: bool,
    pub run_using_encoder: bool,
    pub zero_power: ZeroPowerBehavior,
}

impl Default for DriveInit {
    fn default() -> Self {
        Self {
            forward: true,
            run_using_encoder: false,
            zero_power: ZeroPowerBehavior::Float,
        }
    }
}

/// Drive train for a four-wheel mecanum base
///
/// Motors are indexed [front_left, front_right, back_left, back_right].
pub struct DriveTrain {
    config: DriveTrainConfig,
    motors: [Option<Box<dyn Actuator>>; 4],
    disabled: [bool; 4],
    initialized: bool,
}

impl DriveTrain {
    pub fn new(config: DriveTrainConfig) -> Self {
        Self {
            config,
            motors: [None, None, None, None],
            disabled: [false; 4],
            initialized: false,
        }
    }

    /// Mark wheels as disabled; they are skipped at init and when driving
    ///
    /// Disabling takes effect on the next tick. Changing the mask also marks the
    /// train uninitialized, so re-enabled wheels are fetched again by the next
    /// [`initialize`](Self::initialize).
    pub fn disable_motors(&mut self, disabled: [bool; 4]) {
        if disabled != self.disabled {
            debug!("Drive motor mask changed to {:?}", disabled);
            self.disabled = disabled;
            self.initialized = false;
        }
    }

    pub fn disabled(&self) -> [bool; 4] {
        self.disabled
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fetch and configure every enabled drive motor
    pub fn initialize(&mut self, hardware: &mut dyn HardwareMap, init: DriveInit) -> Result<()> {
        info!(
            "Initializing drive motors (forward={}, encoders={}, zero_power={:?})",
            init.forward, init.run_using_encoder, init.zero_power
        );

        let mode = if init.run_using_encoder {
            RunMode::RunUsingEncoder
        } else {
            RunMode::RunWithoutEncoder
        };

        for i in 0..4 {
            if self.disabled[i] {
                warn!("Drive motor {} disabled, skipping", DRIVE_MOTOR_NAMES[i]);
                self.motors[i] = None;
                continue;
            }

            let direction = if init.forward {
                self.config.directions[i]
            } else {
                self.config.directions[i].reversed()
            };
            let settings = MotorSettings::new()
                .mode(mode)
                .direction(direction)
                .zero_power(init.zero_power);

            self.motors[i] = Some(configured_motor(hardware, DRIVE_MOTOR_NAMES[i], &settings)?);
            debug!("Drive motor {} ready ({:?})", DRIVE_MOTOR_NAMES[i], direction);
        }

        self.initialized = true;
        info!("Drive motors initialized");
        Ok(())
    }

    /// Send wheel powers to every enabled motor
    pub fn apply(&mut self, powers: &WheelPowers) -> Result<()> {
        for (i, power) in powers.as_array().into_iter().enumerate() {
            if self.disabled[i] {
                continue;
            }
            let motor = self.motors[i]
                .as_mut()
                .ok_or(HardwareError::DriveMotorMissing {
                    name: DRIVE_MOTOR_NAMES[i],
                })?;
            motor.set_power(power);
        }
        Ok(())
    }

    /// Stop all enabled motors
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping drive motors");
        self.apply(&WheelPowers::zero())
    }
}
