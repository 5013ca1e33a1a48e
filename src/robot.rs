// Robot facade for a teleop op mode
//
// Bundles the hardware map, drive train, teleop pipeline, delay gates and the
// name tables an op mode needs, so the op mode's loop is a handful of calls.

use tracing::{debug, info};

use crate::config::TeleopConfig;
use crate::drive::{Authority, DriveInit, DriveTrain, Teleop, WheelPowers};
use crate::gamepad::{ControlMap, Gamepad, Key};
use crate::gate::DelayGates;
use crate::hardware::{
    configured_motor, Actuator, HardwareAliases, HardwareError, HardwareMap, MotorSettings, Result,
    Servo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotStatus {
    Initializing,
    Ready,
    /// Drive updates are running but no controller may drive
    Idle,
    Stopped,
    Driving,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveMode {
    Omni,
    Tank,
    #[default]
    Stopped,
}

pub struct Robot<H: HardwareMap> {
    hardware: H,
    drive: DriveTrain,
    teleop: Teleop,
    gates: DelayGates,
    controls: ControlMap,
    aliases: HardwareAliases,
    status: RobotStatus,
    drive_mode: DriveMode,
}

impl<H: HardwareMap> Robot<H> {
    pub fn new(hardware: H, config: TeleopConfig) -> Self {
        Self {
            hardware,
            drive: DriveTrain::new(config.drive_train),
            teleop: Teleop::new(config.mixer, config.policy, config.speed_factor),
            gates: DelayGates::new(),
            controls: config.controls,
            aliases: config.aliases,
            status: RobotStatus::Ready,
            drive_mode: DriveMode::default(),
        }
    }

    pub fn status(&self) -> RobotStatus {
        self.status
    }

    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        self.drive_mode = mode;
    }

    pub fn teleop_mut(&mut self) -> &mut Teleop {
        &mut self.teleop
    }

    pub fn gates_mut(&mut self) -> &mut DelayGates {
        &mut self.gates
    }

    /// Key bound to a named control
    pub fn control(&self, name: &str) -> Option<Key> {
        self.controls.get(name)
    }

    /// Mark drive wheels [front_left, front_right, back_left, back_right] as disabled
    pub fn disable_drive_motors(&mut self, disabled: [bool; 4]) {
        self.drive.disable_motors(disabled);
    }

    /// Bring up the drive motors with explicit settings
    ///
    /// Without this call the first [`update_drive`](Self::update_drive) uses
    /// [`DriveInit::default`].
    pub fn initialize_drive(&mut self, init: DriveInit) -> Result<()> {
        let previous = self.status;
        self.status = RobotStatus::Initializing;
        if let Err(e) = self.drive.initialize(&mut self.hardware, init) {
            self.status = previous;
            return Err(e);
        }
        self.status = RobotStatus::Ready;
        Ok(())
    }

    /// Fetch a motor by hardware name, applying only the settings given
    pub fn motor(&mut self, name: &str, settings: &MotorSettings) -> Result<Box<dyn Actuator>> {
        configured_motor(&mut self.hardware, name, settings)
    }

    /// Fetch a motor by one of its aliases
    pub fn motor_by_alias(
        &mut self,
        alias: &str,
        settings: &MotorSettings,
    ) -> Result<Box<dyn Actuator>> {
        let name = self
            .aliases
            .resolve(alias)
            .ok_or_else(|| HardwareError::UnknownAlias {
                alias: alias.to_string(),
            })?
            .to_string();
        debug!("Alias '{}' resolved to '{}'", alias, name);
        self.motor(&name, settings)
    }

    /// Fetch a servo, moving it to `initial_position` when given
    pub fn servo(&mut self, name: &str, initial_position: Option<f32>) -> Result<Box<dyn Servo>> {
        let mut servo = self.hardware.servo(name)?;
        if let Some(position) = initial_position {
            servo.set_position(position);
        }
        Ok(servo)
    }

    /// Run one teleop tick and drive the wheels
    pub fn update_drive(&mut self, primary: &Gamepad, secondary: &Gamepad) -> Result<WheelPowers> {
        if !self.drive.is_initialized() {
            info!("Drive motors not initialized, using defaults");
            self.initialize_drive(DriveInit::default())?;
        }
        let out = self.teleop.update(primary, secondary);
        self.status = match out.authority {
            Authority::None => RobotStatus::Idle,
            _ => RobotStatus::Driving,
        };
        self.drive.apply(&out.powers)?;
        Ok(out.powers)
    }

    /// Stop the drive train
    pub fn stop(&mut self) -> Result<()> {
        self.status = RobotStatus::Stopped;
        if self.drive.is_initialized() {
            self.drive.stop()?;
        }
        Ok(())
    }

    /// See [`DelayGates::open_after_delay`]
    pub fn delay_gate_open(&mut self, name: &str, runtime: f64, delay: f64) -> bool {
        self.gates.open_after_delay(name, runtime, delay)
    }

    /// See [`DelayGates::close`]
    pub fn delay_gate_close(&mut self, name: &str) {
        self.gates.close(name);
    }

    /// See [`DelayGates::complete_once_after_delay`]
    pub fn delay_gate_complete(&mut self, name: &str, runtime: f64, delay: f64) -> bool {
        self.gates.complete_once_after_delay(name, runtime, delay)
    }
}
