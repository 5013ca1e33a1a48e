// Hardware seam: motors, servos, one-call motor configuration, alias lookup
//
// The vendor SDK sits behind `HardwareMap`, `Actuator` and `Servo`; this crate
// only forwards settings, powers and positions through them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error types for hardware lookup
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    #[error("No device named '{name}' in the hardware map")]
    UnknownDevice { name: String },

    #[error("No hardware name has the alias '{alias}'")]
    UnknownAlias { alias: String },

    #[error("Drive motor '{name}' is not initialized")]
    DriveMotorMissing { name: &'static str },
}

pub type Result<T> = std::result::Result<T, HardwareError>;

/// Motor controller run modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    RunWithoutEncoder,
    RunUsingEncoder,
    RunToPosition,
    StopAndResetEncoder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// What a motor does at zero power
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPowerBehavior {
    Brake,
    #[default]
    Float,
}

/// A single motor as exposed by the vendor SDK
pub trait Actuator {
    fn set_power(&mut self, power: f32);
    fn set_mode(&mut self, mode: RunMode);
    fn set_direction(&mut self, direction: Direction);
    fn set_zero_power_behavior(&mut self, behavior: ZeroPowerBehavior);
}

/// A positional servo, position in [0, 1]
pub trait Servo {
    fn set_position(&mut self, position: f32);
}

/// Device lookup by hardware name
pub trait HardwareMap {
    fn motor(&mut self, name: &str) -> Result<Box<dyn Actuator>>;
    fn servo(&mut self, name: &str) -> Result<Box<dyn Servo>>;
}

/// Settings applied when fetching a motor; `None` leaves the setting unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorSettings {
    pub mode: Option<RunMode>,
    pub direction: Option<Direction>,
    pub zero_power: Option<ZeroPowerBehavior>,
}

impl MotorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn zero_power(mut self, behavior: ZeroPowerBehavior) -> Self {
        self.zero_power = Some(behavior);
        self
    }

    /// Apply the set fields to a motor
    ///
    /// Switching to `RunUsingEncoder` resets the encoder first.
    pub fn apply(&self, motor: &mut dyn Actuator) {
        if let Some(mode) = self.mode {
            if mode == RunMode::RunUsingEncoder {
                motor.set_mode(RunMode::StopAndResetEncoder);
            }
            motor.set_mode(mode);
        }
        if let Some(direction) = self.direction {
            motor.set_direction(direction);
        }
        if let Some(behavior) = self.zero_power {
            motor.set_zero_power_behavior(behavior);
        }
    }
}

/// Fetch a motor by hardware name and apply settings to it
pub fn configured_motor(
    hardware: &mut dyn HardwareMap,
    name: &str,
    settings: &MotorSettings,
) -> Result<Box<dyn Actuator>> {
    let mut motor = hardware.motor(name)?;
    settings.apply(motor.as_mut());
    Ok(motor)
}

/// Friendly names for hardware map entries, e.g. `"leftLift" -> ["lift", "elevator"]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HardwareAliases(BTreeMap<String, Vec<String>>);

impl HardwareAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, aliases: Vec<String>) -> &mut Self {
        self.0.insert(name.into(), aliases);
        self
    }

    /// Hardware name for an alias; a hardware name resolves to itself
    ///
    /// Names are searched in sorted order, so an alias shared by two entries
    /// resolves to the first name.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, aliases)| name.as_str() == alias || aliases.iter().any(|a| a == alias))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory hardware for tests

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    /// Everything a mock motor has been told
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct MotorLog {
        pub power: Option<f32>,
        pub modes: Vec<RunMode>,
        pub direction: Option<Direction>,
        pub zero_power: Option<ZeroPowerBehavior>,
    }

    pub struct MockMotor(Rc<RefCell<MotorLog>>);

    impl Actuator for MockMotor {
        fn set_power(&mut self, power: f32) {
            self.0.borrow_mut().power = Some(power);
        }
        fn set_mode(&mut self, mode: RunMode) {
            self.0.borrow_mut().modes.push(mode);
        }
        fn set_direction(&mut self, direction: Direction) {
            self.0.borrow_mut().direction = Some(direction);
        }
        fn set_zero_power_behavior(&mut self, behavior: ZeroPowerBehavior) {
            self.0.borrow_mut().zero_power = Some(behavior);
        }
    }

    pub struct MockServo(Rc<RefCell<Option<f32>>>);

    impl Servo for MockServo {
        fn set_position(&mut self, position: f32) {
            *self.0.borrow_mut() = Some(position);
        }
    }

    /// Hardware map holding a fixed set of named motors and servos
    #[derive(Default)]
    pub struct MockHardware {
        motors: HashMap<String, Rc<RefCell<MotorLog>>>,
        servos: HashMap<String, Rc<RefCell<Option<f32>>>>,
        pub fetches: Vec<String>,
    }

    impl MockHardware {
        pub fn with_motors(names: &[&str]) -> Self {
            Self {
                motors: names
                    .iter()
                    .map(|n| (n.to_string(), Rc::new(RefCell::new(MotorLog::default()))))
                    .collect(),
                ..Default::default()
            }
        }

        pub fn add_servo(&mut self, name: &str) {
            self.servos.insert(name.to_string(), Rc::new(RefCell::new(None)));
        }

        pub fn log(&self, name: &str) -> MotorLog {
            self.motors[name].borrow().clone()
        }

        pub fn servo_position(&self, name: &str) -> Option<f32> {
            *self.servos[name].borrow()
        }
    }

    impl HardwareMap for MockHardware {
        fn motor(&mut self, name: &str) -> Result<Box<dyn Actuator>> {
            self.fetches.push(name.to_string());
            match self.motors.get(name) {
                Some(log) => Ok(Box::new(MockMotor(Rc::clone(log)))),
                None => Err(HardwareError::UnknownDevice {
                    name: name.to_string(),
                }),
            }
        }

        fn servo(&mut self, name: &str) -> Result<Box<dyn Servo>> {
            self.fetches.push(name.to_string());
            match self.servos.get(name) {
                Some(position) => Ok(Box::new(MockServo(Rc::clone(position)))),
                None => Err(HardwareError::UnknownDevice {
                    name: name.to_string(),
                }),
            }
        }
    }
}
