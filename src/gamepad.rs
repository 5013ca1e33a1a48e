// Gamepad snapshot model and named control mapping
//
// A `Gamepad` is one controller's state captured for a single control-loop tick.
// It is published by the driver station (or the keyboard demo) and consumed by
// the teleop pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Every axis and button the pipeline can read from a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    // Analog axes
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,

    // Digital buttons
    A,
    B,
    X,
    Y,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftBumper,
    RightBumper,
    LeftStickButton,
    RightStickButton,
    Back,
    Start,
    Guide,
}

impl Key {
    /// Whether this key is an analog axis rather than a button
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            Key::LeftStickX
                | Key::LeftStickY
                | Key::RightStickX
                | Key::RightStickY
                | Key::LeftTrigger
                | Key::RightTrigger
        )
    }
}

/// Triggers read as pressed once pulled past this point
const TRIGGER_PRESS_THRESHOLD: f32 = 0.5;

/// One controller's state for a single tick
///
/// Stick axes are in [-1, 1] with the vendor convention that pushing a stick
/// forward gives a negative Y. Triggers are in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gamepad {
    pub left_stick_x: f32,
    pub left_stick_y: f32,
    pub right_stick_x: f32,
    pub right_stick_y: f32,
    pub left_trigger: f32,
    pub right_trigger: f32,

    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
    pub left_stick_button: bool,
    pub right_stick_button: bool,
    pub back: bool,
    pub start: bool,
    pub guide: bool,
}

impl Gamepad {
    /// A controller with every axis and button at rest
    pub fn at_rest() -> Self {
        Self::default()
    }

    /// Analog value of a key; buttons read as 1.0 when held, 0.0 otherwise
    pub fn float(&self, key: Key) -> f32 {
        match key {
            Key::LeftStickX => self.left_stick_x,
            Key::LeftStickY => self.left_stick_y,
            Key::RightStickX => self.right_stick_x,
            Key::RightStickY => self.right_stick_y,
            Key::LeftTrigger => self.left_trigger,
            Key::RightTrigger => self.right_trigger,
            button => {
                if self.pressed(button) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Digital value of a key
    ///
    /// Stick axes count as pressed when off center, triggers once pulled past
    /// half travel.
    pub fn pressed(&self, key: Key) -> bool {
        match key {
            Key::LeftStickX => self.left_stick_x != 0.0,
            Key::LeftStickY => self.left_stick_y != 0.0,
            Key::RightStickX => self.right_stick_x != 0.0,
            Key::RightStickY => self.right_stick_y != 0.0,
            Key::LeftTrigger => self.left_trigger > TRIGGER_PRESS_THRESHOLD,
            Key::RightTrigger => self.right_trigger > TRIGGER_PRESS_THRESHOLD,
            Key::A => self.a,
            Key::B => self.b,
            Key::X => self.x,
            Key::Y => self.y,
            Key::DpadUp => self.dpad_up,
            Key::DpadDown => self.dpad_down,
            Key::DpadLeft => self.dpad_left,
            Key::DpadRight => self.dpad_right,
            Key::LeftBumper => self.left_bumper,
            Key::RightBumper => self.right_bumper,
            Key::LeftStickButton => self.left_stick_button,
            Key::RightStickButton => self.right_stick_button,
            Key::Back => self.back,
            Key::Start => self.start,
            Key::Guide => self.guide,
        }
    }

    /// True when any axis or button is away from its rest value
    pub fn is_being_used(&self) -> bool {
        *self != Self::at_rest()
    }
}

/// Named controls for an op mode, e.g. `"intake" -> RightTrigger`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlMap(HashMap<String, Key>);

impl ControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a control name to a key, replacing any previous binding
    pub fn bind(&mut self, name: impl Into<String>, key: Key) -> &mut Self {
        self.0.insert(name.into(), key);
        self
    }

    /// Look up the key bound to a control name
    pub fn get(&self, name: &str) -> Option<Key> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Key)> for ControlMap {
    fn from_iter<I: IntoIterator<Item = (String, Key)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_gamepad_is_not_used() {
        assert!(!Gamepad::at_rest().is_being_used());
    }

    #[test]
    fn test_any_input_marks_gamepad_used() {
        let stick = Gamepad {
            right_stick_y: -0.2,
            ..Default::default()
        };
        assert!(stick.is_being_used());

        let button = Gamepad {
            dpad_left: true,
            ..Default::default()
        };
        assert!(button.is_being_used());

        // A light trigger touch is not a "press" but still counts as use
        let trigger = Gamepad {
            left_trigger: 0.1,
            ..Default::default()
        };
        assert!(!trigger.pressed(Key::LeftTrigger));
        assert!(trigger.is_being_used());
    }

    #[test]
    fn test_float_reads_axes_and_buttons() {
        let pad = Gamepad {
            left_stick_x: 0.25,
            right_trigger: 0.75,
            a: true,
            ..Default::default()
        };
        assert_eq!(pad.float(Key::LeftStickX), 0.25);
        assert_eq!(pad.float(Key::RightTrigger), 0.75);
        assert_eq!(pad.float(Key::A), 1.0);
        assert_eq!(pad.float(Key::B), 0.0);
    }

    #[test]
    fn test_pressed_reads_triggers_with_threshold() {
        let pad = Gamepad {
            right_trigger: 0.6,
            ..Default::default()
        };
        assert!(pad.pressed(Key::RightTrigger));
        assert!(!pad.pressed(Key::LeftTrigger));
        assert!(Key::RightTrigger.is_axis());
        assert!(!Key::RightBumper.is_axis());
    }

    #[test]
    fn test_control_map_lookup() {
        let mut controls = ControlMap::new();
        controls.bind("intake", Key::RightTrigger).bind("lift", Key::DpadUp);

        assert_eq!(controls.get("intake"), Some(Key::RightTrigger));
        assert_eq!(controls.get("lift"), Some(Key::DpadUp));
        assert_eq!(controls.get("claw"), None);
        assert_eq!(controls.len(), 2);
    }

    #[test]
    fn test_gamepad_deserializes_partial_json() {
        let pad: Gamepad =
            serde_json::from_str(r#"{"left_stick_y": -1.0, "left_bumper": true}"#).unwrap();
        assert_eq!(pad.left_stick_y, -1.0);
        assert!(pad.left_bumper);
        assert!(!pad.right_bumper);
    }
}
