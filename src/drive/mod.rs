// Drive control for a four-wheel mecanum base
//
// Provides:
// - Mecanum mixing with ratio-preserving normalization and speed tiers
// - Two-controller priority resolution and facing transforms
// - The per-tick teleop pipeline tying them together
// - A drive train forwarding wheel powers to the motors

pub mod mixer;
pub mod priority;
pub mod teleop;
pub mod train;

pub use mixer::{
    compute_wheel_powers, InputSample, MixerConfig, ModifierState, SpeedTier, WheelPowers,
};
pub use priority::{Authority, Facing, PriorityPolicy, SourceConfig};
pub use teleop::{DriveOutput, Teleop};
pub use train::{DriveInit, DriveTrain, DriveTrainConfig};
