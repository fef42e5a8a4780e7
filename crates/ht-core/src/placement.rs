//! Actuator placements and per-placement command adjustment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    TEMPLE_LIGHT_FACTOR, TEMPLE_THERMAL_FACTOR, TEMPLE_VIBRATION_FACTOR, WRIST_VIBRATION_FACTOR,
};
use crate::numeric::round2;
use crate::synth::HapticCommand;
use crate::tables::Waveform;

/// Where an actuator sits on the body. Serialized as its device address 1–4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Placement {
    RightWrist = 1,
    RightTemple = 2,
    LeftTemple = 3,
    LeftWrist = 4,
}

impl Placement {
    /// All placements in address order.
    pub const ALL: [Placement; 4] = [
        Placement::RightWrist,
        Placement::RightTemple,
        Placement::LeftTemple,
        Placement::LeftWrist,
    ];

    pub fn address(self) -> u8 {
        self as u8
    }

    pub fn from_address(address: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.address() == address)
    }

    pub fn name(self) -> &'static str {
        match self {
            Placement::RightWrist => "right_wrist",
            Placement::RightTemple => "right_temple",
            Placement::LeftTemple => "left_temple",
            Placement::LeftWrist => "left_wrist",
        }
    }

    pub fn is_temple(self) -> bool {
        matches!(self, Placement::RightTemple | Placement::LeftTemple)
    }

    pub fn is_wrist(self) -> bool {
        matches!(self, Placement::RightWrist | Placement::LeftWrist)
    }
}

impl From<Placement> for u8 {
    fn from(p: Placement) -> u8 {
        p.address()
    }
}

impl TryFrom<u8> for Placement {
    type Error = InvalidAddress;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        Placement::from_address(address).ok_or(InvalidAddress(address))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidAddress(pub u8);

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actuator address {} is not in 1..=4", self.0)
    }
}

impl std::error::Error for InvalidAddress {}

/// A placement paired with its own adjusted copy of the command list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionedCommandSet {
    #[serde(rename = "address")]
    pub placement: Placement,
    pub commands: Vec<HapticCommand>,
}

/// Rescale a command list for one placement. Returns fresh copies; the input
/// is untouched and no emotion is ever filtered out.
///
/// Temples get softer vibration, thermal and light, and the triple hum is
/// downgraded to the double hum. Wrists get a vibration boost that is not
/// re-clamped to 1.0.
pub fn adjust_for_placement(commands: &[HapticCommand], placement: Placement) -> Vec<HapticCommand> {
    commands
        .iter()
        .map(|base| {
            let mut cmd = base.clone();
            if placement.is_temple() {
                cmd.vibration.intensity = round2(cmd.vibration.intensity * TEMPLE_VIBRATION_FACTOR);
                cmd.thermal.intensity = round2(cmd.thermal.intensity * TEMPLE_THERMAL_FACTOR);
                cmd.light.intensity = round2(cmd.light.intensity * TEMPLE_LIGHT_FACTOR);
                if cmd.vibration.waveform == Waveform::TRIPLE_HUM {
                    cmd.vibration.waveform = Waveform::DOUBLE_HUM;
                }
            } else if placement.is_wrist() {
                cmd.vibration.intensity = round2(cmd.vibration.intensity * WRIST_VIBRATION_FACTOR);
            }
            cmd
        })
        .collect()
}

/// One independently adjusted command set per placement, addresses 1–4.
pub fn position_commands(commands: &[HapticCommand]) -> Vec<PositionedCommandSet> {
    Placement::ALL
        .iter()
        .map(|&placement| PositionedCommandSet {
            placement,
            commands: adjust_for_placement(commands, placement),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EmotionCategory;
    use crate::synth::{LightCommand, ThermalCommand, VibrationCommand};
    use crate::tables::Rgb;

    fn command(vibration: f64, waveform: Waveform) -> HapticCommand {
        HapticCommand {
            emotion: EmotionCategory::Fear,
            vibration: VibrationCommand {
                intensity: vibration,
                frequency: 195,
                waveform,
            },
            thermal: ThermalCommand {
                temperature: 10.0,
                intensity: 0.6,
            },
            light: LightCommand {
                rgb: Rgb([0, 0, 255]),
                intensity: 0.65,
            },
        }
    }

    #[test]
    fn test_address_mapping() {
        let addresses: Vec<u8> = Placement::ALL.iter().map(|p| p.address()).collect();
        assert_eq!(addresses, vec![1, 2, 3, 4]);
        assert_eq!(Placement::from_address(3), Some(Placement::LeftTemple));
        assert_eq!(Placement::from_address(0), None);
        assert_eq!(Placement::LeftWrist.name(), "left_wrist");
    }

    #[test]
    fn test_temple_adjustment() {
        let out = adjust_for_placement(&[command(0.85, Waveform::TRIPLE_HUM)], Placement::RightTemple);
        let c = &out[0];
        assert_eq!(c.vibration.intensity, 0.68);
        assert_eq!(c.thermal.intensity, 0.3);
        assert_eq!(c.light.intensity, 0.59);
        assert_eq!(c.vibration.waveform, Waveform::DOUBLE_HUM);
    }

    #[test]
    fn test_temple_keeps_other_waveforms() {
        let out = adjust_for_placement(&[command(0.5, Waveform::StrongClick33)], Placement::LeftTemple);
        assert_eq!(out[0].vibration.waveform, Waveform::StrongClick33);
    }

    #[test]
    fn test_wrist_boost_not_clamped() {
        let out = adjust_for_placement(&[command(1.0, Waveform::FALLBACK)], Placement::LeftWrist);
        assert_eq!(out[0].vibration.intensity, 1.1);
        // only vibration changes on the wrist
        assert_eq!(out[0].thermal.intensity, 0.6);
        assert_eq!(out[0].light.intensity, 0.65);
        assert_eq!(out[0].vibration.waveform, Waveform::FALLBACK);
    }

    #[test]
    fn test_position_commands_independent_copies() {
        let base = vec![command(0.85, Waveform::TRIPLE_HUM)];
        let sets = position_commands(&base);
        assert_eq!(sets.len(), 4);
        // wrists: 0.85 × 1.1, never compounded by the temple pass
        assert_eq!(sets[0].commands[0].vibration.intensity, 0.94);
        assert_eq!(sets[3].commands[0].vibration.intensity, 0.94);
        assert_eq!(sets[1].commands[0].vibration.intensity, 0.68);
        assert_eq!(sets[2].commands[0].vibration.intensity, 0.68);
        assert_eq!(sets[3].commands[0].vibration.waveform, Waveform::TRIPLE_HUM);
        assert_eq!(base[0].vibration.intensity, 0.85);
    }

    #[test]
    fn test_empty_commands_still_four_sets() {
        let sets = position_commands(&[]);
        assert_eq!(sets.len(), 4);
        assert!(sets.iter().all(|s| s.commands.is_empty()));
    }

    #[test]
    fn test_serialized_as_address() {
        let set = PositionedCommandSet {
            placement: Placement::LeftTemple,
            commands: vec![],
        };
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"address":3,"commands":[]}"#);
        let back: PositionedCommandSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<PositionedCommandSet>(r#"{"address":9,"commands":[]}"#).is_err());
    }
}
