//! Haptic command synthesis: normalized scores → bounded device commands.

use serde::{Deserialize, Serialize};

use crate::category::{EmotionCategory, NormalizedScores};
use crate::config::PipelineConfig;
use crate::constants::MAX_TEMPERATURE;
use crate::numeric::round2;
use crate::tables::{HapticProfile, Rgb, Tables, Waveform};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VibrationCommand {
    pub intensity: f64,
    pub frequency: u32,
    pub waveform: Waveform,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermalCommand {
    /// °C, never above [`MAX_TEMPERATURE`].
    pub temperature: f64,
    /// Device scale, [-1, 1].
    pub intensity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightCommand {
    pub rgb: Rgb,
    pub intensity: f64,
}

/// One emotion's command across all three channels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HapticCommand {
    pub emotion: EmotionCategory,
    pub vibration: VibrationCommand,
    pub thermal: ThermalCommand,
    pub light: LightCommand,
}

/// `score × factor`, capped at 1.0.
pub fn amplify(score: f64, factor: f64) -> f64 {
    (score * factor).min(1.0)
}

/// Synthesize one command per category that clears `weight_threshold` and has
/// a profile. Everything else is skipped silently.
pub fn synthesize_commands(
    tables: &Tables,
    scores: &NormalizedScores,
    config: &PipelineConfig,
) -> Vec<HapticCommand> {
    scores
        .iter()
        .filter(|&(_, &score)| score >= config.weight_threshold)
        .filter_map(|(&emotion, &score)| {
            let profile = tables.profile(emotion)?;
            Some(command_for(tables, emotion, profile, amplify(score, config.amplification)))
        })
        .collect()
}

fn command_for(
    tables: &Tables,
    emotion: EmotionCategory,
    profile: &HapticProfile,
    amplified: f64,
) -> HapticCommand {
    HapticCommand {
        emotion,
        vibration: VibrationCommand {
            intensity: round2(profile.vibration.intensity * amplified),
            frequency: profile.vibration.frequency,
            waveform: tables.resolve_waveform(profile.vibration.pattern),
        },
        thermal: ThermalCommand {
            temperature: profile.thermal.temperature.min(MAX_TEMPERATURE),
            // [0, 1] authoring scale → [-1, 1] device scale; score-independent
            intensity: round2(profile.thermal.intensity * 2.0 - 1.0),
        },
        light: LightCommand {
            rgb: tables.resolve_color(profile.light.color),
            intensity: round2(profile.light.intensity * amplified),
        },
    }
}
