//! Process-wide configuration tables.
//!
//! Everything the scorers and the synthesizer look up lives here: the lexicon,
//! multi-word expressions, modifier sets, haptic profiles, and the color and
//! waveform vocabularies of the device. [`Tables::standard`] builds them once
//! and hands out a shared `&'static` reference; nothing mutates them afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryMap, EmotionCategory};
use crate::constants::{INTENSIFIER_FACTOR, NEGATOR_FACTOR};

use EmotionCategory::*;

// ---------------------------------------------------------------------------
// Device vocabulary
// ---------------------------------------------------------------------------

/// Vibration waveforms understood by the actuator firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waveform {
    #[serde(rename = "STRONG_BUZZ_P100")]
    StrongBuzzP100,
    #[serde(rename = "TRANSITION_HUM1_P100")]
    TransitionHum1P100,
    #[serde(rename = "TRANSITION_HUM2_P100")]
    TransitionHum2P100,
    #[serde(rename = "TRANSITION_HUM3_P100")]
    TransitionHum3P100,
    #[serde(rename = "TRANSITION_HUM2_P50_TO_P0")]
    TransitionHum2P50ToP0,
    #[serde(rename = "DOUBLE_CLICK_P100")]
    DoubleClickP100,
    #[serde(rename = "STRONG_CLICK_100")]
    StrongClick100,
    #[serde(rename = "STRONG_CLICK_33")]
    StrongClick33,
    #[serde(rename = "TRANSITION_RAMP_UP_MEDIUM_SHARP2_P0_TO_P50")]
    TransitionRampUpMediumSharp2P0ToP50,
}

impl Waveform {
    /// Used when a profile names a pattern the waveform table doesn't know.
    pub const FALLBACK: Waveform = Waveform::StrongBuzzP100;

    /// The triple hum is too busy on the temples; it is swapped for this.
    pub const TRIPLE_HUM: Waveform = Waveform::TransitionHum3P100;
    pub const DOUBLE_HUM: Waveform = Waveform::TransitionHum2P100;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuzzP100 => "STRONG_BUZZ_P100",
            Self::TransitionHum1P100 => "TRANSITION_HUM1_P100",
            Self::TransitionHum2P100 => "TRANSITION_HUM2_P100",
            Self::TransitionHum3P100 => "TRANSITION_HUM3_P100",
            Self::TransitionHum2P50ToP0 => "TRANSITION_HUM2_P50_TO_P0",
            Self::DoubleClickP100 => "DOUBLE_CLICK_P100",
            Self::StrongClick100 => "STRONG_CLICK_100",
            Self::StrongClick33 => "STRONG_CLICK_33",
            Self::TransitionRampUpMediumSharp2P0ToP50 => {
                "TRANSITION_RAMP_UP_MEDIUM_SHARP2_P0_TO_P50"
            }
        }
    }
}

/// LED color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Haptic profiles
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VibrationTemplate {
    /// Authoring intensity in [0, 1], scaled by the amplified score.
    pub intensity: f64,
    /// Hz, passed through to the device.
    pub frequency: u32,
    /// Name resolved through the waveform table.
    pub pattern: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThermalTemplate {
    /// Target temperature in °C.
    pub temperature: f64,
    /// Authoring intensity in [0, 1].
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LightTemplate {
    /// Name resolved through the color table.
    pub color: &'static str,
    pub intensity: f64,
}

/// Per-category authoring template for the three actuator channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HapticProfile {
    pub vibration: VibrationTemplate,
    pub thermal: ThermalTemplate,
    pub light: LightTemplate,
}

const fn profile(
    vibration: (f64, u32, &'static str),
    thermal: (f64, f64),
    light: (&'static str, f64),
) -> HapticProfile {
    HapticProfile {
        vibration: VibrationTemplate {
            intensity: vibration.0,
            frequency: vibration.1,
            pattern: vibration.2,
        },
        thermal: ThermalTemplate {
            temperature: thermal.0,
            intensity: thermal.1,
        },
        light: LightTemplate {
            color: light.0,
            intensity: light.1,
        },
    }
}

// ---------------------------------------------------------------------------
// Standard data
// ---------------------------------------------------------------------------

const LEXICON: [(EmotionCategory, &[&str]); EmotionCategory::COUNT] = [
    (Fear, &["fear", "afraid", "terrified", "petrified", "shivered", "trembled", "skittering", "horrified"]),
    (Anxiety, &["nervous", "quickened", "pounding", "uneasy", "apprehensive", "anxious", "weight", "pressing"]),
    (Sadness, &["sadness", "heartbroken", "despair", "mourning"]),
    (Sorrow, &["sorrow", "cry", "tears", "grief", "pale", "lump", "lost", "vanished", "heavy"]),
    (Guilt, &["guilt", "blame"]),
    (Regret, &["regret", "remorse", "apologize", "failed"]),
    (Awe, &["enchanted", "beauty", "magic", "awe", "majestic", "wonder", "marvel", "surged", "flared"]),
    (Caution, &["caution", "looming", "lurking", "danger"]),
    (Relief, &["peaceful", "calm", "soothing", "restored", "safe", "returned"]),
    (Acceptance, &["relaxed", "accepted", "settled"]),
    (Protection, &["shield", "protected", "defend", "guard", "firm", "grip", "secure"]),
    (Concern, &["tensed", "warning", "concern"]),
];

const PHRASES: [(EmotionCategory, &[&str]); EmotionCategory::COUNT] = [
    (Fear, &["ice skittering up her spine"]),
    (Anxiety, &["heart pounding"]),
    (Sadness, &[]),
    (Sorrow, &["face so small, so pale", "lump lodged in", "laughter had vanished"]),
    (Guilt, &["it was her fault", "all her fault"]),
    (Regret, &[]),
    (Awe, &["enchanted home", "magic surged", "flared with her emotions"]),
    (Caution, &["danger lurking"]),
    (Relief, &["peaceful sleep", "color returned", "kept her safe"]),
    (Acceptance, &[]),
    (Protection, &["firm around her", "to shield her"]),
    (Concern, &[]),
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "so", "really", "highly", "incredibly", "quite", "greatly", "especially",
    "remarkably", "utterly", "profoundly", "terribly",
];

const NEGATORS: &[&str] = &["not", "never", "no", "n't"];

const PROFILES: [(EmotionCategory, HapticProfile); EmotionCategory::COUNT] = [
    (Fear, profile((0.85, 195, "rapid_pulse"), (10.0, 0.8), ("blue", 0.65))),
    (Anxiety, profile((0.75, 185, "jittery"), (10.0, 0.6), ("light_blue", 0.55))),
    (Sadness, profile((0.5, 170, "slow_pulse"), (25.0, 0.4), ("gray", 0.45))),
    (Sorrow, profile((0.6, 175, "deep_pulse"), (10.0, 0.5), ("indigo", 0.5))),
    (Guilt, profile((0.7, 180, "steady_pulse"), (30.0, 0.6), ("amber", 0.55))),
    (Regret, profile((0.65, 175, "gentle_pulse"), (20.0, 0.5), ("soft_yellow", 0.5))),
    (Awe, profile((0.5, 170, "flowing"), (35.0, 0.5), ("white", 0.8))),
    (Caution, profile((0.8, 190, "intermittent"), (25.0, 0.7), ("red", 0.8))),
    (Relief, profile((0.4, 160, "gentle"), (35.0, 0.7), ("green", 0.7))),
    (Acceptance, profile((0.3, 160, "soothing"), (25.0, 0.6), ("soft_white", 0.6))),
    (Protection, profile((1.0, 200, "steady"), (40.0, 1.0), ("orange", 0.9))),
    (Concern, profile((0.4, 160, "subtle_pulse"), (25.0, 0.4), ("purple", 0.4))),
];

const COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb([255, 255, 255])),
    ("blue", Rgb([0, 0, 255])),
    ("amber", Rgb([255, 191, 0])),
    ("soft_yellow", Rgb([255, 255, 153])),
    ("light_blue", Rgb([173, 216, 230])),
    ("gray", Rgb([128, 128, 128])),
    ("indigo", Rgb([75, 0, 130])),
];

const WAVEFORMS: &[(&str, Waveform)] = &[
    ("flowing", Waveform::StrongBuzzP100),
    ("deep_pulse", Waveform::TransitionHum1P100),
    ("gentle_pulse", Waveform::TransitionHum2P100),
    ("jittery", Waveform::DoubleClickP100),
    ("steady_pulse", Waveform::StrongClick100),
    ("slow_pulse", Waveform::StrongClick33),
    ("rapid_pulse", Waveform::TransitionHum3P100),
    ("intermittent", Waveform::TransitionRampUpMediumSharp2P0ToP50),
    ("gentle", Waveform::TransitionHum1P100),
    ("soothing", Waveform::TransitionHum2P50ToP0),
    ("subtle_pulse", Waveform::TransitionHum3P100),
];

/// External classifier label → weighted targets. Each label's weights sum to 1.0.
const ML_FANOUT: &[(&str, &[(EmotionCategory, f64)])] = &[
    ("anger", &[(Guilt, 0.6), (Regret, 0.4)]),
    ("disgust", &[(Guilt, 0.5), (Regret, 0.5)]),
    ("fear", &[(Fear, 0.6), (Anxiety, 0.4)]),
    ("joy", &[(Relief, 0.5), (Acceptance, 0.5)]),
    ("sadness", &[(Sadness, 0.4), (Sorrow, 0.6)]),
    ("surprise", &[(Awe, 1.0)]),
    ("neutral", &[]),
];

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Token class that scales a nearby match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    Intensifier,
    Negator,
}

impl Modifier {
    pub fn factor(self) -> f64 {
        match self {
            Modifier::Intensifier => INTENSIFIER_FACTOR,
            Modifier::Negator => NEGATOR_FACTOR,
        }
    }
}

static STANDARD: LazyLock<Tables> = LazyLock::new(Tables::new_standard);

/// Immutable lookup tables shared by every pipeline stage.
#[derive(Debug)]
pub struct Tables {
    lexicon: CategoryMap<&'static [&'static str]>,
    keyword_index: HashMap<&'static str, Vec<EmotionCategory>>,
    phrases: CategoryMap<&'static [&'static str]>,
    intensifiers: HashSet<&'static str>,
    negators: HashSet<&'static str>,
    profiles: CategoryMap<Option<HapticProfile>>,
    colors: HashMap<&'static str, Rgb>,
    waveforms: HashMap<&'static str, Waveform>,
    ml_fanout: BTreeMap<&'static str, &'static [(EmotionCategory, f64)]>,
}

impl Tables {
    /// The process-wide standard tables, built on first use.
    pub fn standard() -> &'static Tables {
        &STANDARD
    }

    /// Build an owned copy of the standard tables.
    /// Use [`Tables::standard`] unless the copy is about to be customised.
    pub fn new_standard() -> Self {
        let lexicon = CategoryMap::from_fn(|c| LEXICON[c.index()].1);
        let phrases = CategoryMap::from_fn(|c| PHRASES[c.index()].1);
        let profiles = CategoryMap::from_fn(|c| Some(PROFILES[c.index()].1));

        let mut keyword_index: HashMap<&'static str, Vec<EmotionCategory>> = HashMap::new();
        for (category, words) in lexicon.iter() {
            for word in words.iter() {
                keyword_index.entry(*word).or_default().push(category);
            }
        }

        Self {
            lexicon,
            keyword_index,
            phrases,
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
            profiles,
            colors: COLORS.iter().copied().collect(),
            waveforms: WAVEFORMS.iter().copied().collect(),
            ml_fanout: ML_FANOUT.iter().copied().collect(),
        }
    }

    /// Replace (or remove, with `None`) the profile for one category.
    pub fn with_profile(mut self, category: EmotionCategory, profile: Option<HapticProfile>) -> Self {
        self.profiles[category] = profile;
        self
    }

    pub fn keywords(&self, category: EmotionCategory) -> &'static [&'static str] {
        self.lexicon[category]
    }

    /// Categories whose keyword set contains `token` (exact, lower-case match).
    pub fn keyword_categories(&self, token: &str) -> &[EmotionCategory] {
        self.keyword_index
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every configured phrase with its category, in category order.
    pub fn phrases(&self) -> impl Iterator<Item = (EmotionCategory, &'static str)> + '_ {
        self.phrases
            .iter()
            .flat_map(|(c, phrases)| phrases.iter().map(move |p| (c, *p)))
    }

    pub fn modifier(&self, token: &str) -> Option<Modifier> {
        if self.intensifiers.contains(token) {
            Some(Modifier::Intensifier)
        } else if self.negators.contains(token) {
            Some(Modifier::Negator)
        } else {
            None
        }
    }

    pub fn profile(&self, category: EmotionCategory) -> Option<&HapticProfile> {
        self.profiles[category].as_ref()
    }

    /// Resolve a color name; unknown names are black.
    pub fn resolve_color(&self, name: &str) -> Rgb {
        self.colors.get(name).copied().unwrap_or(Rgb::BLACK)
    }

    /// Resolve a pattern name; unknown names get [`Waveform::FALLBACK`].
    pub fn resolve_waveform(&self, pattern: &str) -> Waveform {
        self.waveforms
            .get(pattern)
            .copied()
            .unwrap_or(Waveform::FALLBACK)
    }

    /// Weighted targets for an external classifier label (case-insensitive).
    /// `None` means the label is not part of the mapping at all; a known
    /// label like `neutral` maps to an empty slice.
    pub fn fanout(&self, label: &str) -> Option<&'static [(EmotionCategory, f64)]> {
        self.ml_fanout.get(label.to_lowercase().as_str()).copied()
    }

    /// Every classifier label with its weighted targets, sorted by label.
    pub fn fanout_labels(
        &self,
    ) -> impl Iterator<Item = (&'static str, &'static [(EmotionCategory, f64)])> + '_ {
        self.ml_fanout.iter().map(|(label, targets)| (*label, *targets))
    }
}
