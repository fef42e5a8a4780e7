/// Number of tokens preceding a match that are scanned for modifiers.
pub const MODIFIER_WINDOW: usize = 3;

/// Multiplier applied per intensifier found in the modifier window.
pub const INTENSIFIER_FACTOR: f64 = 2.0;

/// Multiplier applied per negator found in the modifier window.
/// Negation dampens a match, it never inverts it.
pub const NEGATOR_FACTOR: f64 = 0.5;

/// Base contribution of a matched multi-word expression.
pub const MWE_BASE_SCORE: f64 = 2.0;

/// Characters of text before a phrase match that are tokenized for modifiers.
pub const MWE_LOOKBACK_CHARS: usize = 50;

/// Weight of the rule-based vector in the blend: `alpha·rule + (1-alpha)·ml`.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Normalized scores below this are dropped.
pub const DEFAULT_NORMALIZE_THRESHOLD: f64 = 0.05;

/// Normalized scores below this produce no haptic command.
pub const DEFAULT_WEIGHT_THRESHOLD: f64 = 0.1;

/// Score amplification before scaling vibration and light (result capped at 1.0).
pub const DEFAULT_AMPLIFICATION: f64 = 1.5;

/// Upper bound on synthesized thermal temperature (°C). No lower bound.
pub const MAX_TEMPERATURE: f64 = 40.0;

/// Temple placements: vibration scale.
pub const TEMPLE_VIBRATION_FACTOR: f64 = 0.8;

/// Temple placements: thermal intensity scale.
pub const TEMPLE_THERMAL_FACTOR: f64 = 0.5;

/// Temple placements: light intensity scale.
pub const TEMPLE_LIGHT_FACTOR: f64 = 0.9;

/// Wrist placements: vibration scale. Not re-clamped to 1.0.
pub const WRIST_VIBRATION_FACTOR: f64 = 1.1;
