//! Emotion-scoring to haptic-command compiler.
//!
//! Fuses a lexical/phrasal rule system with an external classifier's output
//! into one emotion vector per sentence, normalizes it, and compiles it into
//! bounded vibration, thermal and light commands for four body-mounted
//! actuators.
//!
//! Zero I/O: the classifier is injected through [`Classifier`] or passed in as
//! precomputed output, and results are plain serde records.

pub mod category;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod fusion;
pub mod lexical;
pub mod numeric;
pub mod output;
pub mod phrasal;
pub mod pipeline;
pub mod placement;
pub mod signal;
pub mod synth;
pub mod tables;
pub mod tokenizer;

pub use category::{CategoryMap, EmotionCategory, NormalizedScores, ScoreVector};
pub use classifier::{Classifier, ClassifierError, ClassifierResult, LabelScore, RulesOnly};
pub use config::{ConfigError, PipelineConfig};
pub use fusion::{blend_scores, merge_scores, normalize_and_threshold};
pub use lexical::score_tokens;
pub use numeric::round2;
pub use output::{export_json, export_raw_json, import_json};
pub use phrasal::score_phrases;
pub use pipeline::{Pipeline, RawSentenceResult, SentenceResult};
pub use placement::{Placement, PositionedCommandSet, adjust_for_placement, position_commands};
pub use signal::{adapt_classifier_output, unmapped_labels};
pub use synth::{HapticCommand, amplify, synthesize_commands};
pub use tables::{HapticProfile, Rgb, Tables, Waveform};
pub use tokenizer::{split_sentences, tokenize};
