use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// The closed set of emotion categories the scorers and profiles speak.
///
/// Declaration order is the canonical order: score maps, command lists and
/// JSON output all follow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmotionCategory {
    Fear,
    Anxiety,
    Sadness,
    Sorrow,
    Guilt,
    Regret,
    Awe,
    Caution,
    Relief,
    Acceptance,
    Protection,
    Concern,
}

impl EmotionCategory {
    pub const COUNT: usize = 12;

    pub const ALL: [EmotionCategory; Self::COUNT] = [
        Self::Fear,
        Self::Anxiety,
        Self::Sadness,
        Self::Sorrow,
        Self::Guilt,
        Self::Regret,
        Self::Awe,
        Self::Caution,
        Self::Relief,
        Self::Acceptance,
        Self::Protection,
        Self::Concern,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fear => "Fear",
            Self::Anxiety => "Anxiety",
            Self::Sadness => "Sadness",
            Self::Sorrow => "Sorrow",
            Self::Guilt => "Guilt",
            Self::Regret => "Regret",
            Self::Awe => "Awe",
            Self::Caution => "Caution",
            Self::Relief => "Relief",
            Self::Acceptance => "Acceptance",
            Self::Protection => "Protection",
            Self::Concern => "Concern",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense map with exactly one slot per category.
///
/// Indexing by [`EmotionCategory`] can never miss, so no stage can introduce
/// or lose a category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryMap<T>([T; EmotionCategory::COUNT]);

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(EmotionCategory) -> T) -> Self {
        Self(std::array::from_fn(|i| f(EmotionCategory::ALL[i])))
    }

    pub fn get(&self, category: EmotionCategory) -> &T {
        &self.0[category.index()]
    }

    /// Iterate `(category, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, &T)> {
        EmotionCategory::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<EmotionCategory> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: EmotionCategory) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<EmotionCategory> for CategoryMap<T> {
    fn index_mut(&mut self, category: EmotionCategory) -> &mut T {
        &mut self.0[category.index()]
    }
}

/// Per-category scores. Used for raw rule scores, ML scores and the blend.
pub type ScoreVector = CategoryMap<f64>;

/// Sparse normalized scores: only categories that survived thresholding.
pub type NormalizedScores = BTreeMap<EmotionCategory, f64>;

impl CategoryMap<f64> {
    pub fn zero() -> Self {
        Self([0.0; EmotionCategory::COUNT])
    }

    /// Largest value, or 0.0 for an all-zero vector.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Dense map over every category, for the raw output record.
    pub fn to_map(&self) -> BTreeMap<EmotionCategory, f64> {
        self.iter().map(|(c, v)| (c, *v)).collect()
    }
}
