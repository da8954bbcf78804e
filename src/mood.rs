use serde::{Deserialize, Serialize};
use std::fmt;

pub const MOOD_LABELS: [&str; 10] = [
    "Very Low",
    "Low",
    "Down",
    "Okay",
    "Good",
    "Happy",
    "Great",
    "Amazing",
    "Fantastic",
    "Euphoric",
];

pub const MAX_MOOD_LEVEL: u8 = 9;
pub const DEFAULT_MOOD_LEVEL: u8 = 5;

/// Maps a mood level to its label. Levels above 9 clamp to "Euphoric".
pub fn mood_label(level: u8) -> &'static str {
    MOOD_LABELS[usize::from(level.min(MAX_MOOD_LEVEL))]
}

/// A mood level checked to lie in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub fn new(level: u8) -> Option<Self> {
        (level <= MAX_MOOD_LEVEL).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        mood_label(self.0)
    }
}

impl Default for MoodLevel {
    fn default() -> Self {
        Self(DEFAULT_MOOD_LEVEL)
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("mood level must be 0-{MAX_MOOD_LEVEL}, got {level}"))
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}
