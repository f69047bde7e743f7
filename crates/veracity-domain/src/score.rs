//! Truth and confidence scores on the calibrated 0-100 scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer score in [0, 100]
///
/// Used for both truth percentages and confidence values. Construction clamps
/// into range, so a `Score` is valid by definition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Minimum score (0)
    pub const MIN: Score = Score(0);

    /// Maximum score (100)
    pub const MAX: Score = Score(100);

    /// Create a score, clamping into [0, 100]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Create a score from a fractional value in [0.0, 1.0]
    ///
    /// Values outside the range are clamped; NaN maps to 0.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(0);
        }
        Self((fraction.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    /// Create a score from a floating-point percentage in [0.0, 100.0]
    pub fn from_percent(percent: f64) -> Self {
        Self::from_fraction(percent / 100.0)
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Get the score as a fraction in [0.0, 1.0]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Multiply by a discount factor, clamping the result
    pub fn discounted(&self, factor: f64) -> Self {
        Self::from_fraction(self.as_fraction() * factor.max(0.0))
    }

    /// Absolute difference between two scores
    pub fn spread(&self, other: Score) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven-point truth label derived from a truth percentage
///
/// The label is a pure function of the score; the bands are fixed and every
/// integer in [0, 100] maps to exactly one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum SevenPointLabel {
    /// 86-100
    True,
    /// 72-85
    MostlyTrue,
    /// 58-71
    LeaningTrue,
    /// 43-57
    Unverified,
    /// 29-42
    LeaningFalse,
    /// 15-28
    MostlyFalse,
    /// 0-14
    False,
}

impl SevenPointLabel {
    /// Derive the label from a truth percentage
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            86..=100 => SevenPointLabel::True,
            72..=85 => SevenPointLabel::MostlyTrue,
            58..=71 => SevenPointLabel::LeaningTrue,
            43..=57 => SevenPointLabel::Unverified,
            29..=42 => SevenPointLabel::LeaningFalse,
            15..=28 => SevenPointLabel::MostlyFalse,
            _ => SevenPointLabel::False,
        }
    }

    /// Get the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            SevenPointLabel::True => "TRUE",
            SevenPointLabel::MostlyTrue => "MOSTLY-TRUE",
            SevenPointLabel::LeaningTrue => "LEANING-TRUE",
            SevenPointLabel::Unverified => "UNVERIFIED",
            SevenPointLabel::LeaningFalse => "LEANING-FALSE",
            SevenPointLabel::MostlyFalse => "MOSTLY-FALSE",
            SevenPointLabel::False => "FALSE",
        }
    }

    /// Parse from the canonical string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRUE" => Some(SevenPointLabel::True),
            "MOSTLY-TRUE" => Some(SevenPointLabel::MostlyTrue),
            "LEANING-TRUE" => Some(SevenPointLabel::LeaningTrue),
            "UNVERIFIED" => Some(SevenPointLabel::Unverified),
            "LEANING-FALSE" => Some(SevenPointLabel::LeaningFalse),
            "MOSTLY-FALSE" => Some(SevenPointLabel::MostlyFalse),
            "FALSE" => Some(SevenPointLabel::False),
            _ => None,
        }
    }
}

impl fmt::Display for SevenPointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps() {
        assert_eq!(Score::new(150).value(), 100);
        assert_eq!(Score::new(42).value(), 42);
    }

    #[test]
    fn test_score_from_fraction() {
        assert_eq!(Score::from_fraction(0.5).value(), 50);
        assert_eq!(Score::from_fraction(1.5).value(), 100);
        assert_eq!(Score::from_fraction(-0.3).value(), 0);
        assert_eq!(Score::from_fraction(f64::NAN).value(), 0);
    }

    #[test]
    fn test_score_discounted() {
        let s = Score::new(80);
        assert_eq!(s.discounted(0.5).value(), 40);
        assert_eq!(s.discounted(0.4).value(), 32);
        assert_eq!(s.discounted(2.0).value(), 100);
    }

    #[test]
    fn test_score_spread() {
        assert_eq!(Score::new(80).spread(Score::new(30)), 50);
        assert_eq!(Score::new(30).spread(Score::new(80)), 50);
    }

    #[test]
    fn test_label_band_edges() {
        // Every band edge, both sides
        assert_eq!(SevenPointLabel::from_score(Score::new(100)), SevenPointLabel::True);
        assert_eq!(SevenPointLabel::from_score(Score::new(86)), SevenPointLabel::True);
        assert_eq!(SevenPointLabel::from_score(Score::new(85)), SevenPointLabel::MostlyTrue);
        assert_eq!(SevenPointLabel::from_score(Score::new(72)), SevenPointLabel::MostlyTrue);
        assert_eq!(SevenPointLabel::from_score(Score::new(71)), SevenPointLabel::LeaningTrue);
        assert_eq!(SevenPointLabel::from_score(Score::new(58)), SevenPointLabel::LeaningTrue);
        assert_eq!(SevenPointLabel::from_score(Score::new(57)), SevenPointLabel::Unverified);
        assert_eq!(SevenPointLabel::from_score(Score::new(43)), SevenPointLabel::Unverified);
        assert_eq!(SevenPointLabel::from_score(Score::new(42)), SevenPointLabel::LeaningFalse);
        assert_eq!(SevenPointLabel::from_score(Score::new(29)), SevenPointLabel::LeaningFalse);
        assert_eq!(SevenPointLabel::from_score(Score::new(28)), SevenPointLabel::MostlyFalse);
        assert_eq!(SevenPointLabel::from_score(Score::new(15)), SevenPointLabel::MostlyFalse);
        assert_eq!(SevenPointLabel::from_score(Score::new(14)), SevenPointLabel::False);
        assert_eq!(SevenPointLabel::from_score(Score::new(0)), SevenPointLabel::False);
    }

    #[test]
    fn test_label_string_roundtrip() {
        for label in [
            SevenPointLabel::True,
            SevenPointLabel::MostlyTrue,
            SevenPointLabel::LeaningTrue,
            SevenPointLabel::Unverified,
            SevenPointLabel::LeaningFalse,
            SevenPointLabel::MostlyFalse,
            SevenPointLabel::False,
        ] {
            assert_eq!(SevenPointLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(SevenPointLabel::parse("KINDA-TRUE"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every u8 maps to a label and the bands tile [0, 100]
        #[test]
        fn test_every_score_has_a_label(value in 0u8..=100) {
            let score = Score::new(value);
            let label = SevenPointLabel::from_score(score);

            let expected = match value {
                86..=100 => SevenPointLabel::True,
                72..=85 => SevenPointLabel::MostlyTrue,
                58..=71 => SevenPointLabel::LeaningTrue,
                43..=57 => SevenPointLabel::Unverified,
                29..=42 => SevenPointLabel::LeaningFalse,
                15..=28 => SevenPointLabel::MostlyFalse,
                _ => SevenPointLabel::False,
            };
            prop_assert_eq!(label, expected);
        }

        /// Property: from_fraction always lands in [0, 100]
        #[test]
        fn test_from_fraction_in_range(f in -10.0f64..10.0) {
            let score = Score::from_fraction(f);
            prop_assert!(score.value() <= 100);
        }

        /// Property: discounting never raises a score above 100 or below 0
        #[test]
        fn test_discount_bounded(value in 0u8..=100, factor in 0.0f64..3.0) {
            let score = Score::new(value).discounted(factor);
            prop_assert!(score.value() <= 100);
        }
    }
}
