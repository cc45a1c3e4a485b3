//! Speed tiers for speech synthesis
//!
//! The tier set and its multipliers are fixed read-only configuration;
//! the enum is the table.
//!
//! # Examples
//!
//! ```
//! use domain::SpeedTier;
//!
//! let tier: SpeedTier = "fast".parse().unwrap();
//! assert!((tier.multiplier() - 1.5).abs() < f32::EPSILON);
//! assert!("warp".parse::<SpeedTier>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Named playback-speed tier for synthesized speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    /// 0.5x
    Slow,
    /// 1.0x (no adjustment)
    Normal,
    /// 1.5x
    Fast,
    /// 2.0x
    VeryFast,
}

impl SpeedTier {
    /// All tiers in selector display order
    pub const ALL: [Self; 4] = [Self::Slow, Self::Normal, Self::Fast, Self::VeryFast];

    /// Numeric frame-rate multiplier for this tier
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Slow => 0.5,
            Self::Normal => 1.0,
            Self::Fast => 1.5,
            Self::VeryFast => 2.0,
        }
    }

    /// The tier name as used by the selector widget
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::VeryFast => "very_fast",
        }
    }

    /// Whether this tier leaves the audio unchanged
    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpeedTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            "very_fast" => Ok(Self::VeryFast),
            other => Err(DomainError::invalid_selection("speed", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_match_tiers() {
        assert!((SpeedTier::Slow.multiplier() - 0.5).abs() < f32::EPSILON);
        assert!((SpeedTier::Normal.multiplier() - 1.0).abs() < f32::EPSILON);
        assert!((SpeedTier::Fast.multiplier() - 1.5).abs() < f32::EPSILON);
        assert!((SpeedTier::VeryFast.multiplier() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn parse_round_trips_every_tier() {
        for tier in SpeedTier::ALL {
            let parsed: SpeedTier = tier.as_str().parse().unwrap();
            assert_eq!(parsed, tier);
        }
    }

    #[test]
    fn parse_rejects_unknown_tier() {
        let err = "ludicrous".parse::<SpeedTier>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidSelection { .. }));
        assert_eq!(err.to_string(), "Invalid speed selection: ludicrous");
    }

    #[test]
    fn only_normal_is_a_no_op() {
        assert!(SpeedTier::Normal.is_normal());
        assert!(!SpeedTier::Slow.is_normal());
        assert!(!SpeedTier::Fast.is_normal());
        assert!(!SpeedTier::VeryFast.is_normal());
    }

    #[test]
    fn display_matches_selector_names() {
        assert_eq!(SpeedTier::VeryFast.to_string(), "very_fast");
        assert_eq!(SpeedTier::Slow.to_string(), "slow");
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&SpeedTier::VeryFast).unwrap(),
            "\"very_fast\""
        );
        let tier: SpeedTier = serde_json::from_str("\"slow\"").unwrap();
        assert_eq!(tier, SpeedTier::Slow);
    }

    #[test]
    fn all_lists_every_tier_once() {
        assert_eq!(SpeedTier::ALL.len(), 4);
        let names: Vec<&str> = SpeedTier::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["slow", "normal", "fast", "very_fast"]);
    }
}
