//! Sport presets.

use crate::models::ScheduleFormat;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sports with known scheduling defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sport {
    #[default]
    Basketball,
    Football,
    Baseball,
    Softball,
    Volleyball,
    Soccer,
    Wrestling,
    /// Any sport without a dedicated preset.
    Other,
}

impl Sport {
    /// Looks a sport up by name, case-insensitively. Unknown names map to
    /// [`Sport::Other`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "basketball" => Sport::Basketball,
            "football" => Sport::Football,
            "baseball" => Sport::Baseball,
            "softball" => Sport::Softball,
            "volleyball" => Sport::Volleyball,
            "soccer" => Sport::Soccer,
            "wrestling" => Sport::Wrestling,
            _ => Sport::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
            Sport::Baseball => "baseball",
            Sport::Softball => "softball",
            Sport::Volleyball => "volleyball",
            Sport::Soccer => "soccer",
            Sport::Wrestling => "wrestling",
            Sport::Other => "other",
        }
    }

    /// Clustering radius in miles. Sports with fewer games travel farther.
    pub fn cluster_radius_miles(&self) -> f64 {
        match self {
            Sport::Football => 500.0,
            Sport::Baseball => 250.0,
            Sport::Wrestling => 350.0,
            _ => 300.0,
        }
    }

    pub fn default_format(&self) -> ScheduleFormat {
        match self {
            Sport::Basketball | Sport::Volleyball => ScheduleFormat::DoubleRoundRobin,
            Sport::Football => ScheduleFormat::PartialRoundRobin,
            Sport::Baseball | Sport::Softball => ScheduleFormat::ThreeGameSeries,
            Sport::Wrestling => ScheduleFormat::DualMeet,
            Sport::Soccer | Sport::Other => ScheduleFormat::SingleRoundRobin,
        }
    }

    /// Conference games per team.
    pub fn default_games_per_team(&self) -> usize {
        match self {
            Sport::Basketball => 20,
            Sport::Football => 9,
            Sport::Baseball | Sport::Softball => 24,
            Sport::Volleyball => 18,
            Sport::Soccer => 12,
            Sport::Wrestling | Sport::Other => 10,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Sport {
    fn from(name: &str) -> Self {
        Sport::from_name(name)
    }
}
