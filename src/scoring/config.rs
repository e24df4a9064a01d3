//! Scoring weights and sport parameters.

use crate::models::TeamId;
use chrono::Weekday;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative weight of each objective component.
///
/// Every weight defaults to 1.0. A weight of 0 disables its component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectiveWeights {
    pub travel: f64,
    pub competitive_balance: f64,
    pub broadcast: f64,
    pub wellbeing: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            travel: 1.0,
            competitive_balance: 1.0,
            broadcast: 1.0,
            wellbeing: 1.0,
        }
    }
}

impl ObjectiveWeights {
    pub fn sum(&self) -> f64 {
        self.travel + self.competitive_balance + self.broadcast + self.wellbeing
    }
}

/// Inclusive premium broadcast hours per day of week.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PremiumWindows {
    /// Indexed by days from Sunday; `(first_hour, last_hour)` inclusive.
    pub by_day: [Option<(u32, u32)>; 7],
}

impl Default for PremiumWindows {
    /// Weekday evenings 19-22, Saturday 12-20, Sunday 16-19.
    fn default() -> Self {
        Self {
            by_day: [
                Some((16, 19)),
                Some((19, 22)),
                Some((19, 22)),
                Some((19, 22)),
                Some((19, 22)),
                Some((19, 22)),
                Some((12, 20)),
            ],
        }
    }
}

impl PremiumWindows {
    pub fn with_window(mut self, day: Weekday, first_hour: u32, last_hour: u32) -> Self {
        self.by_day[day.num_days_from_sunday() as usize] = Some((first_hour, last_hour));
        self
    }

    pub fn without_window(mut self, day: Weekday) -> Self {
        self.by_day[day.num_days_from_sunday() as usize] = None;
        self
    }

    pub fn contains(&self, day: Weekday, hour: u32) -> bool {
        match self.by_day[day.num_days_from_sunday() as usize] {
            Some((first, last)) => hour >= first && hour <= last,
            None => false,
        }
    }
}

/// A pairing expected to appear somewhere in the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rivalry {
    pub first: TeamId,
    pub second: TeamId,
}

impl Rivalry {
    pub fn new(first: impl Into<TeamId>, second: impl Into<TeamId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Per-run scoring configuration.
///
/// # Examples
///
/// ```
/// use u_league::scoring::{ObjectiveWeights, Rivalry, ScoringConfig};
///
/// let config = ScoringConfig::default()
///     .with_weights(ObjectiveWeights { travel: 2.0, ..ObjectiveWeights::default() })
///     .with_rivalry(Rivalry::new("kansas", "kansas-state"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoringConfig {
    pub weights: ObjectiveWeights,

    /// Pairings scored by the competitive-balance component.
    pub protected_rivalries: Vec<Rivalry>,

    pub premium_windows: PremiumWindows,

    /// Days between games that count as adequate rest.
    pub min_rest_days: i64,

    /// Longest away streak that carries no penalty.
    pub max_consecutive_away: usize,

    /// Points lost per away game beyond `max_consecutive_away`.
    pub consecutive_away_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ObjectiveWeights::default(),
            protected_rivalries: Vec::new(),
            premium_windows: PremiumWindows::default(),
            min_rest_days: 2,
            max_consecutive_away: 3,
            consecutive_away_penalty: 20.0,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_rivalry(mut self, rivalry: Rivalry) -> Self {
        self.protected_rivalries.push(rivalry);
        self
    }

    pub fn with_premium_windows(mut self, windows: PremiumWindows) -> Self {
        self.premium_windows = windows;
        self
    }

    pub fn with_min_rest_days(mut self, days: i64) -> Self {
        self.min_rest_days = days;
        self
    }

    pub fn with_max_consecutive_away(mut self, games: usize) -> Self {
        self.max_consecutive_away = games;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let w = &self.weights;
        for (name, value) in [
            ("travel", w.travel),
            ("competitive_balance", w.competitive_balance),
            ("broadcast", w.broadcast),
            ("wellbeing", w.wellbeing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("weight {name} must be finite and non-negative, got {value}"));
            }
        }
        if self.min_rest_days < 0 {
            return Err(format!("min_rest_days must be non-negative, got {}", self.min_rest_days));
        }
        if self.consecutive_away_penalty < 0.0 {
            return Err("consecutive_away_penalty must be non-negative".into());
        }
        for (i, window) in self.premium_windows.by_day.iter().enumerate() {
            if let Some((first, last)) = window {
                if first > last || *last > 23 {
                    return Err(format!("premium window for day {i} is invalid: {first}-{last}"));
                }
            }
        }
        Ok(())
    }
}
