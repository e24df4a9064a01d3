//! Multi-factor schedule scoring.
//!
//! Four independent components, each on a roughly 0-100 scale:
//!
//! | Component | Measures |
//! |-----------|----------|
//! | Travel efficiency | average distance travelled per team |
//! | Competitive balance | share of protected rivalries scheduled |
//! | Broadcast value | share of games in premium windows |
//! | Well-being | weekend travel, rest days, away streaks |
//!
//! [`ScheduleScorer`] combines them as a weighted sum.

mod components;
mod config;
mod scorer;

pub use components::{
    broadcast_value, competitive_balance, consecutive_away_score, team_wellbeing,
    travel_efficiency, wellbeing, TeamWellbeing, NEUTRAL_SCORE,
};
pub use config::{ObjectiveWeights, PremiumWindows, Rivalry, ScoringConfig};
pub use scorer::{score, ScheduleScorer, ScoreBreakdown};
