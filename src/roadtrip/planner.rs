//! Road-trip detection and stop ordering.

use crate::error::Result;
use crate::geo::planar_distance;
use crate::models::{days_between, Cluster, Coordinates, Schedule, TeamGame, TeamId};
use log::{debug, info};
use std::collections::HashMap;

/// Longest gap, in days, between two away games on the same trip.
pub const MAX_TRIP_GAP_DAYS: i64 = 3;

/// A run of away games a team could play without returning home.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadTrip {
    pub team: TeamId,
    /// Matchup id of the away game that opens the trip.
    pub anchor: String,
    /// Follow-up away games, in recommended visiting order.
    pub stops: Vec<String>,
    /// Planar length of anchor -> stops in that order, in meters.
    pub planar_distance_m: f64,
}

/// Result of road-trip planning.
///
/// Ordering is advisory: `schedule` is an independent copy of the input
/// with dates untouched, and `trips` carries the recommended routing.
#[derive(Debug, Clone)]
pub struct RoadTripPlan {
    pub schedule: Schedule,
    pub trips: Vec<RoadTrip>,
}

/// Finds road-trip opportunities for the teams of one cluster.
pub struct RoadTripPlanner;

impl RoadTripPlanner {
    /// Scans every cluster team's away games for follow-up away games
    /// 1-3 days later (stopping at a home game or a longer gap) and orders
    /// the follow-ups by nearest neighbor from the anchor venue.
    pub fn plan(
        cluster: &Cluster,
        schedule: &Schedule,
        coords: &HashMap<TeamId, Coordinates>,
    ) -> Result<RoadTripPlan> {
        schedule.validate()?;
        info!("planning road trips for a cluster of {} teams", cluster.len());

        let games = schedule.games_by_team();
        let mut trips = Vec::new();

        for team in cluster.team_ids() {
            let Some(team_games) = games.get(team) else {
                continue;
            };
            for (i, anchor) in team_games.iter().enumerate() {
                if anchor.is_home {
                    continue;
                }
                let candidates = trip_candidates(anchor, &team_games[i + 1..]);
                if candidates.is_empty() {
                    continue;
                }
                debug!(
                    "road trip for '{team}' from '{}' with {} more games",
                    anchor.matchup_id,
                    candidates.len()
                );
                let ordered = if candidates.len() >= 2 {
                    order_stops(anchor, candidates, coords)
                } else {
                    candidates
                };
                trips.push(RoadTrip {
                    team: team.clone(),
                    anchor: anchor.matchup_id.clone(),
                    planar_distance_m: route_length(anchor, &ordered, coords),
                    stops: ordered.into_iter().map(|g| g.matchup_id.clone()).collect(),
                });
            }
        }

        Ok(RoadTripPlan {
            schedule: schedule.clone(),
            trips,
        })
    }
}

/// Plans road trips for one cluster; see [`RoadTripPlanner`].
pub fn plan_road_trips(
    cluster: &Cluster,
    schedule: &Schedule,
    coords: &HashMap<TeamId, Coordinates>,
) -> Result<RoadTripPlan> {
    RoadTripPlanner::plan(cluster, schedule, coords)
}

fn trip_candidates<'a>(anchor: &TeamGame, later: &'a [TeamGame]) -> Vec<&'a TeamGame> {
    let mut out = Vec::new();
    for game in later {
        if game.is_home {
            break;
        }
        let gap = days_between(anchor.date, game.date);
        if gap > MAX_TRIP_GAP_DAYS {
            break;
        }
        if gap >= 1 {
            out.push(game);
        }
    }
    out
}

/// Greedy nearest-neighbor ordering starting at the anchor venue.
/// Stops whose venue is unknown keep their order at the end.
fn order_stops<'a>(
    anchor: &TeamGame,
    candidates: Vec<&'a TeamGame>,
    coords: &HashMap<TeamId, Coordinates>,
) -> Vec<&'a TeamGame> {
    let Some(start) = coords.get(&anchor.opponent).copied() else {
        return candidates;
    };

    let (mut open, unknown): (Vec<&TeamGame>, Vec<&TeamGame>) = candidates
        .into_iter()
        .partition(|g| coords.contains_key(&g.opponent));

    let mut ordered = Vec::with_capacity(open.len() + unknown.len());
    let mut here = start;
    while !open.is_empty() {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (i, g) in open.iter().enumerate() {
            let d = planar_distance(here, coords[&g.opponent]);
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        let next = open.remove(best);
        here = coords[&next.opponent];
        ordered.push(next);
    }
    ordered.extend(unknown);
    ordered
}

fn route_length(
    anchor: &TeamGame,
    stops: &[&TeamGame],
    coords: &HashMap<TeamId, Coordinates>,
) -> f64 {
    let mut total = 0.0;
    let mut here = coords.get(&anchor.opponent).copied();
    for stop in stops {
        let next = coords.get(&stop.opponent).copied();
        if let (Some(a), Some(b)) = (here, next) {
            total += planar_distance(a, b);
        }
        if next.is_some() {
            here = next;
        }
    }
    total
}
