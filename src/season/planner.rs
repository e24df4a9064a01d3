//! End-to-end season planning.

use super::config::SeasonConfig;
use crate::cluster::ClusterBuilder;
use crate::error::{LeagueError, Result};
use crate::geo::{CachedDistance, DistanceSource};
use crate::models::{Cluster, Coordinates, OptimizationMetrics, Schedule, Team, TeamId};
use crate::optimizer::ScheduleOptimizer;
use crate::roadtrip::{RoadTrip, RoadTripPlanner};
use crate::scoring::ScheduleScorer;
use log::{debug, info};
use std::collections::HashMap;

/// Output of [`plan_season`].
#[derive(Debug, Clone)]
pub struct SeasonPlan {
    /// Empty when geographic clustering is off.
    pub clusters: Vec<Cluster>,
    /// Recommended road trips across all clusters.
    pub road_trips: Vec<RoadTrip>,
    /// Best schedule found by annealing, with metrics attached.
    pub schedule: Schedule,
    pub metrics: OptimizationMetrics,
}

/// Clusters teams, plans road trips and anneals the schedule, scoring
/// travel with planar distances.
pub fn plan_season(
    schedule: &Schedule,
    teams: &[Team],
    config: &SeasonConfig,
) -> Result<SeasonPlan> {
    let scorer = ScheduleScorer::new(teams, config.scoring.clone())?;
    run(schedule, teams, config, scorer)
}

/// Like [`plan_season`], routing travel distances through `source`.
///
/// Lookups are memoized for the run and fall back to planar distance
/// whenever `source` fails.
pub fn plan_season_with_distance<S: DistanceSource + 'static>(
    schedule: &Schedule,
    teams: &[Team],
    config: &SeasonConfig,
    source: S,
) -> Result<SeasonPlan> {
    let scorer = ScheduleScorer::new(teams, config.scoring.clone())?
        .with_distance_source(CachedDistance::new(source));
    run(schedule, teams, config, scorer)
}

fn run(
    schedule: &Schedule,
    teams: &[Team],
    config: &SeasonConfig,
    scorer: ScheduleScorer,
) -> Result<SeasonPlan> {
    config.validate().map_err(LeagueError::InvalidConfig)?;
    schedule.validate()?;
    info!("planning {} season for {} teams", config.sport, teams.len());

    let mut working = schedule.clone();
    if let Some(format) = config.format {
        working.format = format;
    }

    let mut clusters = Vec::new();
    let mut road_trips = Vec::new();
    if config.use_geographic_clustering {
        let report = ClusterBuilder::build(teams, &config.effective_clustering())?;
        let coords: HashMap<TeamId, Coordinates> = teams
            .iter()
            .filter_map(|t| t.coordinates.map(|c| (t.id.clone(), c)))
            .collect();

        for (i, cluster) in report.clusters.iter().enumerate() {
            if cluster.len() < 2 {
                continue;
            }
            debug!("road trips for cluster {} ({} teams)", i + 1, cluster.len());
            let plan = RoadTripPlanner::plan(cluster, &working, &coords)?;
            road_trips.extend(plan.trips);
        }
        info!(
            "{} clusters, {} road trips recommended",
            report.clusters.len(),
            road_trips.len()
        );
        clusters = report.clusters;
    }

    let optimizer = ScheduleOptimizer::new(scorer);
    let (schedule, metrics) = optimizer.optimize(&working, &config.annealing)?;

    Ok(SeasonPlan {
        clusters,
        road_trips,
        schedule,
        metrics,
    })
}
