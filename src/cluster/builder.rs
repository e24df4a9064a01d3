//! Cluster construction.

use super::config::ClusterOptions;
use super::repair::{apply_constraint, balance_strength, prune_empty};
use crate::error::{LeagueError, Result, ValidationError, ValidationErrorKind};
use crate::geo::{meters_to_km, miles_to_km, planar_distance};
use crate::models::{Cluster, Coordinates, Team, TeamId};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

/// Outcome of a clustering run.
#[derive(Debug, Clone)]
pub struct ClusterReport {
    /// Partition of the input teams.
    pub clusters: Vec<Cluster>,

    /// Teams without coordinates that no partnership claimed. Each ends up
    /// as a singleton.
    pub skipped_missing_coordinates: usize,

    /// Whether the strength-balancing move fired.
    pub rebalanced: bool,
}

impl ClusterReport {
    pub fn mean_cluster_size(&self) -> f64 {
        if self.clusters.is_empty() {
            0.0
        } else {
            let total: usize = self.clusters.iter().map(Cluster::len).sum();
            total as f64 / self.clusters.len() as f64
        }
    }
}

/// Partitions teams into travel clusters.
///
/// Pipeline:
/// 1. teams without coordinates are set aside;
/// 2. partnership pairs seed clusters directly;
/// 3. remaining teams are clustered greedily around seeds by planar distance;
/// 4. one strength-balancing move, when requested;
/// 5. constraint repairs in input order;
/// 6. set-aside teams come back as singletons.
///
/// The output is always a partition of the input: every team appears in
/// exactly one non-empty cluster.
pub struct ClusterBuilder;

impl ClusterBuilder {
    /// Runs clustering.
    pub fn build(teams: &[Team], options: &ClusterOptions) -> Result<ClusterReport> {
        options.validate().map_err(LeagueError::InvalidConfig)?;
        validate_teams(teams)?;

        info!("clustering {} teams", teams.len());

        let (located, unlocated): (Vec<&Team>, Vec<&Team>) =
            teams.iter().partition(|t| t.coordinates.is_some());

        let mut clusters = Vec::new();
        let mut claimed: HashSet<&TeamId> = HashSet::new();

        if !options.partnerships.is_empty() {
            let by_id: HashMap<&TeamId, &Team> = teams.iter().map(|t| (&t.id, t)).collect();
            for p in &options.partnerships {
                if p.first == p.second || claimed.contains(&p.first) || claimed.contains(&p.second)
                {
                    continue;
                }
                if let (Some(a), Some(b)) = (by_id.get(&p.first), by_id.get(&p.second)) {
                    debug!("seeding cluster from partnership {} / {}", a.id, b.id);
                    clusters.push(Cluster::new(vec![(*a).clone(), (*b).clone()]));
                    claimed.insert(&a.id);
                    claimed.insert(&b.id);
                }
            }
        }

        // Partnerships may claim teams without coordinates; only the rest
        // sit out geometric clustering.
        let skipped = unlocated.iter().filter(|t| !claimed.contains(&t.id)).count();
        if skipped > 0 {
            warn!("{skipped} teams have no coordinates and will be left as singletons");
        }

        let pool: Vec<Team> = located
            .into_iter()
            .filter(|t| !claimed.contains(&t.id))
            .cloned()
            .collect();
        clusters.extend(distance_clusters(
            pool,
            miles_to_km(options.radius_miles),
            options.min_size,
            options.max_size,
        ));

        let mut rebalanced = false;
        if options.balance_strength && has_strength_data(teams, options) {
            rebalanced = balance_strength(&mut clusters, &options.team_strengths);
        }

        for constraint in &options.constraints {
            apply_constraint(&mut clusters, constraint)?;
        }
        prune_empty(&mut clusters);

        let clustered: HashSet<TeamId> = clusters
            .iter()
            .flat_map(|c| c.team_ids().cloned())
            .collect();
        let leftovers: Vec<&Team> = teams.iter().filter(|t| !clustered.contains(&t.id)).collect();
        if !leftovers.is_empty() {
            info!("{} teams could not be clustered; adding singletons", leftovers.len());
        }
        clusters.extend(leftovers.into_iter().map(|t| Cluster::singleton(t.clone())));

        let report = ClusterReport {
            clusters,
            skipped_missing_coordinates: skipped,
            rebalanced,
        };
        info!(
            "clustering complete: {} clusters, mean size {:.2}",
            report.clusters.len(),
            report.mean_cluster_size()
        );
        Ok(report)
    }
}

/// Partitions teams into travel clusters; see [`ClusterBuilder`].
pub fn build_clusters(teams: &[Team], options: &ClusterOptions) -> Result<Vec<Cluster>> {
    ClusterBuilder::build(teams, options).map(|r| r.clusters)
}

fn validate_teams(teams: &[Team]) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for t in teams {
        if t.id.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingId,
                "team with empty id",
            ));
        }
        if !seen.insert(&t.id) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateTeamId,
                format!("duplicate team id '{}'", t.id),
            ));
        }
    }
    Ok(())
}

fn has_strength_data(teams: &[Team], options: &ClusterOptions) -> bool {
    !options.team_strengths.is_empty() || teams.iter().any(|t| t.strength.is_some())
}

fn km_between(a: &Team, b: &Team) -> f64 {
    match (a.coordinates, b.coordinates) {
        (Some(x), Some(y)) => meters_to_km(planar_distance(x, y)),
        _ => f64::INFINITY,
    }
}

/// Greedy seed-and-absorb clustering.
///
/// Each team serves as a seed at most once. A seed absorbs pool members
/// within `radius_km`, in pool order, until `max_size`. Undersized clusters
/// return their members to the back of the pool.
///
/// What remains becomes one final cluster if it is large enough and stays
/// within `radius_km` of its first member. Otherwise each leftover joins the
/// cluster holding its nearest member (first cluster wins ties), or stands
/// alone if seeding produced no cluster at all.
pub(crate) fn distance_clusters(
    teams: Vec<Team>,
    radius_km: f64,
    min_size: usize,
    max_size: usize,
) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut pool = teams;
    let mut seeded: HashSet<TeamId> = HashSet::new();

    while let Some(seed_pos) = pool.iter().position(|t| !seeded.contains(&t.id)) {
        let seed = pool.remove(seed_pos);
        seeded.insert(seed.id.clone());

        let mut members = vec![seed];
        let mut i = 0;
        while i < pool.len() && members.len() < max_size {
            if km_between(&members[0], &pool[i]) <= radius_km {
                members.push(pool.remove(i));
            } else {
                i += 1;
            }
        }

        if members.len() >= min_size {
            clusters.push(Cluster::new(members));
        } else {
            pool.extend(members);
        }
    }

    if pool.is_empty() {
        return clusters;
    }

    let coherent = pool
        .iter()
        .all(|t| km_between(&pool[0], t) <= radius_km);
    if pool.len() >= min_size && coherent {
        clusters.push(Cluster::new(pool));
        return clusters;
    }

    let seeded_count = clusters.len();
    for team in pool {
        let nearest = nearest_cluster(&clusters[..seeded_count], team.coordinates);
        match nearest {
            Some(ci) => clusters[ci].teams.push(team),
            None => clusters.push(Cluster::singleton(team)),
        }
    }
    clusters
}

fn nearest_cluster(clusters: &[Cluster], from: Option<Coordinates>) -> Option<usize> {
    let from = from?;
    let mut best: Option<(usize, f64)> = None;
    for (ci, cluster) in clusters.iter().enumerate() {
        for member in &cluster.teams {
            let Some(at) = member.coordinates else {
                continue;
            };
            let d = planar_distance(from, at);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((ci, d));
            }
        }
    }
    best.map(|(ci, _)| ci)
}
