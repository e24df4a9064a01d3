//! Post-clustering refinement: strength balancing and constraint repair.
//!
//! Every step here moves whole teams between existing clusters and then
//! prunes clusters left empty. Cluster order is otherwise preserved so that
//! later index-based constraints see a stable layout.

use super::config::{Constraint, STRENGTH_GAP_THRESHOLD};
use crate::error::{LeagueError, ValidationError, ValidationErrorKind};
use crate::models::{strength_of, Cluster, TeamId};
use log::debug;
use std::collections::HashMap;

/// Removes empty clusters in place.
pub(crate) fn prune_empty(clusters: &mut Vec<Cluster>) {
    clusters.retain(|c| !c.is_empty());
}

/// Locates `team` as `(cluster index, member index)`.
fn locate(clusters: &[Cluster], team: &TeamId) -> Option<(usize, usize)> {
    clusters
        .iter()
        .enumerate()
        .find_map(|(ci, c)| c.position(team).map(|ti| (ci, ti)))
}

/// Moves one member between clusters; `to` must differ from `from`.
fn move_team(clusters: &mut [Cluster], from: (usize, usize), to: usize) {
    let team = clusters[from.0].teams.remove(from.1);
    clusters[to].teams.push(team);
}

/// Performs at most one corrective move: when the mean-strength gap between
/// the strongest and weakest cluster exceeds [`STRENGTH_GAP_THRESHOLD`], the
/// strongest team of the strongest cluster joins the weakest cluster.
///
/// Returns whether a move happened.
pub fn balance_strength(clusters: &mut Vec<Cluster>, strengths: &HashMap<TeamId, f64>) -> bool {
    if clusters.len() < 2 {
        return false;
    }

    let means: Vec<f64> = clusters.iter().map(|c| c.mean_strength(strengths)).collect();

    // Strongest: first cluster with the highest mean. Weakest: last with the lowest.
    let mut strongest = 0;
    let mut weakest = 0;
    for (i, &m) in means.iter().enumerate() {
        if m > means[strongest] {
            strongest = i;
        }
        if m <= means[weakest] {
            weakest = i;
        }
    }

    let gap = means[strongest] - means[weakest];
    if strongest == weakest || gap <= STRENGTH_GAP_THRESHOLD {
        return false;
    }

    let donor = &clusters[strongest].teams;
    let mut pick = 0;
    for (i, team) in donor.iter().enumerate() {
        if strength_of(team, strengths) > strength_of(&donor[pick], strengths) {
            pick = i;
        }
    }

    debug!(
        "strength gap {gap:.1} exceeds {STRENGTH_GAP_THRESHOLD}; \
         moving '{}' from cluster {strongest} to {weakest}",
        donor[pick].id
    );
    move_team(clusters, (strongest, pick), weakest);
    prune_empty(clusters);
    true
}

/// Applies one constraint, then prunes empty clusters.
pub fn apply_constraint(
    clusters: &mut Vec<Cluster>,
    constraint: &Constraint,
) -> Result<(), LeagueError> {
    match constraint {
        Constraint::ReligiousPolicy {
            team,
            preferred_partners,
        }
        | Constraint::TravelCost {
            team,
            preferred_partners,
        } => join_preferred_partner(clusters, team, preferred_partners),
        Constraint::VenueSharing { teams } => consolidate(clusters, teams),
        Constraint::StrategicOutlier {
            team,
            target_cluster,
        } => force_move(clusters, team, *target_cluster)?,
    }
    prune_empty(clusters);
    Ok(())
}

fn join_preferred_partner(clusters: &mut [Cluster], team: &TeamId, partners: &[TeamId]) {
    if partners.is_empty() {
        return;
    }
    let Some((ci, ti)) = locate(clusters, team) else {
        debug!("constraint team '{team}' is not clustered; skipping");
        return;
    };
    if clusters[ci].team_ids().any(|id| partners.contains(id)) {
        return;
    }
    let target = clusters
        .iter()
        .enumerate()
        .find(|(i, c)| *i != ci && c.team_ids().any(|id| partners.contains(id)))
        .map(|(i, _)| i);
    if let Some(target) = target {
        debug!("moving '{team}' from cluster {ci} to partner cluster {target}");
        move_team(clusters, (ci, ti), target);
    }
}

fn consolidate(clusters: &mut [Cluster], teams: &[TeamId]) {
    if teams.len() < 2 {
        return;
    }

    // Members in cluster-scan order; the first one found fixes the target.
    let mut found: Vec<(usize, TeamId)> = Vec::new();
    for (ci, cluster) in clusters.iter().enumerate() {
        for id in cluster.team_ids() {
            if teams.contains(id) {
                found.push((ci, id.clone()));
            }
        }
    }
    let Some(&(target, _)) = found.first() else {
        return;
    };
    if found.iter().all(|(ci, _)| *ci == target) {
        return;
    }

    for (ci, id) in found {
        if ci == target {
            continue;
        }
        if let Some(ti) = clusters[ci].position(&id) {
            debug!("venue sharing: moving '{id}' from cluster {ci} to {target}");
            move_team(clusters, (ci, ti), target);
        }
    }
}

fn force_move(clusters: &mut [Cluster], team: &TeamId, target: usize) -> Result<(), LeagueError> {
    if target >= clusters.len() {
        return Err(ValidationError::new(
            ValidationErrorKind::ClusterIndexOutOfRange,
            format!(
                "strategic outlier '{team}' targets cluster {target}, but only {} exist",
                clusters.len()
            ),
        )
        .into());
    }
    match locate(clusters, team) {
        Some((ci, _)) if ci == target => {}
        Some(from) => {
            debug!("strategic outlier: moving '{team}' from cluster {} to {target}", from.0);
            move_team(clusters, from, target);
        }
        None => debug!("strategic outlier '{team}' is not clustered; skipping"),
    }
    Ok(())
}
