//! Partitions placements into head-sized clusters.

#[cfg(test)]
#[path = "../../../tests/unit/construction/clustering_test.rs"]
mod clustering_test;

use crate::models::problem::{Job, Node};
use crate::utils::compare_floats;
use hashbrown::HashMap;
use std::sync::Arc;

/// Clusters of placements per part type. Each cluster is handled by one
/// pickup trip; clusters are listed in trip order.
pub type PlacementClusters = HashMap<String, Vec<Vec<Arc<Node>>>>;

/// Partitions the job's placements, per part type, into ordered clusters of
/// size bounded by the machine head capacity.
///
/// For each feeder in ascending-x order, the placements of the feeder's part
/// type are sorted by ascending feeder-placement distance and sliced into
/// consecutive chunks of `head_capacity`; the last chunk may be short.
/// Nearest-first chunking keeps clusters geographically cohesive, which keeps
/// the downstream routing model small and its warm objective good. Ties on
/// equal distance are broken by ascending placement id, so cluster order is
/// deterministic. Requires [`Job::calculate_distances`] to have run.
pub fn create_placement_clusters(job: &Job) -> PlacementClusters {
    let head_capacity = job.machine.head_capacity;

    job.feeders
        .iter()
        .map(|feeder| {
            let mut placements = job
                .placements
                .iter()
                .filter(|placement| placement.part_type == feeder.part_type)
                .cloned()
                .collect::<Vec<_>>();

            placements.sort_by(|a, b| {
                compare_floats(
                    job.feeder_placement_distance(&feeder.id, &a.id),
                    job.feeder_placement_distance(&feeder.id, &b.id),
                )
                .then_with(|| a.id.cmp(&b.id))
            });

            let clusters =
                placements.chunks(head_capacity).map(|chunk| chunk.to_vec()).collect::<Vec<_>>();

            (feeder.part_type.clone(), clusters)
        })
        .collect()
}
