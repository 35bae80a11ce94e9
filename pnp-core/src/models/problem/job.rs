#[cfg(test)]
#[path = "../../../tests/unit/models/problem/job_test.rs"]
mod job_test;

use crate::models::common::Distance;
use crate::models::problem::{Machine, Node};
use crate::utils::{compare_floats, euclidean_distance, minimum_rotated_rect};
use crate::{Error, Result};
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// One PCB layout to be populated. Owns the feeder bank view, the placement
/// list and the pairwise distance maps used by clustering and routing.
pub struct Job {
    /// Job id, unique within a setup.
    pub id: String,
    /// Human readable job name.
    pub name: String,
    /// Machine timings and head capacity.
    pub machine: Arc<Machine>,
    /// Feeders, sorted by ascending x. Feeders are assumed collinear in y.
    pub feeders: Vec<Arc<Node>>,
    /// Placements of this job, in input order.
    pub placements: Vec<Arc<Node>>,

    feeder_by_part: HashMap<String, Arc<Node>>,
    feeder_placement_distances: HashMap<(String, String), Distance>,
    feeder_feeder_distances: HashMap<(String, String), Distance>,
    placement_placement_distances: HashMap<(String, String), Distance>,
}

impl Job {
    /// Creates a new job, validating that no feeder pickup point lies inside
    /// the minimum rotated rectangle spanning the job's placements.
    pub fn new(
        id: &str,
        name: &str,
        machine: Arc<Machine>,
        mut feeders: Vec<Arc<Node>>,
        placements: Vec<Arc<Node>>,
    ) -> Result<Self> {
        let positions = placements.iter().map(|placement| placement.position()).collect::<Vec<_>>();
        if let Some(rect) = minimum_rotated_rect(positions.as_slice()) {
            if feeders.iter().any(|feeder| rect.contains(feeder.position())) {
                return Err(Error::Geometry { job_id: id.to_string() });
            }
        }

        feeders.sort_by(|a, b| compare_floats(a.x, b.x));
        let feeder_by_part =
            feeders.iter().map(|feeder| (feeder.part_type.clone(), feeder.clone())).collect();

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            machine,
            feeders,
            placements,
            feeder_by_part,
            feeder_placement_distances: Default::default(),
            feeder_feeder_distances: Default::default(),
            placement_placement_distances: Default::default(),
        })
    }

    /// Fills the three pairwise distance maps. Called once per job before
    /// clustering; the maps are never mutated afterwards. Each map is
    /// symmetric and complete for its cross-product, self distances are
    /// never stored.
    pub fn calculate_distances(&mut self) {
        for feeder in self.feeders.iter() {
            for placement in self.placements.iter() {
                let distance = euclidean_distance(feeder.position(), placement.position());
                self.feeder_placement_distances
                    .insert((feeder.id.clone(), placement.id.clone()), distance);
                self.feeder_placement_distances
                    .insert((placement.id.clone(), feeder.id.clone()), distance);
            }
            for other in self.feeders.iter() {
                if feeder.id != other.id {
                    let distance = euclidean_distance(feeder.position(), other.position());
                    self.feeder_feeder_distances
                        .insert((feeder.id.clone(), other.id.clone()), distance);
                    self.feeder_feeder_distances
                        .insert((other.id.clone(), feeder.id.clone()), distance);
                }
            }
        }

        for placement in self.placements.iter() {
            for other in self.placements.iter() {
                if placement.id != other.id {
                    let distance = euclidean_distance(placement.position(), other.position());
                    self.placement_placement_distances
                        .insert((placement.id.clone(), other.id.clone()), distance);
                    self.placement_placement_distances
                        .insert((other.id.clone(), placement.id.clone()), distance);
                }
            }
        }
    }

    /// Returns the feeder holding the given part type.
    pub fn feeder_by_part(&self, part_type: &str) -> Option<&Arc<Node>> {
        self.feeder_by_part.get(part_type)
    }

    /// Returns the distance between a feeder and a placement, in either
    /// argument order.
    pub fn feeder_placement_distance(&self, from_id: &str, to_id: &str) -> Distance {
        *self
            .feeder_placement_distances
            .get(&(from_id.to_string(), to_id.to_string()))
            .expect("feeder-placement distances not calculated")
    }

    /// Returns the distance between two distinct feeders.
    pub fn feeder_feeder_distance(&self, from_id: &str, to_id: &str) -> Distance {
        *self
            .feeder_feeder_distances
            .get(&(from_id.to_string(), to_id.to_string()))
            .expect("feeder-feeder distances not calculated")
    }

    /// Returns the distance between two distinct placements.
    pub fn placement_placement_distance(&self, from_id: &str, to_id: &str) -> Distance {
        *self
            .placement_placement_distances
            .get(&(from_id.to_string(), to_id.to_string()))
            .expect("placement-placement distances not calculated")
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<'{}': '{}'>", self.id, self.name)
    }
}
