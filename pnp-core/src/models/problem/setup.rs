#[cfg(test)]
#[path = "../../../tests/unit/models/problem/setup_test.rs"]
mod setup_test;

use crate::models::problem::{Job, Machine, Node};
use crate::utils::compare_floats;
use crate::{Error, Result};
use hashbrown::HashSet;
use std::sync::Arc;

/// Describes one feeder station of the input feeder bank.
#[derive(Clone, Debug)]
pub struct FeederDefinition {
    /// Feeder id, unique across the bank.
    pub id: String,
    /// Part type held by the feeder reel.
    pub part_type: String,
    /// Pickup point x coordinate in mm.
    pub pickup_x: f64,
    /// Pickup point y coordinate in mm. All feeders share one y.
    pub pickup_y: f64,
}

/// Describes one job of the input job list.
#[derive(Clone, Debug)]
pub struct JobDefinition {
    /// Job id, unique across the setup.
    pub id: String,
    /// Human readable job name.
    pub name: String,
    /// Amount of boards to produce.
    pub quantity: usize,
    /// Due time in seconds, used for earliest-due-first ordering.
    pub due_time: f64,
}

/// Describes one placement of the input placement list.
#[derive(Clone, Debug)]
pub struct PlacementDefinition {
    /// Id of the job the placement belongs to.
    pub job_id: String,
    /// Placement id, unique within its job.
    pub id: String,
    /// Required part type.
    pub part_type: String,
    /// X coordinate in mm.
    pub x: f64,
    /// Y coordinate in mm.
    pub y: f64,
}

/// An ordered production plan: jobs with their quantities, ordered by
/// ascending due time (earliest first).
pub struct Setup {
    /// Machine timings and head capacity, shared by all jobs.
    pub machine: Arc<Machine>,
    /// Jobs with their quantities, in execution order.
    pub jobs: Vec<(Job, usize)>,
}

impl Setup {
    /// Builds a setup from raw input definitions.
    ///
    /// All structural violations are collected and reported together in one
    /// [`Error::InputValidation`]; a feeder lying inside a job's placement
    /// rectangle is reported as [`Error::Geometry`]. Any violation is fatal.
    pub fn new(
        machine: Machine,
        feeders: Vec<FeederDefinition>,
        jobs: Vec<JobDefinition>,
        placements: Vec<PlacementDefinition>,
    ) -> Result<Self> {
        validate_input(&machine, &feeders, &jobs, &placements)?;

        let machine = Arc::new(machine);
        let feeder_nodes = feeders
            .iter()
            .map(|feeder| {
                Arc::new(Node::feeder(&feeder.id, &feeder.part_type, feeder.pickup_x, feeder.pickup_y))
            })
            .collect::<Vec<_>>();

        let mut ordered = jobs;
        ordered.sort_by(|a, b| compare_floats(a.due_time, b.due_time));

        let jobs = ordered
            .iter()
            .map(|job| {
                let job_placements = placements
                    .iter()
                    .filter(|placement| placement.job_id == job.id)
                    .map(|placement| {
                        Arc::new(Node::placement(
                            &placement.id,
                            &placement.part_type,
                            placement.x,
                            placement.y,
                        ))
                    })
                    .collect::<Vec<_>>();

                Job::new(&job.id, &job.name, machine.clone(), feeder_nodes.clone(), job_placements)
                    .map(|job_model| (job_model, job.quantity))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { machine, jobs })
    }
}

fn validate_input(
    machine: &Machine,
    feeders: &[FeederDefinition],
    jobs: &[JobDefinition],
    placements: &[PlacementDefinition],
) -> Result<()> {
    let mut violations = Vec::new();

    if machine.head_count < 1 {
        violations.push("machine head count must be at least 1".to_string());
    }
    if machine.head_capacity < 1 {
        violations.push("machine head capacity must be at least 1".to_string());
    }
    if machine.travel_speed <= 0. {
        violations.push("machine travel speed must be positive".to_string());
    }
    if [machine.pick_time, machine.place_time, machine.vision_align_time, machine.pcb_changeover_time]
        .iter()
        .any(|time| *time < 0.)
    {
        violations.push("machine times must be non-negative".to_string());
    }

    if has_duplicates(jobs.iter().map(|job| job.id.as_str())) {
        violations.push("job ids are not unique".to_string());
    }

    jobs.iter().filter(|job| job.quantity < 1).for_each(|job| {
        violations.push(format!("job '{}' quantity must be at least 1", job.id));
    });

    if has_duplicates(feeders.iter().map(|feeder| feeder.id.as_str())) {
        violations.push("feeder ids are not unique".to_string());
    }

    if has_duplicates(feeders.iter().map(|feeder| feeder.part_type.as_str())) {
        violations.push("expected one-to-one mapping between feeder and part type".to_string());
    }

    if let Some(first) = feeders.first() {
        if feeders.iter().any(|feeder| feeder.pickup_y != first.pickup_y) {
            violations.push("feeder pickup points are not collinear in y".to_string());
        }
    }

    if has_duplicates(placements.iter().map(|placement| (placement.job_id.as_str(), placement.id.as_str()))) {
        violations.push("placement ids are not unique".to_string());
    }

    let job_ids = jobs.iter().map(|job| job.id.as_str()).collect::<HashSet<_>>();
    placements.iter().filter(|placement| !job_ids.contains(placement.job_id.as_str())).for_each(
        |placement| {
            violations
                .push(format!("placement '{}' refers to unknown job '{}'", placement.id, placement.job_id));
        },
    );

    let part_types = feeders.iter().map(|feeder| feeder.part_type.as_str()).collect::<HashSet<_>>();
    placements
        .iter()
        .filter(|placement| !part_types.contains(placement.part_type.as_str()))
        .for_each(|placement| {
            violations.push(format!(
                "placement '{}' requires part type '{}' which no feeder holds",
                placement.id, placement.part_type
            ));
        });

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::InputValidation(violations.join("; ")))
    }
}

fn has_duplicates<T: std::hash::Hash + Eq>(mut items: impl Iterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    items.any(|item| !seen.insert(item))
}
