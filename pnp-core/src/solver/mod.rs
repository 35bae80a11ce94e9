//! Orchestration of the scheduling pipeline.

#[cfg(test)]
#[path = "../../tests/unit/solver/engine_test.rs"]
mod engine_test;

pub mod mip;

mod routing;
pub use self::routing::{ArcTimePolicy, RouteArc, RouteModel, RouteSolution};

use crate::construction::clustering::create_placement_clusters;
use crate::models::problem::{Job, Node, NodeKind, Setup};
use crate::models::solution::{Event, JobSequence, TravelArc};
use crate::solver::mip::{HighsSolver, MipSolver, SolverOptions};
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Configures a scheduling run.
#[derive(Default)]
pub struct Config {
    /// Options handed to the MIP solver per cluster.
    pub solver_options: SolverOptions,
    /// Arc time accounting policy.
    pub arc_time_policy: ArcTimePolicy,
}

/// Drives the full pipeline across jobs and repeats: distance
/// precomputation, clustering, per-cluster routing, and event building with
/// correct feeder transfers and changeovers.
///
/// The engine itself is single threaded; the only blocking call is the MIP
/// solve, which may use multiple cores internally. The emitted sequence is
/// deterministic given a deterministic solver.
pub struct Engine {
    setup: Setup,
    config: Config,
    solver: Box<dyn MipSolver + Send + Sync>,
}

impl Engine {
    /// Creates an engine for the given setup with default configuration and
    /// the HiGHS-backed solver.
    pub fn new(setup: Setup) -> Self {
        Self { setup, config: Config::default(), solver: Box::new(HighsSolver::default()) }
    }

    /// Sets the run configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets a custom solver implementation.
    pub fn with_solver(mut self, solver: Box<dyn MipSolver + Send + Sync>) -> Self {
        self.solver = solver;
        self
    }

    /// Returns the setup the engine schedules.
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Runs the pipeline and returns one event sequence per job iteration,
    /// in execution order.
    ///
    /// The last visited feeder is tracked across jobs, so a new job whose
    /// first feeder differs from the previous job's last one starts with a
    /// feeder transfer. Repeats of a job are value copies of its first
    /// iteration prefixed with a fresh changeover. The run aborts on the
    /// first error; no partial result is returned.
    pub fn run(&mut self) -> Result<Vec<JobSequence>> {
        let mut sequences = Vec::new();
        let mut feeder_previous: Option<Arc<Node>> = None;
        let mut previous_iteration: Option<String> = None;

        for (job, quantity) in self.setup.jobs.iter_mut() {
            job.calculate_distances();
            let quantity = *quantity;

            info!(job = job.id.as_str(), quantity, "scheduling job");
            let body =
                build_job_events(job, &mut feeder_previous, self.solver.as_ref(), &self.config)?;

            let changeover_time = job.machine.pcb_changeover_time;
            let first_id = JobSequence::iteration_id(&job.id, 1);

            let mut events = Vec::with_capacity(body.len() + 1);
            if let Some(previous) = previous_iteration.as_ref() {
                events.push(Event::changeover(previous, &first_id, changeover_time));
            }
            events.extend(body.iter().cloned());
            sequences.push(JobSequence::new(&job.id, 1, events));

            for iteration in 2..=quantity {
                let previous_id = JobSequence::iteration_id(&job.id, iteration - 1);
                let iteration_id = JobSequence::iteration_id(&job.id, iteration);

                let mut events = Vec::with_capacity(body.len() + 1);
                events.push(Event::changeover(&previous_id, &iteration_id, changeover_time));
                events.extend(body.iter().cloned());
                sequences.push(JobSequence::new(&job.id, iteration, events));
            }

            previous_iteration = Some(JobSequence::iteration_id(&job.id, quantity));
        }

        Ok(sequences)
    }
}

/// Builds the event body of one job iteration: feeders in ascending-x order,
/// per feeder a feeder transfer (when the head comes from elsewhere) and one
/// pickup plus routed travels and places per cluster. Feeders without
/// matching placements are skipped entirely.
fn build_job_events(
    job: &Job,
    feeder_previous: &mut Option<Arc<Node>>,
    solver: &dyn MipSolver,
    config: &Config,
) -> Result<Vec<Event>> {
    let clusters_by_part = create_placement_clusters(job);
    let machine = job.machine.as_ref();

    let mut events = Vec::new();
    for feeder in job.feeders.iter() {
        let clusters = match clusters_by_part.get(&feeder.part_type) {
            Some(clusters) if !clusters.is_empty() => clusters,
            _ => continue,
        };

        if let Some(previous) = feeder_previous.as_ref() {
            if previous.id != feeder.id {
                let distance = job.feeder_feeder_distance(&previous.id, &feeder.id);
                let arc = TravelArc {
                    x_i: previous.x,
                    y_i: previous.y,
                    x_j: feeder.x,
                    y_j: feeder.y,
                    distance,
                };
                events.push(Event::feeder_travel(
                    previous,
                    feeder,
                    distance / machine.travel_speed,
                    arc,
                ));
            }
        }

        for cluster in clusters.iter() {
            events.push(Event::pickup(feeder, machine.pick_time));

            let route = RouteModel::new(feeder, cluster.as_slice(), job, config.arc_time_policy)
                .solve(solver, &config.solver_options)?;

            for arc in route.arcs.iter() {
                events.push(Event::travel(&arc.from, &arc.to, arc.time, arc.travel_arc()));
                if arc.to.kind == NodeKind::Placement {
                    events.push(Event::place(&arc.to, machine.place_time));
                }
            }
        }

        *feeder_previous = Some(feeder.clone());
    }

    Ok(events)
}
