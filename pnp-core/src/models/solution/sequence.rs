use crate::models::solution::Event;

/// The event sequence of one job iteration.
#[derive(Clone, Debug)]
pub struct JobSequence {
    /// Unique iteration id in the form `<job_id>-<iteration>`, starting at 1.
    pub iteration_id: String,
    /// Id of the job the iteration belongs to.
    pub job_id: String,
    /// Events of this iteration, in execution order.
    pub events: Vec<Event>,
}

impl JobSequence {
    /// Creates a sequence for the given job iteration.
    pub fn new(job_id: &str, iteration: usize, events: Vec<Event>) -> Self {
        Self {
            iteration_id: Self::iteration_id(job_id, iteration),
            job_id: job_id.to_string(),
            events,
        }
    }

    /// Formats the unique id of a job iteration.
    pub fn iteration_id(job_id: &str, iteration: usize) -> String {
        format!("{job_id}-{iteration}")
    }
}
