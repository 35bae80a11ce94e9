use thiserror::Error;

/// A specialized result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Describes the fatal conditions of a scheduling run. None of them is
/// retried internally: the engine aborts the whole run on the first error
/// and no partial sequence is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// Setup input violates one or more structural invariants. The message
    /// joins all violations found, not just the first one.
    #[error("invalid setup input: {0}")]
    InputValidation(String),

    /// A feeder pickup point lies inside the minimum rotated rectangle
    /// spanning the job's placements.
    #[error("feeders overlap the placement area of job '{job_id}'")]
    Geometry {
        /// Id of the offending job.
        job_id: String,
    },

    /// The routing model was reported infeasible. The model is feasible by
    /// construction for any non-empty cluster, so this indicates a bug.
    #[error("routing model reported infeasible")]
    SolverInfeasible,

    /// The solver terminated with a condition the crate does not handle.
    #[error("solver terminated with unknown condition: {condition}")]
    SolverUnknown {
        /// Condition text reported by the solver backend.
        condition: String,
    },

    /// The solver hit its time limit without producing an incumbent.
    #[error("solver timed out without an incumbent solution")]
    SolverTimeout,

    /// A node id returned by the solver cannot be resolved against the
    /// cluster it was built from. Indicates a bug.
    #[error("unknown node '{id}' in solver output")]
    MissingNode {
        /// The unresolved node id.
        id: String,
    },
}
