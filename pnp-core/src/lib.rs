//! A crate to compute an execution schedule for a surface-mount pick-and-place
//! machine.
//!
//! Given a bank of feeder stations holding reels of typed parts and a list of
//! placement coordinates on one or more PCB jobs, the crate emits an ordered
//! event sequence of pickups, placements, head travels and changeovers which
//! minimises total head travel distance subject to the machine head capacity.
//!
//! The pipeline has three stages:
//!
//! * [`construction::clustering`] partitions each job's placements, per part
//!   type, into ordered clusters bounded by the head capacity;
//! * [`solver::routing`] solves, per cluster, a shortest Hamiltonian path
//!   which starts and ends at the feeder, via a time-indexed MIP handed to a
//!   [`solver::mip::MipSolver`] implementation;
//! * [`solver::Engine`] stitches cluster routes into per-job event sequences
//!   with correct timing across job repeats and changeovers.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;

mod error;
pub use self::error::{Error, Result};
