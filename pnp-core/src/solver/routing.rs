#[cfg(test)]
#[path = "../../tests/unit/solver/routing_test.rs"]
mod routing_test;

use crate::models::common::{Distance, Duration};
use crate::models::problem::{Job, Node, NodeKind};
use crate::models::solution::TravelArc;
use crate::solver::mip::{
    ConstraintSense, MipModel, MipSolution, MipSolver, SolverOptions, SolverStatus, VarId,
};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Selects how the per-placement overhead (vision align and place time) is
/// billed into solver arc times.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArcTimePolicy {
    /// Every arc, including the final return to the feeder, carries the
    /// overhead of its destination as an amortised per-pick cost.
    AmortizedOverhead,
    /// The return-to-feeder arc is billed pure travel time; interior arcs
    /// keep the overhead.
    PureReturnTravel,
}

impl Default for ArcTimePolicy {
    fn default() -> Self {
        ArcTimePolicy::AmortizedOverhead
    }
}

/// One directed move of the head inside a routing solution, in step order.
#[derive(Clone, Debug)]
pub struct RouteArc {
    /// Start node.
    pub from: Arc<Node>,
    /// End node.
    pub to: Arc<Node>,
    /// Arc length in mm.
    pub distance: Distance,
    /// Arc time in seconds, billed according to [`ArcTimePolicy`].
    pub time: Duration,
}

impl RouteArc {
    /// Returns the head motion of this arc.
    pub fn travel_arc(&self) -> TravelArc {
        TravelArc {
            x_i: self.from.x,
            y_i: self.from.y,
            x_j: self.to.x,
            y_j: self.to.y,
            distance: self.distance,
        }
    }
}

/// A solved pickup trip: `N + 1` arcs forming the minimum-distance closed
/// walk feeder → placements → feeder.
#[derive(Clone, Debug)]
pub struct RouteSolution {
    /// Arcs in traversal order.
    pub arcs: Vec<RouteArc>,
    /// Total travel distance of the walk as reported by the solver.
    pub objective: f64,
}

/// Builds and solves the routing model of one pickup trip: the shortest
/// Hamiltonian path on the feeder and the cluster placements with both
/// endpoints fixed at the feeder.
///
/// The formulation is a time-indexed assignment: binary `x[i,j,t]` selects
/// trip `(i, j)` at step `t`. The step index enforces path connectivity, so
/// no subtour elimination cuts are needed. Model size is O(N³) variables and
/// O(N²) constraints, which stays small for clusters bounded by the head
/// capacity.
pub struct RouteModel<'a> {
    feeder: &'a Arc<Node>,
    placements: &'a [Arc<Node>],
    job: &'a Job,
    policy: ArcTimePolicy,
}

impl<'a> RouteModel<'a> {
    /// Creates a routing model for one feeder and a non-empty cluster of its
    /// placements.
    pub fn new(
        feeder: &'a Arc<Node>,
        placements: &'a [Arc<Node>],
        job: &'a Job,
        policy: ArcTimePolicy,
    ) -> Self {
        Self { feeder, placements, job, policy }
    }

    /// Solves the model and returns the arcs of the optimal walk in step
    /// order.
    ///
    /// An incumbent produced at the time limit is accepted; a time limit
    /// without incumbent, an infeasible model (impossible by construction,
    /// hence a bug) and any unknown termination are fatal.
    pub fn solve(&self, solver: &dyn MipSolver, options: &SolverOptions) -> Result<RouteSolution> {
        let (model, trips) = self.build_model();
        debug!(
            placements = self.placements.len(),
            variables = model.binary_count(),
            constraints = model.constraints().len(),
            "routing model built"
        );

        let solution = solver.solve(&model, options)?;
        match &solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible => {}
            SolverStatus::TimeLimit => {
                if solution.values.is_empty() {
                    return Err(Error::SolverTimeout);
                }
                warn!("accepting incumbent after solver time limit");
            }
            SolverStatus::Infeasible => return Err(Error::SolverInfeasible),
            SolverStatus::Other(condition) => {
                return Err(Error::SolverUnknown { condition: condition.clone() })
            }
        }
        if solution.values.len() < model.binary_count() {
            return Err(Error::SolverUnknown { condition: "incomplete assignment".to_string() });
        }

        self.extract_arcs(&solution, trips.as_slice())
    }

    /// Builds the time-indexed model. Returns the model and the trip list;
    /// the variable of trip `tr` at step `t` has id `tr * (N + 1) + t`.
    fn build_model(&self) -> (MipModel, Vec<Trip>) {
        let node_count = self.placements.len() + 1;
        let steps = self.placements.len() + 1;

        let trips = (0..node_count)
            .flat_map(|i| (0..node_count).filter(move |&j| i != j).map(move |j| (i, j)))
            .map(|(i, j)| Trip { from: i, to: j, distance: self.trip_distance(i, j) })
            .collect::<Vec<_>>();

        let mut model = MipModel::default();
        let vars = trips
            .iter()
            .map(|_| (0..steps).map(|_| model.binary()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        // one arc per step
        for step in 0..steps {
            let terms = vars.iter().map(|trip_vars| (trip_vars[step], 1.)).collect();
            model.constraint(terms, ConstraintSense::Equal, 1.);
        }

        let trips_from = |node: usize| {
            trips.iter().enumerate().filter(move |(_, trip)| trip.from == node)
        };
        let trips_to =
            |node: usize| trips.iter().enumerate().filter(move |(_, trip)| trip.to == node);

        // the walk starts at the feeder: one departure from and no arrival
        // at node 0 at the first step
        let terms = trips_from(FEEDER).map(|(tr, _)| (vars[tr][0], 1.)).collect();
        model.constraint(terms, ConstraintSense::Equal, 1.);
        let terms = trips_to(FEEDER).map(|(tr, _)| (vars[tr][0], 1.)).collect();
        model.constraint(terms, ConstraintSense::Equal, 0.);

        // and ends there: one arrival at and no departure from node 0 at the
        // last step
        let last = steps - 1;
        let terms = trips_to(FEEDER).map(|(tr, _)| (vars[tr][last], 1.)).collect();
        model.constraint(terms, ConstraintSense::Equal, 1.);
        let terms = trips_from(FEEDER).map(|(tr, _)| (vars[tr][last], 1.)).collect();
        model.constraint(terms, ConstraintSense::Equal, 0.);

        // flow continuity: an arrival at a placement is followed by a
        // departure from it at the next step
        for node in 1..node_count {
            for step in 1..last {
                let mut terms: Vec<(VarId, f64)> =
                    trips_to(node).map(|(tr, _)| (vars[tr][step - 1], 1.)).collect();
                terms.extend(trips_from(node).map(|(tr, _)| (vars[tr][step], -1.)));
                model.constraint(terms, ConstraintSense::Equal, 0.);
            }
        }

        // each placement is departed from exactly once and arrived at
        // exactly once over the whole walk
        for node in 1..node_count {
            let mut departures: Vec<(VarId, f64)> = Vec::new();
            let mut arrivals: Vec<(VarId, f64)> = Vec::new();
            for (tr, trip) in trips.iter().enumerate() {
                for step in 0..steps {
                    if trip.from == node {
                        departures.push((vars[tr][step], 1.));
                    }
                    if trip.to == node {
                        arrivals.push((vars[tr][step], 1.));
                    }
                }
            }
            model.constraint(departures, ConstraintSense::Equal, 1.);
            model.constraint(arrivals, ConstraintSense::Equal, 1.);
        }

        let mut objective = Vec::with_capacity(trips.len() * steps);
        for (tr, trip) in trips.iter().enumerate() {
            for step in 0..steps {
                objective.push((vars[tr][step], trip.distance));
            }
        }
        model.minimise(objective);

        (model, trips)
    }

    /// Resolves the selected trip of each step into a [`RouteArc`].
    fn extract_arcs(&self, solution: &MipSolution, trips: &[Trip]) -> Result<RouteSolution> {
        let steps = self.placements.len() + 1;
        let machine = self.job.machine.as_ref();
        let overhead = machine.vision_align_time + machine.place_time;

        let mut arcs = Vec::with_capacity(steps);
        for step in 0..steps {
            let (_, trip) = trips
                .iter()
                .enumerate()
                .find(|(tr, _)| solution.values[tr * steps + step] > 0.5)
                .ok_or_else(|| Error::SolverUnknown {
                    condition: format!("no trip selected at step {step}"),
                })?;

            let from = self.node(trip.from)?;
            let to = self.node(trip.to)?;
            let travel = trip.distance / machine.travel_speed;
            let time = match self.policy {
                ArcTimePolicy::AmortizedOverhead => travel + overhead,
                ArcTimePolicy::PureReturnTravel if to.kind == NodeKind::Feeder => travel,
                ArcTimePolicy::PureReturnTravel => travel + overhead,
            };

            arcs.push(RouteArc {
                from: from.clone(),
                to: to.clone(),
                distance: trip.distance,
                time,
            });
        }

        Ok(RouteSolution { arcs, objective: solution.objective })
    }

    fn trip_distance(&self, from: usize, to: usize) -> Distance {
        match (from, to) {
            (FEEDER, to) => {
                self.job.feeder_placement_distance(&self.feeder.id, &self.placements[to - 1].id)
            }
            (from, FEEDER) => {
                self.job.feeder_placement_distance(&self.placements[from - 1].id, &self.feeder.id)
            }
            (from, to) => self
                .job
                .placement_placement_distance(&self.placements[from - 1].id, &self.placements[to - 1].id),
        }
    }

    fn node(&self, index: usize) -> Result<&Arc<Node>> {
        if index == FEEDER {
            Ok(self.feeder)
        } else {
            self.placements
                .get(index - 1)
                .ok_or_else(|| Error::MissingNode { id: index.to_string() })
        }
    }
}

/// Node index of the feeder inside a routing model.
const FEEDER: usize = 0;

/// A candidate directed move between two model nodes.
struct Trip {
    from: usize,
    to: usize,
    distance: Distance,
}
