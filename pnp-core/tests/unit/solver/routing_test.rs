use super::*;
use crate::helpers::*;
use crate::solver::mip::HighsSolver;

fn single_placement_job() -> Job {
    create_test_job(
        test_machine(),
        vec![test_feeder("F1", "R", 0., 0.)],
        vec![test_placement("P1", "R", 30., 40.)],
    )
}

fn solve_with_policy(job: &Job, policy: ArcTimePolicy) -> RouteSolution {
    RouteModel::new(&job.feeders[0], job.placements.as_slice(), job, policy)
        .solve(&HighsSolver::default(), &SolverOptions::default())
        .unwrap()
}

#[test]
fn can_route_single_placement_cluster() {
    let job = single_placement_job();

    let route = solve_with_policy(&job, ArcTimePolicy::AmortizedOverhead);

    assert_eq!(route.arcs.len(), 2);
    assert_eq!(route.arcs[0].from.id, "F1");
    assert_eq!(route.arcs[0].to.id, "P1");
    assert_eq!(route.arcs[1].from.id, "P1");
    assert_eq!(route.arcs[1].to.id, "F1");
    assert!((route.objective - 100.).abs() < 1e-6);
    // 0.5s of travel plus the 0.7s align and place overhead on every arc
    assert!((route.arcs[0].time - 1.2).abs() < 1e-9);
    assert!((route.arcs[1].time - 1.2).abs() < 1e-9);
}

#[test]
fn can_route_pair_cluster_with_minimal_total_distance() {
    let job = create_test_job(
        test_machine(),
        vec![test_feeder("F1", "R", 0., 0.)],
        vec![test_placement("P1", "R", 30., 40.), test_placement("P2", "R", 60., 80.)],
    );

    let route = solve_with_policy(&job, ArcTimePolicy::AmortizedOverhead);

    assert_eq!(route.arcs.len(), 3);
    assert_eq!(route.arcs[0].from.id, "F1");
    assert_eq!(route.arcs[2].to.id, "F1");

    let mut arrivals = route.arcs.iter().map(|arc| arc.to.id.as_str()).collect::<Vec<_>>();
    arrivals.sort_unstable();
    assert_eq!(arrivals, vec!["F1", "P1", "P2"]);

    let total = route.arcs.iter().map(|arc| arc.distance).sum::<f64>();
    assert!((total - 200.).abs() < 1e-6);
    assert!((route.objective - total).abs() < 1e-6);
}

#[test]
fn can_find_optimal_visit_order() {
    let job = create_test_job(
        test_machine(),
        vec![test_feeder("F1", "R", 0., 0.)],
        vec![
            test_placement("P1", "R", 0., 10.),
            test_placement("P2", "R", 0., 20.),
            test_placement("P3", "R", 0., 30.),
        ],
    );

    let route = solve_with_policy(&job, ArcTimePolicy::AmortizedOverhead);

    assert_eq!(route.arcs.len(), 4);
    let total = route.arcs.iter().map(|arc| arc.distance).sum::<f64>();
    assert!((total - 60.).abs() < 1e-6);
}

#[test]
fn can_bill_pure_travel_on_return_arc() {
    let job = single_placement_job();

    let route = solve_with_policy(&job, ArcTimePolicy::PureReturnTravel);

    assert!((route.arcs[0].time - 1.2).abs() < 1e-9);
    assert!((route.arcs[1].time - 0.5).abs() < 1e-9);
}

#[test]
fn can_accept_incumbent_on_time_limit() {
    let job = single_placement_job();
    // walk of the two-trip model: feeder to placement at step 0, back at step 1
    let stub = StubSolver::new(SolverStatus::TimeLimit, vec![1., 0., 0., 1.], 100.);

    let route = RouteModel::new(
        &job.feeders[0],
        job.placements.as_slice(),
        &job,
        ArcTimePolicy::AmortizedOverhead,
    )
    .solve(&stub, &SolverOptions::default())
    .unwrap();

    assert_eq!(route.arcs.len(), 2);
    assert_eq!(route.arcs[0].to.id, "P1");
}

#[test]
fn can_fail_on_time_limit_without_incumbent() {
    let job = single_placement_job();
    let stub = StubSolver::new(SolverStatus::TimeLimit, vec![], 0.);

    let result = RouteModel::new(
        &job.feeders[0],
        job.placements.as_slice(),
        &job,
        ArcTimePolicy::AmortizedOverhead,
    )
    .solve(&stub, &SolverOptions::default());

    assert!(matches!(result, Err(Error::SolverTimeout)));
}

#[test]
fn can_fail_on_infeasible_model() {
    let job = single_placement_job();
    let stub = StubSolver::new(SolverStatus::Infeasible, vec![], 0.);

    let result = RouteModel::new(
        &job.feeders[0],
        job.placements.as_slice(),
        &job,
        ArcTimePolicy::AmortizedOverhead,
    )
    .solve(&stub, &SolverOptions::default());

    assert!(matches!(result, Err(Error::SolverInfeasible)));
}

#[test]
fn can_fail_on_unknown_termination() {
    let job = single_placement_job();
    let stub = StubSolver::new(SolverStatus::Other("numerical trouble".to_string()), vec![], 0.);

    let result = RouteModel::new(
        &job.feeders[0],
        job.placements.as_slice(),
        &job,
        ArcTimePolicy::AmortizedOverhead,
    )
    .solve(&stub, &SolverOptions::default());

    match result {
        Err(Error::SolverUnknown { condition }) => assert_eq!(condition, "numerical trouble"),
        _ => panic!("expected unknown termination error"),
    }
}
