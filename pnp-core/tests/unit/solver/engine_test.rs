use super::*;
use crate::helpers::*;
use crate::models::solution::EventKind;
use crate::solver::mip::SolverStatus;
use crate::Error;

fn kinds(sequence: &JobSequence) -> Vec<EventKind> {
    sequence.events.iter().map(|event| event.kind).collect()
}

fn two_placement_setup(quantity: usize) -> Setup {
    create_single_job_setup(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.)],
        vec![
            placement_definition("job1", "P1", "R", 30., 40.),
            placement_definition("job1", "P2", "R", 60., 80.),
        ],
        quantity,
    )
}

#[test]
fn can_schedule_single_cluster_job() {
    let sequences = Engine::new(two_placement_setup(1)).run().unwrap();

    assert_eq!(sequences.len(), 1);
    let sequence = &sequences[0];
    assert_eq!(sequence.iteration_id, "job1-1");
    assert_eq!(sequence.job_id, "job1");
    assert_eq!(
        kinds(sequence),
        vec![
            EventKind::Pickup,
            EventKind::Travel,
            EventKind::Place,
            EventKind::Travel,
            EventKind::Place,
            EventKind::Travel,
        ]
    );
    assert_eq!(sequence.events[0].detail, "pickup_F1_R");
    assert_eq!(sequence.events[0].time, 1.);

    let total = sequence
        .events
        .iter()
        .filter_map(|event| event.arc.as_ref())
        .map(|arc| arc.distance)
        .sum::<f64>();
    assert!((total - 200.).abs() < 1e-6);

    // every travel arc carries the amortised align and place overhead
    for event in sequence.events.iter().filter(|event| event.kind == EventKind::Travel) {
        let arc = event.arc.as_ref().unwrap();
        assert!((event.time - (arc.distance / 100. + 0.7)).abs() < 1e-9);
    }
}

#[test]
fn can_transfer_head_between_feeders() {
    let setup = create_single_job_setup(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.), feeder_definition("F2", "C", 100.)],
        vec![
            placement_definition("job1", "P1", "R", 10., 50.),
            placement_definition("job1", "P2", "C", 90., 50.),
        ],
        1,
    );

    let sequences = Engine::new(setup).run().unwrap();
    let sequence = &sequences[0];

    assert_eq!(
        kinds(sequence),
        vec![
            EventKind::Pickup,
            EventKind::Travel,
            EventKind::Place,
            EventKind::Travel,
            EventKind::Travel,
            EventKind::Pickup,
            EventKind::Travel,
            EventKind::Place,
            EventKind::Travel,
        ]
    );
    assert_eq!(sequence.events[4].detail, "travel_F1-Feeder-F2-C");
    assert!((sequence.events[4].time - 1.).abs() < 1e-9);
}

#[test]
fn can_repeat_job_with_changeovers() {
    let sequences = Engine::new(two_placement_setup(3)).run().unwrap();

    let ids = sequences.iter().map(|sequence| sequence.iteration_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["job1-1", "job1-2", "job1-3"]);

    assert_eq!(sequences[1].events[0].detail, "changeover_job1-1_job1-2");
    assert_eq!(sequences[2].events[0].detail, "changeover_job1-2_job1-3");
    assert_eq!(sequences[1].events[0].time, 5.);

    // repeats are value copies of the first iteration body
    assert_eq!(&sequences[1].events[1..], sequences[0].events.as_slice());
    assert_eq!(&sequences[2].events[1..], sequences[0].events.as_slice());

    let changeovers = sequences
        .iter()
        .flat_map(|sequence| sequence.events.iter())
        .filter(|event| event.kind == EventKind::Changeover)
        .count();
    assert_eq!(changeovers, 2);
}

#[test]
fn can_emit_changeovers_between_jobs_and_repeats() {
    let setup = Setup::new(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.)],
        vec![job_definition("A", 1, 100.), job_definition("B", 2, 200.)],
        vec![
            placement_definition("A", "P1", "R", 30., 40.),
            placement_definition("B", "P1", "R", 30., 40.),
        ],
    )
    .unwrap();

    let sequences = Engine::new(setup).run().unwrap();

    assert_eq!(sequences.len(), 3);
    let changeovers = sequences
        .iter()
        .flat_map(|sequence| sequence.events.iter())
        .filter(|event| event.kind == EventKind::Changeover)
        .map(|event| event.detail.as_str())
        .collect::<Vec<_>>();
    assert_eq!(changeovers, vec!["changeover_A-1_B-1", "changeover_B-1_B-2"]);
}

#[test]
fn can_transfer_head_across_jobs() {
    let setup = Setup::new(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.), feeder_definition("F2", "C", 100.)],
        vec![job_definition("A", 1, 100.), job_definition("B", 1, 200.)],
        vec![
            placement_definition("A", "P1", "C", 90., 50.),
            placement_definition("B", "P1", "R", 10., 50.),
        ],
    )
    .unwrap();

    let sequences = Engine::new(setup).run().unwrap();

    let second = &sequences[1];
    assert_eq!(second.events[0].kind, EventKind::Changeover);
    assert_eq!(second.events[1].detail, "travel_F2-Feeder-F1-R");
}

#[test]
fn can_skip_transfer_when_jobs_share_feeder() {
    let setup = Setup::new(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.)],
        vec![job_definition("A", 1, 100.), job_definition("B", 1, 200.)],
        vec![
            placement_definition("A", "P1", "R", 30., 40.),
            placement_definition("B", "P1", "R", 30., 40.),
        ],
    )
    .unwrap();

    let sequences = Engine::new(setup).run().unwrap();

    let second = &sequences[1];
    assert_eq!(second.events[0].kind, EventKind::Changeover);
    assert_eq!(second.events[1].kind, EventKind::Pickup);
}

#[test]
fn can_place_each_component_exactly_once() {
    let setup = create_single_job_setup(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.)],
        vec![
            placement_definition("job1", "P1", "R", 0., 10.),
            placement_definition("job1", "P2", "R", 0., 20.),
            placement_definition("job1", "P3", "R", 0., 30.),
            placement_definition("job1", "P4", "R", 0., 40.),
            placement_definition("job1", "P5", "R", 0., 50.),
        ],
        1,
    );

    let sequences = Engine::new(setup).run().unwrap();
    let sequence = &sequences[0];

    let pickups =
        sequence.events.iter().filter(|event| event.kind == EventKind::Pickup).count();
    assert_eq!(pickups, 3);

    // three clusters of sizes 2, 2 and 1 produce |cluster| + 1 travels each
    let travels =
        sequence.events.iter().filter(|event| event.kind == EventKind::Travel).count();
    assert_eq!(travels, 8);

    let mut places = sequence
        .events
        .iter()
        .filter(|event| event.kind == EventKind::Place)
        .map(|event| event.detail.as_str())
        .collect::<Vec<_>>();
    places.sort_unstable();
    assert_eq!(
        places,
        vec!["place_P1_R", "place_P2_R", "place_P3_R", "place_P4_R", "place_P5_R"]
    );

    let changeovers =
        sequence.events.iter().filter(|event| event.kind == EventKind::Changeover).count();
    assert_eq!(changeovers, 0);
}

#[test]
fn can_reproduce_identical_sequences_across_runs() {
    let first = Engine::new(two_placement_setup(2)).run().unwrap();
    let second = Engine::new(two_placement_setup(2)).run().unwrap();

    assert_eq!(first.len(), second.len());
    for (lhs, rhs) in first.iter().zip(second.iter()) {
        assert_eq!(lhs.iteration_id, rhs.iteration_id);
        assert_eq!(lhs.events, rhs.events);
    }
}

#[test]
fn can_apply_pure_return_travel_policy() {
    let setup = create_single_job_setup(
        test_machine(),
        vec![feeder_definition("F1", "R", 0.)],
        vec![placement_definition("job1", "P1", "R", 30., 40.)],
        1,
    );
    let config = Config {
        solver_options: SolverOptions::default(),
        arc_time_policy: ArcTimePolicy::PureReturnTravel,
    };

    let sequences = Engine::new(setup).with_config(config).run().unwrap();

    let travels = sequences[0]
        .events
        .iter()
        .filter(|event| event.kind == EventKind::Travel)
        .collect::<Vec<_>>();
    assert_eq!(travels.len(), 2);
    assert!((travels[0].time - 1.2).abs() < 1e-9);
    assert!((travels[1].time - 0.5).abs() < 1e-9);
}

#[test]
fn can_abort_run_on_solver_failure() {
    let solver = StubSolver::new(SolverStatus::Infeasible, vec![], 0.);

    let result =
        Engine::new(two_placement_setup(1)).with_solver(Box::new(solver)).run();

    assert!(matches!(result, Err(Error::SolverInfeasible)));
}
