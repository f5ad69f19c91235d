//! End-to-end solver scenarios: feasible hoop shots, criterion divergence,
//! malformed queries, and the edge of reachability.

use approx::assert_relative_eq;
use shot_solver::trajectory::height_at_distance;
use shot_solver::{
    find_candidates, solve, Criterion, Projection, ShotQuery, Solution, SolverError,
};

/// Low launcher, rim at 2.5 m, three meters out.
fn hoop_query() -> ShotQuery {
    ShotQuery::from_degrees(0.51, 2.5, 3.0, 15.0, 30.0, 80.0, -10.0, 2.0, 0.23)
}

#[test]
fn scenario_a_feasible_hoop_shot() {
    let query = hoop_query();
    let candidates = find_candidates(&query).unwrap();
    assert!(!candidates.is_empty());

    for c in &candidates {
        assert!(c.theta >= 30.0f64.to_radians() && c.theta <= 80.0f64.to_radians());
        assert!(c.descent_angle <= (-10.0f64).to_radians());

        // Every candidate actually hits the rim height at the rim distance.
        let y = height_at_distance(c.theta, c.speed, query.distance, query.shooter_height);
        assert_relative_eq!(y, query.target_height, epsilon = 1e-6);
    }

    // Pairwise angle separation.
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            assert!((a.theta - b.theta).abs() >= query.min_angle_separation);
        }
    }
}

#[test]
fn scenario_b_criteria_select_different_shots() {
    let query = hoop_query();
    let candidates = find_candidates(&query).unwrap();
    assert!(candidates.len() >= 2, "scenario needs a multi-candidate set");

    let slowest = match solve(&query, Criterion::MinimumSpeed, Projection::Full).unwrap() {
        Solution::Full(c) => c,
        other => panic!("expected full candidate, got {other:?}"),
    };
    let steepest = match solve(&query, Criterion::SteepEntry, Projection::Full).unwrap() {
        Solution::Full(c) => c,
        other => panic!("expected full candidate, got {other:?}"),
    };

    for c in &candidates {
        assert!(slowest.speed <= c.speed);
        assert!(steepest.entry_angle >= c.entry_angle);
    }

    // The low-speed arc and the steep arc are genuinely different shots
    // here: minimum speed sits near the energy-optimal angle, steep entry
    // at the top of the angle window.
    assert!(steepest.theta > slowest.theta);
}

#[test]
fn scenario_c_invalid_distance_is_rejected() {
    for bad_distance in [0.0, -3.0] {
        let mut query = hoop_query();
        query.distance = bad_distance;
        let err = solve(&query, Criterion::Balanced, Projection::Full).unwrap_err();
        assert!(matches!(err, SolverError::InvalidQuery(_)));
    }
}

#[test]
fn scenario_d_unreachable_target_is_no_feasible_solution() {
    let mut query = hoop_query();
    query.distance = 100.0;

    let err = solve(&query, Criterion::Balanced, Projection::Full).unwrap_err();
    assert!(matches!(err, SolverError::NoFeasibleSolution));

    // And the raw search reports the same thing as an empty, error-free set.
    assert!(find_candidates(&query).unwrap().is_empty());
}

#[test]
fn reachability_boundary_collapses_to_one_candidate() {
    // Flat fire at 15 m/s tops out at v²/g ≈ 22.94 m of range. At 22.9 m
    // the feasible launch angles span roughly 43.4°–46.6°, a single
    // cluster narrower than the 4° separation: exactly one candidate.
    let query = ShotQuery::from_degrees(1.0, 1.0, 22.9, 15.0, 30.0, 60.0, -10.0, 4.0, 0.23);
    let candidates = find_candidates(&query).unwrap();
    assert_eq!(candidates.len(), 1);

    let c = &candidates[0];
    assert!(c.theta > 40.0f64.to_radians() && c.theta < 50.0f64.to_radians());
    assert!(c.speed <= 15.0);

    // A step past maximum range and the set is empty.
    let mut beyond = query.clone();
    beyond.distance = 23.5;
    assert!(find_candidates(&beyond).unwrap().is_empty());
}

#[test]
fn solve_is_deterministic_across_calls() {
    let query = hoop_query();
    for criterion in [
        Criterion::MinimumSpeed,
        Criterion::SteepEntry,
        Criterion::MaxMargin,
        Criterion::Fastest,
        Criterion::Balanced,
    ] {
        let first = solve(&query, criterion, Projection::Full).unwrap();
        let second = solve(&query, criterion, Projection::Full).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn projections_share_one_search() {
    let query = hoop_query();
    let full = solve(&query, Criterion::Fastest, Projection::Full).unwrap();
    let angle = solve(&query, Criterion::Fastest, Projection::Angle).unwrap();
    let speed = solve(&query, Criterion::Fastest, Projection::Speed).unwrap();

    assert_eq!(angle, Solution::Angle(full.angle().unwrap()));
    assert_eq!(speed, Solution::Speed(full.speed().unwrap()));
}

#[test]
fn criterion_names_parse_and_reject() {
    assert_eq!("balanced".parse::<Criterion>().unwrap(), Criterion::Balanced);
    assert_eq!(
        "minimum_speed".parse::<Criterion>().unwrap(),
        Criterion::MinimumSpeed
    );
    assert!(matches!(
        "best".parse::<Criterion>(),
        Err(SolverError::UnknownCriterion(_))
    ));

    assert_eq!("full".parse::<Projection>().unwrap(), Projection::Full);
    assert!(matches!(
        "tuple".parse::<Projection>(),
        Err(SolverError::UnknownProjection(_))
    ));
}
