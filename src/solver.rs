//! Multi-start shot search: find every distinct `(theta, speed)` pair that
//! puts the projectile on the target, then select one.
//!
//! With speed left free, the root set of the residual is a one-parameter
//! curve in the `(theta, speed)` plane, not a handful of isolated points.
//! The minimum-angle-separation dedup is what quantizes that curve into a
//! small set of representative candidates, so the accepted count depends
//! directly on the separation setting.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MIN_LAUNCH_SPEED, RESIDUAL_TOLERANCE, SPEED_GUESS_FLOOR, SPEED_STARTS, THETA_STARTS,
};
use crate::error::SolverError;
use crate::query::ShotQuery;
use crate::refine::{refine_root, RefineBounds, RefineOutcome};
use crate::scoring::{select_candidate, Criterion};
use crate::trajectory::{
    clearance_margin, descent_angle, entry_angle_degrees, flight_time, height_at_distance,
};

/// One accepted shot: a root of the trajectory residual that passed the
/// descent-angle and separation filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Launch angle (rad), within the query's angle bounds
    pub theta: f64,
    /// Launch speed (m/s), within the query's speed bound
    pub speed: f64,
    /// Velocity-vector angle at the target (rad), negative when descending
    pub descent_angle: f64,
    /// `-descent_angle` in degrees; larger is a steeper arrival
    pub entry_angle: f64,
    /// Time to cover the horizontal distance (s)
    pub flight_time: f64,
    /// Heuristic lateral tolerance at the aperture (m)
    pub margin: f64,
}

/// Which part of the selected candidate the caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    Angle,
    Speed,
    Full,
}

impl std::str::FromStr for Projection {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "angle" => Ok(Projection::Angle),
            "speed" => Ok(Projection::Speed),
            "full" => Ok(Projection::Full),
            other => Err(SolverError::UnknownProjection(other.to_string())),
        }
    }
}

/// Shape of a successful solve, matching the requested [`Projection`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solution {
    Angle(f64),
    Speed(f64),
    Full(Candidate),
}

impl Solution {
    /// Launch angle (rad) regardless of shape, when present
    pub fn angle(&self) -> Option<f64> {
        match self {
            Solution::Angle(theta) => Some(*theta),
            Solution::Speed(_) => None,
            Solution::Full(c) => Some(c.theta),
        }
    }

    /// Launch speed (m/s) regardless of shape, when present
    pub fn speed(&self) -> Option<f64> {
        match self {
            Solution::Angle(_) => None,
            Solution::Speed(v) => Some(*v),
            Solution::Full(c) => Some(c.speed),
        }
    }
}

/// `n` evenly spaced values across `[lo, hi]` inclusive
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n as f64 - 1.0);
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// Run every grid-start refinement and return the converged roots in
/// row-major grid order (theta-major, then speed).
///
/// The refinements are mutually independent, so they run on the rayon
/// pool; collecting by grid index keeps the downstream first-found-wins
/// dedup deterministic regardless of which task finishes first.
fn converged_roots(query: &ShotQuery) -> Vec<RefineOutcome> {
    let theta_starts = linspace(query.angle_min, query.angle_max, THETA_STARTS);
    let speed_floor = SPEED_GUESS_FLOOR.min(query.max_speed);
    let speed_starts = linspace(speed_floor, query.max_speed, SPEED_STARTS);

    let bounds = RefineBounds {
        theta_min: query.angle_min,
        theta_max: query.angle_max,
        speed_min: MIN_LAUNCH_SPEED.min(query.max_speed),
        speed_max: query.max_speed,
    };

    let distance = query.distance;
    let shooter_height = query.shooter_height;
    let target_height = query.target_height;
    let residual =
        move |theta: f64, speed: f64| -> f64 {
            height_at_distance(theta, speed, distance, shooter_height) - target_height
        };

    let outcomes: Vec<RefineOutcome> = (0..theta_starts.len() * speed_starts.len())
        .into_par_iter()
        .map(|index| {
            let start = (
                theta_starts[index / speed_starts.len()],
                speed_starts[index % speed_starts.len()],
            );
            refine_root(residual, start, bounds)
        })
        .collect();

    // Sequential filter over the index-ordered collection, so dedup later
    // sees roots in row-major grid order.
    outcomes
        .into_iter()
        .filter(|outcome| outcome.converged && outcome.residual.abs() <= RESIDUAL_TOLERANCE)
        .collect()
}

/// Find every distinct constraint-satisfying candidate for `query`.
///
/// An empty result is a valid outcome: no feasible shot exists within the
/// query's bounds. Only malformed queries produce an error.
pub fn find_candidates(query: &ShotQuery) -> Result<Vec<Candidate>, SolverError> {
    query.validate()?;

    let mut accepted: Vec<Candidate> = Vec::new();

    for root in converged_roots(query) {
        let (theta, speed) = (root.theta, root.speed);

        // Numerical drift past the box is possible in principle; candidates
        // must sit inside the query's bounds.
        if theta < query.angle_min || theta > query.angle_max {
            continue;
        }

        let descent = descent_angle(theta, speed, query.distance);
        if descent > query.max_descent_angle {
            continue;
        }

        if accepted
            .iter()
            .any(|c| (theta - c.theta).abs() < query.min_angle_separation)
        {
            continue;
        }

        accepted.push(Candidate {
            theta,
            speed,
            descent_angle: descent,
            entry_angle: entry_angle_degrees(descent),
            flight_time: flight_time(theta, speed, query.distance),
            margin: clearance_margin(
                theta,
                speed,
                query.distance,
                query.shooter_height,
                query.target_height,
                query.target_radius,
            ),
        });
    }

    Ok(accepted)
}

/// Solve one shot query: search, filter, score, and project the winner.
///
/// The search runs exactly once per call; `projection` only shapes the
/// returned value. An empty accepted set yields
/// [`SolverError::NoFeasibleSolution`].
pub fn solve(
    query: &ShotQuery,
    criterion: Criterion,
    projection: Projection,
) -> Result<Solution, SolverError> {
    let candidates = find_candidates(query)?;
    let best = select_candidate(&candidates, criterion).ok_or(SolverError::NoFeasibleSolution)?;

    Ok(match projection {
        Projection::Angle => Solution::Angle(best.theta),
        Projection::Speed => Solution::Speed(best.speed),
        Projection::Full => Solution::Full(best.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hoop_query() -> ShotQuery {
        // Low launcher, rim at 2.5 m, three meters out.
        ShotQuery::from_degrees(0.51, 2.5, 3.0, 15.0, 30.0, 80.0, -10.0, 2.0, 0.23)
    }

    #[test]
    fn test_hoop_query_yields_candidates() {
        let candidates = find_candidates(&hoop_query()).unwrap();
        assert!(!candidates.is_empty());
    }

    #[test]
    fn test_candidates_hit_the_target() {
        let query = hoop_query();
        for c in find_candidates(&query).unwrap() {
            let y = height_at_distance(c.theta, c.speed, query.distance, query.shooter_height);
            assert_relative_eq!(y, query.target_height, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_candidates_respect_bounds_and_constraints() {
        let query = hoop_query();
        for c in find_candidates(&query).unwrap() {
            assert!(c.theta >= query.angle_min && c.theta <= query.angle_max);
            assert!(c.speed > 0.0 && c.speed <= query.max_speed);
            assert!(c.descent_angle <= query.max_descent_angle);
            assert!(c.flight_time > 0.0 && c.flight_time.is_finite());
            assert!(c.margin >= 0.0);
        }
    }

    #[test]
    fn test_candidates_are_angle_separated() {
        let query = hoop_query();
        let candidates = find_candidates(&query).unwrap();
        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                assert!((a.theta - b.theta).abs() >= query.min_angle_separation);
            }
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let query = hoop_query();
        let first = find_candidates(&query).unwrap();
        let second = find_candidates(&query).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            // Bit-identical, not merely close.
            assert_eq!(a.theta.to_bits(), b.theta.to_bits());
            assert_eq!(a.speed.to_bits(), b.speed.to_bits());
        }
    }

    #[test]
    fn test_unreachable_distance_yields_empty_set() {
        let mut query = hoop_query();
        query.distance = 100.0;
        let candidates = find_candidates(&query).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_solve_projects_consistently() {
        let query = hoop_query();
        let full = solve(&query, Criterion::MinimumSpeed, Projection::Full).unwrap();
        let angle = solve(&query, Criterion::MinimumSpeed, Projection::Angle).unwrap();
        let speed = solve(&query, Criterion::MinimumSpeed, Projection::Speed).unwrap();

        assert_eq!(full.angle(), angle.angle());
        assert_eq!(full.speed(), speed.speed());
        assert_eq!(angle.speed(), None);
        assert_eq!(speed.angle(), None);
    }

    #[test]
    fn test_solve_unreachable_is_no_feasible_solution() {
        let mut query = hoop_query();
        query.distance = 100.0;
        let err = solve(&query, Criterion::MinimumSpeed, Projection::Full).unwrap_err();
        assert!(matches!(err, SolverError::NoFeasibleSolution));
    }

    #[test]
    fn test_solve_invalid_query_rejected_before_search() {
        let mut query = hoop_query();
        query.distance = -1.0;
        let err = solve(&query, Criterion::Balanced, Projection::Full).unwrap_err();
        assert!(matches!(err, SolverError::InvalidQuery(_)));
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(1.0, 3.0, 5);
        assert_eq!(xs.len(), 5);
        assert_relative_eq!(xs[0], 1.0);
        assert_relative_eq!(xs[4], 3.0);
        assert_relative_eq!(xs[2], 2.0);
    }
}
