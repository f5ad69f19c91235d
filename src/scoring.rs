//! Candidate scoring: pick one shot out of a set of accepted candidates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BALANCED_ENTRY_WEIGHT, BALANCED_SPEED_WEIGHT};
use crate::error::SolverError;
use crate::solver::Candidate;

/// Selection criterion applied to a non-empty candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Smallest launch speed
    MinimumSpeed,
    /// Largest entry angle (steepest descending arrival)
    SteepEntry,
    /// Largest clearance margin
    MaxMargin,
    /// Smallest flight time
    Fastest,
    /// Weighted blend of normalized low speed and steep entry
    Balanced,
}

impl FromStr for Criterion {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimum_speed" => Ok(Criterion::MinimumSpeed),
            "steep_entry" => Ok(Criterion::SteepEntry),
            "max_margin" => Ok(Criterion::MaxMargin),
            "fastest" => Ok(Criterion::Fastest),
            "balanced" => Ok(Criterion::Balanced),
            other => Err(SolverError::UnknownCriterion(other.to_string())),
        }
    }
}

/// Pick the best candidate under `criterion`, or `None` for an empty set.
///
/// Ties resolve to the earliest candidate: the scan keeps the incumbent
/// unless a later candidate is strictly better, so selection is
/// deterministic given the solver's deterministic candidate order.
pub fn select_candidate(candidates: &[Candidate], criterion: Criterion) -> Option<&Candidate> {
    if candidates.is_empty() {
        return None;
    }

    match criterion {
        Criterion::MinimumSpeed => argmax_by(candidates, |c| -c.speed),
        Criterion::SteepEntry => argmax_by(candidates, |c| c.entry_angle),
        Criterion::MaxMargin => argmax_by(candidates, |c| c.margin),
        Criterion::Fastest => argmax_by(candidates, |c| -c.flight_time),
        Criterion::Balanced => {
            let scores = balanced_scores(candidates);
            let mut best = 0;
            for (i, score) in scores.iter().enumerate().skip(1) {
                if *score > scores[best] {
                    best = i;
                }
            }
            candidates.get(best)
        }
    }
}

fn argmax_by<F>(candidates: &[Candidate], key: F) -> Option<&Candidate>
where
    F: Fn(&Candidate) -> f64,
{
    let mut best = &candidates[0];
    for c in &candidates[1..] {
        if key(c) > key(best) {
            best = c;
        }
    }
    Some(best)
}

/// Balanced score per candidate: `0.4·norm_speed + 0.6·norm_entry`, where
/// each term is min-max normalized across the set (1 = lowest speed,
/// 1 = steepest entry). A zero-spread dimension contributes 0 for every
/// candidate rather than dividing by zero.
fn balanced_scores(candidates: &[Candidate]) -> Vec<f64> {
    let min_speed = candidates.iter().fold(f64::INFINITY, |a, c| a.min(c.speed));
    let max_speed = candidates
        .iter()
        .fold(f64::NEG_INFINITY, |a, c| a.max(c.speed));
    let min_entry = candidates
        .iter()
        .fold(f64::INFINITY, |a, c| a.min(c.entry_angle));
    let max_entry = candidates
        .iter()
        .fold(f64::NEG_INFINITY, |a, c| a.max(c.entry_angle));

    let speed_spread = max_speed - min_speed;
    let entry_spread = max_entry - min_entry;

    candidates
        .iter()
        .map(|c| {
            let norm_speed = if speed_spread > 0.0 {
                (max_speed - c.speed) / speed_spread
            } else {
                0.0
            };
            let norm_entry = if entry_spread > 0.0 {
                (c.entry_angle - min_entry) / entry_spread
            } else {
                0.0
            };
            BALANCED_SPEED_WEIGHT * norm_speed + BALANCED_ENTRY_WEIGHT * norm_entry
        })
        .collect()
}
