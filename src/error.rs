use thiserror::Error;

/// Errors surfaced by the shot solver.
///
/// Individual grid-start refinements that fail to converge are not errors;
/// they are discarded inside the search. `NoFeasibleSolution` is the normal,
/// representable outcome for an unreachable target and callers are expected
/// to handle it (e.g. render "no shot available").
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),

    #[error("unknown projection: {0}")]
    UnknownProjection(String),

    #[error("no feasible solution for this query")]
    NoFeasibleSolution,
}
