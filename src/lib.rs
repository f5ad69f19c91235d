//! # Shot Solver
//!
//! Planar ballistic shot solver: given a launcher height, a target height
//! and distance, and operational constraints, find the launch angles and
//! speeds that put a projectile on the target with a steep-enough descent,
//! then select the single best option under a named criterion.
//!
//! The model is closed-form kinematics (no drag, no spin, constant
//! gravity); the search is a deterministic multi-start nonlinear
//! least-squares refinement over a 12×12 grid of initial guesses, with
//! constraint filtering and angle-separation deduplication. The solver is
//! pure and stateless: identical queries produce bit-identical results.

// Re-export the main types and functions
pub use error::SolverError;
pub use query::ShotQuery;
pub use scoring::{select_candidate, Criterion};
pub use solver::{find_candidates, solve, Candidate, Projection, Solution};

// Module declarations
pub mod constants;
mod error;
mod query;
mod refine;
mod scoring;
mod solver;
pub mod trajectory;
