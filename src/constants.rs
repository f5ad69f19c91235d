/// Physical constants and solver tuning used in shot calculations

/// Gravitational acceleration in m/s²
///
/// The closed-form trajectory equation is defined with 9.81, not the
/// standard-gravity 9.80665 used in precision ballistics work.
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Conversion factor: meters to inches
pub const METERS_TO_INCHES: f64 = 39.37;

/// Sentinel height returned when `cos(theta) <= 0`
///
/// The residual becomes enormous at and past vertical, which steers the
/// refinement back into the feasible half-plane instead of raising a
/// numeric error.
pub const INFEASIBLE_HEIGHT: f64 = 1e6;

// Root refinement constants

/// Function tolerance: a refinement converges once the absolute residual
/// drops below this value.
pub const FTOL: f64 = 1e-10;

/// Parameter tolerance: a refinement converges once the accepted step
/// norm drops below this value.
pub const XTOL: f64 = 1e-10;

/// Maximum iterations for a single grid-start refinement
pub const REFINE_MAX_ITER: usize = 80;

/// A converged refinement is accepted as a root only if its residual is
/// within this bound. Converging to a non-zero local minimum (target out
/// of reach at every speed) is not a root.
pub const RESIDUAL_TOLERANCE: f64 = 1e-8;

// Multi-start grid constants

/// Number of launch-angle starts spaced across `[angle_min, angle_max]`
pub const THETA_STARTS: usize = 12;

/// Number of launch-speed starts spaced across `[SPEED_GUESS_FLOOR, max_speed]`
pub const SPEED_STARTS: usize = 12;

/// Lowest initial speed guess placed on the start grid (m/s)
pub const SPEED_GUESS_FLOOR: f64 = 2.0;

/// Hard lower box bound on launch speed during refinement (m/s)
pub const MIN_LAUNCH_SPEED: f64 = 0.1;

// Balanced-criterion weights
//
// Empirical tuning values, not physical law. Both normalized terms lie in
// [0, 1]; the weights need not sum to one but do here.

/// Weight of the normalized low-speed term in the balanced score
pub const BALANCED_SPEED_WEIGHT: f64 = 0.4;

/// Weight of the normalized steep-entry term in the balanced score
pub const BALANCED_ENTRY_WEIGHT: f64 = 0.6;
