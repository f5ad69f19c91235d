//! Closed-form planar trajectory model under constant gravity.
//!
//! Every function here is pure and stateless: the solver evaluates them
//! thousands of times per query and relies on identical inputs producing
//! identical outputs.

use crate::constants::{G_ACCEL_MPS2, INFEASIBLE_HEIGHT};

/// Vertical position (m) of the projectile when it reaches horizontal
/// distance `distance`, launched from `shooter_height` at angle `theta`
/// (radians above horizontal) with speed `speed` (m/s).
///
/// `y = hs + d·tan(θ) − g·d² / (2·v²·cos²(θ))`
///
/// At or past vertical (`cos(θ) ≤ 0`) the projectile never covers the
/// horizontal distance; a large sentinel is returned instead of NaN/inf so
/// root refinement treats the region as heavily infeasible.
pub fn height_at_distance(theta: f64, speed: f64, distance: f64, shooter_height: f64) -> f64 {
    let cos_theta = theta.cos();
    if cos_theta <= 0.0 {
        return INFEASIBLE_HEIGHT;
    }

    shooter_height + distance * theta.tan()
        - (G_ACCEL_MPS2 * distance * distance) / (2.0 * speed * speed * cos_theta * cos_theta)
}

/// Time (s) for the projectile to cover `distance` horizontally.
///
/// Requires `cos(theta) > 0`; callers must have rejected vertical or
/// retrograde launch angles already.
pub fn flight_time(theta: f64, speed: f64, distance: f64) -> f64 {
    distance / (speed * theta.cos())
}

/// Signed angle (radians) of the velocity vector at the moment the
/// projectile reaches `distance`. Negative means descending.
///
/// Requires `cos(theta) > 0`, same as [`flight_time`].
pub fn descent_angle(theta: f64, speed: f64, distance: f64) -> f64 {
    let vx = speed * theta.cos();
    let t = distance / vx;
    let vy = speed * theta.sin() - G_ACCEL_MPS2 * t;
    vy.atan2(vx)
}

/// Entry angle in degrees: the negated descent angle, so a steeper
/// descending arrival reads as a larger positive number.
pub fn entry_angle_degrees(descent_angle: f64) -> f64 {
    -descent_angle.to_degrees()
}

/// Heuristic lateral tolerance (m) at the target aperture.
///
/// Scales the aperture radius by how far above the rim the trajectory
/// passes, relative to rim height. Zero at or below the rim. A
/// tie-breaking estimate only, not a geometric guarantee.
pub fn clearance_margin(
    theta: f64,
    speed: f64,
    distance: f64,
    shooter_height: f64,
    target_height: f64,
    target_radius: f64,
) -> f64 {
    let height_above_rim =
        height_at_distance(theta, speed, distance, shooter_height) - target_height;
    if height_above_rim <= 0.0 {
        return 0.0;
    }
    target_radius * (height_above_rim / target_height)
}
