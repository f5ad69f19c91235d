//! Solver input record and its validation.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// One shot problem: geometry, launcher limits, and acceptance constraints.
///
/// All fields are SI — meters, radians, meters per second. Constructed once
/// per solve call and never mutated by the solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotQuery {
    /// Height of the launch point above ground (m)
    pub shooter_height: f64,
    /// Height of the target aperture above ground (m)
    pub target_height: f64,
    /// Horizontal distance to the target (m), must be > 0
    pub distance: f64,
    /// Upper bound on launch speed (m/s), must be > 0
    pub max_speed: f64,
    /// Inclusive lower bound on launch angle (rad)
    pub angle_min: f64,
    /// Inclusive upper bound on launch angle (rad), must exceed `angle_min`
    pub angle_max: f64,
    /// Upper bound on the descent angle at the target (rad). When negative,
    /// a candidate's velocity vector must descend at least this steeply.
    pub max_descent_angle: f64,
    /// Minimum angular distance (rad) between two distinct candidates
    pub min_angle_separation: f64,
    /// Radius of the target aperture (m), used only for the margin heuristic
    pub target_radius: f64,
}

impl ShotQuery {
    /// Convenience constructor taking the angular fields in degrees, which
    /// is how operators state them.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        shooter_height: f64,
        target_height: f64,
        distance: f64,
        max_speed: f64,
        angle_min_deg: f64,
        angle_max_deg: f64,
        max_descent_angle_deg: f64,
        min_angle_separation_deg: f64,
        target_radius: f64,
    ) -> Self {
        ShotQuery {
            shooter_height,
            target_height,
            distance,
            max_speed,
            angle_min: angle_min_deg.to_radians(),
            angle_max: angle_max_deg.to_radians(),
            max_descent_angle: max_descent_angle_deg.to_radians(),
            min_angle_separation: min_angle_separation_deg.to_radians(),
            target_radius,
        }
    }

    /// Reject malformed queries before any search work begins.
    pub fn validate(&self) -> Result<(), SolverError> {
        let fields = [
            ("shooter_height", self.shooter_height),
            ("target_height", self.target_height),
            ("distance", self.distance),
            ("max_speed", self.max_speed),
            ("angle_min", self.angle_min),
            ("angle_max", self.angle_max),
            ("max_descent_angle", self.max_descent_angle),
            ("min_angle_separation", self.min_angle_separation),
            ("target_radius", self.target_radius),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SolverError::InvalidQuery(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        if self.distance <= 0.0 {
            return Err(SolverError::InvalidQuery(format!(
                "distance must be positive, got {}",
                self.distance
            )));
        }
        if self.max_speed <= 0.0 {
            return Err(SolverError::InvalidQuery(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if self.angle_min >= self.angle_max {
            return Err(SolverError::InvalidQuery(format!(
                "angle_min ({}) must be less than angle_max ({})",
                self.angle_min, self.angle_max
            )));
        }
        if self.min_angle_separation < 0.0 {
            return Err(SolverError::InvalidQuery(format!(
                "min_angle_separation must be non-negative, got {}",
                self.min_angle_separation
            )));
        }
        if self.target_radius < 0.0 {
            return Err(SolverError::InvalidQuery(format!(
                "target_radius must be non-negative, got {}",
                self.target_radius
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_query() -> ShotQuery {
        ShotQuery::from_degrees(0.51, 2.5, 3.0, 15.0, 30.0, 80.0, -10.0, 2.0, 0.23)
    }

    #[test]
    fn test_valid_query_passes() {
        assert!(valid_query().validate().is_ok());
    }

    #[test]
    fn test_from_degrees_converts() {
        let q = valid_query();
        assert!((q.angle_min - 30.0f64.to_radians()).abs() < 1e-12);
        assert!((q.angle_max - 80.0f64.to_radians()).abs() < 1e-12);
        assert!((q.max_descent_angle - (-10.0f64).to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        let mut q = valid_query();
        q.distance = 0.0;
        assert!(matches!(q.validate(), Err(SolverError::InvalidQuery(_))));
        q.distance = -3.0;
        assert!(matches!(q.validate(), Err(SolverError::InvalidQuery(_))));
    }

    #[test]
    fn test_rejects_non_positive_max_speed() {
        let mut q = valid_query();
        q.max_speed = 0.0;
        assert!(matches!(q.validate(), Err(SolverError::InvalidQuery(_))));
    }

    #[test]
    fn test_rejects_inverted_angle_bounds() {
        let mut q = valid_query();
        q.angle_min = q.angle_max;
        assert!(matches!(q.validate(), Err(SolverError::InvalidQuery(_))));
    }

    #[test]
    fn test_rejects_nan_field() {
        let mut q = valid_query();
        q.target_height = f64::NAN;
        assert!(matches!(q.validate(), Err(SolverError::InvalidQuery(_))));
    }
}
