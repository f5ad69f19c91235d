//! Box-constrained damped Gauss-Newton refinement of a scalar residual
//! over a `(theta, speed)` pair.
//!
//! One grid start, one local optimization. The residual has two unknowns
//! and one equation, so its zero set is a curve; each start converges to
//! the nearby point of that curve (or fails). Failures are reported, not
//! raised: the multi-start driver simply discards them.

use nalgebra::{Matrix2, Vector2};

use crate::constants::{FTOL, REFINE_MAX_ITER, XTOL};

/// Relative step used for the forward-difference gradient
const GRADIENT_STEP: f64 = 1e-7;

/// Initial Levenberg damping factor
const LAMBDA_INIT: f64 = 1e-3;

/// Damping growth on a rejected step and shrink on an accepted one
const LAMBDA_UP: f64 = 4.0;
const LAMBDA_DOWN: f64 = 0.25;

/// Damping ceiling: past this the start is declared non-convergent
const LAMBDA_MAX: f64 = 1e12;

/// Outcome of one grid-start refinement
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    pub theta: f64,
    pub speed: f64,
    pub residual: f64,
    pub iterations_used: usize,
    pub converged: bool,
}

/// Inclusive box bounds for the two refinement variables
#[derive(Debug, Clone, Copy)]
pub struct RefineBounds {
    pub theta_min: f64,
    pub theta_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
}

impl RefineBounds {
    fn clamp(&self, x: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            x[0].clamp(self.theta_min, self.theta_max),
            x[1].clamp(self.speed_min, self.speed_max),
        )
    }
}

/// Forward-difference gradient of the residual, respecting the box:
/// a probe that would leave the box steps backward instead.
fn gradient<F>(f: &F, x: Vector2<f64>, fx: f64, bounds: &RefineBounds) -> Vector2<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let mut grad = Vector2::zeros();
    let upper = [bounds.theta_max, bounds.speed_max];
    for i in 0..2 {
        let h = GRADIENT_STEP * x[i].abs().max(1.0);
        let mut probe = x;
        if x[i] + h <= upper[i] {
            probe[i] += h;
            grad[i] = (f(probe[0], probe[1]) - fx) / h;
        } else {
            probe[i] -= h;
            grad[i] = (fx - f(probe[0], probe[1])) / h;
        }
    }
    grad
}

/// Refine a scalar residual `f(theta, speed)` toward zero from `start`,
/// keeping both variables inside `bounds`.
///
/// Damped Gauss-Newton: with Jacobian row `J = ∇f`, each step solves
/// `(JᵀJ + λI)·d = −Jᵀ·f`, clamps the trial point to the box, and accepts
/// it only if the absolute residual shrinks. The identity damping keeps
/// the 2×2 system invertible even though `JᵀJ` is rank one.
///
/// Convergence requires `|f| ≤ FTOL` or an accepted step shorter than
/// `XTOL`; running out of iterations or damping headroom yields
/// `converged: false` and the best point seen.
pub fn refine_root<F>(f: F, start: (f64, f64), bounds: RefineBounds) -> RefineOutcome
where
    F: Fn(f64, f64) -> f64,
{
    let mut x = bounds.clamp(Vector2::new(start.0, start.1));
    let mut fx = f(x[0], x[1]);
    let mut lambda = LAMBDA_INIT;
    let mut iterations = 0;

    while iterations < REFINE_MAX_ITER {
        iterations += 1;

        if fx.abs() <= FTOL {
            return RefineOutcome {
                theta: x[0],
                speed: x[1],
                residual: fx,
                iterations_used: iterations,
                converged: true,
            };
        }

        let grad = gradient(&f, x, fx, &bounds);
        let jtj = Matrix2::new(
            grad[0] * grad[0],
            grad[0] * grad[1],
            grad[0] * grad[1],
            grad[1] * grad[1],
        );
        let jtr = grad * fx;

        let damped = jtj + Matrix2::identity() * lambda;
        let step = match damped.try_inverse() {
            Some(inv) => inv * (-jtr),
            None => {
                // Gradient vanished; nothing left to follow from here.
                break;
            }
        };

        let trial = bounds.clamp(x + step);
        let f_trial = f(trial[0], trial[1]);

        if f_trial.abs() < fx.abs() {
            let moved = (trial - x).norm();
            x = trial;
            fx = f_trial;
            lambda = (lambda * LAMBDA_DOWN).max(1e-12);

            if fx.abs() <= FTOL || moved <= XTOL {
                return RefineOutcome {
                    theta: x[0],
                    speed: x[1],
                    residual: fx,
                    iterations_used: iterations,
                    converged: fx.abs() <= FTOL,
                };
            }
        } else {
            lambda *= LAMBDA_UP;
            if lambda > LAMBDA_MAX {
                break;
            }
        }
    }

    RefineOutcome {
        theta: x[0],
        speed: x[1],
        residual: fx,
        iterations_used: iterations,
        converged: false,
    }
}
