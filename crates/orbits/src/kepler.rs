//! Solvers for Kepler's equation `M = E − e·sin(E)`.

use std::f64::consts::{PI, TAU};

use crate::error::OrbitError;

/// Iteration scheme used to invert Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeplerMethod {
    /// `E ← E − (E − e·sin E − M) / (1 − e·cos E)`; quadratic convergence.
    #[default]
    Newton,
    /// `E ← M + e·sin E`; linear convergence with ratio `e`, fine for near-circular orbits.
    FixedPoint,
}

/// Configured Kepler solver. Cheap to copy; holds no state between solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub method: KeplerMethod,
    /// Stop once the correction falls to or below this many radians.
    pub tolerance: f64,
    pub max_iterations: usize,
}

/// Outcome of a single solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// `|E − e·sin E − M|` evaluated on the whole-turn-reduced mean anomaly.
    pub residual: f64,
    pub converged: bool,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self::newton()
    }
}

impl KeplerSolver {
    /// Newton-Raphson with a 20-iteration cap.
    pub const fn newton() -> Self {
        Self {
            method: KeplerMethod::Newton,
            tolerance: 1e-12,
            max_iterations: 20,
        }
    }

    /// Fixed-point iteration with a generous cap to absorb its slower convergence.
    pub const fn fixed_point() -> Self {
        Self {
            method: KeplerMethod::FixedPoint,
            tolerance: 1e-12,
            max_iterations: 500,
        }
    }

    /// Solve for the eccentric anomaly, returning the best estimate even when the iteration
    /// budget runs out.
    ///
    /// `M = 0` yields `E = 0` and `e = 0` yields `E = M`, both exactly. Mean anomalies outside
    /// `(−π, π]` are reduced by whole turns before iterating and the turns are added back, so the
    /// result is continuous in `M`.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
        if eccentricity == 0.0 || mean_anomaly == 0.0 {
            return KeplerSolution {
                eccentric_anomaly: mean_anomaly,
                iterations: 0,
                residual: 0.0,
                converged: true,
            };
        }

        let turns = (mean_anomaly / TAU).round();
        let m = mean_anomaly - turns * TAU;

        let (reduced, iterations, converged) = match self.method {
            KeplerMethod::Newton => self.iterate_newton(m, eccentricity),
            KeplerMethod::FixedPoint => self.iterate_fixed_point(m, eccentricity),
        };
        let residual = (reduced - eccentricity * reduced.sin() - m).abs();

        if !converged {
            tracing::warn!(
                mean_anomaly,
                eccentricity,
                iterations,
                residual,
                "Kepler solver exhausted its iteration budget; using best estimate"
            );
        }

        KeplerSolution {
            eccentric_anomaly: reduced + turns * TAU,
            iterations,
            residual,
            converged,
        }
    }

    /// Like [`KeplerSolver::solve`] but reports a failure to converge as an error.
    pub fn solve_strict(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
        let solution = self.solve(mean_anomaly, eccentricity);
        if solution.converged {
            Ok(solution.eccentric_anomaly)
        } else {
            Err(OrbitError::NonConvergence {
                mean_anomaly,
                eccentricity,
                iterations: solution.iterations,
                residual: solution.residual,
            })
        }
    }

    fn iterate_newton(&self, m: f64, e: f64) -> (f64, usize, bool) {
        // Starting at π keeps Newton monotone for highly eccentric orbits.
        let mut ea = if e < 0.8 { m } else { PI.copysign(m) };
        for n in 1..=self.max_iterations {
            let f = ea - e * ea.sin() - m;
            let f_prime = 1.0 - e * ea.cos();
            let delta = f / f_prime;
            ea -= delta;
            if delta.abs() <= self.tolerance {
                return (ea, n, true);
            }
        }
        (ea, self.max_iterations, false)
    }

    fn iterate_fixed_point(&self, m: f64, e: f64) -> (f64, usize, bool) {
        let mut ea = m;
        for n in 1..=self.max_iterations {
            let next = m + e * ea.sin();
            let delta = next - ea;
            ea = next;
            if delta.abs() <= self.tolerance {
                return (ea, n, true);
            }
        }
        (ea, self.max_iterations, false)
    }
}

/// Eccentric anomaly for `M` using the default Newton solver.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    KeplerSolver::default()
        .solve(mean_anomaly, eccentricity)
        .eccentric_anomaly
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kepler_residual(ea: f64, e: f64, m: f64) -> f64 {
        (ea - e * ea.sin() - m).abs()
    }

    #[test]
    fn zero_mean_anomaly_is_exact() {
        for e in [0.0, 0.1, 0.5, 0.9, 0.999] {
            let sol = KeplerSolver::newton().solve(0.0, e);
            assert_eq!(sol.eccentric_anomaly, 0.0);
            assert_eq!(sol.iterations, 0);
            let sol = KeplerSolver::fixed_point().solve(0.0, e);
            assert_eq!(sol.eccentric_anomaly, 0.0);
        }
    }

    #[test]
    fn circular_orbit_returns_mean_anomaly_exactly() {
        for m in [-7.5, -PI, -0.3, 0.25, 1.0, PI, 4.0, 12.0 * PI + 0.1] {
            assert_eq!(KeplerSolver::newton().solve(m, 0.0).eccentric_anomaly, m);
            assert_eq!(KeplerSolver::fixed_point().solve(m, 0.0).eccentric_anomaly, m);
        }
    }

    #[test]
    fn newton_converges_within_twenty_iterations_up_to_high_eccentricity() {
        let solver = KeplerSolver::newton();
        for &e in &[0.01, 0.2, 0.5, 0.8, 0.9, 0.97, 0.99] {
            for k in 0..72 {
                let m = -PI + (k as f64 + 0.5) * TAU / 72.0;
                let sol = solver.solve(m, e);
                assert!(sol.converged, "e={e} m={m} did not converge");
                assert!(sol.iterations <= 20);
                assert!(
                    kepler_residual(sol.eccentric_anomaly, e, m) <= 1e-6,
                    "e={e} m={m} residual too large"
                );
            }
        }
    }

    #[test]
    fn fixed_point_agrees_with_newton_for_low_eccentricity() {
        for &e in &[0.0167, 0.0934, 0.2056] {
            for k in 0..36 {
                let m = k as f64 * TAU / 36.0;
                let newton = KeplerSolver::newton().solve(m, e);
                let fixed = KeplerSolver::fixed_point().solve(m, e);
                assert!(fixed.converged);
                assert!(
                    (newton.eccentric_anomaly - fixed.eccentric_anomaly).abs() < 1e-9,
                    "e={e} m={m}"
                );
            }
        }
    }

    #[test]
    fn whole_turns_are_preserved() {
        let e = 0.3;
        let base = KeplerSolver::newton().solve(1.2, e).eccentric_anomaly;
        let shifted = KeplerSolver::newton().solve(1.2 + 3.0 * TAU, e).eccentric_anomaly;
        assert!((shifted - base - 3.0 * TAU).abs() < 1e-9);
    }

    #[test]
    fn strict_solve_reports_exhausted_budget() {
        let solver = KeplerSolver {
            method: KeplerMethod::FixedPoint,
            tolerance: 1e-15,
            max_iterations: 2,
        };
        let err = solver.solve_strict(2.0, 0.9).unwrap_err();
        match err {
            OrbitError::NonConvergence { iterations, .. } => assert_eq!(iterations, 2),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(KeplerSolver::newton().solve_strict(2.0, 0.9).is_ok());
    }

    #[test]
    fn half_turn_at_half_eccentricity_lands_on_apoapsis() {
        let ea = eccentric_anomaly(PI, 0.5);
        assert!((ea - PI).abs() < 1e-12);
    }
}
