//! ## Weighted Polynomial Fitting
//!
//! A small weighted least-squares kernel: fit a polynomial of a given degree
//! to `(x, y)` observations with per-observation weights, minimizing
//! Σ wᵢ (p(xᵢ) − yᵢ)². The normal equations are assembled directly and
//! solved with an LU decomposition.
//!
//! Callers are expected to translate their abscissas to lie near zero before
//! fitting; a quadratic fit on raw epoch-millisecond x-values loses its
//! quadratic term to floating-point cancellation.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// A fitted polynomial, coefficients in ascending powers of x.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// The coefficients, constant term first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` (Horner form).
    pub fn value_at(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluates the first derivative at `x`.
    pub fn derivative_at(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (power, &c)| acc * x + power as f64 * c)
    }
}

/// Fits a polynomial of `degree` to the weighted observations.
///
/// Returns `None` when the inputs cannot determine the coefficients: fewer
/// observations than coefficients, mismatched slice lengths, non-finite or
/// negative weights, or a singular normal system (for example, all
/// observations sharing one abscissa).
pub fn weighted_polyfit(
    xs: &[f64],
    ys: &[f64],
    weights: &[f64],
    degree: usize,
) -> Option<Polynomial> {
    let terms = degree + 1;
    if xs.len() != ys.len() || xs.len() != weights.len() || xs.len() < terms {
        return None;
    }
    if xs.iter().any(|x| !x.is_finite())
        || ys.iter().any(|y| !y.is_finite())
        || weights.iter().any(|w| !w.is_finite() || *w < 0.0)
    {
        return None;
    }

    // Normal equations: (Aᵀ W A) c = Aᵀ W y, with A the Vandermonde matrix
    // of the abscissas. The (i, j) entry of AᵀWA is Σ w x^(i+j).
    let mut power_sums = vec![0.0_f64; 2 * degree + 1];
    let mut moment_sums = vec![0.0_f64; terms];
    for ((&x, &y), &w) in xs.iter().zip(ys).zip(weights) {
        let mut x_power = 1.0;
        for (exponent, sum) in power_sums.iter_mut().enumerate() {
            *sum += w * x_power;
            if exponent < 2 * degree {
                x_power *= x;
            }
        }
        let mut x_power = 1.0;
        for sum in moment_sums.iter_mut() {
            *sum += w * y * x_power;
            x_power *= x;
        }
    }
    let normal = DMatrix::from_fn(terms, terms, |i, j| power_sums[i + j]);
    let rhs = DVector::from_fn(terms, |i, _| moment_sums[i]);

    let solution = normal.lu().solve(&rhs)?;
    if solution.iter().any(|c| !c.is_finite()) {
        debug!("Weighted fit produced non-finite coefficients");
        return None;
    }
    Some(Polynomial {
        coefficients: solution.iter().copied().collect(),
    })
}
