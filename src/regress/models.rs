//! Regularized linear models.
//!
//! Thin wrappers around `smartcore` Lasso and Ridge that surface the
//! pieces the sweep cares about: coefficients, intercept and R². The L1
//! penalty drives coefficients to exactly zero once alpha is large
//! enough; the L2 penalty shrinks them toward zero without ever reaching
//! it, which is what the alpha sweep makes visible.

use crate::errors::{Result, SpanRankError};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::lasso::{Lasso, LassoParameters};
use smartcore::linear::ridge_regression::{RidgeRegression, RidgeRegressionParameters};

/// A fitted regularized model, reduced to the numbers the sweep reports
#[derive(Debug, Clone)]
pub struct FitSummary {
    pub alpha: f64,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub r_squared: f64,
}

impl FitSummary {
    /// Number of coefficients that are exactly zero
    pub fn num_zero_coefficients(&self) -> usize {
        self.coefficients.iter().filter(|&&c| c == 0.0).count()
    }
}

/// One point of the regularization sweep
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlphaPoint {
    pub alpha: f64,
    pub lasso_r2: f64,
    pub ridge_r2: f64,
}

fn check_shape(x: &[Vec<f64>], y: &[f64]) -> Result<usize> {
    if x.is_empty() || y.is_empty() {
        return Err(SpanRankError::empty_input("no training rows"));
    }
    if x.len() != y.len() {
        return Err(SpanRankError::model(format!(
            "feature rows ({}) and targets ({}) differ",
            x.len(),
            y.len()
        )));
    }
    let width = x[0].len();
    if width == 0 {
        return Err(SpanRankError::empty_input("no feature columns"));
    }
    if x.iter().any(|row| row.len() != width) {
        return Err(SpanRankError::model("ragged feature rows"));
    }
    Ok(width)
}

fn to_matrix(x: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    DenseMatrix::from_2d_vec(&x.to_vec()).map_err(|e| SpanRankError::model(e.to_string()))
}

/// Coefficient of determination, computed against the mean baseline
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Fit a Lasso (L1-penalized) regression at the given alpha
pub fn fit_lasso(x: &[Vec<f64>], y: &[f64], alpha: f64) -> Result<FitSummary> {
    let width = check_shape(x, y)?;
    let matrix = to_matrix(x)?;
    let targets = y.to_vec();
    let model = Lasso::fit(
        &matrix,
        &targets,
        LassoParameters::default().with_alpha(alpha),
    )
    .map_err(|e| SpanRankError::model(e.to_string()))?;
    let predictions = model
        .predict(&matrix)
        .map_err(|e| SpanRankError::model(e.to_string()))?;

    let coef = model.coefficients();
    Ok(FitSummary {
        alpha,
        coefficients: (0..width).map(|j| *coef.get((j, 0))).collect(),
        intercept: *model.intercept(),
        r_squared: r_squared(y, &predictions),
    })
}

/// Fit a Ridge (L2-penalized) regression at the given alpha
pub fn fit_ridge(x: &[Vec<f64>], y: &[f64], alpha: f64) -> Result<FitSummary> {
    let width = check_shape(x, y)?;
    let matrix = to_matrix(x)?;
    let targets = y.to_vec();
    let model = RidgeRegression::fit(
        &matrix,
        &targets,
        RidgeRegressionParameters::default().with_alpha(alpha),
    )
    .map_err(|e| SpanRankError::model(e.to_string()))?;
    let predictions = model
        .predict(&matrix)
        .map_err(|e| SpanRankError::model(e.to_string()))?;

    let coef = model.coefficients();
    Ok(FitSummary {
        alpha,
        coefficients: (0..width).map(|j| *coef.get((j, 0))).collect(),
        intercept: *model.intercept(),
        r_squared: r_squared(y, &predictions),
    })
}

/// Fit both model families across a range of alphas and report training R²
/// at each point
pub fn alpha_sweep(x: &[Vec<f64>], y: &[f64], alphas: &[f64]) -> Result<Vec<AlphaPoint>> {
    check_shape(x, y)?;
    if alphas.is_empty() {
        return Err(SpanRankError::invalid_config("no alphas to sweep"));
    }
    alphas
        .iter()
        .map(|&alpha| {
            let lasso = fit_lasso(x, y, alpha)?;
            let ridge = fit_ridge(x, y, alpha)?;
            log::debug!(
                "alpha {:.4}: lasso r2 {:.4} ({} zero coefs), ridge r2 {:.4}",
                alpha,
                lasso.r_squared,
                lasso.num_zero_coefficients(),
                ridge.r_squared
            );
            Ok(AlphaPoint {
                alpha,
                lasso_r2: lasso.r_squared,
                ridge_r2: ridge.r_squared,
            })
        })
        .collect()
}
