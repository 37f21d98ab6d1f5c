//! Regularized regression over tabular data.
//!
//! [`Dataset`] handles CSV ingestion, [`fit_lasso`] / [`fit_ridge`] fit
//! penalized linear models at a single alpha, and [`alpha_sweep`] traces
//! how training R² responds as the penalty grows.

mod dataset;
mod models;

pub use dataset::Dataset;
pub use models::{alpha_sweep, fit_lasso, fit_ridge, r_squared, AlphaPoint, FitSummary};
