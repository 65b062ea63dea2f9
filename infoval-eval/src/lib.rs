//! Binary classifier evaluation and predictive-power transforms.
//!
//! - **ROC** — threshold sweep, trajectory and normalized area ([`roc`])
//! - **Point statistics** — sensitivity, specificity, Youden's index,
//!   misclassification error, confusion matrix, Cohen's kappa ([`classification`])
//! - **Rank statistics** — concordance and Somers' D ([`concordance`])
//! - **Cutoff search** — optimal probability cutoff ([`cutoff`])
//! - **Encoding** — Weight of Evidence and Information Value ([`woe`])
//! - **Reporting** — one-call summary ([`report`])

pub mod classification;
pub mod concordance;
pub mod cutoff;
pub mod report;
pub mod roc;
pub mod woe;

pub use classification::{
    kappa_cohen, misclassification_error, npv, precision, sensitivity, specificity,
    youdens_index, BinaryConfusionMatrix, DEFAULT_THRESHOLD,
};
pub use concordance::{concordance, somers_d, Concordance};
pub use cutoff::{optimal_cutoff, CutoffConfig, CutoffRow, CutoffSearch, OptimiseFor};
pub use report::{EvaluationConfig, EvaluationReport};
pub use roc::{
    auroc, auroc_from_slices, auroc_with, roc_curve, roc_point, threshold_sweep,
    trapezoidal_area, AreaNormalization, RocConfig, RocCurve, RocPoint, MAX_THRESHOLDS,
};
pub use woe::{
    information_value, woe, woe_table, InformationValue, Predictiveness, WoeRow, WoeTable,
};

pub use infoval_core::{InfovalError, Observations, Result};
