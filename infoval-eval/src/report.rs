//! One-call evaluation summary of a scored binary classifier.

use std::fmt;

use infoval_core::{Observations, Result};

use crate::classification::{
    kappa_cohen, misclassification_error, sensitivity, specificity, youdens_index,
    BinaryConfusionMatrix,
};
use crate::concordance::{concordance, Concordance};
use crate::cutoff::{optimal_cutoff, CutoffConfig};
use crate::roc::{auroc_with, RocConfig};

/// Settings for [`EvaluationReport::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationConfig {
    /// Settings for the AUROC.
    pub roc: RocConfig,
    /// Settings for the cutoff search.
    pub cutoff: CutoffConfig,
}

/// Rank statistics plus threshold statistics at the optimal cutoff.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationReport {
    /// Rows, including rows with missing values.
    pub observations: usize,
    /// Rows whose actual is an event.
    pub events: usize,
    /// Rows whose actual is present but not an event.
    pub non_events: usize,
    /// Area under the ROC curve.
    pub auroc: f64,
    /// Pairwise rank agreement.
    pub concordance: Concordance,
    /// Concordance minus discordance.
    pub somers_d: f64,
    /// Cutoff picked by the search.
    pub cutoff: f64,
    /// Confusion matrix at `cutoff`.
    pub confusion_matrix: BinaryConfusionMatrix,
    /// Sensitivity at `cutoff`.
    pub sensitivity: f64,
    /// Specificity at `cutoff`.
    pub specificity: f64,
    /// Youden's index at `cutoff`.
    pub youdens_index: f64,
    /// Misclassification error at `cutoff`.
    pub misclassification_error: f64,
    /// Cohen's kappa at `cutoff`.
    pub kappa: f64,
}

impl EvaluationReport {
    /// Evaluate `obs` under `config`.
    ///
    /// # Errors
    ///
    /// Fails if either configured step is invalid, if a score is infinite or
    /// the score range is too wide to sweep, or if the cutoff search has no
    /// defined objective.
    pub fn evaluate(obs: &Observations, config: &EvaluationConfig) -> Result<Self> {
        let auroc = auroc_with(obs, &config.roc)?;
        let conc = concordance(obs);
        let cutoff = optimal_cutoff(obs, &config.cutoff)?.cutoff;

        Ok(Self {
            observations: obs.len(),
            events: obs.events(),
            non_events: obs.non_events(),
            auroc,
            somers_d: conc.somers_d(),
            concordance: conc,
            cutoff,
            confusion_matrix: BinaryConfusionMatrix::at_threshold(obs, cutoff),
            sensitivity: sensitivity(obs, cutoff),
            specificity: specificity(obs, cutoff),
            youdens_index: youdens_index(obs, cutoff),
            misclassification_error: misclassification_error(obs, cutoff),
            kappa: kappa_cohen(obs, cutoff),
        })
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Evaluation")?;
        writeln!(f, "================")?;
        writeln!(
            f,
            "Observations:      {} ({} events, {} non-events)",
            self.observations, self.events, self.non_events
        )?;
        writeln!(f, "AUROC:             {:.4}", self.auroc)?;
        writeln!(f, "Concordance:       {:.4}", self.concordance.concordance)?;
        writeln!(f, "Discordance:       {:.4}", self.concordance.discordance)?;
        writeln!(f, "Tied:              {:.4}", self.concordance.tied)?;
        writeln!(f, "Somers' D:         {:.4}", self.somers_d)?;
        writeln!(f, "Optimal cutoff:    {:.4}", self.cutoff)?;
        writeln!(f, "Sensitivity:       {:.4}", self.sensitivity)?;
        writeln!(f, "Specificity:       {:.4}", self.specificity)?;
        writeln!(f, "Youden's index:    {:.4}", self.youdens_index)?;
        writeln!(f, "Misclassification: {:.4}", self.misclassification_error)?;
        writeln!(f, "Cohen's kappa:     {:.4}", self.kappa)?;
        writeln!(f)?;
        writeln!(f, "Confusion matrix at cutoff:")?;
        write!(f, "{}", self.confusion_matrix)
    }
}
