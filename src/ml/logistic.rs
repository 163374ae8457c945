//! Multinomial logistic regression over sparse TF-IDF features.
//!
//! The model is a softmax over one linear scorer per class, fitted by
//! full-batch gradient descent on the mean cross-entropy plus an L2 penalty
//! on the weights. The penalty strength follows the usual inverse
//! convention: a larger `l2_strength` (C) means weaker regularization.

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::ml::tfidf::SparseVector;

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Maximum number of gradient steps.
    pub max_iter: usize,
    /// Step size.
    pub learning_rate: f64,
    /// Inverse regularization strength C.
    pub l2_strength: f64,
    /// Stop once the largest gradient component falls below this.
    pub tolerance: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        LogisticRegressionConfig {
            max_iter: 300,
            learning_rate: 1.5,
            l2_strength: 1.0,
            tolerance: 1e-4,
        }
    }
}

impl LogisticRegressionConfig {
    /// Reject non-positive step sizes and penalties.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(BotError::configuration("max_iter must be positive"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(BotError::configuration("learning_rate must be positive"));
        }
        if !(self.l2_strength > 0.0 && self.l2_strength.is_finite()) {
            return Err(BotError::configuration("l2_strength must be positive"));
        }
        if self.tolerance < 0.0 {
            return Err(BotError::configuration("tolerance must not be negative"));
        }
        Ok(())
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub iterations: usize,
    pub loss: f64,
    pub converged: bool,
}

/// Fitted softmax classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Class labels in sorted order.
    classes: Vec<String>,
    /// One dense weight row per class.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    n_features: usize,
}

impl LogisticRegression {
    /// Fit on sparse rows and their labels.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[String],
        n_features: usize,
        config: &LogisticRegressionConfig,
    ) -> Result<(Self, FitReport)> {
        config.validate()?;
        if rows.is_empty() {
            return Err(BotError::model("no training samples"));
        }
        if rows.len() != labels.len() {
            return Err(BotError::invalid_argument(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();

        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let n_classes = classes.len();
        let n = rows.len() as f64;
        let penalty = 1.0 / (config.l2_strength * n);

        let mut model = LogisticRegression {
            classes,
            weights: vec![vec![0.0; n_features]; n_classes],
            bias: vec![0.0; n_classes],
            n_features,
        };

        let mut report = FitReport {
            iterations: 0,
            loss: f64::NAN,
            converged: false,
        };

        for iteration in 1..=config.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];
            let mut loss = 0.0;

            for (row, &target) in rows.iter().zip(&targets) {
                let proba = model.probabilities(row);
                loss -= proba[target].max(f64::MIN_POSITIVE).ln();

                for (k, p) in proba.iter().enumerate() {
                    let delta = p - if k == target { 1.0 } else { 0.0 };
                    grad_b[k] += delta;
                    for &(j, value) in row.entries() {
                        if j < n_features {
                            grad_w[k][j] += delta * value;
                        }
                    }
                }
            }

            let mut max_gradient: f64 = 0.0;
            let mut squared_weights = 0.0;
            for k in 0..n_classes {
                grad_b[k] /= n;
                max_gradient = max_gradient.max(grad_b[k].abs());
                model.bias[k] -= config.learning_rate * grad_b[k];

                for j in 0..n_features {
                    let w = model.weights[k][j];
                    squared_weights += w * w;
                    let g = grad_w[k][j] / n + penalty * w;
                    max_gradient = max_gradient.max(g.abs());
                    model.weights[k][j] = w - config.learning_rate * g;
                }
            }

            report.iterations = iteration;
            report.loss = loss / n + 0.5 * penalty * squared_weights;

            if max_gradient < config.tolerance {
                report.converged = true;
                break;
            }
        }

        if report.converged {
            log::debug!(
                "logistic regression converged after {} iterations (loss {:.4})",
                report.iterations,
                report.loss
            );
        } else {
            log::debug!(
                "logistic regression stopped at max_iter={} (loss {:.4})",
                report.iterations,
                report.loss
            );
        }

        Ok((model, report))
    }

    fn probabilities(&self, row: &SparseVector) -> Vec<f64> {
        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(w, b)| row.dot(w) + b)
            .collect();
        softmax(&scores)
    }

    /// Class probabilities in [`classes`](Self::classes) order.
    pub fn predict_proba(&self, row: &SparseVector) -> Result<Vec<f64>> {
        if let Some(&(idx, _)) = row.entries().last() {
            if idx >= self.n_features {
                return Err(BotError::model(format!(
                    "feature index {idx} out of range for a model with {} features",
                    self.n_features
                )));
            }
        }
        Ok(self.probabilities(row))
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Input dimension.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Numerically stable softmax.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
