use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::classifier::config::ClassifierConfig;
use crate::classifier::error::ClassifierError;

/// Armijo sufficient-decrease constant.
const LINE_SEARCH_ALPHA: f64 = 1e-4;
const LINE_SEARCH_MAX_HALVINGS: usize = 30;

/// Fitted single-feature logistic regression (`p = sigmoid(weight * x + intercept)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegression {
    weight: f64,
    intercept: f64,
    iterations: usize,
}

impl LogisticRegression {
    /// Fits L2-regularized logistic regression by Newton's method.
    ///
    /// The intercept is treated as the weight of a constant `1.0` feature and is penalized
    /// like the slope. Rows are accumulated in a seed-determined order, so the same data and
    /// seed always give bit-identical coefficients.
    pub fn fit(
        features: &[f64],
        targets: &[bool],
        config: &ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        config.validate()?;

        if features.len() != targets.len() {
            return Err(ClassifierError::LengthMismatch {
                features: features.len(),
                targets: targets.len(),
            });
        }
        if features.is_empty() {
            return Err(ClassifierError::Empty);
        }
        if let Some(index) = features.iter().position(|x| !x.is_finite()) {
            return Err(ClassifierError::NonFiniteFeature { index });
        }
        let positives = targets.iter().filter(|t| **t).count();
        if positives == 0 || positives == targets.len() {
            return Err(ClassifierError::SingleClass { label: targets[0] });
        }

        let mut order: Vec<usize> = (0..features.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        order.shuffle(&mut rng);

        let problem = Problem {
            rows: order
                .into_iter()
                .map(|i| (features[i], if targets[i] { 1.0 } else { -1.0 }))
                .collect(),
            c: config.c,
        };

        let mut w = [0.0f64; 2];
        let mut loss = problem.objective(w);
        let initial_grad_norm = norm(problem.gradient(w));
        let mut iterations = 0;
        let mut converged = false;

        while iterations < config.max_iter {
            let grad = problem.gradient(w);
            if norm(grad) <= config.tolerance * initial_grad_norm {
                converged = true;
                break;
            }
            iterations += 1;

            let step = solve_2x2(problem.hessian(w), grad);
            let slope = -(grad[0] * step[0] + grad[1] * step[1]);

            let mut scale = 1.0;
            let mut accepted = false;
            for _ in 0..LINE_SEARCH_MAX_HALVINGS {
                let candidate = [w[0] - scale * step[0], w[1] - scale * step[1]];
                let candidate_loss = problem.objective(candidate);
                if candidate_loss <= loss + LINE_SEARCH_ALPHA * scale * slope {
                    w = candidate;
                    loss = candidate_loss;
                    accepted = true;
                    break;
                }
                scale *= 0.5;
            }
            if !accepted {
                debug!(iterations, "Line search stalled, stopping Newton iterations");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                max_iter = config.max_iter,
                "Logistic regression did not converge; using last iterate"
            );
        }

        debug!(
            weight = w[0],
            intercept = w[1],
            iterations,
            objective = loss,
            "Logistic regression fitted"
        );

        Ok(Self {
            weight: w[0],
            intercept: w[1],
            iterations,
        })
    }

    /// Builds a model from known coefficients.
    pub fn from_coefficients(weight: f64, intercept: f64) -> Self {
        Self {
            weight,
            intercept,
            iterations: 0,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Newton iterations taken during `fit` (0 for [`from_coefficients`](Self::from_coefficients)).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn decision_function(&self, x: f64) -> f64 {
        self.weight * x + self.intercept
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: f64) -> f64 {
        sigmoid(self.decision_function(x))
    }

    pub fn predict(&self, x: f64) -> bool {
        self.decision_function(x) > 0.0
    }

    pub fn predict_many(&self, xs: &[f64]) -> Vec<bool> {
        xs.iter().map(|x| self.predict(*x)).collect()
    }

    /// Similarity at which the prediction flips (`None` for a flat model).
    pub fn decision_boundary(&self) -> Option<f64> {
        if self.weight == 0.0 {
            None
        } else {
            Some(-self.intercept / self.weight)
        }
    }
}

/// Rows as `(x, y)` with `y` in `{-1, 1}`, already in visiting order.
struct Problem {
    rows: Vec<(f64, f64)>,
    c: f64,
}

impl Problem {
    fn objective(&self, w: [f64; 2]) -> f64 {
        let data: f64 = self
            .rows
            .iter()
            .map(|(x, y)| log1p_exp(-y * (w[0] * x + w[1])))
            .sum();
        0.5 * (w[0] * w[0] + w[1] * w[1]) + self.c * data
    }

    fn gradient(&self, w: [f64; 2]) -> [f64; 2] {
        let mut g = [0.0, 0.0];
        for (x, y) in &self.rows {
            let coef = (sigmoid(y * (w[0] * x + w[1])) - 1.0) * y;
            g[0] += coef * x;
            g[1] += coef;
        }
        [w[0] + self.c * g[0], w[1] + self.c * g[1]]
    }

    /// Row-major `[h00, h01, h11]` of the symmetric Hessian.
    fn hessian(&self, w: [f64; 2]) -> [f64; 3] {
        let mut h = [0.0, 0.0, 0.0];
        for (x, _) in &self.rows {
            let p = sigmoid(w[0] * x + w[1]);
            let d = p * (1.0 - p);
            h[0] += d * x * x;
            h[1] += d * x;
            h[2] += d;
        }
        [1.0 + self.c * h[0], self.c * h[1], 1.0 + self.c * h[2]]
    }
}

/// Solves `H s = g` for the symmetric positive-definite 2x2 `H`.
fn solve_2x2(h: [f64; 3], g: [f64; 2]) -> [f64; 2] {
    let det = h[0] * h[2] - h[1] * h[1];
    [
        (h[2] * g[0] - h[1] * g[1]) / det,
        (h[0] * g[1] - h[1] * g[0]) / det,
    ]
}

fn norm(v: [f64; 2]) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn log1p_exp(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}
