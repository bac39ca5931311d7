//! Random-forest classifier evaluated from exported node arrays.
//!
//! Each tree is stored the way tree learners lay it out internally: parallel arrays indexed by
//! node id, with `-1` children marking a leaf and per-node class weights in `value`.

use super::scorer::Scorer;
use crate::error::{FraudError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;
const N_CLASSES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Class weights (counts or fractions) per node, `[n_nodes][2]`.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF || r == LEAF {
                if l != r {
                    return Err(format!("node {} has a single child", i));
                }
                let v = &self.value[i];
                if v.len() != N_CLASSES {
                    return Err(format!(
                        "leaf {} has {} class weights, expected {}",
                        i,
                        v.len(),
                        N_CLASSES
                    ));
                }
                if v.iter().any(|w| !w.is_finite() || *w < 0.0) || v.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {} has invalid class weights", i));
                }
                continue;
            }
            // children always come after their parent, so traversal terminates
            for child in [l, r] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!(
                        "node {} has out-of-range child {}",
                        i, child
                    ));
                }
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!(
                    "node {} splits on feature {} but the model has {} columns",
                    i, f, n_features
                ));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {} has a non-finite threshold", i));
            }
        }
        Ok(())
    }

    /// Positive-class fraction at the leaf reached by `x`.
    fn predict_proba(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                let v = &self.value[node];
                return v[1] / (v[0] + v[1]);
            }
            // split thresholds were learned on single-precision inputs
            let xv = x[self.feature[node] as usize] as f32 as f64;
            node = if xv <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Mean of per-tree positive-class probabilities.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(trees: Vec<DecisionTree>, n_features: usize) -> Result<Self> {
        if trees.is_empty() {
            return Err(FraudError::artifact("random forest has no trees"));
        }
        for (i, t) in trees.iter().enumerate() {
            t.validate(n_features)
                .map_err(|e| FraudError::artifact(format!("tree {}: {}", i, e)))?;
        }
        Ok(Self { trees, n_features })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Scorer for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(FraudError::scoring(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}
