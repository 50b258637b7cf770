//! Decision-tree ensemble exported from a trained random forest.
//!
//! Each tree is a flat node list. A split sends the row to `left` when
//! `features[feature] <= threshold`, otherwise to `right`. Leaves carry
//! per-class weights; the forest averages the normalized leaf
//! distributions and predicts the first class with the highest mean.

use super::{Classifier, FallbackError};
use crate::error::TacticaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Follow splits from the root to a leaf.
    ///
    /// The walk is capped at one visit per node, so a cycle in a malformed
    /// tree ends in an error instead of looping forever.
    fn leaf_for(&self, features: &[f64]) -> Result<&[f64], FallbackError> {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(value.as_slice()),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or_else(|| {
                        FallbackError::MalformedModel(format!("split on missing feature {}", feature))
                    })?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(FallbackError::MalformedModel(format!(
                        "node index {} out of bounds",
                        idx
                    )))
                }
            }
        }
        Err(FallbackError::MalformedModel(
            "tree walk did not reach a leaf".into(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl DecisionForest {
    /// Parse and validate a forest from its JSON export.
    pub fn from_json_str(json: &str) -> Result<Self, TacticaError> {
        let forest: DecisionForest = serde_json::from_str(json)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Check structural soundness: every index in bounds, every leaf sized to
    /// `n_classes` with finite, non-negative, non-zero weight.
    pub fn validate(&self) -> Result<(), TacticaError> {
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(TacticaError::ArtifactInvalid(
                "n_features and n_classes must be positive".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(TacticaError::ArtifactInvalid(
                "forest has no trees".into(),
            ));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(TacticaError::ArtifactInvalid(format!(
                    "tree {} has no nodes",
                    t
                )));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                match node {
                    TreeNode::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= self.n_features {
                            return Err(TacticaError::ArtifactInvalid(format!(
                                "tree {} node {} splits on feature {} (model has {})",
                                t, n, feature, self.n_features
                            )));
                        }
                        if !threshold.is_finite() {
                            return Err(TacticaError::ArtifactInvalid(format!(
                                "tree {} node {} has a non-finite threshold",
                                t, n
                            )));
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(TacticaError::ArtifactInvalid(format!(
                                "tree {} node {} points outside the tree",
                                t, n
                            )));
                        }
                    }
                    TreeNode::Leaf { value } => {
                        if value.len() != self.n_classes {
                            return Err(TacticaError::ArtifactInvalid(format!(
                                "tree {} leaf {} has {} weights (model has {} classes)",
                                t,
                                n,
                                value.len(),
                                self.n_classes
                            )));
                        }
                        if value.iter().any(|w| !w.is_finite() || *w < 0.0)
                            || value.iter().sum::<f64>() <= 0.0
                        {
                            return Err(TacticaError::ArtifactInvalid(format!(
                                "tree {} leaf {} has invalid weights",
                                t, n
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, FallbackError> {
        if features.len() != self.n_features {
            return Err(FallbackError::FeatureCount {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(FallbackError::MalformedModel("forest has no trees".into()));
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(features)?;
            let total: f64 = leaf.iter().sum();
            if leaf.len() != self.n_classes || total <= 0.0 {
                return Err(FallbackError::MalformedModel(
                    "leaf weights do not form a distribution".into(),
                ));
            }
            for (p, w) in proba.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n_trees;
        }
        Ok(proba)
    }
}

impl Classifier for DecisionForest {
    fn predict(&self, features: &[f64]) -> Result<usize, FallbackError> {
        let proba = self.predict_proba(features)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        log::debug!("forest vote {:?} -> class {}", proba, best);
        Ok(best)
    }

    fn model_name(&self) -> &str {
        "decision_forest"
    }
}
